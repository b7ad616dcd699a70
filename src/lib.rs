//! Kitforge front end
//!
//! The binary stands in for the host editor's menu command: it loads the
//! layered configuration, reads a scene document, and drives the batch
//! converter from `kitforge_convert`.

pub mod config;
