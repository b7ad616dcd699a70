//! Kit conversion pipeline
//!
//! Turns authored scene hierarchies into the platform's canonical kit
//! layout and persists them as reusable prefab assets:
//!
//! - [`ConvertPolicy`] - Immutable per-batch policy snapshot
//! - [`rearrange`] - Rebuild one object into the `model` + `collider` layout
//! - [`translate`] - Copy one collider across representations
//! - [`normalize`] - Policy-gated local transform resets
//! - [`capture_preview`] - Bounded preview polling and PNG screenshots
//! - [`KitConverter`] - The batch driver tying it all together
//!
//! All operations run on the caller's thread; the only suspension point is
//! the bounded preview poll. Per-item problems surface as
//! [`ConvertWarning`]s and never abort a batch.

mod policy;
mod warning;
mod translate;
mod normalize;
mod adjust;
mod rearrange;
mod preview;
mod batch;

pub use policy::{ConvertPolicy, NormalizeFlags, ShaderSelect, COLLIDER_LAYER};
pub use warning::ConvertWarning;
pub use translate::{
    attach_default_box, collect_colliders, strip_colliders, translate, ColliderCapture,
    SUB_COLLIDER_NAME,
};
pub use normalize::normalize;
pub use adjust::{clear_static_recursive, set_lights_realtime, substitute_shader};
pub use rearrange::{
    rearrange, sanitize_name, RearrangeResult, COLLIDER_NODE_NAME, MODEL_NODE_NAME,
};
pub use preview::{
    capture_preview, key_background, NullPreviewSource, PreviewError, PreviewSource,
    PREVIEW_POLL_ATTEMPTS, PREVIEW_POLL_INTERVAL, SCREENSHOT_DIR,
};
pub use batch::{
    run_batch, BatchError, BatchReport, ItemReport, KitConverter, LogProgress, ProgressSink,
    KIT_FILE_EXTENSION,
};
