//! Per-item recoverable warnings
//!
//! Warnings degrade a single item but never stop it or the batch. They are
//! logged when they occur and collected into the item's report.

/// A recoverable condition encountered while converting one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertWarning {
    /// A source collider uses a representation outside the supported set
    UnsupportedCollider { type_name: String },
    /// The source carries more than one collider
    MultipleColliders { count: usize },
    /// The preview service produced no image within the poll bound
    PreviewTimeout { name: String },
    /// Serializing the kit to disk failed
    SaveFailed { name: String, message: String },
}

impl std::fmt::Display for ConvertWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertWarning::UnsupportedCollider { type_name } => write!(
                f,
                "Unsupported type of collider ({}) for copying. Please use a mesh, box, sphere, capsule or terrain collider.",
                type_name
            ),
            ConvertWarning::MultipleColliders { count } => {
                write!(f, "More than one collider found ({}). Could cause problems.", count)
            }
            ConvertWarning::PreviewTimeout { name } => {
                write!(f, "No preview became available for '{}'; kit saved without a screenshot.", name)
            }
            ConvertWarning::SaveFailed { name, message } => {
                write!(f, "Failed to save kit '{}': {}", name, message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_names_the_type() {
        let w = ConvertWarning::UnsupportedCollider { type_name: "wheel".to_string() };
        assert!(w.to_string().contains("wheel"));
    }

    #[test]
    fn test_multiple_colliders_message() {
        let w = ConvertWarning::MultipleColliders { count: 3 };
        assert!(w.to_string().contains("More than one collider"));
    }
}
