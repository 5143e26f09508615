//! Metadata engine error types.

use thiserror::Error;

/// Errors raised by the container registry and its helpers.
///
/// Element-resolution misses are deliberately NOT errors; they are expected
/// states handled by fallback or skip logic in the breadcrumb builder.
#[derive(Debug, Error)]
pub enum MetaError {
    /// An item was added against a container key that was never created.
    /// This signals a misconfiguration and must stay loud.
    #[error("meta container with key `{key}` does not exist")]
    ContainerNotFound { key: String },

    /// A string-typed container kind (bundle file, CLI flag) did not match
    /// any of the five recognized kinds.
    #[error("unrecognized container kind `{0}`")]
    UnknownContainerKind(String),

    /// An item could not be serialized for content-hash keying.
    #[error("failed to serialize meta item for content keying")]
    ItemSerialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_not_found_carries_key() {
        let err = MetaError::ContainerNotFound {
            key: "metahead.tag.general".into(),
        };
        assert!(format!("{err}").contains("metahead.tag.general"));
    }

    #[test]
    fn test_unknown_kind_display() {
        let err = MetaError::UnknownContainerKind("widget".into());
        assert!(format!("{err}").contains("widget"));
    }
}
