//! Error taxonomy for the composition model.
//!
//! Every validation check runs and fails before any mutation of shared state.
//! The model is deterministic, in-memory, and synchronous, so all failures are
//! programmer/input errors surfaced immediately to the caller, never retried.

use std::path::PathBuf;

use crate::timeline::clip::MediaKind;
use crate::timeline::group::GroupKind;

/// Validation failures: bad input rejected before any mutation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Clip media kind does not match the owning group's kind.
    #[error("{clip:?} media cannot be placed in a {group:?} group")]
    MediaKindMismatch { clip: MediaKind, group: GroupKind },

    /// A convenience insertion found no track of the required kind.
    #[error("no track accepts {kind:?} media")]
    NoSuitableTrack { kind: MediaKind },

    /// A required identifier was empty.
    #[error("{field} must not be empty")]
    EmptyIdentifier { field: &'static str },

    /// A numeric argument fell outside its allowed range.
    #[error("{field} is {value}, expected range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A clip resolved to a non-positive duration.
    #[error("clip duration resolved to {duration}, expected > 0")]
    InvalidDuration { duration: f64 },

    /// A clip offset or media start was negative.
    #[error("{field} is {value}, expected >= 0")]
    NegativeTime { field: &'static str, value: f64 },

    /// A frame rate was zero or negative.
    #[error("frame rate is {fps}, expected > 0")]
    InvalidFrameRate { fps: f64 },

    /// Prospective transition interval intersects a registered transition.
    #[error("transition overlaps existing transition at index {index}")]
    TransitionOverlap { index: usize },
}

/// Resource failures surfaced from the media-metadata collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResourceError {
    /// The media reference reports a zero or negative natural length.
    #[error("media {path:?} reports invalid length {length}")]
    InvalidMediaLength { path: PathBuf, length: f64 },

    /// A media assistant failed while pre-processing a reference.
    #[error("media assistant {assistant} failed: {reason}")]
    AssistantFailed { assistant: String, reason: String },
}

/// Top-level error type for model operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("resource: {0}")]
    Resource(#[from] ResourceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ValidationError::MediaKindMismatch {
            clip: MediaKind::Audio,
            group: GroupKind::Video,
        };
        assert!(err.to_string().contains("Audio"));
        assert!(err.to_string().contains("Video"));

        let err = ValidationError::TransitionOverlap { index: 2 };
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_conversion_to_model_error() {
        let err: ModelError = ValidationError::InvalidDuration { duration: 0.0 }.into();
        assert!(matches!(err, ModelError::Validation(_)));

        let err: ModelError = ResourceError::InvalidMediaLength {
            path: PathBuf::from("a.wav"),
            length: -3.0,
        }
        .into();
        assert!(matches!(err, ModelError::Resource(_)));
    }
}
