//! Renderer adapter boundary.
//!
//! The engine that decodes, mixes, and encodes media is an external
//! collaborator. The model crosses this boundary exactly once: a finalized
//! timeline is handed over read-only, and the adapter reproduces it as a
//! [`TimelineDocument`](crate::render::TimelineDocument) or translates it
//! directly for its engine. Engine handle types never leak into the model.

use crate::timeline::timeline::Timeline;

/// Error type for the rendering boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// The adapter was used outside its valid lifecycle phase
    /// (e.g. render requested twice, or after cancellation).
    #[error("renderer is {phase}, cannot {operation}")]
    InvalidState {
        phase: &'static str,
        operation: &'static str,
    },

    /// The adapter's engine rejected the description.
    #[error("engine rejected timeline: {0}")]
    Rejected(String),
}

/// An adapter that consumes a finalized timeline.
///
/// The tree must be fully built before it is handed over; mutating it
/// concurrently with an in-progress render is undefined and must be
/// prevented by the caller.
pub trait Renderer {
    type Output;

    fn render(&mut self, timeline: &Timeline) -> Result<Self::Output, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::document::TimelineDocument;
    use crate::timeline::group::GroupFormat;

    /// Minimal adapter: reproduces the timeline as its document.
    struct DocumentRenderer {
        finished: bool,
    }

    impl Renderer for DocumentRenderer {
        type Output = TimelineDocument;

        fn render(&mut self, timeline: &Timeline) -> Result<TimelineDocument, RenderError> {
            if self.finished {
                return Err(RenderError::InvalidState {
                    phase: "finished",
                    operation: "render",
                });
            }
            self.finished = true;
            Ok(TimelineDocument::build(timeline))
        }
    }

    #[test]
    fn test_render_once() {
        let mut timeline = Timeline::new();
        timeline
            .add_group(Some("a"), -1, GroupFormat::Audio { fps: 30.0 })
            .unwrap();

        let mut renderer = DocumentRenderer { finished: false };
        let doc = renderer.render(&timeline).unwrap();
        assert_eq!(doc.groups.len(), 1);

        let err = renderer.render(&timeline).unwrap_err();
        assert!(matches!(err, RenderError::InvalidState { .. }));
    }
}
