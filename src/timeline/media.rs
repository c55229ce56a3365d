//! Source-media metadata and the pluggable media-file assistant interface.
//!
//! Duration discovery for a media file is an external collaborator's job; the
//! model only carries the metadata it is handed. Assistants let callers hook
//! scoped pre-processing (e.g. a transient format conversion) into every clip
//! insertion, with a guaranteed release of the scope before the call returns.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::core::error::{ModelError, ResourceError, ValidationError};
use crate::core::time::{self, Seconds};

/// Metadata for one source media file: filename plus natural length.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    path: PathBuf,
    /// Natural length of the underlying media in seconds.
    length: Seconds,
}

impl MediaFile {
    /// Create media metadata.
    ///
    /// The path must be non-empty and the length positive, or the
    /// [`time::UNSPECIFIED`] sentinel when the length is not yet known.
    pub fn new<P: Into<PathBuf>>(path: P, length: Seconds) -> Result<Self, ModelError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyIdentifier { field: "filename" }.into());
        }
        if length != time::UNSPECIFIED && length <= 0.0 {
            return Err(ResourceError::InvalidMediaLength { path, length }.into());
        }
        Ok(Self { path, length })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Natural length in seconds, or [`time::UNSPECIFIED`].
    pub fn length(&self) -> Seconds {
        self.length
    }
}

/// Scoped handle returned by [`MediaAssistant::assist`]; released on drop.
///
/// Release is guaranteed: clip insertion drops every handle before it
/// returns, in the presence of success or failure.
pub trait AssistScope {}

/// No-op scope for assistants with nothing to release.
pub struct NullScope;

impl AssistScope for NullScope {}

/// A pluggable pre-processor consulted by every clip insertion.
///
/// Registered against the timeline; each assistant declaring interest via
/// [`will_assist`](Self::will_assist) is invoked in registration order and may
/// substitute the media reference it is handed.
pub trait MediaAssistant {
    /// Identifier used in error reporting.
    fn name(&self) -> &str;

    /// True if this assistant wants to pre-process the given media.
    fn will_assist(&self, media: &MediaFile) -> bool;

    /// Wrap the reference with scoped pre-processing, returning the possibly
    /// substituted media and a handle released after clip creation.
    fn assist(&mut self, media: MediaFile)
        -> Result<(MediaFile, Box<dyn AssistScope>), ModelError>;
}

/// Shared registry of assistants, cloned down the tree at container creation
/// so every track's clip insertion can consult it.
#[derive(Clone, Default)]
pub struct AssistantRegistry {
    inner: Rc<RefCell<Vec<Box<dyn MediaAssistant>>>>,
}

impl AssistantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, assistant: Box<dyn MediaAssistant>) {
        self.inner.borrow_mut().push(assistant);
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Run every interested assistant over `media` in registration order.
    ///
    /// Returns the final (possibly wrapped) reference plus the scopes keeping
    /// the pre-processing alive; the caller drops the scopes once the clip
    /// exists. On error the scopes accumulated so far are dropped here, so
    /// release happens on failure too.
    pub(crate) fn run(
        &self,
        media: MediaFile,
    ) -> Result<(MediaFile, Vec<Box<dyn AssistScope>>), ModelError> {
        let mut current = media;
        let mut scopes = Vec::new();
        for assistant in self.inner.borrow_mut().iter_mut() {
            if assistant.will_assist(&current) {
                let (next, scope) = assistant.assist(current)?;
                current = next;
                scopes.push(scope);
            }
        }
        Ok((current, scopes))
    }
}

impl std::fmt::Debug for AssistantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantRegistry")
            .field("assistants", &self.inner.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_file_validation() {
        assert!(MediaFile::new("clip.mp4", 12.0).is_ok());
        assert!(MediaFile::new("clip.mp4", time::UNSPECIFIED).is_ok());
        assert!(MediaFile::new("", 12.0).is_err());
        assert!(MediaFile::new("clip.mp4", 0.0).is_err());
        assert!(MediaFile::new("clip.mp4", -3.0).is_err());
    }

    struct Renamer {
        interested: bool,
    }

    impl MediaAssistant for Renamer {
        fn name(&self) -> &str {
            "renamer"
        }
        fn will_assist(&self, _media: &MediaFile) -> bool {
            self.interested
        }
        fn assist(
            &mut self,
            media: MediaFile,
        ) -> Result<(MediaFile, Box<dyn AssistScope>), ModelError> {
            let wrapped = MediaFile::new(
                format!("{}.wrapped", media.path().display()),
                media.length(),
            )?;
            Ok((wrapped, Box::new(NullScope)))
        }
    }

    #[test]
    fn test_registry_runs_interested_assistants_in_order() {
        let registry = AssistantRegistry::new();
        registry.register(Box::new(Renamer { interested: true }));
        registry.register(Box::new(Renamer { interested: false }));
        registry.register(Box::new(Renamer { interested: true }));

        let media = MediaFile::new("a.mp4", 5.0).unwrap();
        let (result, scopes) = registry.run(media).unwrap();
        assert_eq!(result.path(), Path::new("a.mp4.wrapped.wrapped"));
        assert_eq!(scopes.len(), 2);
    }

    struct Failing;

    impl MediaAssistant for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        fn will_assist(&self, _media: &MediaFile) -> bool {
            true
        }
        fn assist(
            &mut self,
            _media: MediaFile,
        ) -> Result<(MediaFile, Box<dyn AssistScope>), ModelError> {
            Err(ResourceError::AssistantFailed {
                assistant: "failing".into(),
                reason: "conversion unavailable".into(),
            }
            .into())
        }
    }

    #[test]
    fn test_registry_propagates_failure() {
        let registry = AssistantRegistry::new();
        registry.register(Box::new(Renamer { interested: true }));
        registry.register(Box::new(Failing));

        let media = MediaFile::new("a.mp4", 5.0).unwrap();
        assert!(registry.run(media).is_err());
    }
}
