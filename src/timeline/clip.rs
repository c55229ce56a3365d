//! Clip: an immutable-after-creation record of one placed media reference.

use crate::core::error::ModelError;
use crate::core::time::Seconds;
use crate::timeline::effect::{EffectDefinition, EffectRack};
use crate::timeline::media::MediaFile;

/// Unique identifier for a clip, scoped to its track.
pub type ClipId = u64;

/// Kind of media a clip references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
    /// Still image; defaults to one second when no end is given.
    Image,
}

/// How a clip's offset argument is interpreted at insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// Offset is measured from the track's current end.
    Relative,
    /// Offset is an absolute timeline position.
    Absolute,
}

/// A placed reference to a span of source media.
///
/// All fields are fixed at creation; the resolved, conflict-free view of what
/// actually plays lives in the owning track's virtual clip collection.
#[derive(Debug, Clone)]
pub struct Clip {
    id: ClipId,
    name: Option<String>,
    /// Position on the timeline, seconds, >= 0.
    offset: Seconds,
    /// Length on the timeline, seconds, > 0.
    duration: Seconds,
    /// Offset into the source media at which playback begins.
    media_start: Seconds,
    kind: MediaKind,
    media: MediaFile,
    effects: EffectRack,
}

impl Clip {
    pub(crate) fn new(
        id: ClipId,
        name: Option<String>,
        offset: Seconds,
        duration: Seconds,
        media_start: Seconds,
        kind: MediaKind,
        media: MediaFile,
    ) -> Self {
        Self {
            id,
            name,
            offset,
            duration,
            media_start,
            kind,
            media,
            effects: EffectRack::new(),
        }
    }

    pub fn id(&self) -> ClipId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn offset(&self) -> Seconds {
        self.offset
    }

    pub fn duration(&self) -> Seconds {
        self.duration
    }

    /// End position on the timeline.
    pub fn end(&self) -> Seconds {
        self.offset + self.duration
    }

    pub fn media_start(&self) -> Seconds {
        self.media_start
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn media(&self) -> &MediaFile {
        &self.media
    }

    /// Effects applied to this clip alone.
    pub fn effects(&self) -> &EffectRack {
        &self.effects
    }

    /// Add an effect scoped to this clip. Returns the resolved priority.
    pub fn add_effect(
        &mut self,
        name: Option<&str>,
        priority: i32,
        offset: Seconds,
        duration: Seconds,
        definition: EffectDefinition,
    ) -> Result<i32, ModelError> {
        Ok(self
            .effects
            .insert(name.map(str::to_owned), priority, offset, duration, definition)?)
    }
}
