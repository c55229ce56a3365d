//! Group: a top-level composition scoped to one media kind, carrying the
//! group-wide media parameters.

use crate::core::error::{ModelError, ValidationError};
use crate::core::time::Seconds;
use crate::timeline::clip::{Clip, InsertMode, MediaKind};
use crate::timeline::composition::{Composition, ContainerBody};
use crate::timeline::containers::{
    CompositionContainer, EffectContainer, TrackContainer, TransitionContainer,
};
use crate::timeline::effect::{EffectDefinition, EffectRack, TransitionBank};
use crate::timeline::events::EventHub;
use crate::timeline::media::{AssistantRegistry, MediaFile};
use crate::timeline::priority::Prioritized;
use crate::timeline::track::Track;

/// Media kind of a group: one group mixes audio or video, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Audio,
    Video,
}

/// Video-specific group parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct VideoFormat {
    pub bit_depth: u32,
    pub width: u32,
    pub height: u32,
}

/// Parameters for creating a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroupFormat {
    Audio { fps: f64 },
    Video { fps: f64, format: VideoFormat },
}

impl GroupFormat {
    pub fn kind(&self) -> GroupKind {
        match self {
            GroupFormat::Audio { .. } => GroupKind::Audio,
            GroupFormat::Video { .. } => GroupKind::Video,
        }
    }

    pub fn fps(&self) -> f64 {
        match self {
            GroupFormat::Audio { fps } | GroupFormat::Video { fps, .. } => *fps,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        let fps = self.fps();
        if fps <= 0.0 {
            return Err(ValidationError::InvalidFrameRate { fps });
        }
        if let GroupFormat::Video { format, .. } = self {
            if format.width == 0 {
                return Err(ValidationError::OutOfRange {
                    field: "width",
                    value: format.width as f64,
                    min: 1.0,
                    max: f64::MAX,
                });
            }
            if format.height == 0 {
                return Err(ValidationError::OutOfRange {
                    field: "height",
                    value: format.height as f64,
                    min: 1.0,
                    max: f64::MAX,
                });
            }
        }
        Ok(())
    }
}

/// A top-level composition for one media kind, with group-wide parameters.
#[derive(Debug)]
pub struct Group {
    body: ContainerBody,
    fps: f64,
    video: Option<VideoFormat>,
    priority: i32,
}

impl Group {
    pub(crate) fn new(
        name: Option<String>,
        format: GroupFormat,
        parent_events: &EventHub,
        assistants: AssistantRegistry,
    ) -> Self {
        let hub = EventHub::new();
        hub.bubble_to(parent_events);
        let video = match format {
            GroupFormat::Video { format, .. } => Some(format),
            GroupFormat::Audio { .. } => None,
        };
        Self {
            body: ContainerBody::new(name, format.kind(), hub, assistants),
            fps: format.fps(),
            video,
            priority: 0,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.body.name()
    }

    pub fn kind(&self) -> GroupKind {
        self.body.kind()
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Video parameters; `None` for audio groups.
    pub fn video_format(&self) -> Option<&VideoFormat> {
        self.video.as_ref()
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Notification hub for this group.
    pub fn events(&self) -> &EventHub {
        self.body.events()
    }

    /// Place a clip on the first track of this group.
    ///
    /// Convenience form delegating to [`Track::add_clip`]; fails with a
    /// validation error if the group holds no track or the media kind does
    /// not match the group.
    pub fn add_clip(
        &mut self,
        name: Option<&str>,
        media: MediaFile,
        kind: MediaKind,
        mode: InsertMode,
        offset: Seconds,
        clip_start: Seconds,
        clip_end: Seconds,
    ) -> Result<&Clip, ModelError> {
        let accepts = match kind {
            MediaKind::Audio => self.kind() == GroupKind::Audio,
            MediaKind::Video | MediaKind::Image => self.kind() == GroupKind::Video,
        };
        if !accepts {
            return Err(ValidationError::MediaKindMismatch {
                clip: kind,
                group: self.kind(),
            }
            .into());
        }
        let track = self
            .body
            .track_mut(0)
            .ok_or(ValidationError::NoSuitableTrack { kind })?;
        track.add_clip(name, media, kind, mode, offset, clip_start, clip_end)
    }
}

impl Prioritized for Group {
    fn priority(&self) -> i32 {
        self.priority
    }
    fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }
}

impl TrackContainer for Group {
    fn add_track(&mut self, name: Option<&str>, priority: i32) -> Result<&mut Track, ModelError> {
        self.body.add_track(name, priority)
    }

    fn tracks(&self) -> &[Track] {
        self.body.tracks()
    }

    fn track_mut(&mut self, index: usize) -> Option<&mut Track> {
        self.body.track_mut(index)
    }
}

impl CompositionContainer for Group {
    fn add_composition(
        &mut self,
        name: Option<&str>,
        priority: i32,
    ) -> Result<&mut Composition, ModelError> {
        self.body.add_composition(name, priority)
    }

    fn compositions(&self) -> &[Composition] {
        self.body.compositions()
    }

    fn composition_mut(&mut self, index: usize) -> Option<&mut Composition> {
        self.body.composition_mut(index)
    }
}

impl EffectContainer for Group {
    fn add_effect(
        &mut self,
        name: Option<&str>,
        priority: i32,
        offset: Seconds,
        duration: Seconds,
        definition: EffectDefinition,
    ) -> Result<i32, ModelError> {
        self.body.add_effect(name, priority, offset, duration, definition)
    }

    fn effects(&self) -> &EffectRack {
        self.body.effects()
    }
}

impl TransitionContainer for Group {
    fn add_transition(
        &mut self,
        name: Option<&str>,
        offset: Seconds,
        duration: Seconds,
        definition: EffectDefinition,
    ) -> Result<(), ModelError> {
        self.body.add_transition(name, offset, duration, definition)
    }

    fn transitions(&self) -> &TransitionBank {
        self.body.transitions()
    }
}
