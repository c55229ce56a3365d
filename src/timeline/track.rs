//! Track: an ordered holder of clips for one lane of a group or composition.
//!
//! A track keeps two views of its clips: the raw list in insertion order, and
//! the resolved [`VirtualClipCollection`] in playback order. Every insertion
//! feeds both.

use log::debug;

use crate::core::error::{ModelError, ResourceError, ValidationError};
use crate::core::time::{self, Seconds};
use crate::timeline::clip::{Clip, ClipId, InsertMode, MediaKind};
use crate::timeline::effect::{EffectDefinition, EffectRack, TransitionBank};
use crate::timeline::events::{EventHub, ItemKind, TimelineEvent};
use crate::timeline::group::GroupKind;
use crate::timeline::media::{AssistantRegistry, MediaFile};
use crate::timeline::priority::Prioritized;
use crate::timeline::virtual_clips::VirtualClipCollection;

/// One lane of clips inside a group or composition.
#[derive(Debug)]
pub struct Track {
    name: Option<String>,
    /// Media kind of the owning group; validates every clip insertion.
    kind: GroupKind,
    clips: Vec<Clip>,
    virtual_clips: VirtualClipCollection,
    effects: EffectRack,
    transitions: TransitionBank,
    events: EventHub,
    assistants: AssistantRegistry,
    priority: i32,
    next_clip_id: ClipId,
}

impl Track {
    pub(crate) fn new(
        name: Option<String>,
        kind: GroupKind,
        events: EventHub,
        assistants: AssistantRegistry,
    ) -> Self {
        Self {
            name,
            kind,
            clips: Vec::new(),
            virtual_clips: VirtualClipCollection::new(),
            effects: EffectRack::new(),
            transitions: TransitionBank::new(),
            events,
            assistants,
            priority: 0,
            next_clip_id: 0,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Media kind this lane accepts (image clips count as video).
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Raw clips, in insertion order.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// The resolved, non-overlapping playback view.
    pub fn virtual_clips(&self) -> &VirtualClipCollection {
        &self.virtual_clips
    }

    pub fn effects(&self) -> &EffectRack {
        &self.effects
    }

    pub fn transitions(&self) -> &TransitionBank {
        &self.transitions
    }

    /// Notification hub for this track.
    pub fn events(&self) -> &EventHub {
        &self.events
    }

    /// Derived duration: max over raw clips of offset + duration.
    pub fn duration(&self) -> Seconds {
        self.clips
            .iter()
            .map(Clip::end)
            .fold(0.0, Seconds::max)
    }

    /// Place a span of source media on this track.
    ///
    /// `offset` is interpreted per `mode` (relative to the track's current
    /// end, or absolute). `clip_start`/`clip_end` select the span of source
    /// media; a negative `clip_end` means "until the end of the media" (one
    /// second past `clip_start` for still images). All validation runs before
    /// any mutation. Returns a reference to the created clip.
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
        let group = self.kind;
        let compatible = match kind {
            MediaKind::Audio => group == GroupKind::Audio,
            MediaKind::Video | MediaKind::Image => group == GroupKind::Video,
        };
        if !compatible {
            return Err(ValidationError::MediaKindMismatch { clip: kind, group }.into());
        }
        if clip_start < 0.0 {
            return Err(ValidationError::NegativeTime {
                field: "clip start",
                value: clip_start,
            }
            .into());
        }

        // Still images default to one second
        let clip_end = if time::is_unspecified(clip_end) && kind == MediaKind::Image {
            clip_start + 1.0
        } else {
            clip_end
        };

        let absolute_offset = match mode {
            InsertMode::Relative => self.duration() + offset,
            InsertMode::Absolute => offset,
        };
        if absolute_offset < 0.0 {
            return Err(ValidationError::NegativeTime {
                field: "clip offset",
                value: absolute_offset,
            }
            .into());
        }

        let duration = if time::is_unspecified(clip_end) {
            if time::is_unspecified(media.length()) {
                return Err(ResourceError::InvalidMediaLength {
                    path: media.path().to_path_buf(),
                    length: media.length(),
                }
                .into());
            }
            media.length() - clip_start
        } else {
            clip_end - clip_start
        };
        if duration <= 0.0 {
            return Err(ValidationError::InvalidDuration { duration }.into());
        }

        self.events.emit(&TimelineEvent::Adding {
            kind: ItemKind::Clip,
            container: self.name.clone(),
        });

        // Scoped pre-processing; every scope is dropped before we return,
        // whether the insertion succeeds or not.
        let (media, scopes) = self.assistants.run(media)?;

        let id = self.next_clip_id;
        self.next_clip_id += 1;
        let clip = Clip::new(
            id,
            name.map(str::to_owned),
            absolute_offset,
            duration,
            clip_start,
            kind,
            media,
        );
        debug!(
            "clip {} at {:.3}s for {:.3}s on track {:?}",
            id, absolute_offset, duration, self.name
        );

        self.virtual_clips.add(&clip);
        self.clips.push(clip);
        let index = self.clips.len() - 1;
        drop(scopes);

        self.events.emit(&TimelineEvent::Added {
            kind: ItemKind::Clip,
            container: self.name.clone(),
            name: name.map(str::to_owned),
            priority: -1,
        });

        Ok(&self.clips[index])
    }

    /// Add an effect to this track. Returns the resolved priority.
    pub fn add_effect(
        &mut self,
        name: Option<&str>,
        priority: i32,
        offset: Seconds,
        duration: Seconds,
        definition: EffectDefinition,
    ) -> Result<i32, ModelError> {
        self.events.emit(&TimelineEvent::Adding {
            kind: ItemKind::Effect,
            container: self.name.clone(),
        });
        let resolved =
            self.effects
                .insert(name.map(str::to_owned), priority, offset, duration, definition)?;
        self.events.emit(&TimelineEvent::Added {
            kind: ItemKind::Effect,
            container: self.name.clone(),
            name: name.map(str::to_owned),
            priority: resolved,
        });
        Ok(resolved)
    }

    /// Add a transition to this track; rejects interval overlap.
    pub fn add_transition(
        &mut self,
        name: Option<&str>,
        offset: Seconds,
        duration: Seconds,
        definition: EffectDefinition,
    ) -> Result<(), ModelError> {
        self.events.emit(&TimelineEvent::Adding {
            kind: ItemKind::Transition,
            container: self.name.clone(),
        });
        self.transitions
            .insert(name.map(str::to_owned), offset, duration, definition)?;
        self.events.emit(&TimelineEvent::Added {
            kind: ItemKind::Transition,
            container: self.name.clone(),
            name: name.map(str::to_owned),
            priority: -1,
        });
        Ok(())
    }
}

impl Prioritized for Track {
    fn priority(&self) -> i32 {
        self.priority
    }
    fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }
}
