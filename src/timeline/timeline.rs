//! Timeline: the root container owning all groups for one edit.
//!
//! The timeline is the top of the notification-bubbling chain: every event
//! raised anywhere in the tree is re-emitted here. It also owns the media
//! assistant registry consulted by every clip insertion.

use log::debug;

use crate::core::error::{ModelError, ValidationError};
use crate::core::time::Seconds;
use crate::timeline::clip::{Clip, InsertMode, MediaKind};
use crate::timeline::containers::TrackContainer;
use crate::timeline::events::{EventHub, ItemKind, TimelineEvent};
use crate::timeline::group::{Group, GroupFormat, GroupKind};
use crate::timeline::media::{AssistantRegistry, MediaAssistant, MediaFile};
use crate::timeline::priority::PriorityList;

/// Default timeline frame rate in frames per second.
pub const DEFAULT_FPS: f64 = 30.0;

/// The root of one edit: an ordered set of groups plus the global frame rate.
#[derive(Debug)]
pub struct Timeline {
    fps: f64,
    groups: PriorityList<Group>,
    events: EventHub,
    assistants: AssistantRegistry,
}

impl Timeline {
    /// Create a timeline at the default frame rate.
    pub fn new() -> Self {
        Self {
            fps: DEFAULT_FPS,
            groups: PriorityList::new(),
            events: EventHub::new(),
            assistants: AssistantRegistry::new(),
        }
    }

    /// Create a timeline with an explicit frame rate.
    pub fn with_fps(fps: f64) -> Result<Self, ModelError> {
        if fps <= 0.0 {
            return Err(ValidationError::InvalidFrameRate { fps }.into());
        }
        Ok(Self {
            fps,
            ..Self::new()
        })
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Groups in ascending priority order.
    pub fn groups(&self) -> &[Group] {
        self.groups.as_slice()
    }

    pub fn group_mut(&mut self, index: usize) -> Option<&mut Group> {
        self.groups.get_mut(index)
    }

    /// Hub at which every notification in the tree surfaces.
    pub fn events(&self) -> &EventHub {
        &self.events
    }

    /// Register a media assistant consulted by every clip insertion.
    pub fn register_assistant(&mut self, assistant: Box<dyn MediaAssistant>) {
        self.assistants.register(assistant);
    }

    /// Add a group; `priority < 0` appends. Returns the new group.
    pub fn add_group(
        &mut self,
        name: Option<&str>,
        priority: i32,
        format: GroupFormat,
    ) -> Result<&mut Group, ModelError> {
        format.validate()?;

        self.events.emit(&TimelineEvent::Adding {
            kind: ItemKind::Group,
            container: None,
        });

        let group = Group::new(
            name.map(str::to_owned),
            format,
            &self.events,
            self.assistants.clone(),
        );
        let (resolved, index) = self.groups.insert(group, priority);
        debug!("group {:?} ({:?}) at priority {}", name, format.kind(), resolved);

        self.events.emit(&TimelineEvent::Added {
            kind: ItemKind::Group,
            container: None,
            name: name.map(str::to_owned),
            priority: resolved,
        });

        Ok(&mut self.groups[index])
    }

    /// Place a clip on the first track of the first group matching the media
    /// kind (image counts as video).
    ///
    /// Fails with a validation error when no such track exists anywhere.
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
        let wanted = match kind {
            MediaKind::Audio => GroupKind::Audio,
            MediaKind::Video | MediaKind::Image => GroupKind::Video,
        };
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.kind() == wanted && !g.tracks().is_empty());
        match group {
            Some(group) => group.add_clip(name, media, kind, mode, offset, clip_start, clip_end),
            None => Err(ValidationError::NoSuitableTrack { kind }.into()),
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::containers::CompositionContainer;
    use crate::timeline::effect::EffectDefinition;
    use crate::timeline::group::VideoFormat;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn video_format() -> GroupFormat {
        GroupFormat::Video {
            fps: 30.0,
            format: VideoFormat {
                bit_depth: 24,
                width: 1280,
                height: 720,
            },
        }
    }

    fn media() -> MediaFile {
        MediaFile::new("a.mp4", 30.0).unwrap()
    }

    #[test]
    fn test_fps_validation() {
        assert!(Timeline::with_fps(25.0).is_ok());
        assert!(Timeline::with_fps(0.0).is_err());
        assert_eq!(Timeline::new().fps(), DEFAULT_FPS);
    }

    #[test]
    fn test_group_ordering() {
        let mut timeline = Timeline::new();
        timeline.add_group(Some("v"), -1, video_format()).unwrap();
        timeline
            .add_group(Some("a"), 0, GroupFormat::Audio { fps: 30.0 })
            .unwrap();

        let names: Vec<_> = timeline.groups().iter().map(|g| g.name().unwrap()).collect();
        assert_eq!(names, vec!["a", "v"]);
    }

    #[test]
    fn test_convenience_add_clip_picks_matching_group() {
        let mut timeline = Timeline::new();
        timeline
            .add_group(Some("audio"), -1, GroupFormat::Audio { fps: 30.0 })
            .unwrap()
            .add_track(Some("a0"), -1)
            .unwrap();
        timeline
            .add_group(Some("video"), -1, video_format())
            .unwrap()
            .add_track(Some("v0"), -1)
            .unwrap();

        timeline
            .add_clip(None, media(), MediaKind::Video, InsertMode::Absolute, 0.0, 0.0, 5.0)
            .unwrap();

        let video = &timeline.groups()[1];
        assert_eq!(video.tracks()[0].clips().len(), 1);
        let audio = &timeline.groups()[0];
        assert!(audio.tracks()[0].clips().is_empty());
    }

    #[test]
    fn test_convenience_add_clip_fails_without_track() {
        let mut timeline = Timeline::new();
        timeline.add_group(None, -1, video_format()).unwrap();

        let err = timeline.add_clip(
            None,
            media(),
            MediaKind::Video,
            InsertMode::Absolute,
            0.0,
            0.0,
            5.0,
        );
        assert!(matches!(
            err,
            Err(ModelError::Validation(ValidationError::NoSuitableTrack { .. }))
        ));
    }

    #[test]
    fn test_bubbling_from_nested_track() {
        // Effect added at a track 3 levels below the timeline:
        // timeline -> group -> composition -> track
        let mut timeline = Timeline::new();
        let at_timeline = Rc::new(RefCell::new(Vec::new()));
        let sink = at_timeline.clone();
        timeline
            .events()
            .subscribe(move |e| sink.borrow_mut().push(e.clone()));

        let group = timeline.add_group(Some("g"), -1, video_format()).unwrap();
        let at_group = Rc::new(RefCell::new(Vec::new()));
        let sink = at_group.clone();
        group.events().subscribe(move |e| sink.borrow_mut().push(e.clone()));

        let composition = group.add_composition(Some("c"), -1).unwrap();
        let track = composition.add_track(Some("t"), -1).unwrap();

        let at_track = Rc::new(RefCell::new(Vec::new()));
        let sink = at_track.clone();
        track.events().subscribe(move |e| sink.borrow_mut().push(e.clone()));

        track
            .add_effect(Some("fx"), -1, 0.0, 1.0, EffectDefinition::new("engine.blur"))
            .unwrap();

        let effect_afters = |events: &Vec<TimelineEvent>| {
            events
                .iter()
                .filter(|e| e.kind() == ItemKind::Effect && e.is_after())
                .count()
        };
        let effect_befores = |events: &Vec<TimelineEvent>| {
            events
                .iter()
                .filter(|e| e.kind() == ItemKind::Effect && !e.is_after())
                .count()
        };

        // Exactly one before and one after at the track itself
        assert_eq!(effect_befores(&at_track.borrow()), 1);
        assert_eq!(effect_afters(&at_track.borrow()), 1);
        // Exactly one re-emitted after at each ancestor level
        assert_eq!(effect_afters(&at_group.borrow()), 1);
        assert_eq!(effect_afters(&at_timeline.borrow()), 1);
    }

    #[test]
    fn test_clip_insertion_bubbles_to_timeline() {
        let mut timeline = Timeline::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        timeline
            .events()
            .subscribe(move |e| sink.borrow_mut().push(e.clone()));

        timeline
            .add_group(None, -1, video_format())
            .unwrap()
            .add_track(None, -1)
            .unwrap()
            .add_clip(None, media(), MediaKind::Video, InsertMode::Absolute, 0.0, 0.0, 5.0)
            .unwrap();

        let clip_afters = seen
            .borrow()
            .iter()
            .filter(|e| e.kind() == ItemKind::Clip && e.is_after())
            .count();
        assert_eq!(clip_afters, 1);
    }
}
