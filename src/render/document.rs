//! Descriptive document built from a finalized timeline.
//!
//! The rendering engine consumes a declarative description of the edit:
//! `timeline > group > (track | composition) > (clip | effect | transition)`.
//! Clips are emitted from the *resolved* virtual view, so the document never
//! contains overlapping spans. The document carries no engine handle types;
//! adapters serialize or translate it however their engine requires.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::time::Seconds;
use crate::timeline::composition::Composition;
use crate::timeline::containers::{
    CompositionContainer, EffectContainer, TrackContainer, TransitionContainer,
};
use crate::timeline::effect::{Effect, EffectRack, Transition, TransitionBank};
use crate::timeline::group::{Group, GroupKind, VideoFormat};
use crate::timeline::timeline::Timeline;
use crate::timeline::track::Track;

/// One clip element: a span of source media placed in resolved time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipElement {
    pub name: Option<String>,
    pub src: PathBuf,
    /// Resolved start on the timeline, seconds.
    pub start: Seconds,
    /// Resolved stop on the timeline, seconds.
    pub stop: Seconds,
    /// Offset into the source media, seconds.
    pub media_start: Seconds,
}

/// One effect or transition element: opaque id plus parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectElement {
    pub name: Option<String>,
    pub id: String,
    pub offset: Seconds,
    pub duration: Seconds,
    pub parameters: Vec<crate::timeline::effect::Parameter>,
}

/// A track element with its resolved clips.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackElement {
    pub name: Option<String>,
    pub clips: Vec<ClipElement>,
    pub effects: Vec<EffectElement>,
    pub transitions: Vec<EffectElement>,
}

/// A composition element: nested tracks and compositions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionElement {
    pub name: Option<String>,
    pub tracks: Vec<TrackElement>,
    pub compositions: Vec<CompositionElement>,
    pub effects: Vec<EffectElement>,
    pub transitions: Vec<EffectElement>,
}

/// A group element with its media parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupElement {
    pub name: Option<String>,
    pub kind: GroupKind,
    pub fps: f64,
    pub video: Option<VideoFormat>,
    pub tracks: Vec<TrackElement>,
    pub compositions: Vec<CompositionElement>,
    pub effects: Vec<EffectElement>,
    pub transitions: Vec<EffectElement>,
}

/// The root document handed to a renderer adapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineDocument {
    pub fps: f64,
    pub groups: Vec<GroupElement>,
}

impl TimelineDocument {
    /// Build the document by read-only traversal of a finalized timeline.
    pub fn build(timeline: &Timeline) -> Self {
        Self {
            fps: timeline.fps(),
            groups: timeline.groups().iter().map(group_element).collect(),
        }
    }
}

fn group_element(group: &Group) -> GroupElement {
    GroupElement {
        name: group.name().map(str::to_owned),
        kind: group.kind(),
        fps: group.fps(),
        video: group.video_format().copied(),
        tracks: group.tracks().iter().map(track_element).collect(),
        compositions: group.compositions().iter().map(composition_element).collect(),
        effects: effect_elements(EffectContainer::effects(group)),
        transitions: transition_elements(TransitionContainer::transitions(group)),
    }
}

fn composition_element(composition: &Composition) -> CompositionElement {
    CompositionElement {
        name: composition.name().map(str::to_owned),
        tracks: composition.tracks().iter().map(track_element).collect(),
        compositions: composition
            .compositions()
            .iter()
            .map(composition_element)
            .collect(),
        effects: effect_elements(EffectContainer::effects(composition)),
        transitions: transition_elements(TransitionContainer::transitions(composition)),
    }
}

fn track_element(track: &Track) -> TrackElement {
    let clips = track
        .virtual_clips()
        .iter()
        .map(|v| {
            // Name and source path come from the raw clip the entry represents
            let source = track.clips().iter().find(|c| c.id() == v.source);
            ClipElement {
                name: source.and_then(|c| c.name().map(str::to_owned)),
                src: source
                    .map(|c| c.media().path().to_path_buf())
                    .unwrap_or_default(),
                start: v.offset,
                stop: v.end(),
                media_start: v.media_start,
            }
        })
        .collect();

    TrackElement {
        name: track.name().map(str::to_owned),
        clips,
        effects: effect_elements(track.effects()),
        transitions: transition_elements(track.transitions()),
    }
}

fn effect_elements(rack: &EffectRack) -> Vec<EffectElement> {
    rack.iter().map(effect_element).collect()
}

fn effect_element(effect: &Effect) -> EffectElement {
    EffectElement {
        name: effect.name().map(str::to_owned),
        id: effect.definition().id.clone(),
        offset: effect.offset(),
        duration: effect.duration(),
        parameters: effect.definition().parameters.clone(),
    }
}

fn transition_elements(bank: &TransitionBank) -> Vec<EffectElement> {
    bank.iter()
        .map(|t: &Transition| EffectElement {
            name: t.name().map(str::to_owned),
            id: t.definition().id.clone(),
            offset: t.offset(),
            duration: t.duration(),
            parameters: t.definition().parameters.clone(),
        })
        .collect()
}
