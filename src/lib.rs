//! Declarative multi-track audio/video composition model.
//!
//! Callers describe an edit as a tree — [`Timeline`] → [`Group`] →
//! [`Track`]/[`Composition`] → [`Clip`]/effects/transitions — then hand the
//! finished tree to a rendering engine through the [`render`] boundary.
//!
//! Clips may be inserted at arbitrary, possibly overlapping offsets; each
//! track's [`VirtualClipCollection`] maintains the non-overlapping,
//! time-ordered view of what actually plays. Sibling order everywhere is a
//! dense integer priority, and every mutation raises notifications that
//! bubble up to the timeline.
//!
//! The model is single-threaded and synchronous: every `add_*` call
//! completes its validation, mutation, overlap resolution, and notification
//! cascade before returning.

pub mod core;
pub mod render;
pub mod timeline;

pub use crate::core::error::{ModelError, ResourceError, ValidationError};
pub use crate::core::time::Seconds;
pub use crate::render::{RenderError, Renderer, TimelineDocument};
pub use crate::timeline::{
    Clip, ClipId, Composition, CompositionContainer, Effect, EffectContainer, EffectDefinition,
    EventHub, Group, GroupFormat, GroupKind, InsertMode, IntervalMode, ItemKind, ListenerId,
    MediaAssistant, MediaFile, MediaKind, Parameter, Timeline, TimelineEvent, Track,
    TrackContainer, Transition, TransitionContainer, VideoFormat, VirtualClip,
    VirtualClipCollection,
};
