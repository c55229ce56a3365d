//! The composition model: Timeline → Group → Track/Composition →
//! Clip/Effect/Transition, with priority-ranked siblings, bubbling
//! notifications, and the virtual-clip overlap-resolution engine.

pub mod clip;
pub mod composition;
pub mod containers;
pub mod effect;
pub mod events;
pub mod group;
pub mod media;
pub mod priority;
pub mod track;
#[allow(clippy::module_inception)]
pub mod timeline;
pub mod virtual_clips;

pub use clip::{Clip, ClipId, InsertMode, MediaKind};
pub use composition::Composition;
pub use containers::{CompositionContainer, EffectContainer, TrackContainer, TransitionContainer};
pub use effect::{
    Effect, EffectDefinition, EffectRack, IntervalMode, ParamInterval, Parameter, Transition,
    TransitionBank,
};
pub use events::{EventHub, ItemKind, ListenerId, TimelineEvent};
pub use group::{Group, GroupFormat, GroupKind, VideoFormat};
pub use media::{AssistScope, AssistantRegistry, MediaAssistant, MediaFile, NullScope};
pub use priority::{PriorityList, Prioritized, APPEND};
pub use timeline::{Timeline, DEFAULT_FPS};
pub use track::Track;
pub use virtual_clips::{VirtualClip, VirtualClipCollection};
