//! Capability traits composed per concrete container type.
//!
//! A composition is simultaneously a track-, composition-, effect-, and
//! transition-container, while a track supports only the latter two and a
//! clip only effects. Modeling these as independent capabilities keeps the
//! hierarchy flat instead of a deep inheritance chain.

use crate::core::error::ModelError;
use crate::core::time::Seconds;
use crate::timeline::clip::Clip;
use crate::timeline::composition::Composition;
use crate::timeline::effect::{EffectDefinition, EffectRack, TransitionBank};
use crate::timeline::track::Track;

/// Containers that hold ranked tracks.
pub trait TrackContainer {
    /// Add a track; `priority < 0` appends. Returns the new track.
    fn add_track(&mut self, name: Option<&str>, priority: i32) -> Result<&mut Track, ModelError>;

    /// Tracks in ascending priority order.
    fn tracks(&self) -> &[Track];

    fn track_mut(&mut self, index: usize) -> Option<&mut Track>;
}

/// Containers that hold ranked nested compositions.
pub trait CompositionContainer {
    /// Add a nested composition; `priority < 0` appends.
    fn add_composition(
        &mut self,
        name: Option<&str>,
        priority: i32,
    ) -> Result<&mut Composition, ModelError>;

    /// Nested compositions in ascending priority order.
    fn compositions(&self) -> &[Composition];

    fn composition_mut(&mut self, index: usize) -> Option<&mut Composition>;
}

/// Containers that hold ranked effects.
pub trait EffectContainer {
    /// Add an effect; `priority < 0` appends. Returns the resolved priority.
    fn add_effect(
        &mut self,
        name: Option<&str>,
        priority: i32,
        offset: Seconds,
        duration: Seconds,
        definition: EffectDefinition,
    ) -> Result<i32, ModelError>;

    fn effects(&self) -> &EffectRack;
}

/// Containers that hold transitions guarded against interval overlap.
pub trait TransitionContainer {
    fn add_transition(
        &mut self,
        name: Option<&str>,
        offset: Seconds,
        duration: Seconds,
        definition: EffectDefinition,
    ) -> Result<(), ModelError>;

    fn transitions(&self) -> &TransitionBank;
}

impl EffectContainer for Track {
    fn add_effect(
        &mut self,
        name: Option<&str>,
        priority: i32,
        offset: Seconds,
        duration: Seconds,
        definition: EffectDefinition,
    ) -> Result<i32, ModelError> {
        Track::add_effect(self, name, priority, offset, duration, definition)
    }

    fn effects(&self) -> &EffectRack {
        Track::effects(self)
    }
}

impl TransitionContainer for Track {
    fn add_transition(
        &mut self,
        name: Option<&str>,
        offset: Seconds,
        duration: Seconds,
        definition: EffectDefinition,
    ) -> Result<(), ModelError> {
        Track::add_transition(self, name, offset, duration, definition)
    }

    fn transitions(&self) -> &TransitionBank {
        Track::transitions(self)
    }
}

impl EffectContainer for Clip {
    fn add_effect(
        &mut self,
        name: Option<&str>,
        priority: i32,
        offset: Seconds,
        duration: Seconds,
        definition: EffectDefinition,
    ) -> Result<i32, ModelError> {
        Clip::add_effect(self, name, priority, offset, duration, definition)
    }

    fn effects(&self) -> &EffectRack {
        Clip::effects(self)
    }
}
