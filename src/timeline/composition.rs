//! Composition: a recursive container of tracks, nested compositions,
//! effects, and transitions, used for sub-mixing.

use log::debug;

use crate::core::error::ModelError;
use crate::core::time::Seconds;
use crate::timeline::containers::{
    CompositionContainer, EffectContainer, TrackContainer, TransitionContainer,
};
use crate::timeline::effect::{EffectDefinition, EffectRack, TransitionBank};
use crate::timeline::events::{EventHub, ItemKind, TimelineEvent};
use crate::timeline::group::GroupKind;
use crate::timeline::media::AssistantRegistry;
use crate::timeline::priority::{PriorityList, Prioritized};
use crate::timeline::track::Track;

/// Shared state and mutation logic for every composition-shaped container
/// (groups and compositions both delegate here).
#[derive(Debug)]
pub(crate) struct ContainerBody {
    name: Option<String>,
    kind: GroupKind,
    events: EventHub,
    assistants: AssistantRegistry,
    tracks: PriorityList<Track>,
    compositions: PriorityList<Composition>,
    effects: EffectRack,
    transitions: TransitionBank,
}

impl ContainerBody {
    pub(crate) fn new(
        name: Option<String>,
        kind: GroupKind,
        events: EventHub,
        assistants: AssistantRegistry,
    ) -> Self {
        Self {
            name,
            kind,
            events,
            assistants,
            tracks: PriorityList::new(),
            compositions: PriorityList::new(),
            effects: EffectRack::new(),
            transitions: TransitionBank::new(),
        }
    }

    pub(crate) fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn kind(&self) -> GroupKind {
        self.kind
    }

    pub(crate) fn events(&self) -> &EventHub {
        &self.events
    }

    pub(crate) fn tracks(&self) -> &[Track] {
        self.tracks.as_slice()
    }

    pub(crate) fn track_mut(&mut self, index: usize) -> Option<&mut Track> {
        self.tracks.get_mut(index)
    }

    pub(crate) fn compositions(&self) -> &[Composition] {
        self.compositions.as_slice()
    }

    pub(crate) fn composition_mut(&mut self, index: usize) -> Option<&mut Composition> {
        self.compositions.get_mut(index)
    }

    pub(crate) fn effects(&self) -> &EffectRack {
        &self.effects
    }

    pub(crate) fn transitions(&self) -> &TransitionBank {
        &self.transitions
    }

    pub(crate) fn add_track(
        &mut self,
        name: Option<&str>,
        priority: i32,
    ) -> Result<&mut Track, ModelError> {
        self.events.emit(&TimelineEvent::Adding {
            kind: ItemKind::Track,
            container: self.name.clone(),
        });

        // The child's hub re-emits to ours, transitively up to the timeline
        let hub = EventHub::new();
        hub.bubble_to(&self.events);
        let track = Track::new(
            name.map(str::to_owned),
            self.kind,
            hub,
            self.assistants.clone(),
        );
        let (resolved, index) = self.tracks.insert(track, priority);
        debug!("track {:?} at priority {} in {:?}", name, resolved, self.name);

        self.events.emit(&TimelineEvent::Added {
            kind: ItemKind::Track,
            container: self.name.clone(),
            name: name.map(str::to_owned),
            priority: resolved,
        });

        Ok(&mut self.tracks[index])
    }

    pub(crate) fn add_composition(
        &mut self,
        name: Option<&str>,
        priority: i32,
    ) -> Result<&mut Composition, ModelError> {
        self.events.emit(&TimelineEvent::Adding {
            kind: ItemKind::Composition,
            container: self.name.clone(),
        });

        let hub = EventHub::new();
        hub.bubble_to(&self.events);
        let body = ContainerBody::new(
            name.map(str::to_owned),
            self.kind,
            hub,
            self.assistants.clone(),
        );
        let composition = Composition { body, priority: 0 };
        let (resolved, index) = self.compositions.insert(composition, priority);
        debug!(
            "composition {:?} at priority {} in {:?}",
            name, resolved, self.name
        );

        self.events.emit(&TimelineEvent::Added {
            kind: ItemKind::Composition,
            container: self.name.clone(),
            name: name.map(str::to_owned),
            priority: resolved,
        });

        Ok(&mut self.compositions[index])
    }

    pub(crate) fn add_effect(
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

    pub(crate) fn add_transition(
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

/// A nested sub-mix inside a group or another composition.
#[derive(Debug)]
pub struct Composition {
    pub(crate) body: ContainerBody,
    priority: i32,
}

impl Composition {
    pub fn name(&self) -> Option<&str> {
        self.body.name()
    }

    /// Media kind inherited from the owning group.
    pub fn kind(&self) -> GroupKind {
        self.body.kind()
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Notification hub for this composition.
    pub fn events(&self) -> &EventHub {
        self.body.events()
    }
}

impl Prioritized for Composition {
    fn priority(&self) -> i32 {
        self.priority
    }
    fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }
}

impl TrackContainer for Composition {
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

impl CompositionContainer for Composition {
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

impl EffectContainer for Composition {
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

impl TransitionContainer for Composition {
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
