//! Effects and transitions: opaque parameter bags placed in time.
//!
//! Effect and transition *content* (blur radii, fade curves, ...) belongs to
//! the rendering engine; the model treats a definition as an opaque identifier
//! plus an ordered parameter list with optional time-valued intervals.

use crate::core::error::ValidationError;
use crate::core::time::Seconds;
use crate::timeline::priority::{PriorityList, Prioritized};

/// How a parameter reaches an interval's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalMode {
    /// Snap to the value at the interval time.
    Jump,
    /// Ramp linearly from the previous value.
    Interpolate,
}

/// A time-tagged value inside a parameter.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ParamInterval {
    pub time: Seconds,
    pub value: String,
    pub mode: IntervalMode,
}

/// One named parameter of an effect or transition definition.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Parameter {
    pub name: String,
    /// Base value, in effect before the first interval.
    pub value: String,
    /// Ordered time-tagged values.
    pub intervals: Vec<ParamInterval>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            intervals: Vec::new(),
        }
    }

    pub fn with_interval(mut self, time: Seconds, value: impl Into<String>, mode: IntervalMode) -> Self {
        self.intervals.push(ParamInterval {
            time,
            value: value.into(),
            mode,
        });
        self
    }
}

/// Opaque definition: an engine identifier plus its parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EffectDefinition {
    pub id: String,
    pub parameters: Vec<Parameter>,
}

impl EffectDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// An effect placed in time within one container, ranked among its siblings.
#[derive(Debug, Clone)]
pub struct Effect {
    name: Option<String>,
    offset: Seconds,
    duration: Seconds,
    definition: EffectDefinition,
    priority: i32,
}

impl Effect {
    pub(crate) fn new(
        name: Option<String>,
        offset: Seconds,
        duration: Seconds,
        definition: EffectDefinition,
    ) -> Self {
        Self {
            name,
            offset,
            duration,
            definition,
            priority: 0,
        }
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

    pub fn definition(&self) -> &EffectDefinition {
        &self.definition
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }
}

impl Prioritized for Effect {
    fn priority(&self) -> i32 {
        self.priority
    }
    fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }
}

/// A transition placed in time within one container.
///
/// Transitions carry no priority; instead their intervals may never intersect
/// another transition's interval in the same container.
#[derive(Debug, Clone)]
pub struct Transition {
    name: Option<String>,
    offset: Seconds,
    duration: Seconds,
    definition: EffectDefinition,
}

impl Transition {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn offset(&self) -> Seconds {
        self.offset
    }

    pub fn duration(&self) -> Seconds {
        self.duration
    }

    pub fn definition(&self) -> &EffectDefinition {
        &self.definition
    }
}

/// Effect storage shared by every effect-capable container.
#[derive(Debug, Clone, Default)]
pub struct EffectRack {
    effects: PriorityList<Effect>,
}

impl EffectRack {
    pub fn new() -> Self {
        Self {
            effects: PriorityList::new(),
        }
    }

    /// Insert an effect at the requested rank; returns the resolved priority.
    pub(crate) fn insert(
        &mut self,
        name: Option<String>,
        priority: i32,
        offset: Seconds,
        duration: Seconds,
        definition: EffectDefinition,
    ) -> Result<i32, ValidationError> {
        if duration <= 0.0 {
            return Err(ValidationError::InvalidDuration { duration });
        }
        if offset < 0.0 {
            return Err(ValidationError::NegativeTime {
                field: "effect offset",
                value: offset,
            });
        }
        let effect = Effect::new(name, offset, duration, definition);
        let (resolved, _) = self.effects.insert(effect, priority);
        Ok(resolved)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Effect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Transition storage with the overlap guard shared by every
/// transition-capable container.
#[derive(Debug, Clone, Default)]
pub struct TransitionBank {
    transitions: Vec<Transition>,
}

impl TransitionBank {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Insert a transition after checking the half-open interval
    /// `[offset, offset + duration)` against every registered transition.
    ///
    /// On conflict fails with the conflicting index and mutates nothing.
    pub(crate) fn insert(
        &mut self,
        name: Option<String>,
        offset: Seconds,
        duration: Seconds,
        definition: EffectDefinition,
    ) -> Result<(), ValidationError> {
        if duration <= 0.0 {
            return Err(ValidationError::InvalidDuration { duration });
        }
        if offset < 0.0 {
            return Err(ValidationError::NegativeTime {
                field: "transition offset",
                value: offset,
            });
        }

        let new_start = offset;
        let new_end = offset + duration;
        for (index, existing) in self.transitions.iter().enumerate() {
            let cur_start = existing.offset;
            let cur_end = existing.offset + existing.duration;
            if new_start < cur_end && new_end > cur_start {
                return Err(ValidationError::TransitionOverlap { index });
            }
        }

        self.transitions.push(Transition {
            name,
            offset,
            duration,
            definition,
        });
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transition> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> EffectDefinition {
        EffectDefinition::new("engine.dissolve").with_parameter(
            Parameter::new("progress", "0.0")
                .with_interval(0.0, "0.0", IntervalMode::Jump)
                .with_interval(1.0, "1.0", IntervalMode::Interpolate),
        )
    }

    #[test]
    fn test_effect_rack_ranks_siblings() {
        let mut rack = EffectRack::new();
        rack.insert(Some("a".into()), -1, 0.0, 2.0, definition()).unwrap();
        rack.insert(Some("b".into()), -1, 0.0, 2.0, definition()).unwrap();
        rack.insert(Some("front".into()), 0, 0.0, 2.0, definition()).unwrap();

        let order: Vec<_> = rack.iter().map(|e| e.name().unwrap()).collect();
        assert_eq!(order, vec!["front", "a", "b"]);
        let priorities: Vec<_> = rack.iter().map(|e| e.priority()).collect();
        assert_eq!(priorities, vec![0, 1, 2]);
    }

    #[test]
    fn test_effect_rejects_bad_times() {
        let mut rack = EffectRack::new();
        assert!(rack.insert(None, -1, -1.0, 2.0, definition()).is_err());
        assert!(rack.insert(None, -1, 0.0, 0.0, definition()).is_err());
        assert!(rack.is_empty());
    }

    #[test]
    fn test_transition_overlap_guard() {
        let mut bank = TransitionBank::new();
        bank.insert(None, 0.0, 2.0, definition()).unwrap();
        bank.insert(None, 5.0, 2.0, definition()).unwrap();

        // Intersects the transition at index 1
        let err = bank.insert(None, 6.0, 2.0, definition()).unwrap_err();
        assert_eq!(err, ValidationError::TransitionOverlap { index: 1 });
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn test_transition_abutment_allowed() {
        // Half-open intervals: [0,2) and [2,4) do not intersect
        let mut bank = TransitionBank::new();
        bank.insert(None, 0.0, 2.0, definition()).unwrap();
        assert!(bank.insert(None, 2.0, 2.0, definition()).is_ok());
        assert_eq!(bank.len(), 2);
    }
}
