//! Rendering boundary: the descriptive document and the adapter trait.

pub mod document;
pub mod renderer;

pub use document::{
    ClipElement, CompositionElement, EffectElement, GroupElement, TimelineDocument, TrackElement,
};
pub use renderer::{RenderError, Renderer};
