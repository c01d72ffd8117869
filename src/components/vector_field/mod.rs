//! Particle vector-field text visualization component.
//!
//! Renders a block of text as a cloud of particles on an HTML canvas:
//! - Each opaque glyph pixel becomes a particle anchored to its position
//! - Particles spawn scattered and swarm onto the glyph (spring + damping)
//! - The pointer repels nearby particles with linear falloff
//! - A periodic radial pulse sweeps an outward kick across the field
//! - Ambient noise and a wave-like drift keep the swarm alive at rest
//!
//! # Example
//!
//! ```ignore
//! use glyph_field::VectorFieldCanvas;
//!
//! view! { <VectorFieldCanvas text="Text = Field Vectors" fullscreen=true /> }
//! ```

mod component;
mod config;
mod field;
mod render;
mod rng;
mod sampler;
pub mod theme;
mod types;

pub use component::VectorFieldCanvas;
pub use config::FieldConfig;
pub use theme::FieldTheme;
pub use types::FieldData;
