//! Simulation tunables for the vector field.
//!
//! This module centralizes every constant that shapes the field's behavior,
//! from glyph sampling density to the individual force magnitudes, so tuning
//! the feel of the animation happens in one place.
//!
//! # Coordinate Spaces
//!
//! - **Device pixels**: the canvas backing buffer. The glyph raster is read
//!   back and scanned in this space.
//! - **Render space**: device pixels divided by the device-pixel-ratio. All
//!   simulation math (positions, velocities, radii) runs in render space so
//!   behavior is resolution-independent.

/// Complete tunable set for sampling and simulation.
#[derive(Clone, Debug)]
pub struct FieldConfig {
	/// Minimum grid stride (device pixels) when scanning the glyph raster.
	/// The effective stride is `max(stride_min, floor(dpr * 2))`.
	pub stride_min: u32,
	/// Alpha cutoff (0-255, exclusive) for a raster pixel to become an anchor.
	pub alpha_threshold: u8,
	/// Font size is `render_width / font_divisor`, capped at `font_cap`.
	pub font_divisor: f64,
	/// Upper bound on the glyph font size (render-space units).
	pub font_cap: f64,
	/// Spring constant pulling each particle toward its anchor.
	pub spring: f64,
	/// Per-tick velocity retention factor, applied after all forces.
	pub damping: f64,
	/// Pointer interaction radius (render-space units).
	pub pointer_radius: f64,
	/// Peak pointer repulsion magnitude at zero distance.
	pub pointer_force: f64,
	/// Time between radial pulse emissions (milliseconds).
	pub pulse_interval_ms: f64,
	/// Half-thickness of the expanding pulse ring (render-space units).
	pub pulse_band: f64,
	/// Pulse ring growth per tick (render-space units).
	pub pulse_growth: f64,
	/// Outward kick applied to particles the ring passes over.
	pub pulse_strength: f64,
	/// Full span of the per-axis uniform noise added each tick.
	pub jitter: f64,
	/// Amplitude of the horizontal wave-flow drift.
	pub flow: f64,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			stride_min: 2,
			alpha_threshold: 128,
			font_divisor: 10.0,
			font_cap: 80.0,
			spring: 0.05,
			damping: 0.94,
			pointer_radius: 100.0,
			pointer_force: 2.0,
			pulse_interval_ms: 5000.0,
			pulse_band: 12.0,
			pulse_growth: 20.0,
			pulse_strength: 2.5,
			jitter: 0.1,
			flow: 0.05,
		}
	}
}

impl FieldConfig {
	/// Effective raster scan stride for a device-pixel-ratio.
	pub fn stride(&self, dpr: f64) -> u32 {
		((dpr * 2.0).floor() as u32).max(self.stride_min)
	}

	/// Glyph font size for a render-space canvas width.
	pub fn font_size(&self, render_width: f64) -> f64 {
		(render_width / self.font_divisor).min(self.font_cap)
	}
}
