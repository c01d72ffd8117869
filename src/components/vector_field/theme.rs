//! Visual theming for the vector field.
//!
//! Particle colors are produced in HSL space each frame from a per-particle
//! hue seed plus a time-varying shimmer; the theme fixes the hue window and
//! lightness mapping. The background is drawn in screen space behind the
//! swarm.

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Complete visual theme for the particle field.
#[derive(Clone, Debug)]
pub struct FieldTheme {
	pub name: &'static str,
	/// Background fill; `None` leaves the canvas transparent so the host
	/// page shows through.
	pub background: Option<BackgroundStyle>,
	/// Base hue (degrees) of the particle palette.
	pub hue_base: f64,
	/// Random per-particle hue offset range (degrees).
	pub hue_spread: f64,
	/// Amplitude of the time-varying hue shimmer (degrees).
	pub hue_wave: f64,
	/// HSL saturation percentage.
	pub saturation: f64,
	/// HSL lightness percentage floor.
	pub lightness_base: f64,
	/// Extra lightness scaled by particle density.
	pub lightness_gain: f64,
}

impl FieldTheme {
	/// Electric blue on near-black (default).
	pub fn ion() -> Self {
		Self {
			name: "ion",
			background: Some(BackgroundStyle {
				color: Color::rgb(8, 10, 18),
				color_secondary: Color::rgb(16, 20, 32),
				use_gradient: true,
			}),
			hue_base: 200.0,
			hue_spread: 50.0,
			hue_wave: 20.0,
			saturation: 100.0,
			lightness_base: 60.0,
			lightness_gain: 20.0,
		}
	}

	/// Warm amber sparks on a dark umber ground.
	pub fn ember() -> Self {
		Self {
			name: "ember",
			background: Some(BackgroundStyle {
				color: Color::rgb(24, 16, 12),
				color_secondary: Color::rgb(34, 24, 18),
				use_gradient: true,
			}),
			hue_base: 18.0,
			hue_spread: 30.0,
			hue_wave: 12.0,
			saturation: 95.0,
			lightness_base: 55.0,
			lightness_gain: 25.0,
		}
	}

	/// Teal-to-violet drift on deep slate.
	pub fn aurora() -> Self {
		Self {
			name: "aurora",
			background: Some(BackgroundStyle {
				color: Color::rgb(12, 16, 24),
				color_secondary: Color::rgb(18, 26, 36),
				use_gradient: true,
			}),
			hue_base: 160.0,
			hue_spread: 110.0,
			hue_wave: 25.0,
			saturation: 85.0,
			lightness_base: 58.0,
			lightness_gain: 18.0,
		}
	}

	/// Transparent background for compositing over host page content.
	pub fn overlay() -> Self {
		Self {
			background: None,
			name: "overlay",
			..Self::ion()
		}
	}

	/// Look up a preset by name, e.g. from a host-supplied data payload.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"ion" => Some(Self::ion()),
			"ember" => Some(Self::ember()),
			"aurora" => Some(Self::aurora()),
			"overlay" => Some(Self::overlay()),
			_ => None,
		}
	}
}

impl Default for FieldTheme {
	fn default() -> Self {
		Self::ion()
	}
}
