//! Glyph sampling: turning rendered text into particle anchor points.
//!
//! The text is rasterized once into the canvas, the alpha channel is read
//! back, and the visible buffer is cleared again immediately: only the
//! particle decomposition is ever displayed. Opaque pixels are then collected
//! on a fixed grid stride and converted from device pixels to render-space
//! units.

use web_sys::CanvasRenderingContext2d;

use super::config::FieldConfig;

/// Typeface used for the glyph raster. Falls back to sans-serif while the
/// display font loads.
const GLYPH_FONT: &str = "Orbitron, sans-serif";

/// One sampled anchor point in render-space coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
	pub x: f64,
	pub y: f64,
	/// Alpha intensity of the source pixel, in 0..=1.
	pub density: f64,
}

/// Scans an RGBA pixel buffer on a grid stride and emits an anchor for every
/// sampled pixel whose alpha exceeds the configured threshold.
///
/// Positions are divided by `dpr` so anchors land in render space. The buffer
/// is expected to be `px_width * px_height * 4` bytes; rows outside it are
/// skipped rather than panicking.
pub fn sample_alpha(
	data: &[u8],
	px_width: u32,
	px_height: u32,
	dpr: f64,
	config: &FieldConfig,
) -> Vec<Anchor> {
	let stride = config.stride(dpr) as usize;
	let mut anchors = Vec::new();

	for y in (0..px_height as usize).step_by(stride) {
		for x in (0..px_width as usize).step_by(stride) {
			let alpha_index = (y * px_width as usize + x) * 4 + 3;
			let Some(&alpha) = data.get(alpha_index) else {
				continue;
			};
			if alpha > config.alpha_threshold {
				anchors.push(Anchor {
					x: x as f64 / dpr,
					y: y as f64 / dpr,
					density: alpha as f64 / 255.0,
				});
			}
		}
	}

	anchors
}

/// Rasterizes `text` centered on the canvas, reads back the alpha channel,
/// clears the buffer, and returns the sampled anchors.
///
/// An unreadable pixel buffer (e.g. a zero-sized canvas) yields no anchors.
pub fn sample_text(
	ctx: &CanvasRenderingContext2d,
	text: &str,
	px_width: u32,
	px_height: u32,
	dpr: f64,
	config: &FieldConfig,
) -> Vec<Anchor> {
	let render_width = px_width as f64 / dpr;
	let render_height = px_height as f64 / dpr;

	ctx.set_fill_style_str("white");
	ctx.set_font(&format!("{}px {}", config.font_size(render_width), GLYPH_FONT));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(text, render_width / 2.0, render_height / 2.0);

	// getImageData works in device pixels, ignoring the DPR transform.
	let Ok(image) = ctx.get_image_data(0.0, 0.0, px_width as f64, px_height as f64) else {
		return Vec::new();
	};
	ctx.clear_rect(0.0, 0.0, render_width, render_height);

	sample_alpha(&image.data(), px_width, px_height, dpr, config)
}
