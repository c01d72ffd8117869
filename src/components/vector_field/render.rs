//! Canvas rendering for the particle field.
//!
//! Drawing happens in two passes each frame: the background (solid fill,
//! radial gradient, or a plain clear for transparent themes), then one
//! filled circle per particle. Particle color is recomputed from scratch
//! every frame from the hue seed, clock, position, and density; rendering
//! keeps no state of its own and feeds nothing back into the simulation.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::field::{VectorField, semantic_charge};
use super::theme::FieldTheme;

/// Renders one frame of the field to the canvas.
pub fn render(
	field: &VectorField,
	ctx: &CanvasRenderingContext2d,
	theme: &FieldTheme,
	now_ms: f64,
) {
	draw_background(field, ctx, theme);
	draw_particles(field, ctx, theme, now_ms);
}

fn draw_background(field: &VectorField, ctx: &CanvasRenderingContext2d, theme: &FieldTheme) {
	let width = field.width();
	let height = field.height();
	ctx.clear_rect(0.0, 0.0, width, height);

	let Some(background) = &theme.background else {
		return;
	};

	if background.use_gradient {
		let Ok(gradient) = ctx.create_radial_gradient(
			width / 2.0,
			height / 2.0,
			0.0,
			width / 2.0,
			height / 2.0,
			width.max(height) * 0.8,
		) else {
			ctx.set_fill_style_str(&background.color.to_css());
			ctx.fill_rect(0.0, 0.0, width, height);
			return;
		};
		let _ = gradient.add_color_stop(0.0, &background.color_secondary.to_css());
		let _ = gradient.add_color_stop(1.0, &background.color.to_css());
		ctx.set_fill_style_canvas_gradient(&gradient);
	} else {
		ctx.set_fill_style_str(&background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_particles(
	field: &VectorField,
	ctx: &CanvasRenderingContext2d,
	theme: &FieldTheme,
	now_ms: f64,
) {
	for p in &field.particles {
		// The same charge term that modulates forces shifts the hue, so
		// responsive regions of the field also shimmer brighter.
		let shimmer = (semantic_charge(now_ms, p.x) - 1.25) / 0.5;
		let hue = p.hue + theme.hue_wave * shimmer;
		let lightness = theme.lightness_base + p.density * theme.lightness_gain;
		ctx.set_fill_style_str(&format!(
			"hsl({hue:.1}, {}%, {lightness:.1}%)",
			theme.saturation
		));

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.size / 2.0, 0.0, PI * 2.0);
		ctx.fill();
	}
}
