//! Particle field simulation state and per-tick force evaluation.
//!
//! The field owns the particle set, the periodic pulse timer, and the noise
//! source. Each tick superposes four velocity contributions per particle
//! (anchor spring, pointer repulsion, expanding pulse ring, ambient noise
//! with wave flow), then damps and integrates. All math runs in render-space
//! units and the module has no DOM dependency, so it is exercised directly
//! by the tests below.

use super::config::FieldConfig;
use super::rng::FieldRng;
use super::sampler::Anchor;
use super::theme::FieldTheme;

/// One sampled point of the rendered glyph.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	/// Anchor position the spring force seeks. Immutable until the next
	/// resample.
	pub base_x: f64,
	pub base_y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Alpha intensity of the sampled source pixel, in 0..=1.
	pub density: f64,
	/// Render diameter, derived from density and depth at sampling time.
	pub size: f64,
	/// Inertia divisor in [0.5, 1.5]; deeper particles lag behind the
	/// spring force and render larger.
	pub depth: f64,
	/// Base hue (degrees) assigned at sampling time.
	pub hue: f64,
}

/// Last known pointer position in render-space coordinates, or absent.
///
/// Written by pointer events, read once per tick. The simulation never
/// mutates it.
#[derive(Clone, Copy, Debug)]
pub struct PointerState {
	pub pos: Option<(f64, f64)>,
	/// Interaction radius (render-space units).
	pub radius: f64,
}

impl PointerState {
	pub fn new(radius: f64) -> Self {
		Self { pos: None, radius }
	}

	/// Records the latest pointer position.
	pub fn set(&mut self, x: f64, y: f64) {
		self.pos = Some((x, y));
	}

	/// Marks the pointer as having left the surface.
	pub fn clear(&mut self) {
		self.pos = None;
	}
}

/// Periodically-reset expanding ring centered on the canvas.
#[derive(Clone, Copy, Debug)]
pub struct PulseState {
	last_trigger_ms: f64,
	interval_ms: f64,
	/// Current ring radius (render-space units).
	pub radius: f64,
	/// Ring travel limit, derived from the canvas diagonal.
	pub max_radius: f64,
}

impl PulseState {
	fn new(interval_ms: f64) -> Self {
		Self {
			last_trigger_ms: 0.0,
			interval_ms,
			radius: 0.0,
			max_radius: 0.0,
		}
	}

	/// Advances the ring: re-arms it once the interval has elapsed, then
	/// grows it toward `max_radius` without overshooting.
	pub fn advance(&mut self, now_ms: f64, growth: f64) {
		if now_ms - self.last_trigger_ms > self.interval_ms {
			self.last_trigger_ms = now_ms;
			self.radius = 0.0;
		}
		if self.radius < self.max_radius {
			self.radius = (self.radius + growth).min(self.max_radius);
		}
	}
}

/// Smoothly time-varying multiplier on the interactive forces and the
/// rendered hue, in [0.75, 1.75]. Gives the field a shimmering, non-uniform
/// responsiveness instead of uniform physics.
pub fn semantic_charge(now_ms: f64, x: f64) -> f64 {
	1.25 + 0.5 * (now_ms * 0.001 + x * 0.1).sin()
}

/// The particle field: store, pulse timer, and force evaluation.
pub struct VectorField {
	pub particles: Vec<Particle>,
	pub pulse: PulseState,
	config: FieldConfig,
	width: f64,
	height: f64,
	rng: FieldRng,
}

impl VectorField {
	pub fn new(config: FieldConfig, width: f64, height: f64, rng: FieldRng) -> Self {
		let mut field = Self {
			particles: Vec::new(),
			pulse: PulseState::new(config.pulse_interval_ms),
			config,
			width,
			height,
			rng,
		};
		field.resize(width, height);
		field
	}

	/// Render-space width.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Render-space height.
	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Updates the render-space bounds and re-derives the pulse travel
	/// limit from the new diagonal.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.pulse.max_radius = width.hypot(height);
	}

	/// Discards the current particle set and builds a new one, one particle
	/// per anchor, scattered uniformly over the visible rectangle so the
	/// swarm converges onto the glyph.
	pub fn repopulate(&mut self, anchors: &[Anchor], theme: &FieldTheme) {
		self.particles.clear();
		self.particles.reserve(anchors.len());

		for anchor in anchors {
			let depth = self.rng.next_range(0.5, 1.5);
			self.particles.push(Particle {
				x: self.rng.next_f64() * self.width,
				y: self.rng.next_f64() * self.height,
				base_x: anchor.x,
				base_y: anchor.y,
				vx: 0.0,
				vy: 0.0,
				density: anchor.density,
				size: (1.0 + anchor.density * 1.5) * depth,
				depth,
				hue: theme.hue_base + self.rng.next_f64() * theme.hue_spread,
			});
		}
	}

	/// Advances the simulation by one frame.
	///
	/// Reads the pointer mailbox once, then for every particle accumulates
	/// the four force contributions, damps, and integrates. Degenerate
	/// distances fall back to a divisor of 1 so a particle sitting exactly
	/// on its anchor, the pointer, or the canvas center never produces
	/// NaN positions.
	pub fn tick(&mut self, now_ms: f64, pointer: &PointerState) {
		self.pulse.advance(now_ms, self.config.pulse_growth);

		let center_x = self.width / 2.0;
		let center_y = self.height / 2.0;
		let pulse_radius = self.pulse.radius;
		let config = &self.config;
		let rng = &mut self.rng;

		for p in &mut self.particles {
			// Anchor-seeking spring, weakened by depth.
			let dx = p.base_x - p.x;
			let dy = p.base_y - p.y;
			let dist = dx.hypot(dy);
			let divisor = if dist == 0.0 { 1.0 } else { dist };
			let force = dist * config.spring / p.depth;
			p.vx += dx / divisor * force;
			p.vy += dy / divisor * force;

			let charge = semantic_charge(now_ms, p.x);

			// Pointer repulsion with linear falloff inside the radius.
			if let Some((mx, my)) = pointer.pos {
				let pdx = p.x - mx;
				let pdy = p.y - my;
				let pointer_dist = pdx.hypot(pdy);
				if pointer_dist < pointer.radius {
					let falloff = (pointer.radius - pointer_dist) / pointer.radius;
					let divisor = if pointer_dist == 0.0 { 1.0 } else { pointer_dist };
					let push = falloff * config.pointer_force * charge;
					p.vx += pdx / divisor * push;
					p.vy += pdy / divisor * push;
				}
			}

			// Outward kick while the expanding ring passes over the particle.
			let cdx = p.x - center_x;
			let cdy = p.y - center_y;
			let center_dist = cdx.hypot(cdy);
			if (center_dist - pulse_radius).abs() < config.pulse_band {
				let divisor = if center_dist == 0.0 { 1.0 } else { center_dist };
				let kick = config.pulse_strength * charge;
				p.vx += cdx / divisor * kick;
				p.vy += cdy / divisor * kick;
			}

			// Ambient noise plus a wave-like horizontal drift.
			p.vx += (rng.next_f64() - 0.5) * config.jitter;
			p.vy += (rng.next_f64() - 0.5) * config.jitter;
			p.vx += (p.y * 0.01 + now_ms * 0.001).sin() * config.flow;

			p.vx *= config.damping;
			p.vy *= config.damping;

			p.x += p.vx;
			p.y += p.vy;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const FRAME_MS: f64 = 1000.0 / 60.0;

	/// Config with every non-spring force silenced, for isolating the
	/// spring + damping contraction.
	fn quiet_config() -> FieldConfig {
		FieldConfig {
			jitter: 0.0,
			flow: 0.0,
			pulse_strength: 0.0,
			..FieldConfig::default()
		}
	}

	fn ring_anchors(cx: f64, cy: f64, radius: f64, count: usize) -> Vec<Anchor> {
		(0..count)
			.map(|i| {
				let angle = i as f64 / count as f64 * std::f64::consts::TAU;
				Anchor {
					x: cx + radius * angle.cos(),
					y: cy + radius * angle.sin(),
					density: 1.0,
				}
			})
			.collect()
	}

	fn field_with(config: FieldConfig, anchors: &[Anchor], seed: u64) -> VectorField {
		let mut field = VectorField::new(config, 800.0, 600.0, FieldRng::new(seed));
		field.repopulate(anchors, &FieldTheme::default());
		field
	}

	fn run(field: &mut VectorField, ticks: usize, pointer: &PointerState) {
		for i in 0..ticks {
			field.tick(i as f64 * FRAME_MS, pointer);
		}
	}

	fn max_anchor_distance(field: &VectorField) -> f64 {
		field
			.particles
			.iter()
			.map(|p| (p.base_x - p.x).hypot(p.base_y - p.y))
			.fold(0.0, f64::max)
	}

	#[test]
	fn repopulate_builds_one_particle_per_anchor() {
		let anchors = ring_anchors(400.0, 300.0, 80.0, 120);
		let field = field_with(FieldConfig::default(), &anchors, 1);
		assert_eq!(field.particles.len(), anchors.len());
		for (p, a) in field.particles.iter().zip(&anchors) {
			assert_eq!((p.base_x, p.base_y), (a.x, a.y));
			assert!((0.5..1.5).contains(&p.depth));
			assert!(p.size > 0.0);
		}
	}

	#[test]
	fn repopulate_replaces_the_whole_set() {
		let first = ring_anchors(400.0, 300.0, 80.0, 50);
		let second = ring_anchors(200.0, 150.0, 40.0, 9);
		let mut field = field_with(FieldConfig::default(), &first, 2);

		field.repopulate(&second, &FieldTheme::default());
		assert_eq!(field.particles.len(), second.len());
		for (p, a) in field.particles.iter().zip(&second) {
			assert_eq!((p.base_x, p.base_y), (a.x, a.y));
		}
	}

	#[test]
	fn empty_field_ticks_as_a_no_op() {
		let mut field = field_with(FieldConfig::default(), &[], 3);
		run(&mut field, 10, &PointerState::new(100.0));
		assert!(field.particles.is_empty());
	}

	#[test]
	fn spring_contracts_toward_anchors() {
		let anchors = ring_anchors(400.0, 300.0, 100.0, 200);
		let mut field = field_with(quiet_config(), &anchors, 4);
		let pointer = PointerState::new(100.0);

		run(&mut field, 60, &pointer);
		let early = max_anchor_distance(&field);
		run(&mut field, 120, &pointer);
		let mid = max_anchor_distance(&field);
		run(&mut field, 120, &pointer);
		let late = max_anchor_distance(&field);

		assert!(mid < early);
		assert!(late < mid);
		assert!(late < 0.5, "late = {late}");
	}

	#[test]
	fn pointer_pushes_particles_away() {
		let anchors = [Anchor {
			x: 400.0,
			y: 300.0,
			density: 1.0,
		}];
		let mut field = field_with(quiet_config(), &anchors, 5);
		let p = &mut field.particles[0];
		p.x = 400.0;
		p.y = 300.0;
		p.vx = 0.0;
		p.vy = 0.0;

		// Pointer strictly to the left of the particle.
		let mut pointer = PointerState::new(100.0);
		pointer.set(350.0, 300.0);
		field.tick(0.0, &pointer);

		assert!(field.particles[0].vx >= 0.0);
		assert!(field.particles[0].x >= 400.0);
	}

	#[test]
	fn pulse_resets_within_one_interval_and_never_overshoots() {
		let config = FieldConfig::default();
		let mut pulse = PulseState::new(config.pulse_interval_ms);
		pulse.max_radius = 1000.0;

		let mut resets = 0;
		let mut previous = 0.0;
		let ticks = (config.pulse_interval_ms * 1.2 / FRAME_MS) as usize;
		for i in 1..=ticks {
			pulse.advance(i as f64 * FRAME_MS, config.pulse_growth);
			if pulse.radius < previous {
				resets += 1;
			} else {
				assert_eq!(pulse.radius, (previous + config.pulse_growth).min(1000.0));
			}
			assert!(pulse.radius <= pulse.max_radius);
			previous = pulse.radius;
		}
		assert!(resets >= 1);
	}

	#[test]
	fn degenerate_distances_stay_finite() {
		let anchors = [Anchor {
			x: 400.0,
			y: 300.0,
			density: 1.0,
		}];
		let mut field = field_with(quiet_config(), &anchors, 6);
		// Exactly at the anchor, which is also the canvas center.
		let p = &mut field.particles[0];
		p.x = 400.0;
		p.y = 300.0;

		// Pointer exactly on the particle, and a zero-radius pulse ring
		// sitting exactly on the center.
		let mut pointer = PointerState::new(100.0);
		pointer.set(400.0, 300.0);
		field.pulse.max_radius = 0.0;
		field.tick(0.0, &pointer);

		let p = &field.particles[0];
		assert!(p.x.is_finite() && p.y.is_finite());
		assert!(p.vx.is_finite() && p.vy.is_finite());
	}

	#[test]
	fn charge_stays_in_band() {
		for i in 0..500 {
			let charge = semantic_charge(i as f64 * 37.0, i as f64 * 3.1);
			assert!((0.75..=1.75).contains(&charge));
		}
	}

	#[test]
	fn resize_rederives_pulse_limit_from_diagonal() {
		let mut field = field_with(FieldConfig::default(), &[], 7);
		field.resize(300.0, 400.0);
		assert_eq!(field.pulse.max_radius, 500.0);
	}

	/// End-to-end: a glyph-like anchor cloud on an 800x600 surface converges
	/// with the full default force stack (noise, flow, and pulse active),
	/// and a pointer injected at the center scatters the converged swarm.
	#[test]
	fn swarm_converges_then_pointer_scatters_it() {
		let anchors: Vec<Anchor> = (0..60)
			.flat_map(|i| {
				(0..5).map(move |j| Anchor {
					x: 250.0 + i as f64 * 5.0,
					y: 290.0 + j as f64 * 5.0,
					density: 0.8,
				})
			})
			.collect();
		assert!(!anchors.is_empty());
		assert!(anchors.len() <= 800 * 600 / 4);

		let mut field = field_with(FieldConfig::default(), &anchors, 8);
		let absent = PointerState::new(100.0);
		run(&mut field, 180, &absent);

		let near = field
			.particles
			.iter()
			.filter(|p| (p.base_x - p.x).hypot(p.base_y - p.y) < 5.0)
			.count();
		assert!(
			near as f64 >= field.particles.len() as f64 * 0.95,
			"only {near}/{} converged",
			field.particles.len()
		);

		// Control run: one more tick without a pointer, from an identical
		// clone (same RNG state, so the noise sequence matches).
		let before: Vec<(f64, f64)> = field.particles.iter().map(|p| (p.x, p.y)).collect();
		let mut control = VectorField {
			particles: field.particles.clone(),
			pulse: field.pulse,
			config: field.config.clone(),
			width: field.width,
			height: field.height,
			rng: field.rng.clone(),
		};
		let now = 180.0 * FRAME_MS;
		control.tick(now, &absent);

		let mut pointer = PointerState::new(100.0);
		pointer.set(400.0, 300.0);
		field.tick(now, &pointer);

		let mut displaced = 0;
		for ((p, c), &(bx, by)) in field.particles.iter().zip(&control.particles).zip(&before) {
			let in_range = (bx - 400.0).hypot(by - 300.0) < 100.0;
			let delta = (p.vx - c.vx).hypot(p.vy - c.vy);
			if in_range {
				assert!(delta > 0.0, "in-range particle saw no pointer force");
				displaced += 1;
			} else {
				assert_eq!(delta, 0.0);
			}
		}
		assert!(displaced > 0);
	}
}
