//! Particle field simulation state.
//!
//! [`FieldState`] owns every pool plus the pointer. Host events mutate it
//! directly and the animation loop calls [`FieldState::frame`] once per
//! display frame. Nothing here touches the DOM, so the whole engine runs
//! under plain `cargo test`.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::FieldConfig;
use super::field::FieldPool;
use super::grid::GridIndex;
use super::interaction;
use super::particles::TransientPool;
use super::render::{self, Surface};
use super::waves::WavePool;

/// Single-pointer tracking.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	/// Current canvas-local position, `None` while the pointer is outside.
	pub position: Option<(f64, f64)>,
	/// Last recorded position, kept after the pointer leaves.
	pub previous: Option<(f64, f64)>,
}

/// Core state combining the dot grid, transient pools and pointer.
///
/// Created once when the component mounts and mutated by event handlers and
/// the animation loop, which share a single thread.
pub struct FieldState {
	pub config: FieldConfig,
	pub width: f64,
	pub height: f64,
	pub grid: GridIndex,
	pub field: FieldPool,
	pub transients: TransientPool,
	pub waves: WavePool,
	pub pointer: PointerState,
	rng: StdRng,
}

impl FieldState {
	pub fn new(config: FieldConfig, width: f64, height: f64) -> Self {
		Self::with_rng(config, width, height, StdRng::from_entropy())
	}

	/// Construct with an explicit RNG, e.g. a seeded one for reproducible runs.
	pub fn with_rng(config: FieldConfig, width: f64, height: f64, rng: StdRng) -> Self {
		let mut state = Self {
			config: config.sanitized(),
			width: 0.0,
			height: 0.0,
			grid: GridIndex::default(),
			field: FieldPool::default(),
			transients: TransientPool::default(),
			waves: WavePool::default(),
			pointer: PointerState::default(),
			rng,
		};
		state.resize(width, height);
		state
	}

	pub fn has_area(&self) -> bool {
		self.width > 0.0 && self.height > 0.0
	}

	/// Rebuild the grid and dot pool for new dimensions.
	///
	/// Both are constructed before either is replaced. Transient particles
	/// and rings are left alone.
	pub fn resize(&mut self, width: f64, height: f64) {
		let (width, height) = (sanitize_dim(width), sanitize_dim(height));
		if width == self.width && height == self.height {
			return;
		}
		self.width = width;
		self.height = height;

		let (field, grid) = FieldPool::build(
			&mut self.rng,
			width,
			height,
			&self.config.field,
			self.config.interaction.cell_size(),
		);
		debug!(
			"particle-field: rebuilt {} particles in {} cells for {}x{}",
			field.len(),
			grid.cell_count(),
			width,
			height
		);
		self.field = field;
		self.grid = grid;
	}

	/// Record a pointer move, emitting a trail batch when it travelled far
	/// enough since the last recorded position.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !(x.is_finite() && y.is_finite()) {
			return;
		}
		if let Some(previous) = self.pointer.previous {
			self.transients
				.emit_trail(&mut self.rng, (x, y), previous, &self.config.trail);
		}
		self.pointer.previous = Some((x, y));
		self.pointer.position = Some((x, y));
	}

	/// A click: radial burst plus one wave ring.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if !(x.is_finite() && y.is_finite()) {
			return;
		}
		self.transients
			.emit_burst(&mut self.rng, (x, y), &self.config.burst);
		self.waves.emit((x, y), &self.config.wave);
	}

	/// The pointer left the page: clear it and burst at its last position.
	pub fn pointer_leave(&mut self) {
		self.pointer.position = None;
		if let Some(last) = self.pointer.previous {
			self.transients
				.emit_burst(&mut self.rng, last, &self.config.leave_burst);
		}
	}

	/// Run one update/draw pass.
	///
	/// Order: clear, transients, rings, then the dot grid on top. Does
	/// nothing until the surface has a non-zero size.
	pub fn frame<S: Surface + ?Sized>(&mut self, surface: &S) {
		if !self.has_area() {
			return;
		}
		surface.clear(self.width, self.height);

		self.transients.update();
		render::draw_transients(surface, &self.transients);

		self.waves.update(&self.config.wave);
		render::draw_waves(surface, &self.waves, &self.config.wave);

		let active = interaction::active_set(
			&self.grid,
			self.pointer.position,
			self.config.interaction.radius,
		);
		self.field.update(
			&mut self.rng,
			(self.width, self.height),
			&active,
			self.pointer.position,
			&self.config,
		);
		render::draw_field(surface, &self.field);
	}
}

fn sanitize_dim(v: f64) -> f64 {
	if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;
	use crate::components::particle_field::theme::Color;

	#[derive(Debug, PartialEq)]
	enum Op {
		Clear(f64, f64),
		Fill(f64, f64, f64),
		Stroke(f64, f64, f64, f64),
	}

	#[derive(Default)]
	struct Recorder {
		ops: RefCell<Vec<Op>>,
	}

	impl Surface for Recorder {
		fn clear(&self, width: f64, height: f64) {
			self.ops.borrow_mut().push(Op::Clear(width, height));
		}

		fn fill_circle(&self, x: f64, y: f64, radius: f64, _color: Color) {
			self.ops.borrow_mut().push(Op::Fill(x, y, radius));
		}

		fn stroke_circle(&self, x: f64, y: f64, radius: f64, line_width: f64, _color: Color) {
			self.ops.borrow_mut().push(Op::Stroke(x, y, radius, line_width));
		}
	}

	fn state(width: f64, height: f64) -> FieldState {
		FieldState::with_rng(
			FieldConfig::default(),
			width,
			height,
			StdRng::seed_from_u64(11),
		)
	}

	#[test]
	fn builds_expected_pool() {
		let s = state(800.0, 600.0);
		assert_eq!(s.field.len(), 300);
		assert_eq!(s.grid.len(), 300);
	}

	#[test]
	fn move_emits_trail_near_pointer() {
		let mut s = state(800.0, 600.0);
		s.pointer_move(100.0, 100.0);
		assert!(s.transients.is_empty(), "first move has nothing to compare with");

		s.pointer_move(110.0, 100.0);
		assert_eq!(s.transients.len(), s.config.trail.count);
		for p in &s.transients.particles {
			assert!((p.x - 110.0).abs() <= 10.0 && (p.y - 100.0).abs() <= 10.0);
			assert!(p.vx > 0.0);
		}
		assert_eq!(s.pointer.position, Some((110.0, 100.0)));
	}

	#[test]
	fn jitter_moves_do_not_emit() {
		let mut s = state(800.0, 600.0);
		s.pointer_move(100.0, 100.0);
		s.pointer_move(101.0, 101.0);
		assert!(s.transients.is_empty());
	}

	#[test]
	fn click_emits_burst_and_one_ring() {
		let mut s = state(800.0, 600.0);
		s.pointer_down(50.0, 50.0);
		assert_eq!(s.transients.len(), s.config.burst.count);
		assert!(s.transients.particles.iter().all(|p| p.x == 50.0 && p.y == 50.0));
		assert_eq!(s.waves.len(), 1);
		let ring = &s.waves.rings[0];
		assert_eq!((ring.x, ring.y, ring.radius, ring.strength), (50.0, 50.0, 0.0, 1.0));
	}

	#[test]
	fn leave_clears_pointer_and_bursts_at_last_position() {
		let mut s = state(800.0, 600.0);
		s.pointer_leave();
		assert!(s.transients.is_empty(), "no recorded position yet");

		s.pointer_move(300.0, 200.0);
		s.pointer_leave();
		assert_eq!(s.pointer.position, None);
		assert_eq!(s.transients.len(), s.config.leave_burst.count);
		assert!(s.transients.particles.iter().all(|p| (p.x, p.y) == (300.0, 200.0)));
	}

	#[test]
	fn resize_rebuilds_field_but_keeps_transients() {
		let mut s = state(800.0, 600.0);
		s.pointer_down(50.0, 50.0);
		let transients = s.transients.len();

		s.resize(400.0, 300.0);
		assert_eq!(s.field.len(), 10 * 8);
		assert_eq!(s.grid.len(), 10 * 8);
		assert!(s.field.particles.iter().all(|p| p.origin_x <= 400.0 && p.origin_y <= 300.0));
		assert_eq!(s.transients.len(), transients);
		assert_eq!(s.waves.len(), 1);
	}

	#[test]
	fn zero_size_skips_everything() {
		let mut s = state(0.0, 0.0);
		assert!(s.field.is_empty());
		let surface = Recorder::default();
		s.pointer_down(10.0, 10.0);
		s.frame(&surface);
		assert!(surface.ops.borrow().is_empty());

		s.resize(80.0, 80.0);
		s.frame(&surface);
		assert_eq!(surface.ops.borrow()[0], Op::Clear(80.0, 80.0));
	}

	#[test]
	fn frame_draws_in_layer_order() {
		let mut s = state(80.0, 80.0);
		s.pointer_down(40.0, 40.0);
		let surface = Recorder::default();
		s.frame(&surface);

		let ops = surface.ops.borrow();
		assert_eq!(ops[0], Op::Clear(80.0, 80.0));
		let bursts = s.config.burst.count;
		assert!(ops[1..=bursts].iter().all(|op| matches!(op, Op::Fill(..))));
		assert!(matches!(ops[bursts + 1], Op::Stroke(x, y, r, _) if (x, y, r) == (40.0, 40.0, 3.0)));
		assert_eq!(ops.len(), 1 + bursts + 1 + s.field.len());
	}

	#[test]
	fn transients_expire_and_are_never_drawn_dead() {
		let mut s = state(80.0, 80.0);
		s.pointer_down(40.0, 40.0);
		let surface = Recorder::default();
		for _ in 0..200 {
			s.frame(&surface);
			assert!(s.transients.particles.iter().all(|p| p.life > 0.0));
		}
		assert!(s.transients.is_empty());
		assert!(s.waves.is_empty());
	}

	#[test]
	fn invalid_input_is_dropped() {
		let mut s = state(f64::NAN, 600.0);
		assert!(!s.has_area());
		s.pointer_move(f64::NAN, 1.0);
		s.pointer_down(f64::INFINITY, 1.0);
		assert_eq!(s.pointer, PointerState::default());
		assert!(s.waves.is_empty());
	}

	#[test]
	fn zero_opacity_step_still_breathes() {
		let json = r#"{ "field": { "opacity_speed": { "min": 0.0, "max": 0.0 } } }"#;
		let config: FieldConfig = serde_json::from_str(json).unwrap();
		let mut s = FieldState::with_rng(config, 400.0, 400.0, StdRng::seed_from_u64(3));
		assert!(s.field.particles.iter().all(|p| p.opacity_speed != 0.0));

		let before: Vec<f64> = s.field.particles.iter().map(|p| p.opacity).collect();
		s.frame(&Recorder::default());
		let moved = s
			.field
			.particles
			.iter()
			.zip(&before)
			.any(|(p, &o)| p.opacity != o);
		assert!(moved, "opacity oscillation stalled");
	}
}
