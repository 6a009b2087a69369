//! The ambient dot grid.
//!
//! Each dot breathes (bounded opacity oscillation), drifts slightly, is
//! pushed away and brightened by a nearby pointer, and is pulled back to
//! its anchor once the pointer moves on. Damping every frame keeps all
//! impulses decaying.

use std::collections::HashSet;

use rand::Rng;

use super::config::{FieldConfig, FieldParticleConfig};
use super::grid::{self, GridIndex};
use super::interaction::Influence;
use super::theme::{ACCENT, Color, Layer};

/// A single ambient dot.
#[derive(Clone, Debug)]
pub struct FieldParticle {
	pub x: f64,
	pub y: f64,
	/// Anchor the return force pulls towards.
	pub origin_x: f64,
	pub origin_y: f64,
	pub vx: f64,
	pub vy: f64,
	pub layer: Layer,
	pub base_radius: f64,
	/// Never below `base_radius`.
	pub radius: f64,
	pub opacity_min: f64,
	pub opacity_max: f64,
	/// Always within `[opacity_min, opacity_max]`.
	pub opacity: f64,
	pub target_opacity: f64,
	/// Signed breathing step; flips at each turning point.
	pub opacity_speed: f64,
	/// Cap on the return impulse.
	pub return_speed: f64,
	/// Composited color and alpha from the last update.
	pub fill: Color,
}

impl FieldParticle {
	fn new<R: Rng + ?Sized>(rng: &mut R, x: f64, y: f64, config: &FieldParticleConfig) -> Self {
		let layer = Layer::random(rng, config.secondary_chance);
		let opacity = config.opacity.sample(rng);
		let base_radius = config.base_radius * layer.radius_scale();
		let drift = config.drift.abs();
		let mut drift_sample = || {
			if drift > 0.0 {
				rng.gen_range(-drift..drift)
			} else {
				0.0
			}
		};
		let (vx, vy) = (drift_sample(), drift_sample());

		Self {
			x,
			y,
			origin_x: x,
			origin_y: y,
			vx,
			vy,
			layer,
			base_radius,
			radius: base_radius,
			opacity_min: config.opacity.min,
			opacity_max: config.opacity.max,
			opacity,
			target_opacity: opacity,
			opacity_speed: config.opacity_speed.sample(rng),
			return_speed: config.return_speed.sample(rng),
			fill: layer.base_color().with_alpha(opacity),
		}
	}

	/// Advance the breathing oscillator one step.
	///
	/// On reaching the target or the lower bound the direction flips, the
	/// value is clamped into bounds and a new target is drawn.
	fn breathe<R: Rng + ?Sized>(&mut self, rng: &mut R) {
		self.opacity += self.opacity_speed;
		if self.opacity >= self.target_opacity || self.opacity <= self.opacity_min {
			self.opacity_speed = -self.opacity_speed;
			self.opacity = self.opacity.clamp(self.opacity_min, self.opacity_max);
			self.target_opacity = if self.opacity_max > self.opacity_min {
				rng.gen_range(self.opacity_min..self.opacity_max)
			} else {
				self.opacity_min
			};
		}
	}

	/// Drift and reflect velocity at the surface edges.
	fn drift(&mut self, width: f64, height: f64) {
		self.x += self.vx;
		self.y += self.vy;
		if self.x < 0.0 || self.x > width {
			self.vx = -self.vx;
		}
		if self.y < 0.0 || self.y > height {
			self.vy = -self.vy;
		}
	}

	fn pull_home(&mut self, config: &FieldParticleConfig) {
		let (dx, dy) = (self.origin_x - self.x, self.origin_y - self.y);
		let distance = (dx * dx + dy * dy).sqrt();
		if distance > config.return_deadband {
			let force = (distance * config.return_gain).min(self.return_speed);
			self.vx += dx / distance * force;
			self.vy += dy / distance * force;
		}
	}
}

/// All field particles, index-aligned with the grid built alongside them.
#[derive(Clone, Debug, Default)]
pub struct FieldPool {
	pub particles: Vec<FieldParticle>,
}

impl FieldPool {
	/// Build the pool and its grid index together.
	///
	/// Returns an empty pool and grid when either dimension is zero.
	pub fn build<R: Rng + ?Sized>(
		rng: &mut R,
		width: f64,
		height: f64,
		field: &FieldParticleConfig,
		cell_size: f64,
	) -> (Self, GridIndex) {
		let anchors = grid::anchors(width, height, field.spacing);
		let index = GridIndex::build(&anchors, cell_size);
		let particles = anchors
			.iter()
			.map(|&(x, y)| FieldParticle::new(rng, x, y, field))
			.collect();
		(Self { particles }, index)
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Advance every particle one frame.
	pub fn update<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		(width, height): (f64, f64),
		active: &HashSet<usize>,
		pointer: Option<(f64, f64)>,
		config: &FieldConfig,
	) {
		let (field, interaction) = (&config.field, &config.interaction);
		for (idx, p) in self.particles.iter_mut().enumerate() {
			p.breathe(rng);
			p.drift(width, height);

			p.radius = p.base_radius;
			let influence = match pointer {
				Some(ptr) if active.contains(&idx) => {
					Influence::at(p.x, p.y, ptr, interaction.radius)
				}
				_ => None,
			};

			let (factor, shift) = match influence {
				Some(inf) => {
					p.radius = p.base_radius + inf.factor * interaction.radius_boost.max(0.0);
					let push = inf.factor * interaction.repel_force;
					p.vx += inf.away.0 * push;
					p.vy += inf.away.1 * push;
					(inf.factor, inf.factor * interaction.color_shift)
				}
				None => {
					p.pull_home(field);
					(0.0, 0.0)
				}
			};

			p.vx *= field.damping;
			p.vy *= field.damping;

			let alpha = (p.opacity + factor * interaction.opacity_boost).min(1.0);
			p.fill = p.layer.base_color().lerp_rgb(ACCENT, shift).with_alpha(alpha);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn pool(width: f64, height: f64) -> (FieldPool, GridIndex, StdRng) {
		let mut rng = StdRng::seed_from_u64(42);
		let config = FieldParticleConfig::default();
		let (pool, grid) = FieldPool::build(&mut rng, width, height, &config, 133.0);
		(pool, grid, rng)
	}

	#[test]
	fn builds_one_particle_per_anchor() {
		let (pool, grid, _) = pool(800.0, 600.0);
		assert_eq!(pool.len(), 300);
		assert_eq!(grid.len(), 300);
		for p in &pool.particles {
			assert!((0.0..=800.0).contains(&p.origin_x));
			assert!((0.0..=600.0).contains(&p.origin_y));
			assert!(p.radius >= p.base_radius);
		}
	}

	#[test]
	fn zero_size_builds_nothing() {
		let (pool, grid, _) = pool(0.0, 600.0);
		assert!(pool.is_empty());
		assert!(grid.is_empty());
	}

	#[test]
	fn opacity_stays_in_bounds() {
		let (mut pool, grid, mut rng) = pool(400.0, 400.0);
		let config = FieldConfig::default();
		let interaction = &config.interaction;
		let pointer = Some((200.0, 200.0));
		let active = grid.query(200.0, 200.0, interaction.radius);

		for frame in 0..5_000 {
			let ptr = if frame % 3 == 0 { None } else { pointer };
			pool.update(&mut rng, (400.0, 400.0), &active, ptr, &config);
			for p in &pool.particles {
				assert!(p.opacity >= p.opacity_min && p.opacity <= p.opacity_max);
				assert!(p.opacity_speed != 0.0);
				assert!(p.fill.a <= 1.0);
			}
		}
	}

	#[test]
	fn pointer_grows_brightens_and_repels() {
		let (mut pool, grid, mut rng) = pool(400.0, 400.0);
		let config = FieldConfig::default();
		let interaction = &config.interaction;
		let idx = pool
			.particles
			.iter()
			.position(|p| p.origin_x == 180.0 && p.origin_y == 180.0)
			.unwrap();
		pool.particles[idx].vx = 0.0;
		pool.particles[idx].vy = 0.0;

		let pointer = (150.0, 180.0);
		let active = grid.query(pointer.0, pointer.1, interaction.radius);
		pool.update(&mut rng, (400.0, 400.0), &active, Some(pointer), &config);

		let p = &pool.particles[idx];
		assert!(p.radius > p.base_radius);
		assert!(p.vx > 0.0, "pushed away from the pointer along +x");
		assert!(p.fill.a > p.opacity);
	}

	#[test]
	fn non_candidates_are_not_affected() {
		let (mut pool, _, mut rng) = pool(400.0, 400.0);
		let config = FieldConfig::default();
		pool.update(
			&mut rng,
			(400.0, 400.0),
			&HashSet::new(),
			Some((200.0, 200.0)),
			&config,
		);
		for p in &pool.particles {
			assert_eq!(p.radius, p.base_radius);
			assert_eq!((p.fill.r, p.fill.g, p.fill.b), {
				let c = p.layer.base_color();
				(c.r, c.g, c.b)
			});
		}
	}

	#[test]
	fn displaced_particles_return_and_settle() {
		let (mut pool, _, mut rng) = pool(200.0, 200.0);
		let config = FieldConfig::default();
		for p in &mut pool.particles {
			p.x += 60.0;
			p.vx = 0.0;
			p.vy = 0.0;
		}
		for _ in 0..2_000 {
			pool.update(&mut rng, (200.0, 200.0), &HashSet::new(), None, &config);
		}
		for p in &pool.particles {
			let d = ((p.x - p.origin_x).powi(2) + (p.y - p.origin_y).powi(2)).sqrt();
			assert!(d < 20.0, "particle still {d} from its anchor");
			assert!(p.vx.abs() < 1.0 && p.vy.abs() < 1.0);
		}
	}

	#[test]
	fn edges_reflect_velocity() {
		let mut rng = StdRng::seed_from_u64(1);
		let config = FieldParticleConfig::default();
		let mut p = FieldParticle::new(&mut rng, 0.05, 10.0, &config);
		p.vx = -0.1;
		p.drift(100.0, 100.0);
		assert!(p.vx > 0.0);
	}
}
