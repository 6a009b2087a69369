//! Short-lived trail and burst particles.
//!
//! Both variants share one pool: they differ only in how they are emitted.
//! Every particle fades linearly over its own lifetime and is dropped the
//! frame its life runs out, so the pool drains on its own once input stops.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::{BurstConfig, TrailConfig};
use super::theme::{ACCENT, Color};

/// A single trail or burst particle.
#[derive(Clone, Debug)]
pub struct TrailParticle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub color: Color,
	pub opacity: f64,
	pub radius: f64,
	/// Normalised remaining life, starts at 1.0.
	pub life: f64,
	/// Frames lived so far.
	pub age: u32,
	/// Lifetime in frames.
	pub max_life: f64,
	/// Per-frame radius multiplier.
	pub shrink: f64,
}

/// Pool of live transient particles.
#[derive(Clone, Debug, Default)]
pub struct TransientPool {
	pub particles: Vec<TrailParticle>,
}

impl TransientPool {
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Emit a trail batch at `origin` if the pointer travelled further than
	/// the threshold since `previous`. Returns the number emitted.
	pub fn emit_trail<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		origin: (f64, f64),
		previous: (f64, f64),
		config: &TrailConfig,
	) -> usize {
		let (dx, dy) = (origin.0 - previous.0, origin.1 - previous.1);
		let distance = (dx * dx + dy * dy).sqrt();
		if distance <= config.threshold || distance == 0.0 {
			return 0;
		}
		let (ux, uy) = (dx / distance, dy / distance);
		let half = config.spread.max(0.0) / 2.0;

		self.particles.reserve(config.count);
		for _ in 0..config.count {
			let (ox, oy) = if half > 0.0 {
				(rng.gen_range(-half..half), rng.gen_range(-half..half))
			} else {
				(0.0, 0.0)
			};
			let (sx, sy) = (config.speed.sample(rng), config.speed.sample(rng));
			self.particles.push(TrailParticle {
				x: origin.0 + ox,
				y: origin.1 + oy,
				vx: ux * sx,
				vy: uy * sy,
				color: ACCENT.jitter(rng, config.color_jitter),
				opacity: config.opacity,
				radius: config.radius.sample(rng),
				life: 1.0,
				age: 0,
				max_life: config.max_life.sample(rng),
				shrink: config.shrink,
			});
		}
		config.count
	}

	/// Emit a radial explosion at `origin`.
	pub fn emit_burst<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		origin: (f64, f64),
		config: &BurstConfig,
	) -> usize {
		self.particles.reserve(config.count);
		for _ in 0..config.count {
			let angle = rng.gen_range(0.0..TAU);
			let speed = config.speed.sample(rng);
			self.particles.push(TrailParticle {
				x: origin.0,
				y: origin.1,
				vx: angle.cos() * speed,
				vy: angle.sin() * speed,
				color: ACCENT.jitter(rng, config.color_jitter),
				opacity: 1.0,
				radius: config.radius.sample(rng),
				life: 1.0,
				age: 0,
				max_life: config.max_life.sample(rng),
				shrink: config.shrink,
			});
		}
		config.count
	}

	/// Advance every particle and drop the expired ones.
	pub fn update(&mut self) {
		self.particles.retain_mut(|p| {
			p.x += p.vx;
			p.y += p.vy;
			// Derived from the frame count so no rounding residue builds up.
			p.age += 1;
			p.life = 1.0 - p.age as f64 / p.max_life;
			p.opacity = p.life;
			p.radius *= p.shrink;
			p.life > 0.0
		});
	}
}
