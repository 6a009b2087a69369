//! Expanding rings emitted on click.

use super::config::WaveConfig;

/// A single expanding, fading ring.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveRing {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	/// Starts at 1.0 and only decays.
	pub strength: f64,
	pub max_radius: f64,
}

/// Pool of live wave rings.
#[derive(Clone, Debug, Default)]
pub struct WavePool {
	pub rings: Vec<WaveRing>,
}

impl WavePool {
	pub fn len(&self) -> usize {
		self.rings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rings.is_empty()
	}

	pub fn emit(&mut self, origin: (f64, f64), config: &WaveConfig) {
		self.rings.push(WaveRing {
			x: origin.0,
			y: origin.1,
			radius: 0.0,
			strength: 1.0,
			max_radius: config.max_radius,
		});
	}

	/// Grow and fade every ring; a ring goes as soon as it is either too
	/// large or too faint.
	pub fn update(&mut self, config: &WaveConfig) {
		self.rings.retain_mut(|ring| {
			ring.radius += config.growth;
			ring.strength *= config.decay;
			!(ring.radius > ring.max_radius || ring.strength < config.floor)
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn emits_at_origin_with_full_strength() {
		let mut pool = WavePool::default();
		pool.emit((50.0, 50.0), &WaveConfig::default());
		assert_eq!(
			pool.rings,
			vec![WaveRing {
				x: 50.0,
				y: 50.0,
				radius: 0.0,
				strength: 1.0,
				max_radius: 300.0,
			}]
		);
	}

	#[test]
	fn strength_floor_removes_before_max_radius() {
		let config = WaveConfig::default();
		let mut pool = WavePool::default();
		pool.emit((0.0, 0.0), &config);

		let mut frames = 0;
		let mut last_strength = 1.0;
		while !pool.is_empty() {
			let ring = &pool.rings[0];
			assert!(ring.strength <= last_strength);
			assert!(ring.radius <= ring.max_radius && ring.strength >= config.floor);
			last_strength = ring.strength;
			pool.update(&config);
			frames += 1;
		}
		// 0.95^45 < 0.1 while 45 * 3 is still well under 300.
		assert_eq!(frames, 45);
	}

	#[test]
	fn max_radius_removes_when_decay_is_slow() {
		let config = WaveConfig {
			decay: 0.999,
			max_radius: 30.0,
			..Default::default()
		};
		let mut pool = WavePool::default();
		pool.emit((0.0, 0.0), &config);
		for _ in 0..10 {
			pool.update(&config);
		}
		assert_eq!(pool.len(), 1);
		pool.update(&config);
		assert!(pool.is_empty());
	}
}
