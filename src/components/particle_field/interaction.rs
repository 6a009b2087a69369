//! Pointer proximity detection.
//!
//! Detection runs in two passes: the grid narrows the field to the
//! particles anchored near the pointer, then [`Influence::at`] applies the
//! exact distance test against each candidate's current position.

use std::collections::HashSet;

use super::grid::GridIndex;

/// Candidate set for this frame. Empty when the pointer is absent.
pub fn active_set(grid: &GridIndex, pointer: Option<(f64, f64)>, radius: f64) -> HashSet<usize> {
	match pointer {
		Some((x, y)) => grid.query(x, y, radius),
		None => HashSet::new(),
	}
}

/// How strongly the pointer acts on a single particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Influence {
	/// Cubic falloff in `[0, 1]`, 1 at the pointer.
	pub factor: f64,
	/// Unit vector from the pointer to the particle.
	pub away: (f64, f64),
}

impl Influence {
	/// Exact test for a particle at `(x, y)`. `None` outside `radius`.
	pub fn at(x: f64, y: f64, pointer: (f64, f64), radius: f64) -> Option<Self> {
		let (dx, dy) = (x - pointer.0, y - pointer.1);
		let dist_sq = dx * dx + dy * dy;
		if dist_sq >= radius * radius {
			return None;
		}

		let distance = dist_sq.sqrt();
		let linear = (1.0 - distance / radius).clamp(0.0, 1.0);
		// A dot exactly under the pointer is pushed along +x.
		let away = if distance > 0.0 {
			(dx / distance, dy / distance)
		} else {
			(1.0, 0.0)
		};

		Some(Self {
			factor: linear * linear * linear,
			away,
		})
	}
}
