//! Colors and visual layers for the particle field.
//!
//! Colors are kept as numeric RGBA from the moment a particle is created and
//! only formatted to CSS at the drawing surface.

use rand::Rng;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
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

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Interpolate the RGB channels towards `other`, rounding each channel.
	/// Alpha is left untouched.
	pub fn lerp_rgb(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |from: u8, to: u8| {
			(from as f64 + (to as f64 - from as f64) * t)
				.round()
				.clamp(0.0, 255.0) as u8
		};
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: self.a,
		}
	}

	/// Offset each channel by a random amount in `0..spread`, saturating at 255.
	pub fn jitter<R: Rng + ?Sized>(self, rng: &mut R, spread: (f64, f64, f64)) -> Self {
		let mut shift = |c: u8, s: f64| {
			if s <= 0.0 {
				return c;
			}
			(c as f64 + rng.gen_range(0.0..s)).min(255.0) as u8
		};
		Self {
			r: shift(self.r, spread.0),
			g: shift(self.g, spread.1),
			b: shift(self.b, spread.2),
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		format!(
			"rgba({}, {}, {}, {:.3})",
			self.r,
			self.g,
			self.b,
			self.a.clamp(0.0, 1.0)
		)
	}
}

/// Purple accent that interacting dots shift towards; also the ring stroke.
pub const ACCENT: Color = Color::rgb(139, 92, 246);

/// Blue used by the secondary dot layer.
pub const SECONDARY: Color = Color::rgb(59, 130, 246);

/// Visual variant of a field particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
	Primary,
	Secondary,
}

impl Layer {
	/// Pick a layer, `Secondary` with the given probability.
	pub fn random<R: Rng + ?Sized>(rng: &mut R, secondary_chance: f64) -> Self {
		if rng.gen_bool(secondary_chance.clamp(0.0, 1.0)) {
			Layer::Secondary
		} else {
			Layer::Primary
		}
	}

	pub fn base_color(self) -> Color {
		match self {
			Layer::Primary => ACCENT,
			Layer::Secondary => SECONDARY,
		}
	}

	/// Multiplier applied to the configured base radius.
	pub fn radius_scale(self) -> f64 {
		match self {
			Layer::Primary => 1.0,
			Layer::Secondary => 0.8,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn lerp_rgb_reaches_target_at_one() {
		let shifted = SECONDARY.lerp_rgb(ACCENT, 1.0);
		assert_eq!((shifted.r, shifted.g, shifted.b), (139, 92, 246));
	}

	#[test]
	fn lerp_rgb_rounds_midpoint() {
		let mid = Color::rgb(0, 0, 0).lerp_rgb(Color::rgb(3, 5, 255), 0.5);
		assert_eq!((mid.r, mid.g, mid.b), (2, 3, 128));
	}

	#[test]
	fn jitter_saturates() {
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..100 {
			let c = ACCENT.jitter(&mut rng, (40.0, 40.0, 20.0));
			assert!(c.r >= 139 && c.r < 179);
			assert!(c.g >= 92 && c.g < 132);
			assert!(c.b >= 246);
		}
	}

	#[test]
	fn css_clamps_alpha() {
		assert_eq!(ACCENT.with_alpha(1.7).to_css(), "rgba(139, 92, 246, 1.000)");
		assert_eq!(ACCENT.with_alpha(-0.2).to_css(), "rgba(139, 92, 246, 0.000)");
	}
}
