//! Drawing for the particle field.
//!
//! The engine only needs three primitives, collected in [`Surface`]. The
//! browser canvas implements it directly; tests use a recorder.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::WaveConfig;
use super::field::FieldPool;
use super::particles::TransientPool;
use super::theme::{ACCENT, Color};
use super::waves::WavePool;

/// Minimal drawing target the particle field renders onto.
pub trait Surface {
	/// Clear the region `[0, width] × [0, height]`.
	fn clear(&self, width: f64, height: f64);
	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Color);
	fn stroke_circle(&self, x: f64, y: f64, radius: f64, line_width: f64, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Color) {
		self.begin_path();
		self.set_fill_style_str(&color.to_css());
		let _ = self.arc(x, y, radius.max(0.0), 0.0, PI * 2.0);
		self.fill();
	}

	fn stroke_circle(&self, x: f64, y: f64, radius: f64, line_width: f64, color: Color) {
		self.begin_path();
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(line_width);
		let _ = self.arc(x, y, radius.max(0.0), 0.0, PI * 2.0);
		self.stroke();
	}
}

pub fn draw_transients<S: Surface + ?Sized>(surface: &S, pool: &TransientPool) {
	for p in &pool.particles {
		surface.fill_circle(p.x, p.y, p.radius, p.color.with_alpha(p.opacity));
	}
}

/// Stroke each ring with width and alpha proportional to its strength.
pub fn draw_waves<S: Surface + ?Sized>(surface: &S, pool: &WavePool, config: &WaveConfig) {
	for ring in &pool.rings {
		surface.stroke_circle(
			ring.x,
			ring.y,
			ring.radius,
			ring.strength * config.line_width,
			ACCENT.with_alpha(ring.strength),
		);
	}
}

pub fn draw_field<S: Surface + ?Sized>(surface: &S, pool: &FieldPool) {
	for p in &pool.particles {
		surface.fill_circle(p.x, p.y, p.radius, p.fill);
	}
}
