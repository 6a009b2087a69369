//! Tuning parameters for the particle field.
//!
//! Every value here is a visual tuning knob. A page can override any
//! subset by embedding JSON in a `<script id="field-config">` element (see [`crate::load_field_config`]).
//!
//! All distances are canvas pixels and all rates are per animation frame.

use serde::Deserialize;

/// An inclusive-exclusive `[min, max)` sampling range.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Range {
	pub min: f64,
	pub max: f64,
}

impl Range {
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Sample uniformly. A collapsed range yields `min`.
	pub fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> f64 {
		if self.max > self.min {
			rng.gen_range(self.min..self.max)
		} else {
			self.min
		}
	}

	fn ordered(self) -> Self {
		if self.max < self.min {
			Self::new(self.max, self.min)
		} else {
			self
		}
	}
}

/// Ambient dot grid: layout, breathing and drift.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldParticleConfig {
	/// Distance between neighbouring anchors.
	pub spacing: f64,
	/// Breathing opacity bounds.
	pub opacity: Range,
	/// Magnitude range of the per-frame opacity step.
	pub opacity_speed: Range,
	/// Radius of a primary-layer dot.
	pub base_radius: f64,
	/// Probability a dot lands on the secondary layer.
	pub secondary_chance: f64,
	/// Each drift velocity component is sampled from `[-drift, drift)`.
	pub drift: f64,
	/// Cap on the per-frame return impulse.
	pub return_speed: Range,
	/// Displacement below which no return force applies.
	pub return_deadband: f64,
	/// Return impulse per unit of displacement.
	pub return_gain: f64,
	/// Per-frame velocity multiplier.
	pub damping: f64,
}

impl Default for FieldParticleConfig {
	fn default() -> Self {
		Self {
			spacing: 40.0,
			opacity: Range::new(0.2, 0.4),
			opacity_speed: Range::new(0.003, 0.011),
			base_radius: 2.0,
			secondary_chance: 0.3,
			drift: 0.1,
			return_speed: Range::new(0.1, 0.3),
			return_deadband: 5.0,
			return_gain: 0.02,
			damping: 0.95,
		}
	}
}

/// Pointer proximity effect on field particles.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
	pub radius: f64,
	/// Spatial grid cell size. Derived from `radius` when absent.
	pub cell_size: Option<f64>,
	pub opacity_boost: f64,
	pub radius_boost: f64,
	/// Maximum interpolation towards the accent color.
	pub color_shift: f64,
	/// Impulse pushing dots away from the pointer at full strength.
	pub repel_force: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			radius: 200.0,
			cell_size: None,
			opacity_boost: 1.2,
			radius_boost: 6.0,
			color_shift: 0.8,
			repel_force: 0.5,
		}
	}
}

impl InteractionConfig {
	pub fn cell_size(&self) -> f64 {
		self.cell_size
			.unwrap_or_else(|| (self.radius / 1.5).floor().max(60.0))
	}
}

/// Particles left behind by pointer movement.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
	pub count: usize,
	/// Minimum pointer travel between events before a batch is emitted.
	pub threshold: f64,
	/// Width of the square spawn area centred on the pointer.
	pub spread: f64,
	pub speed: Range,
	pub radius: Range,
	pub max_life: Range,
	pub opacity: f64,
	/// Per-channel color jitter added to the accent color.
	pub color_jitter: (f64, f64, f64),
	/// Per-frame radius multiplier.
	pub shrink: f64,
}

impl Default for TrailConfig {
	fn default() -> Self {
		Self {
			count: 8,
			threshold: 2.0,
			spread: 20.0,
			speed: Range::new(1.0, 3.0),
			radius: Range::new(1.0, 3.0),
			max_life: Range::new(20.0, 50.0),
			opacity: 0.8,
			color_jitter: (40.0, 40.0, 20.0),
			shrink: 0.95,
		}
	}
}

/// Radial explosion of short-lived particles.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
	pub count: usize,
	pub speed: Range,
	pub radius: Range,
	pub max_life: Range,
	pub color_jitter: (f64, f64, f64),
	pub shrink: f64,
}

impl Default for BurstConfig {
	fn default() -> Self {
		Self {
			count: 15,
			speed: Range::new(2.0, 6.0),
			radius: Range::new(1.0, 4.0),
			max_life: Range::new(60.0, 140.0),
			color_jitter: (60.0, 60.0, 40.0),
			shrink: 0.95,
		}
	}
}

impl BurstConfig {
	/// Softer burst emitted where the pointer left the page.
	pub fn leave() -> Self {
		Self {
			count: 20,
			speed: Range::new(0.0, 2.5),
			radius: Range::new(1.0, 4.0),
			max_life: Range::new(40.0, 100.0),
			color_jitter: (40.0, 40.0, 20.0),
			shrink: 0.95,
		}
	}
}

/// Expanding rings emitted on click.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
	/// Radius increase per frame.
	pub growth: f64,
	/// Per-frame strength multiplier.
	pub decay: f64,
	/// Rings weaker than this are removed.
	pub floor: f64,
	pub max_radius: f64,
	/// Stroke width at full strength.
	pub line_width: f64,
}

impl Default for WaveConfig {
	fn default() -> Self {
		Self {
			growth: 3.0,
			decay: 0.95,
			floor: 0.1,
			max_radius: 300.0,
			line_width: 2.0,
		}
	}
}

/// Complete configuration for the particle field.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	pub field: FieldParticleConfig,
	pub interaction: InteractionConfig,
	pub trail: TrailConfig,
	pub burst: BurstConfig,
	pub leave_burst: BurstConfig,
	pub wave: WaveConfig,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			field: FieldParticleConfig::default(),
			interaction: InteractionConfig::default(),
			trail: TrailConfig::default(),
			burst: BurstConfig::default(),
			leave_burst: BurstConfig::leave(),
			wave: WaveConfig::default(),
		}
	}
}

impl FieldConfig {
	/// Replace degenerate values so the simulation can neither divide by
	/// zero nor accumulate velocity without bound.
	pub fn sanitized(mut self) -> Self {
		let defaults = FieldConfig::default();

		let field = &mut self.field;
		if !positive(field.spacing) {
			field.spacing = defaults.field.spacing;
		}
		field.spacing = field.spacing.max(MIN_SPACING);
		field.opacity = field.opacity.ordered();
		field.opacity.min = field.opacity.min.clamp(0.0, 1.0);
		field.opacity.max = field.opacity.max.clamp(0.0, 1.0);
		field.opacity_speed = field.opacity_speed.ordered();
		if !positive(field.opacity_speed.min) {
			field.opacity_speed = defaults.field.opacity_speed;
		}
		field.return_speed = field.return_speed.ordered();
		if !unit_fraction(field.damping) {
			field.damping = defaults.field.damping;
		}

		let interaction = &mut self.interaction;
		if !positive(interaction.radius) {
			interaction.radius = defaults.interaction.radius;
		}
		if interaction.cell_size.is_some_and(|c| !positive(c)) {
			interaction.cell_size = None;
		}
		let min_cell = interaction.radius / MAX_QUERY_RINGS;
		if let Some(cell) = interaction.cell_size.as_mut() {
			*cell = cell.max(min_cell);
		}

		let trail = &mut self.trail;
		trail.speed = trail.speed.ordered();
		trail.radius = trail.radius.ordered();
		trail.max_life = trail.max_life.ordered();
		if !at_least_one_frame(trail.max_life) {
			trail.max_life = defaults.trail.max_life;
		}

		for (burst, fallback) in [
			(&mut self.burst, &defaults.burst),
			(&mut self.leave_burst, &defaults.leave_burst),
		] {
			burst.speed = burst.speed.ordered();
			burst.radius = burst.radius.ordered();
			burst.max_life = burst.max_life.ordered();
			if !at_least_one_frame(burst.max_life) {
				burst.max_life = fallback.max_life;
			}
		}

		let wave = &mut self.wave;
		if !positive(wave.growth) {
			wave.growth = defaults.wave.growth;
		}
		if !unit_fraction(wave.decay) {
			wave.decay = defaults.wave.decay;
		}

		self
	}
}

/// Smallest anchor spacing; bounds the dot count per pixel of surface.
pub const MIN_SPACING: f64 = 4.0;

/// Grid cells may be no smaller than `radius / MAX_QUERY_RINGS`, bounding
/// the rings a query walks.
pub const MAX_QUERY_RINGS: f64 = 8.0;

// NaN fails every comparison, so these also reject it.
fn positive(v: f64) -> bool {
	v > 0.0
}

fn unit_fraction(v: f64) -> bool {
	v > 0.0 && v < 1.0
}

fn at_least_one_frame(life: Range) -> bool {
	life.min >= 1.0
}
