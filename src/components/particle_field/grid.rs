//! Spatial hash over field particle anchors.
//!
//! The surface is partitioned into square cells. Each cell lists the indices
//! of the field particles whose *anchor* (not current position) falls inside
//! it, so the index stays valid while particles drift and only needs
//! rebuilding when the canvas changes size.

use std::collections::{HashMap, HashSet};

/// Packs a signed cell coordinate pair into one integer key.
#[inline]
pub fn cell_key(cx: i32, cy: i32) -> i64 {
	((cx as i64) << 32) | (cy as u32 as i64)
}

/// Cell coordinate containing a point.
#[inline]
pub fn cell_of(x: f64, y: f64, cell_size: f64) -> (i32, i32) {
	((x / cell_size).floor() as i32, (y / cell_size).floor() as i32)
}

/// Anchor positions for a `cols × rows` lattice covering `width × height`.
///
/// Anchors sit at the centre of each `spacing`-sized slot, column-major, and
/// are clamped to the surface so the last partial slot stays inside it.
pub fn anchors(width: f64, height: f64, spacing: f64) -> Vec<(f64, f64)> {
	if !(width > 0.0 && height > 0.0 && spacing > 0.0) {
		return Vec::new();
	}
	let cols = (width / spacing).ceil() as usize;
	let rows = (height / spacing).ceil() as usize;
	let half = spacing / 2.0;

	let mut out = Vec::with_capacity(cols * rows);
	for i in 0..cols {
		for j in 0..rows {
			let x = (i as f64 * spacing + half).min(width);
			let y = (j as f64 * spacing + half).min(height);
			out.push((x, y));
		}
	}
	out
}

/// Mapping from cell to the particle indices anchored in it.
#[derive(Clone, Debug, Default)]
pub struct GridIndex {
	cell_size: f64,
	cells: HashMap<i64, Vec<usize>>,
	len: usize,
}

impl GridIndex {
	/// Index `anchors` by position. Index `i` in the returned grid refers to
	/// `anchors[i]`.
	pub fn build(anchors: &[(f64, f64)], cell_size: f64) -> Self {
		let mut cells: HashMap<i64, Vec<usize>> = HashMap::new();
		for (idx, &(x, y)) in anchors.iter().enumerate() {
			let (cx, cy) = cell_of(x, y, cell_size);
			cells.entry(cell_key(cx, cy)).or_default().push(idx);
		}
		Self {
			cell_size,
			cells,
			len: anchors.len(),
		}
	}

	/// Number of non-empty cells.
	pub fn cell_count(&self) -> usize {
		self.cells.len()
	}

	/// Number of indexed particles.
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	#[cfg(test)]
	fn cell(&self, cx: i32, cy: i32) -> &[usize] {
		self.cells
			.get(&cell_key(cx, cy))
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	/// Every particle whose cell lies within `ceil(radius / cell_size)` rings
	/// of the pointer's cell.
	///
	/// The square neighbourhood over-approximates the circle, so callers must
	/// still apply an exact distance test.
	pub fn query(&self, x: f64, y: f64, radius: f64) -> HashSet<usize> {
		let mut out = HashSet::new();
		if self.cells.is_empty() || self.cell_size.is_nan() || self.cell_size <= 0.0 {
			return out;
		}
		let (cx, cy) = cell_of(x, y, self.cell_size);
		let rings = (radius / self.cell_size).ceil().max(0.0) as i32;

		for dx in -rings..=rings {
			for dy in -rings..=rings {
				if let Some(list) = self
					.cells
					.get(&cell_key(cx.saturating_add(dx), cy.saturating_add(dy)))
				{
					out.extend(list.iter().copied());
				}
			}
		}
		out
	}
}
