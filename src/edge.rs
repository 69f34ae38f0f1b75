//! A single curve within a [`crate::contour::Contour`], annotated with the
//! crossings found on it during intersection insertion.

use crate::crossing::{Crossing, CrossingArena, CrossingKey, EdgeRef};
use crate::curve::Curve;
use smallvec::SmallVec;

/// One curve segment of a contour, plus its bookkeeping.
#[derive(Debug, Clone)]
pub struct Edge {
	pub curve: Curve,
	/// Sorted ascending by parameter; ties keep insertion order (stable
	/// sort), so crossings at equal parameters stay in a deterministic
	/// order.
	crossings: SmallVec<[CrossingKey; 4]>,
	/// Set when this edge's start point already coincides with an
	/// intersection point recorded as a crossing elsewhere, so that point
	/// isn't double-counted as a second crossing at `t=0`.
	pub start_shared: bool,
	/// As `start_shared`, but for this edge's end point (`t=1`).
	pub stop_shared: bool,
}

impl Edge {
	pub fn new(curve: Curve) -> Self {
		Edge {
			curve,
			crossings: SmallVec::new(),
			start_shared: false,
			stop_shared: false,
		}
	}

	pub fn crossings(&self) -> &[CrossingKey] {
		&self.crossings
	}

	/// Inserts `key` into the sorted-by-parameter crossing list.
	pub fn add_crossing(&mut self, arena: &mut CrossingArena, key: CrossingKey) {
		let order = arena.get(key).order();
		let pos = self.crossings.iter().position(|&existing| arena.get(existing).order() > order).unwrap_or(self.crossings.len());
		self.crossings.insert(pos, key);
		sync_crossing_indices(self, arena);
	}

	pub fn remove_crossing(&mut self, arena: &mut CrossingArena, key: CrossingKey) {
		self.crossings.retain(|&k| k != key);
		sync_crossing_indices(self, arena);
	}

	pub fn first_crossing(&self) -> Option<CrossingKey> {
		self.crossings.first().copied()
	}

	pub fn last_crossing(&self) -> Option<CrossingKey> {
		self.crossings.last().copied()
	}

	/// The crossing immediately after `key` in this edge's sorted list, or
	/// `None` at the end (no wraparound — wrapping to the next edge is the
	/// caller's job, via [`crate::contour::Contour::next_edge_index`]).
	pub fn crossing_after(&self, key: CrossingKey) -> Option<CrossingKey> {
		let pos = self.crossings.iter().position(|&k| k == key)?;
		self.crossings.get(pos + 1).copied()
	}

	/// The set of opposite-graph edges this edge shares a crossing with.
	pub fn intersecting_edges(&self, arena: &CrossingArena) -> Vec<EdgeRef> {
		let mut result: Vec<EdgeRef> = Vec::new();
		for &key in &self.crossings {
			if let Some(counterpart) = arena.get(key).counterpart {
				let edge_ref = arena.get(counterpart).edge;
				if !result.contains(&edge_ref) {
					result.push(edge_ref);
				}
			}
		}
		result
	}

	pub fn round(&self) -> Edge {
		Edge {
			curve: self.curve.round(),
			crossings: self.crossings.clone(),
			start_shared: self.start_shared,
			stop_shared: self.stop_shared,
		}
	}
}

/// Rewrites each crossing's [`crate::crossing::Crossing::index`] to match its
/// position in `edge`'s sorted list. Called after every insert/remove.
pub fn sync_crossing_indices(edge: &Edge, arena: &mut CrossingArena) {
	for (i, &key) in edge.crossings().iter().enumerate() {
		arena.get_mut(key).index = i;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::crossing::Side;
	use crate::geom::Point;
	use crate::solver::Intersection;

	fn crossing_at(t1: f64) -> Crossing {
		Crossing {
			edge: EdgeRef { side: Side::A, contour: 0, edge: 0 },
			intersection: Intersection {
				location: Point::new(0., 0.),
				t1,
				t2: 0.,
				tangent: false,
			},
			counterpart: None,
			entry: false,
			processed: false,
			index: 0,
		}
	}

	#[test]
	fn crossings_stay_sorted_by_parameter() {
		let mut arena = CrossingArena::new();
		let mut edge = Edge::new(Curve::line(Point::new(0., 0.), Point::new(1., 0.)));
		let k3 = arena.insert(crossing_at(0.7));
		let k1 = arena.insert(crossing_at(0.1));
		let k2 = arena.insert(crossing_at(0.4));
		edge.add_crossing(&mut arena, k3);
		edge.add_crossing(&mut arena, k1);
		edge.add_crossing(&mut arena, k2);

		let ordered: Vec<f64> = edge.crossings().iter().map(|&k| arena.get(k).order()).collect();
		assert_eq!(ordered, vec![0.1, 0.4, 0.7]);
		assert_eq!(arena.get(k1).index, 0);
		assert_eq!(arena.get(k2).index, 1);
		assert_eq!(arena.get(k3).index, 2);
	}
}
