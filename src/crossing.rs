//! One edge-to-edge crossing landmark, and the arena that owns them.
//!
//! `Crossing.counterpart` is a mutual back-reference between a crossing on
//! graph A's edge and the paired crossing on graph B's edge. Rather than a
//! pointer or `Rc<RefCell<_>>` cycle, both crossings of a pair live in one
//! shared [`slotmap::SlotMap`] arena and refer to each other by
//! [`CrossingKey`] — the same arena-handle pattern the real `path-bool`
//! crate reaches for via its own `slotmap` dependency.

use crate::geom::Point;
use crate::solver::Intersection;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
	/// A handle into a [`CrossingArena`], also used as the mutual
	/// counterpart reference between two crossings.
	pub struct CrossingKey;
}

/// Which operand graph an edge/crossing belongs to during a boolean
/// operation. Kept explicit (rather than inferred) because stitching swaps
/// sides every time it follows a counterpart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
	A,
	B,
}

impl Side {
	pub fn other(self) -> Side {
		match self {
			Side::A => Side::B,
			Side::B => Side::A,
		}
	}
}

/// Which edge (within which contour, within which side's graph) a crossing
/// sits on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EdgeRef {
	pub side: Side,
	pub contour: usize,
	pub edge: usize,
}

/// One directed pairing point between two edges on opposite graphs.
#[derive(Debug, Clone)]
pub struct Crossing {
	pub edge: EdgeRef,
	pub intersection: Intersection,
	pub counterpart: Option<CrossingKey>,
	pub entry: bool,
	pub processed: bool,
	/// Position within the owning edge's sorted crossing list — kept in
	/// sync by [`crate::edge::Edge::add_crossing`].
	pub index: usize,
}

impl Crossing {
	/// The curve parameter this crossing sits at, used for sort order.
	pub fn order(&self) -> f64 {
		self.intersection.t1
	}

	pub fn location(&self) -> Point {
		self.intersection.location
	}

	/// Whether this crossing's parameter is within tolerance of the edge's
	/// start (`t` near 0) or end (`t` near 1).
	pub fn at_start(&self) -> bool {
		self.intersection.t1 < crate::consts::POINT_EPS
	}

	pub fn at_end(&self) -> bool {
		self.intersection.t1 > 1. - crate::consts::POINT_EPS
	}
}

/// The shared arena holding every crossing produced while intersecting two
/// graphs. One arena is created per boolean operation and discarded with it.
#[derive(Debug, Default)]
pub struct CrossingArena {
	crossings: SlotMap<CrossingKey, Crossing>,
}

impl CrossingArena {
	pub fn new() -> Self {
		CrossingArena { crossings: SlotMap::with_key() }
	}

	pub fn insert(&mut self, crossing: Crossing) -> CrossingKey {
		self.crossings.insert(crossing)
	}

	pub fn get(&self, key: CrossingKey) -> &Crossing {
		&self.crossings[key]
	}

	pub fn get_mut(&mut self, key: CrossingKey) -> &mut Crossing {
		&mut self.crossings[key]
	}

	pub fn remove(&mut self, key: CrossingKey) {
		self.crossings.remove(key);
	}

	pub fn len(&self) -> usize {
		self.crossings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.crossings.is_empty()
	}

	/// Links two crossings as mutual counterparts: afterward,
	/// `C.counterpart.counterpart == C` for both.
	pub fn link_counterparts(&mut self, a: CrossingKey, b: CrossingKey) {
		self.crossings[a].counterpart = Some(b);
		self.crossings[b].counterpart = Some(a);
	}

	pub fn keys(&self) -> impl Iterator<Item = CrossingKey> + '_ {
		self.crossings.keys()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::solver::Intersection;

	fn fake_intersection(t1: f64) -> Intersection {
		Intersection {
			location: Point::new(0., 0.),
			t1,
			t2: 0.5,
			tangent: false,
		}
	}

	#[test]
	fn counterpart_is_mutual() {
		let mut arena = CrossingArena::new();
		let edge_a = EdgeRef { side: Side::A, contour: 0, edge: 0 };
		let edge_b = EdgeRef { side: Side::B, contour: 0, edge: 0 };
		let ka = arena.insert(Crossing {
			edge: edge_a,
			intersection: fake_intersection(0.5),
			counterpart: None,
			entry: false,
			processed: false,
			index: 0,
		});
		let kb = arena.insert(Crossing {
			edge: edge_b,
			intersection: fake_intersection(0.5),
			counterpart: None,
			entry: false,
			processed: false,
			index: 0,
		});
		arena.link_counterparts(ka, kb);
		assert_eq!(arena.get(ka).counterpart, Some(kb));
		assert_eq!(arena.get(arena.get(ka).counterpart.unwrap()).counterpart, Some(ka));
	}
}
