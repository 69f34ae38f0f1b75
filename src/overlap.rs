//! Coincident edge ranges between two contours, folded into maximal runs
//! and classified as true crossings vs tangential touches.

use crate::contour::Contour;
use crate::crossing::EdgeRef;
use crate::geom::{self, ParamRange};

/// One coincident `(edge1, edge2)` pair over the given parameter ranges.
#[derive(Debug, Copy, Clone)]
pub struct EdgeOverlap {
	pub edge1: EdgeRef,
	pub edge2: EdgeRef,
	pub range1: ParamRange,
	pub range2: ParamRange,
	pub reversed: bool,
}

/// A maximal chain of adjacent [`EdgeOverlap`]s.
#[derive(Debug, Clone)]
pub struct OverlapRun {
	pub overlaps: Vec<EdgeOverlap>,
}

impl OverlapRun {
	fn new(first: EdgeOverlap) -> Self {
		OverlapRun { overlaps: vec![first] }
	}

	fn tail(&self) -> &EdgeOverlap {
		self.overlaps.last().expect("a run always has at least one overlap")
	}

	/// Whether `next` extends this run contiguously onto the tail, either by
	/// continuing within the same edge pair or by crossing onto the next
	/// edge of both contours in lockstep.
	fn accepts(&self, next: &EdgeOverlap, contour_a: &Contour, contour_b: &Contour) -> bool {
		let prev = self.tail();
		if prev.edge1 == next.edge1 && prev.edge2 == next.edge2 && prev.reversed == next.reversed {
			return geom::values_close(prev.range1.max, next.range1.min) && geom::values_close(prev.range2.max, next.range2.min);
		}

		let a_contig = next.edge1.edge == contour_a.next_edge_index(prev.edge1.edge) && geom::values_close(prev.range1.max, 1.) && geom::values_close(next.range1.min, 0.);
		if !a_contig || prev.reversed != next.reversed {
			return false;
		}

		if !prev.reversed {
			next.edge2.edge == contour_b.next_edge_index(prev.edge2.edge) && geom::values_close(prev.range2.max, 1.) && geom::values_close(next.range2.min, 0.)
		} else {
			next.edge2.edge == contour_b.previous_edge_index(prev.edge2.edge) && geom::values_close(prev.range2.min, 0.) && geom::values_close(next.range2.max, 1.)
		}
	}

	/// True iff the two contours' boundaries actually cross at this run's
	/// termini, rather than merely touching and sliding along each other.
	/// Classified by comparing the approach/overlap tangent directions at
	/// each terminus with [`geom::tangents_cross`] — the exact boundary
	/// between "crossing" and "tangent" runs has no closed-form criterion,
	/// so this is a judgment call documented in DESIGN.md.
	pub fn is_crossing(&self, contour_a: &Contour, contour_b: &Contour) -> bool {
		let first = self.overlaps[0];
		let last = *self.tail();
		terminus_crosses(contour_a, contour_b, &first, true) || terminus_crosses(contour_a, contour_b, &last, false)
	}
}

fn terminus_crosses(contour_a: &Contour, contour_b: &Contour, overlap: &EdgeOverlap, at_start: bool) -> bool {
	const PROBE: f64 = crate::consts::OVERLAP_TANGENT_PROBE;
	let edge_a = &contour_a.edges[overlap.edge1.edge].curve;
	let edge_b = &contour_b.edges[overlap.edge2.edge].curve;

	let t_a = if at_start { overlap.range1.min } else { overlap.range1.max };
	let tangent_a_outside = edge_a.tangent_at(if at_start { t_a - PROBE } else { t_a + PROBE });
	let tangent_a_inside = edge_a.tangent_at(if at_start { t_a + PROBE } else { t_a - PROBE });

	// `b_forward` re-expresses edge_b's tangent in the direction consistent
	// with contour_a's forward travel along the shared curve.
	let b_forward = |t: f64| -> crate::geom::Point {
		let tangent = edge_b.tangent_at(t);
		if overlap.reversed {
			-tangent
		} else {
			tangent
		}
	};
	let (t_b_outside, t_b_inside) = match (at_start, overlap.reversed) {
		(true, false) => (overlap.range2.min - PROBE, overlap.range2.min + PROBE),
		(true, true) => (overlap.range2.max + PROBE, overlap.range2.max - PROBE),
		(false, false) => (overlap.range2.max + PROBE, overlap.range2.max - PROBE),
		(false, true) => (overlap.range2.min - PROBE, overlap.range2.min + PROBE),
	};
	let tangent_b_outside = b_forward(t_b_outside);
	let tangent_b_inside = b_forward(t_b_inside);

	geom::tangents_cross([tangent_a_outside, tangent_a_inside], [tangent_b_outside, tangent_b_inside])
}

/// All overlap runs between one contour of graph A and one contour of
/// graph B.
#[derive(Debug, Clone, Default)]
pub struct ContourOverlap {
	pub runs: Vec<OverlapRun>,
}

impl ContourOverlap {
	pub fn new() -> Self {
		ContourOverlap::default()
	}

	/// Folds a newly discovered coincident range into the existing runs,
	/// extending the run it's contiguous with or starting a new one.
	pub fn add_overlap(&mut self, overlap: EdgeOverlap, contour_a: &Contour, contour_b: &Contour) {
		if let Some(run) = self.runs.iter_mut().find(|run| run.accepts(&overlap, contour_a, contour_b)) {
			run.overlaps.push(overlap);
			return;
		}
		self.runs.push(OverlapRun::new(overlap));
	}

	pub fn is_empty(&self) -> bool {
		self.runs.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::crossing::Side;
	use crate::curve::Curve;
	use crate::geom::Point;

	fn edge_ref(side: Side, edge: usize) -> EdgeRef {
		EdgeRef { side, contour: 0, edge }
	}

	#[test]
	fn adjacent_overlaps_on_same_edge_pair_merge() {
		let contour_a = Contour::from_curve(Curve::line(Point::new(0., 0.), Point::new(10., 0.)));
		let contour_b = Contour::from_curve(Curve::line(Point::new(0., 0.), Point::new(10., 0.)));
		let mut overlap = ContourOverlap::new();
		overlap.add_overlap(
			EdgeOverlap {
				edge1: edge_ref(Side::A, 0),
				edge2: edge_ref(Side::B, 0),
				range1: ParamRange::new(0., 0.5),
				range2: ParamRange::new(0., 0.5),
				reversed: false,
			},
			&contour_a,
			&contour_b,
		);
		overlap.add_overlap(
			EdgeOverlap {
				edge1: edge_ref(Side::A, 0),
				edge2: edge_ref(Side::B, 0),
				range1: ParamRange::new(0.5, 1.),
				range2: ParamRange::new(0.5, 1.),
				reversed: false,
			},
			&contour_a,
			&contour_b,
		);
		assert_eq!(overlap.runs.len(), 1);
		assert_eq!(overlap.runs[0].overlaps.len(), 2);
	}

	#[test]
	fn non_adjacent_overlaps_start_new_runs() {
		let contour_a = Contour::from_curve(Curve::line(Point::new(0., 0.), Point::new(10., 0.)));
		let contour_b = Contour::from_curve(Curve::line(Point::new(0., 0.), Point::new(10., 0.)));
		let mut overlap = ContourOverlap::new();
		overlap.add_overlap(
			EdgeOverlap {
				edge1: edge_ref(Side::A, 0),
				edge2: edge_ref(Side::B, 0),
				range1: ParamRange::new(0., 0.2),
				range2: ParamRange::new(0., 0.2),
				reversed: false,
			},
			&contour_a,
			&contour_b,
		);
		overlap.add_overlap(
			EdgeOverlap {
				edge1: edge_ref(Side::A, 0),
				edge2: edge_ref(Side::B, 0),
				range1: ParamRange::new(0.7, 1.),
				range2: ParamRange::new(0.7, 1.),
				reversed: false,
			},
			&contour_a,
			&contour_b,
		);
		assert_eq!(overlap.runs.len(), 2);
	}
}
