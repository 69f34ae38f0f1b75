//! Robust curve/curve intersection by iterative fat-line clipping.

use crate::consts::{CONVERGENCE_PLACES, EPS, MAX_RECURSION_DEPTH, MIN_SHRINK_FRACTION, POINT_EPS};
use crate::curve::Curve;
use crate::geom::{self, ParamRange, Point};

/// A single isolated intersection point between two curves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Intersection {
	pub location: Point,
	pub t1: f64,
	pub t2: f64,
	pub tangent: bool,
}

/// A maximal parameter range over which two curves are coincident.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IntersectRange {
	pub range1: ParamRange,
	pub range2: ParamRange,
	/// Whether curve 2 traverses the shared segment in the opposite
	/// direction to curve 1.
	pub reversed: bool,
}

/// Result of intersecting two curves: either a finite set of crossing points,
/// or (when the curves are coincident over some span) a single overlap range.
#[derive(Debug, Clone, PartialEq)]
pub enum IntersectionResult {
	Points(Vec<Intersection>),
	Range(IntersectRange),
}

impl IntersectionResult {
	pub fn is_empty(&self) -> bool {
		matches!(self, IntersectionResult::Points(v) if v.is_empty())
	}
}

/// Top-level entry point: all intersections (or the overlap range) between
/// `a` and `b`, deduplicated by location-closeness.
pub fn intersect(a: &Curve, b: &Curve) -> IntersectionResult {
	let mut points = Vec::new();
	let mut ranges = Vec::new();
	solve(a, ParamRange::UNIT, b, ParamRange::UNIT, 0, &mut points, &mut ranges);

	if let Some(range) = ranges.into_iter().next() {
		return IntersectionResult::Range(range);
	}

	dedup_intersections(&mut points);
	IntersectionResult::Points(points)
}

fn dedup_intersections(points: &mut Vec<Intersection>) {
	let mut result: Vec<Intersection> = Vec::with_capacity(points.len());
	for p in points.drain(..) {
		if !result.iter().any(|existing| geom::points_close(existing.location, p.location)) {
			result.push(p);
		}
	}
	*points = result;
}

/// Snaps a parameter to exactly 0 or 1 if it's within tolerance, so
/// endpoint intersections compare equal across both curves meeting there.
fn snap_param(t: f64) -> f64 {
	if t < crate::consts::POINT_EPS {
		0.
	} else if t > 1. - crate::consts::POINT_EPS {
		1.
	} else {
		t
	}
}

fn solve(a: &Curve, ra_in: ParamRange, b: &Curve, rb_in: ParamRange, depth: u32, out: &mut Vec<Intersection>, overlaps: &mut Vec<IntersectRange>) {
	if depth > MAX_RECURSION_DEPTH {
		#[cfg(feature = "logging")]
		log::trace!("solver: recursion cap hit, treating branch as no intersection");
		return;
	}

	let mut ra = ra_in;
	let mut rb = rb_in;

	loop {
		let curve_a = a.subcurve_at(ra);
		let curve_b = b.subcurve_at(rb);

		let bounds_a = curve_a.bounds();
		let bounds_b = curve_b.bounds();
		if !bounds_a.overlaps(&bounds_b, POINT_EPS) {
			return;
		}

		if curve_a.is_point() || curve_b.is_point() {
			handle_point_case(a, ra, &curve_a, b, rb, &curve_b, out);
			return;
		}

		if curve_a.straight && curve_b.straight {
			solve_line_line(a, ra, &curve_a, b, rb, &curve_b, out, overlaps);
			return;
		}

		if segments_coincident(&curve_a, &curve_b) {
			record_overlap(a, ra, b, rb, overlaps);
			return;
		}

		let fat_b = FatLine::from_curve(&curve_b);
		let local_a = match clip_range(&curve_a, &fat_b) {
			Some(r) => r,
			None => return,
		};
		let new_ra = ParamRange::new(ra.scale_normalized_value(local_a.min), ra.scale_normalized_value(local_a.max));

		let fat_a = FatLine::from_curve(&curve_a);
		let local_b = match clip_range(&curve_b, &fat_a) {
			Some(r) => r,
			None => return,
		};
		let new_rb = ParamRange::new(rb.scale_normalized_value(local_b.min), rb.scale_normalized_value(local_b.max));

		let shrink_a = if ra.size() > EPS { 1. - new_ra.size() / ra.size() } else { 1. };
		let shrink_b = if rb.size() > EPS { 1. - new_rb.size() / rb.size() } else { 1. };

		ra = new_ra;
		rb = new_rb;

		if ra.has_converged(CONVERGENCE_PLACES) && rb.has_converged(CONVERGENCE_PLACES) {
			finalize_point(a, ra, b, rb, out);
			return;
		}

		if shrink_a < MIN_SHRINK_FRACTION && shrink_b < MIN_SHRINK_FRACTION {
			if segments_coincident(&a.subcurve_at(ra), &b.subcurve_at(rb)) {
				record_overlap(a, ra, b, rb, overlaps);
				return;
			}

			#[cfg(feature = "logging")]
			log::trace!("solver: bisecting at depth {depth}, ra={ra:?} rb={rb:?}");

			if ra.size() >= rb.size() {
				let mid = ra.average();
				solve(a, ParamRange::new(ra.min, mid), b, rb, depth + 1, out, overlaps);
				solve(a, ParamRange::new(mid, ra.max), b, rb, depth + 1, out, overlaps);
			} else {
				let mid = rb.average();
				solve(a, ra, b, ParamRange::new(rb.min, mid), depth + 1, out, overlaps);
				solve(a, ra, b, ParamRange::new(mid, rb.max), depth + 1, out, overlaps);
			}
			return;
		}
	}
}

fn finalize_point(a: &Curve, ra: ParamRange, b: &Curve, rb: ParamRange, out: &mut Vec<Intersection>) {
	let t1 = snap_param(ra.average());
	let t2 = snap_param(rb.average());
	let location = a.point_at(t1);
	let tangent = is_tangent(a, t1, b, t2);
	out.push(Intersection { location, t1, t2, tangent });
}

fn is_tangent(a: &Curve, t1: f64, b: &Curve, t2: f64) -> bool {
	let ta = a.tangent_at(t1);
	let tb = b.tangent_at(t2);
	let cross = ta.x * tb.y - ta.y * tb.x;
	cross.abs() < crate::consts::TANGENT_CROSS_EPS
}

fn record_overlap(a: &Curve, ra: ParamRange, b: &Curve, rb: ParamRange, overlaps: &mut Vec<IntersectRange>) {
	let tangent_a = a.tangent_at(ra.average());
	let tangent_b = b.tangent_at(rb.average());
	let reversed = tangent_a.dot(tangent_b) < 0.;
	overlaps.push(IntersectRange { range1: ra, range2: rb, reversed });
}

/// Cheap heuristic for "these two (sub)curves trace the same locus": sample a
/// handful of points along `a` and check each lies within point tolerance of
/// `b`'s curve (approximated by sampling `b` densely). A deliberate
/// simplification in place of exact algebraic coincidence detection —
/// see DESIGN.md.
fn segments_coincident(a: &Curve, b: &Curve) -> bool {
	const SAMPLES_A: usize = 4;
	const SAMPLES_B: usize = 16;
	let overlap_tolerance = crate::consts::SAMPLING_POINT_EPS;

	let b_samples: Vec<Point> = (0..=SAMPLES_B).map(|i| b.point_at(i as f64 / SAMPLES_B as f64)).collect();

	for i in 0..=SAMPLES_A {
		let t = i as f64 / SAMPLES_A as f64;
		let p = a.point_at(t);
		let closest = b_samples.iter().fold(f64::INFINITY, |acc, &bp| acc.min(p.distance(bp)));
		if closest > overlap_tolerance {
			return false;
		}
	}
	true
}

fn handle_point_case(a: &Curve, ra: ParamRange, curve_a: &Curve, b: &Curve, rb: ParamRange, curve_b: &Curve, out: &mut Vec<Intersection>) {
	if curve_a.is_point() && curve_b.is_point() {
		if geom::points_close(curve_a.p0, curve_b.p0) {
			out.push(Intersection {
				location: curve_a.p0,
				t1: snap_param(ra.average()),
				t2: snap_param(rb.average()),
				tangent: false,
			});
		}
		return;
	}
	if curve_a.is_point() {
		if let Some(t2) = project_point_onto_curve(curve_a.p0, b, rb) {
			let location = a.point_at(ra.average());
			out.push(Intersection {
				location,
				t1: snap_param(ra.average()),
				t2: snap_param(t2),
				tangent: false,
			});
		}
		return;
	}
	if let Some(t1) = project_point_onto_curve(curve_b.p0, a, ra) {
		let location = b.point_at(rb.average());
		out.push(Intersection {
			location,
			t1: snap_param(t1),
			t2: snap_param(rb.average()),
			tangent: false,
		});
	}
}

/// Finds the global parameter `t` (within `range`, expressed in `curve`'s
/// own `[0,1]` domain) at which `curve` passes within point tolerance of
/// `point`, by coarse sampling. Returns `None` if no such `t` exists.
fn project_point_onto_curve(point: Point, curve: &Curve, range: ParamRange) -> Option<f64> {
	const SAMPLES: usize = 32;
	let mut best_t = range.min;
	let mut best_dist = f64::INFINITY;
	for i in 0..=SAMPLES {
		let t = range.min + (range.max - range.min) * (i as f64 / SAMPLES as f64);
		let d = curve.point_at(t).distance(point);
		if d < best_dist {
			best_dist = d;
			best_t = t;
		}
	}
	if best_dist < crate::consts::SAMPLING_POINT_EPS {
		Some(best_t)
	} else {
		None
	}
}

fn solve_line_line(a: &Curve, ra: ParamRange, curve_a: &Curve, b: &Curve, rb: ParamRange, curve_b: &Curve, out: &mut Vec<Intersection>, overlaps: &mut Vec<IntersectRange>) {
	let p = curve_a.p0;
	let r = curve_a.p3 - curve_a.p0;
	let q = curve_b.p0;
	let s = curve_b.p3 - curve_b.p0;

	let r_cross_s = r.x * s.y - r.y * s.x;
	let q_minus_p = q - p;
	let q_minus_p_cross_r = q_minus_p.x * r.y - q_minus_p.y * r.x;

	if r_cross_s.abs() < EPS {
		if q_minus_p_cross_r.abs() > EPS {
			return; // parallel, not collinear
		}
		// Collinear: project onto the line's direction to find overlap in local [0,1] params.
		let r_len_sq = r.length_squared();
		if r_len_sq < EPS {
			return;
		}
		let t0 = q_minus_p.dot(r) / r_len_sq;
		let t1 = (q_minus_p + s).dot(r) / r_len_sq;
		let (lo, hi) = (t0.min(t1), t0.max(t1));
		let overlap_lo = lo.max(0.);
		let overlap_hi = hi.min(1.);
		if overlap_lo > overlap_hi + EPS {
			return;
		}
		let local_a = ParamRange::new(overlap_lo, overlap_hi);
		let global_a = ParamRange::new(ra.scale_normalized_value(overlap_lo), ra.scale_normalized_value(overlap_hi));
		let b_of = |t_on_a: f64| -> f64 {
			let point = p + r * t_on_a;
			(point - q).dot(s) / s.length_squared().max(EPS)
		};
		let local_b_lo = b_of(local_a.min);
		let local_b_hi = b_of(local_a.max);
		let global_b = ParamRange::new(rb.scale_normalized_value(local_b_lo.clamp(0., 1.)), rb.scale_normalized_value(local_b_hi.clamp(0., 1.)));
		record_overlap(a, global_a, b, global_b, overlaps);
		return;
	}

	let t = (q_minus_p.x * s.y - q_minus_p.y * s.x) / r_cross_s;
	let u = q_minus_p_cross_r / r_cross_s;
	if (-EPS..=1. + EPS).contains(&t) && (-EPS..=1. + EPS).contains(&u) {
		let t = t.clamp(0., 1.);
		let u = u.clamp(0., 1.);
		let location = p + r * t;
		let t1 = snap_param(ra.scale_normalized_value(t));
		let t2 = snap_param(rb.scale_normalized_value(u));
		// A line's own tangent is constant, so it says nothing about whether
		// this is a real crossing when the hit lands on either segment's
		// endpoint (the shared contour vertex could turn either way). Flag
		// it so the graph layer re-checks against the neighboring edges.
		let at_endpoint = t < POINT_EPS || t > 1. - POINT_EPS || u < POINT_EPS || u > 1. - POINT_EPS;
		out.push(Intersection { location, t1, t2, tangent: at_endpoint });
	}
}

/// The strip parallel to a curve's endpoint chord that bounds all of its
/// control points at the maximum perpendicular distance from the chord.
struct FatLine {
	chord_start: Point,
	chord_end: Point,
	d_min: f64,
	d_max: f64,
}

impl FatLine {
	fn from_curve(curve: &Curve) -> FatLine {
		let chord_start = curve.p0;
		let chord_end = curve.p3;
		let d1 = geom::signed_distance_point_to_line(curve.c1, chord_start, chord_end);
		let d2 = geom::signed_distance_point_to_line(curve.c2, chord_start, chord_end);
		let d_min = 0f64.min(d1).min(d2);
		let d_max = 0f64.max(d1).max(d2);
		FatLine { chord_start, chord_end, d_min, d_max }
	}
}

/// Clips `subject`'s parameter domain against `fat`'s strip, following the
/// piecewise-linear distance function through `subject`'s four control
/// points (a simplified stand-in for the exact convex-hull clip).
fn clip_range(subject: &Curve, fat: &FatLine) -> Option<ParamRange> {
	let ts = [0., 1. / 3., 2. / 3., 1.];
	let ds = [
		geom::signed_distance_point_to_line(subject.p0, fat.chord_start, fat.chord_end),
		geom::signed_distance_point_to_line(subject.c1, fat.chord_start, fat.chord_end),
		geom::signed_distance_point_to_line(subject.c2, fat.chord_start, fat.chord_end),
		geom::signed_distance_point_to_line(subject.p3, fat.chord_start, fat.chord_end),
	];

	let mut t_min: Option<f64> = None;
	let mut t_max: Option<f64> = None;
	let mut include = |t: f64| {
		t_min = Some(t_min.map_or(t, |m: f64| m.min(t)));
		t_max = Some(t_max.map_or(t, |m: f64| m.max(t)));
	};

	let inside = |d: f64| d >= fat.d_min - EPS && d <= fat.d_max + EPS;

	for i in 0..4 {
		if inside(ds[i]) {
			include(ts[i]);
		}
	}

	for i in 0..3 {
		let (t0, d0) = (ts[i], ds[i]);
		let (t1, d1) = (ts[i + 1], ds[i + 1]);
		for &boundary in &[fat.d_min, fat.d_max] {
			if (d0 - boundary) * (d1 - boundary) < 0. {
				let frac = (boundary - d0) / (d1 - d0);
				include(t0 + frac * (t1 - t0));
			}
		}
	}

	match (t_min, t_max) {
		(Some(lo), Some(hi)) => Some(ParamRange::new(lo, hi)),
		_ => None,
	}
}
