//! A closed cyclic sequence of [`Edge`]s, with containment, direction, and
//! entry/exit classification.

use crate::crossing::{Crossing, CrossingArena, CrossingKey};
use crate::curve::Curve;
use crate::edge::Edge;
use crate::geom::{self, Point, Rect};

/// Whether a contour fills its interior or cuts a hole in an enclosing one,
/// assigned during containment resolution in `Graph`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Inside {
	Filled,
	Hole,
}

/// Winding orientation of a contour, from the signed area of its boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
	Clockwise,
	AntiClockwise,
}

/// A closed loop of edges forming one subpath's boundary.
#[derive(Debug, Clone)]
pub struct Contour {
	pub edges: Vec<Edge>,
	pub inside: Inside,
	/// Indices, into the other graph's contour list, of contours this one
	/// has a coincident-edge [`crate::overlap::ContourOverlap`] with.
	pub overlaps: Vec<usize>,
}

impl Contour {
	pub fn new() -> Self {
		Contour {
			edges: Vec::new(),
			inside: Inside::Filled,
			overlaps: Vec::new(),
		}
	}

	pub fn from_curve(curve: Curve) -> Self {
		let mut contour = Contour::new();
		contour.add_curve(curve);
		contour
	}

	pub fn is_empty(&self) -> bool {
		self.edges.is_empty()
	}

	pub fn add_curve(&mut self, curve: Curve) {
		if !curve.is_point() {
			self.edges.push(Edge::new(curve));
		}
	}

	pub fn add_reverse_curve(&mut self, curve: Curve) {
		self.add_curve(curve.reversed());
	}

	/// Appends the subcurve of the edge shared by `start` and `end` (which
	/// must refer to crossings on the *same* edge) that lies between them.
	/// Either may be absent, meaning "from the edge's start"/"to the edge's
	/// end", but not both.
	pub fn add_curve_from(&mut self, curve: &Curve, start: Option<&Crossing>, end: Option<&Crossing>) {
		assert!(start.is_some() || end.is_some(), "addCurveFrom requires at least one endpoint");
		let t_start = start.map(|c| c.intersection.t1).unwrap_or(0.);
		let t_end = end.map(|c| c.intersection.t1).unwrap_or(1.);
		if (t_end - t_start).abs() < 1e-12 {
			return;
		}
		let range = crate::geom::ParamRange::new(t_start, t_end);
		self.add_curve(curve.subcurve_at(range));
	}

	pub fn add_reverse_curve_from(&mut self, curve: &Curve, start: Option<&Crossing>, end: Option<&Crossing>) {
		assert!(start.is_some() || end.is_some(), "addReverseCurveFrom requires at least one endpoint");
		let t_start = start.map(|c| c.intersection.t1).unwrap_or(0.);
		let t_end = end.map(|c| c.intersection.t1).unwrap_or(1.);
		if (t_end - t_start).abs() < 1e-12 {
			return;
		}
		let range = crate::geom::ParamRange::new(t_start, t_end);
		self.add_reverse_curve(curve.subcurve_at(range));
	}

	/// Ensures the contour closes: if the last edge's end doesn't meet the
	/// first edge's start, a closing line segment is appended.
	pub fn close(&mut self) {
		if self.edges.len() < 2 {
			return;
		}
		let first = self.edges[0].curve.start();
		let last = self.edges[self.edges.len() - 1].curve.end();
		if !geom::points_close(first, last) {
			self.add_curve(Curve::line(last, first));
		}
	}

	pub fn first_point(&self) -> Option<Point> {
		self.edges.first().map(|e| e.curve.start())
	}

	pub fn bounds(&self) -> Rect {
		let mut iter = self.edges.iter();
		let first = iter.next().expect("contour must have at least one edge to compute bounds");
		let mut rect = first.curve.bounds();
		for edge in iter {
			rect = rect.union(&edge.curve.bounds());
		}
		rect
	}

	pub fn next_edge_index(&self, index: usize) -> usize {
		(index + 1) % self.edges.len()
	}

	pub fn previous_edge_index(&self, index: usize) -> usize {
		(index + self.edges.len() - 1) % self.edges.len()
	}

	/// Signed area of the polygon formed by each edge's endpoints; positive
	/// means clockwise in a y-down (screen) coordinate system.
	fn signed_area(&self) -> f64 {
		let mut sum = 0.;
		for edge in &self.edges {
			let p0 = edge.curve.start();
			let p1 = edge.curve.end();
			sum += p0.x * p1.y - p1.x * p0.y;
		}
		sum / 2.
	}

	pub fn direction(&self) -> Direction {
		if self.signed_area() >= 0. {
			Direction::Clockwise
		} else {
			Direction::AntiClockwise
		}
	}

	pub fn reversed(&self) -> Contour {
		let mut edges: Vec<Edge> = self.edges.iter().rev().map(|e| Edge::new(e.curve.reversed())).collect();
		if edges.is_empty() {
			edges = Vec::new();
		}
		Contour {
			edges,
			inside: self.inside,
			overlaps: Vec::new(),
		}
	}

	pub fn made_clockwise_if_necessary(&self) -> Contour {
		if self.direction() == Direction::Clockwise {
			self.clone()
		} else {
			self.reversed()
		}
	}

	pub fn made_anticlockwise_if_necessary(&self) -> Contour {
		if self.direction() == Direction::AntiClockwise {
			self.clone()
		} else {
			self.reversed()
		}
	}

	/// A point guaranteed to be non-degenerate for containment testing: the
	/// midpoint of the first edge whose curve isn't itself a point.
	pub fn representative_point(&self) -> Option<Point> {
		self.edges.iter().find(|e| !e.curve.is_point()).map(|e| e.curve.point_at(0.5))
	}

	/// Ray-casting containment test: a horizontal ray from `point` toward
	/// `+x` infinity is intersected against every edge; parity of the true
	/// crossing count determines in/out.
	pub fn contains_point(&self, point: Point) -> bool {
		for angle_attempt in 0..5 {
			// Perturb the ray's angle slightly on retries to dodge tangent
			// touches and grazing endpoint hits.
			let angle = angle_attempt as f64 * 0.0137;
			if let Some(count) = self.ray_crossing_count(point, angle) {
				return count % 2 == 1;
			}
		}
		false
	}

	/// Returns `None` when the ray's angle produced an ambiguous
	/// (degenerate/tangent) hit that should be retried at a different angle.
	fn ray_crossing_count(&self, point: Point, angle: f64) -> Option<usize> {
		let direction = Point::new(angle.cos(), angle.sin());
		let far = point + direction * (self.bounds().width() + self.bounds().height() + 1.).max(1e6);
		let mut count = 0usize;
		for edge in &self.edges {
			match ray_segment_crossings(point, far, &edge.curve) {
				Some(hits) => count += hits,
				None => return None,
			}
		}
		Some(count)
	}

	/// Whether `self` and `other` trace the same point set: same edge count,
	/// and some rotation (forward or reversed) lines up every edge's control
	/// points within tolerance. Used to avoid emitting a duplicate output
	/// contour when both operands contribute identical geometry.
	pub fn is_equivalent(&self, other: &Contour) -> bool {
		let n = self.edges.len();
		if n == 0 || n != other.edges.len() {
			return false;
		}
		let matches_from = |edges: &[Edge], start: usize| (0..n).all(|i| curves_close(&edges[i].curve, &other.edges[(start + i) % n].curve));
		if (0..n).any(|start| matches_from(&self.edges, start)) {
			return true;
		}
		let reversed = self.reversed();
		(0..n).any(|start| matches_from(&reversed.edges, start))
	}

	pub fn round(&self) -> Contour {
		Contour {
			edges: self.edges.iter().map(|e| e.round()).collect(),
			inside: self.inside,
			overlaps: self.overlaps.clone(),
		}
	}

	/// For each edge of `self` carrying crossings, classify whether
	/// traversal at that crossing enters or exits the opposing region, by
	/// testing the midpoint between adjacent crossings with `is_inside_other`
	/// (a predicate over the *other graph as a whole*, so that a contour
	/// which crosses several of the other graph's contours is still
	/// classified consistently — see `Graph::contains_point_as_region`).
	/// When `mark_inside` is true, exits of the inside region are marked as
	/// entries on this side (used by intersection/difference).
	pub fn mark_crossings_as_entry_or_exit(&self, mark_inside: bool, arena: &mut CrossingArena, is_inside_other: impl Fn(Point) -> bool) {
		for (edge_index, edge) in self.edges.iter().enumerate() {
			let crossing_keys: Vec<CrossingKey> = edge.crossings().to_vec();
			if crossing_keys.is_empty() {
				continue;
			}
			for (i, &key) in crossing_keys.iter().enumerate() {
				let t_here = arena.get(key).order();
				let midpoint = match crossing_keys.get(i + 1) {
					Some(&next_key) => {
						let t_next = arena.get(next_key).order();
						edge.curve.point_at((t_here + t_next) / 2.)
					}
					None => self.point_after_edge_end(edge_index),
				};
				let inside_other = is_inside_other(midpoint);
				let entry = if mark_inside { inside_other } else { !inside_other };
				arena.get_mut(key).entry = entry;
			}
		}
	}

	/// A point strictly between the last crossing on `edge_index` and the
	/// next crossing found by walking forward through the contour, used
	/// when a crossing is the last one on its edge.
	fn point_after_edge_end(&self, edge_index: usize) -> Point {
		let next_index = self.next_edge_index(edge_index);
		let next_edge = &self.edges[next_index];
		match next_edge.first_crossing() {
			Some(_) => next_edge.curve.point_at(0.25),
			None => next_edge.curve.point_at(0.5),
		}
	}
}

impl Default for Contour {
	fn default() -> Self {
		Contour::new()
	}
}

fn curves_close(a: &Curve, b: &Curve) -> bool {
	geom::points_close(a.p0, b.p0) && geom::points_close(a.c1, b.c1) && geom::points_close(a.c2, b.c2) && geom::points_close(a.p3, b.p3)
}

/// Number of times the ray `from -> to` crosses `curve`, with tangential
/// touches excluded. Returns `None` if the hit is ambiguous (e.g. the ray
/// passes exactly through a curve endpoint) and should be retried at a
/// different angle.
fn ray_segment_crossings(from: Point, to: Point, curve: &Curve) -> Option<usize> {
	const SAMPLES: usize = 24;
	let mut count = 0usize;
	let mut prev = curve.point_at(0.);
	for i in 1..=SAMPLES {
		let t = i as f64 / SAMPLES as f64;
		let next = curve.point_at(t);
		if let Some(hit) = segment_segment_ambiguous(from, to, prev, next) {
			if hit {
				count += 1;
			}
		} else {
			return None;
		}
		prev = next;
	}
	Some(count)
}

/// True/false for a clean crossing/no-crossing, `None` if the segments
/// touch at an endpoint (ambiguous without a different ray angle).
fn segment_segment_ambiguous(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<bool> {
	let r = p2 - p1;
	let s = p4 - p3;
	let r_cross_s = r.x * s.y - r.y * s.x;
	let q_minus_p = p3 - p1;
	if r_cross_s.abs() < 1e-12 {
		return Some(false);
	}
	let t = (q_minus_p.x * s.y - q_minus_p.y * s.x) / r_cross_s;
	let u = (q_minus_p.x * r.y - q_minus_p.y * r.x) / r_cross_s;
	if t < 0. || t > 1. {
		return Some(false);
	}
	if u.abs() < 1e-9 || (u - 1.).abs() < 1e-9 {
		return None;
	}
	if !(0. ..1.).contains(&u) {
		return Some(false);
	}
	Some(true)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rect_contour(min: Point, max: Point) -> Contour {
		let mut c = Contour::new();
		c.add_curve(Curve::line(Point::new(min.x, min.y), Point::new(max.x, min.y)));
		c.add_curve(Curve::line(Point::new(max.x, min.y), Point::new(max.x, max.y)));
		c.add_curve(Curve::line(Point::new(max.x, max.y), Point::new(min.x, max.y)));
		c.add_curve(Curve::line(Point::new(min.x, max.y), Point::new(min.x, min.y)));
		c
	}

	#[test]
	fn rectangle_contains_interior_point() {
		let c = rect_contour(Point::new(0., 0.), Point::new(10., 10.));
		assert!(c.contains_point(Point::new(5., 5.)));
		assert!(!c.contains_point(Point::new(20., 5.)));
	}

	#[test]
	fn clockwise_rect_has_positive_signed_area_direction() {
		let c = rect_contour(Point::new(0., 0.), Point::new(10., 10.));
		assert_eq!(c.direction(), Direction::Clockwise);
		let r = c.reversed();
		assert_eq!(r.direction(), Direction::AntiClockwise);
	}

	#[test]
	fn close_adds_segment_when_not_closed() {
		let mut c = Contour::new();
		c.add_curve(Curve::line(Point::new(0., 0.), Point::new(10., 0.)));
		c.add_curve(Curve::line(Point::new(10., 0.), Point::new(10., 10.)));
		c.close();
		let last = c.edges.last().unwrap();
		assert!(geom::points_close(last.curve.end(), Point::new(0., 0.)));
	}
}
