//! Vector/angle/parameter-range primitives shared by the rest of the crate.

use crate::consts::EPS;
use glam::DVec2;
use std::f64::consts::PI;

/// A point or vector in the plane. Matches `bezier-rs`'s choice of `glam::DVec2`.
pub type Point = DVec2;

/// Returns true iff `|a - b| < threshold`.
pub fn values_close_with(a: f64, b: f64, threshold: f64) -> bool {
	(a - b).abs() < threshold
}

/// Returns true iff `|a - b| < EPS`.
pub fn values_close(a: f64, b: f64) -> bool {
	values_close_with(a, b, EPS)
}

/// Componentwise closeness with an explicit threshold.
pub fn points_close_with(p: Point, q: Point, threshold: f64) -> bool {
	values_close_with(p.x, q.x, threshold) && values_close_with(p.y, q.y, threshold)
}

/// Componentwise closeness using the point tolerance (`PT_EPS`).
pub fn points_close(p: Point, q: Point) -> bool {
	points_close_with(p, q, crate::consts::POINT_EPS)
}

/// The angle (radians) of `p` relative to the origin, normalized to `[0, 2*PI)`.
pub fn polar_angle(p: Point) -> f64 {
	let angle = p.y.atan2(p.x);
	if angle < 0. {
		angle + 2. * PI
	} else {
		angle
	}
}

/// Normalizes an angle into `[0, 2*PI)`.
pub fn normalize_angle(angle: f64) -> f64 {
	let two_pi = 2. * PI;
	let wrapped = angle % two_pi;
	if wrapped < 0. {
		wrapped + two_pi
	} else {
		wrapped
	}
}

/// A directed arc `[min, max)` on `[0, 2*PI)`. When `min > max` the arc wraps
/// through zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AngleRange {
	pub min: f64,
	pub max: f64,
}

impl AngleRange {
	pub fn new(min: f64, max: f64) -> Self {
		AngleRange {
			min: normalize_angle(min),
			max: normalize_angle(max),
		}
	}

	/// Whether `angle` falls inside this directed arc, wrapping through 0 if necessary.
	pub fn contains(&self, angle: f64) -> bool {
		let angle = normalize_angle(angle);
		if self.min <= self.max {
			angle >= self.min && angle <= self.max
		} else {
			angle >= self.min || angle <= self.max
		}
	}
}

/// A sub-interval of the curve parameter domain `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParamRange {
	pub min: f64,
	pub max: f64,
}

impl ParamRange {
	pub const UNIT: ParamRange = ParamRange { min: 0., max: 1. };

	pub fn new(min: f64, max: f64) -> Self {
		ParamRange { min, max }
	}

	pub fn size(&self) -> f64 {
		self.max - self.min
	}

	pub fn average(&self) -> f64 {
		(self.min + self.max) / 2.
	}

	/// Maps `value` (itself expressed in `[0, 1]`, relative to this range) back
	/// onto the parent `[0, 1]` domain this range is a subset of.
	pub fn scale_normalized_value(&self, value: f64) -> f64 {
		self.min + value * self.size()
	}

	/// True iff `min` and `max` agree to `places` decimal digits.
	pub fn has_converged(&self, places: i32) -> bool {
		let scale = 10f64.powi(places);
		(self.min * scale).round() == (self.max * scale).round()
	}
}

/// An axis-aligned bounding box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
	pub min: Point,
	pub max: Point,
}

impl Rect {
	pub fn new(min: Point, max: Point) -> Self {
		Rect { min, max }
	}

	/// The smallest `Rect` containing all of `points`. Panics on an empty slice;
	/// every caller in this crate bounds a non-degenerate curve.
	pub fn from_points(points: &[Point]) -> Self {
		let mut min = points[0];
		let mut max = points[0];
		for &p in &points[1..] {
			min = min.min(p);
			max = max.max(p);
		}
		Rect { min, max }
	}

	pub fn width(&self) -> f64 {
		self.max.x - self.min.x
	}

	pub fn height(&self) -> f64 {
		self.max.y - self.min.y
	}

	pub fn union(&self, other: &Rect) -> Rect {
		Rect {
			min: self.min.min(other.min),
			max: self.max.max(other.max),
		}
	}

	/// Whether `self` and `other` overlap, allowing `tolerance` of slack on each axis.
	pub fn overlaps(&self, other: &Rect, tolerance: f64) -> bool {
		self.min.x <= other.max.x + tolerance && self.max.x >= other.min.x - tolerance && self.min.y <= other.max.y + tolerance && self.max.y >= other.min.y - tolerance
	}

	pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
		p.x >= self.min.x - tolerance && p.x <= self.max.x + tolerance && p.y >= self.min.y - tolerance && p.y <= self.max.y + tolerance
	}
}

/// The unit normal of the line from `start` to `end`, rotated 90 degrees.
pub fn line_normal(start: Point, end: Point) -> Point {
	let delta = end - start;
	DVec2::new(-delta.y, delta.x).normalize_or_zero()
}

pub fn line_midpoint(start: Point, end: Point) -> Point {
	(start + end) / 2.
}

/// Perpendicular distance from `point` to the infinite line through
/// `line_start`/`line_end`. If the two line points coincide, falls back to
/// the distance from `point` to `line_start`.
pub fn distance_point_to_line(point: Point, line_start: Point, line_end: Point) -> f64 {
	let line_delta = line_end - line_start;
	let length = line_delta.length();
	if length < EPS {
		return (point - line_start).length();
	}
	let normal = DVec2::new(-line_delta.y, line_delta.x) / length;
	(point - line_start).dot(normal).abs()
}

/// Signed perpendicular distance (not absolute value), used by the fat-line
/// construction where the sign distinguishes the two sides of the chord.
pub fn signed_distance_point_to_line(point: Point, line_start: Point, line_end: Point) -> f64 {
	let line_delta = line_end - line_start;
	let length = line_delta.length();
	if length < EPS {
		return 0.;
	}
	let normal = DVec2::new(-line_delta.y, line_delta.x) / length;
	(point - line_start).dot(normal)
}

/// Whether two curves' tangent directions actually interleave at a shared
/// point (a true crossing) as opposed to touching and staying on the same
/// side (a tangency). `edge1_tangents`/`edge2_tangents` are each the
/// incoming/outgoing tangent direction of one curve at the point.
pub fn tangents_cross(edge1_tangents: [Point; 2], edge2_tangents: [Point; 2]) -> bool {
	let range = AngleRange::new(polar_angle(edge1_tangents[0]), polar_angle(edge1_tangents[1]));
	let first_inside = range.contains(polar_angle(edge2_tangents[0]));
	let second_inside = range.contains(polar_angle(edge2_tangents[1]));
	first_inside != second_inside
}

/// Snaps each coordinate of `p` to the nearest multiple of `grid`.
pub fn round_point_to_grid(p: Point, grid: f64) -> Point {
	DVec2::new((p.x / grid).round() * grid, (p.y / grid).round() * grid)
}
