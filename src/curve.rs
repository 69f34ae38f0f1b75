//! A single cubic Bezier curve — one segment of a [`crate::contour::Contour`].

use crate::consts::{EPS, ROUND_GRID};
use crate::geom::{self, ParamRange, Point, Rect};

/// Fixed-degree weights for 5-point Gauss-Legendre quadrature on `[-1, 1]`,
/// used by [`Curve::length_at`].
const GAUSS_LEGENDRE_ABSCISSAE: [f64; 5] = [0., -0.5384693101056831, 0.5384693101056831, -0.9061798459386640, 0.9061798459386640];
const GAUSS_LEGENDRE_WEIGHTS: [f64; 5] = [0.5688888888888889, 0.4786286704993665, 0.4786286704993665, 0.2369268850561891, 0.2369268850561891];

/// One cubic Bezier curve `B(t) = (1-t)^3 P0 + 3(1-t)^2 t C1 + 3(1-t) t^2 C2 + t^3 P3`.
///
/// Straight line segments are represented as cubics whose control points lie
/// on the chord (`straight` is set so the solver can shortcut the general
/// curve/curve machinery for the much more common line/line and line/curve
/// cases).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Curve {
	pub p0: Point,
	pub c1: Point,
	pub c2: Point,
	pub p3: Point,
	pub straight: bool,
}

impl Curve {
	pub fn cubic(p0: Point, c1: Point, c2: Point, p3: Point) -> Self {
		Curve { p0, c1, c2, p3, straight: false }
	}

	/// A cubic whose control points lie on the `start`-`end` chord, a third
	/// of the way along it. This is how a `Line`/`Close` path element is
	/// lifted into the uniform cubic representation the rest of the engine
	/// operates on.
	pub fn line(start: Point, end: Point) -> Self {
		let c1 = start + (end - start) / 3.;
		let c2 = start + (end - start) * (2. / 3.);
		Curve {
			p0: start,
			c1,
			c2,
			p3: end,
			straight: true,
		}
	}

	pub fn start(&self) -> Point {
		self.p0
	}

	pub fn end(&self) -> Point {
		self.p3
	}

	/// Whether all four control points coincide within tolerance — a
	/// degenerate, zero-length curve that should be filtered out during
	/// graph construction.
	pub fn is_point(&self) -> bool {
		geom::points_close(self.p0, self.c1) && geom::points_close(self.p0, self.c2) && geom::points_close(self.p0, self.p3)
	}

	/// Evaluates `B(t)` via de Casteljau's algorithm, optionally also
	/// returning the left/right subcurves split at `t`.
	pub fn point_at(&self, t: f64) -> Point {
		self.de_casteljau(t).0
	}

	fn de_casteljau(&self, t: f64) -> (Point, Curve, Curve) {
		let p0 = self.p0;
		let p1 = self.c1;
		let p2 = self.c2;
		let p3 = self.p3;

		let p01 = p0.lerp(p1, t);
		let p12 = p1.lerp(p2, t);
		let p23 = p2.lerp(p3, t);

		let p012 = p01.lerp(p12, t);
		let p123 = p12.lerp(p23, t);

		let p0123 = p012.lerp(p123, t);

		let left = Curve {
			p0,
			c1: p01,
			c2: p012,
			p3: p0123,
			straight: self.straight,
		};
		let right = Curve {
			p0: p0123,
			c1: p123,
			c2: p23,
			p3,
			straight: self.straight,
		};
		(p0123, left, right)
	}

	/// The `(left, right)` curves resulting from splitting at `t`.
	pub fn split(&self, t: f64) -> (Curve, Curve) {
		let (_, left, right) = self.de_casteljau(t);
		(left, right)
	}

	/// The portion of this curve over `[range.min, range.max]`.
	pub fn subcurve_at(&self, range: ParamRange) -> Curve {
		let (_, _, after_min) = self.de_casteljau(range.min);
		if range.max >= 1. {
			return after_min;
		}
		// Re-express `range.max` relative to the already-trimmed `after_min` curve.
		let rescaled_max = (range.max - range.min) / (1. - range.min).max(EPS);
		let (_, before_max, _) = after_min.de_casteljau(rescaled_max.clamp(0., 1.));
		before_max
	}

	/// `(left, middle, right)` where `middle` is `subcurve_at(range)`.
	pub fn split_at(&self, range: ParamRange) -> (Curve, Curve, Curve) {
		let (_, left, rest) = self.de_casteljau(range.min);
		if range.max >= 1. {
			return (left, rest, Curve::line(rest.p3, rest.p3));
		}
		let rescaled_max = (range.max - range.min) / (1. - range.min).max(EPS);
		let (_, middle, right) = rest.de_casteljau(rescaled_max.clamp(0., 1.));
		(left, middle, right)
	}

	fn derivative_at(&self, t: f64) -> Point {
		let one_minus_t = 1. - t;
		3. * one_minus_t * one_minus_t * (self.c1 - self.p0) + 6. * one_minus_t * t * (self.c2 - self.c1) + 3. * t * t * (self.p3 - self.c2)
	}

	pub fn tangent_at(&self, t: f64) -> Point {
		let d = self.derivative_at(t);
		if d.length_squared() < EPS {
			// Degenerate derivative at an endpoint with a coincident handle;
			// fall back to the chord direction.
			return (self.p3 - self.p0).normalize_or_zero();
		}
		d.normalize_or_zero()
	}

	/// Arc length of the whole curve via Gauss-Legendre quadrature.
	pub fn length(&self) -> f64 {
		self.length_at(1.)
	}

	/// Arc length of the `[0, t]` portion of the curve.
	pub fn length_at(&self, t: f64) -> f64 {
		if t <= 0. {
			return 0.;
		}
		let half = t / 2.;
		let mut sum = 0.;
		for i in 0..5 {
			let sample_t = half * GAUSS_LEGENDRE_ABSCISSAE[i] + half;
			sum += GAUSS_LEGENDRE_WEIGHTS[i] * self.derivative_at(sample_t).length();
		}
		half * sum
	}

	pub fn reversed(&self) -> Curve {
		Curve {
			p0: self.p3,
			c1: self.c2,
			c2: self.c1,
			p3: self.p0,
			straight: self.straight,
		}
	}

	pub fn bounds(&self) -> Rect {
		Rect::from_points(&[self.p0, self.c1, self.c2, self.p3])
	}

	/// Snaps all four control points to a fixed grid for deterministic
	/// stitching where curves from different inputs are expected to meet
	/// exactly.
	pub fn round(&self) -> Curve {
		Curve {
			p0: geom::round_point_to_grid(self.p0, ROUND_GRID),
			c1: geom::round_point_to_grid(self.c1, ROUND_GRID),
			c2: geom::round_point_to_grid(self.c2, ROUND_GRID),
			p3: geom::round_point_to_grid(self.p3, ROUND_GRID),
			straight: self.straight,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn point_at_endpoints() {
		let c = Curve::cubic(Point::new(0., 0.), Point::new(1., 1.), Point::new(2., 1.), Point::new(3., 0.));
		assert!(geom::points_close(c.point_at(0.), c.p0));
		assert!(geom::points_close(c.point_at(1.), c.p3));
	}

	#[test]
	fn split_reconstructs_endpoints() {
		let c = Curve::cubic(Point::new(0., 0.), Point::new(1., 2.), Point::new(2., 2.), Point::new(3., 0.));
		let (left, right) = c.split(0.4);
		assert!(geom::points_close(left.p0, c.p0));
		assert!(geom::points_close(left.p3, right.p0));
		assert!(geom::points_close(right.p3, c.p3));
		assert!(geom::points_close(left.p3, c.point_at(0.4)));
	}

	#[test]
	fn subcurve_matches_split_middle() {
		let c = Curve::cubic(Point::new(0., 0.), Point::new(1., 2.), Point::new(2., -1.), Point::new(3., 0.));
		let range = ParamRange::new(0.25, 0.75);
		let (_, middle, _) = c.split_at(range);
		let sub = c.subcurve_at(range);
		assert!(geom::points_close(sub.p0, middle.p0));
		assert!(geom::points_close(sub.p3, middle.p3));
	}

	#[test]
	fn line_length_matches_euclidean_distance() {
		let c = Curve::line(Point::new(0., 0.), Point::new(3., 4.));
		assert!((c.length() - 5.0).abs() < 1e-6);
	}

	#[test]
	fn reversed_swaps_endpoints() {
		let c = Curve::cubic(Point::new(0., 0.), Point::new(1., 1.), Point::new(2., 1.), Point::new(3., 0.));
		let r = c.reversed();
		assert!(geom::points_close(r.p0, c.p3));
		assert!(geom::points_close(r.p3, c.p0));
	}

	#[test]
	fn is_point_detects_degenerate_curve() {
		let p = Point::new(1., 1.);
		let c = Curve::cubic(p, p, p, p);
		assert!(c.is_point());
	}
}
