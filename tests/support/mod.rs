//! Shared helpers for the integration tests: building literal paths and
//! normalizing output paths so assertions don't depend on which contour or
//! edge the stitcher happened to start from.

use bezier_bool::{Path, PathElement};
use glam::DVec2;

fn pt(x: f64, y: f64) -> DVec2 {
	DVec2::new(x, y)
}

pub fn rect(min: (f64, f64), max: (f64, f64)) -> Path {
	let mut path = Path::new();
	path.push(PathElement::Move(pt(min.0, min.1)));
	path.push(PathElement::Line(pt(max.0, min.1)));
	path.push(PathElement::Line(pt(max.0, max.1)));
	path.push(PathElement::Line(pt(min.0, max.1)));
	path.push(PathElement::Close);
	path
}

pub fn polygon(points: &[(f64, f64)]) -> Path {
	let mut path = Path::new();
	let mut points = points.iter();
	let first = *points.next().expect("polygon needs at least one point");
	path.push(PathElement::Move(pt(first.0, first.1)));
	for &p in points {
		path.push(PathElement::Line(pt(p.0, p.1)));
	}
	path.push(PathElement::Close);
	path
}

pub fn circle(center: (f64, f64), radius: f64) -> Path {
	const K: f64 = 0.5522847498;
	let (cx, cy) = center;
	let top = (cx, cy - radius);
	let right = (cx + radius, cy);
	let bottom = (cx, cy + radius);
	let left = (cx - radius, cy);
	let mut path = Path::new();
	path.push(PathElement::Move(pt(top.0, top.1)));
	path.push(PathElement::Cubic(pt(top.0 + radius * K, top.1), pt(right.0, right.1 - radius * K), pt(right.0, right.1)));
	path.push(PathElement::Cubic(pt(right.0, right.1 + radius * K), pt(bottom.0 + radius * K, bottom.1), pt(bottom.0, bottom.1)));
	path.push(PathElement::Cubic(pt(bottom.0 - radius * K, bottom.1), pt(left.0, left.1 + radius * K), pt(left.0, left.1)));
	path.push(PathElement::Cubic(pt(left.0, left.1 - radius * K), pt(top.0 - radius * K, top.1), pt(top.0, top.1)));
	path.push(PathElement::Close);
	path
}

fn round4(v: f64) -> f64 {
	(v * 10_000.0).round() / 10_000.0
}

/// Every subpath's vertex points (control points are dropped; none of the
/// scenarios below need them), in path order.
fn subpath_vertices(path: &Path) -> Vec<Vec<(f64, f64)>> {
	let mut subpaths = Vec::new();
	let mut current: Vec<(f64, f64)> = Vec::new();
	for element in &path.elements {
		match *element {
			PathElement::Move(p) => {
				if !current.is_empty() {
					subpaths.push(std::mem::take(&mut current));
				}
				current.push((round4(p.x), round4(p.y)));
			}
			PathElement::Line(p) | PathElement::Cubic(_, _, p) => {
				current.push((round4(p.x), round4(p.y)));
			}
			PathElement::Close => {}
		}
	}
	if !current.is_empty() {
		subpaths.push(current);
	}
	subpaths
}

/// The lexicographically smallest rotation of `points`, tried both forward
/// and reversed, so two cyclic vertex lists that describe the same contour
/// starting from a different edge (or walked in the opposite direction)
/// compare equal.
fn canonical_contour(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
	let mut candidates = Vec::new();
	for reversed in [false, true] {
		let mut pts = points.to_vec();
		if reversed {
			pts.reverse();
		}
		for start in 0..pts.len() {
			let mut rotated = pts[start..].to_vec();
			rotated.extend_from_slice(&pts[..start]);
			candidates.push(rotated);
		}
	}
	candidates.into_iter().min_by(|a, b| a.partial_cmp(b).expect("no NaNs in test coordinates")).expect("at least one candidate")
}

/// Normalizes `path` into a sorted list of canonical contours, comparable
/// with `assert_eq!` regardless of contour/edge/winding-start order.
pub fn normalize(path: &Path) -> Vec<Vec<(f64, f64)>> {
	let mut contours: Vec<Vec<(f64, f64)>> = subpath_vertices(path).iter().map(|v| canonical_contour(v)).collect();
	contours.sort_by(|a, b| a.partial_cmp(b).expect("no NaNs in test coordinates"));
	contours
}

pub fn assert_paths_equivalent(actual: &Path, expected: &Path) {
	assert_eq!(normalize(actual), normalize(expected));
}

/// Panics unless every subpath in `path` ends in a `Close` before the next
/// `Move` (or the path's end) — the stitcher must never hand back a contour
/// it started walking but didn't finish.
pub fn assert_every_contour_closed(path: &Path) {
	let mut open = false;
	for element in &path.elements {
		match element {
			PathElement::Move(_) => {
				assert!(!open, "a new contour started before the previous one was closed");
				open = true;
			}
			PathElement::Close => {
				assert!(open, "Close with no preceding Move");
				open = false;
			}
			PathElement::Line(_) | PathElement::Cubic(..) => {
				assert!(open, "curve segment outside any contour");
			}
		}
	}
	assert!(!open, "a contour was left open at the end of the path");
}
