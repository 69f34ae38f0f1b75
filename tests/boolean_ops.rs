//! The concrete scenarios: rectangle unions/intersections/differences,
//! circle-in-rectangle containment, and externally tangent circles.

mod support;

use bezier_bool::{boolean_difference, boolean_intersect, boolean_union};
use support::{assert_paths_equivalent, circle, normalize, polygon, rect};

#[test]
fn union_of_overlapping_rectangles_is_an_l_shaped_octagon() {
	let r1 = rect((0., 0.), (10., 10.));
	let r2 = rect((5., 5.), (15., 15.));
	let result = boolean_union(&r1, &r2);
	let expected = polygon(&[(0., 0.), (10., 0.), (10., 5.), (15., 5.), (15., 15.), (5., 15.), (5., 10.), (0., 10.)]);
	assert_paths_equivalent(&result, &expected);
}

#[test]
fn intersection_of_overlapping_rectangles_is_the_shared_square() {
	let r1 = rect((0., 0.), (10., 10.));
	let r2 = rect((5., 5.), (15., 15.));
	let result = boolean_intersect(&r1, &r2);
	let expected = polygon(&[(5., 5.), (10., 5.), (10., 10.), (5., 10.)]);
	assert_paths_equivalent(&result, &expected);
}

#[test]
fn difference_of_overlapping_rectangles_removes_the_shared_corner() {
	let r1 = rect((0., 0.), (10., 10.));
	let r2 = rect((5., 5.), (15., 15.));
	let result = boolean_difference(&r1, &r2);
	let expected = polygon(&[(0., 0.), (10., 0.), (10., 5.), (5., 5.), (5., 10.), (0., 10.)]);
	assert_paths_equivalent(&result, &expected);
}

#[test]
fn circle_fully_inside_rectangle_vanishes_under_union() {
	let rectangle = rect((0., 0.), (10., 10.));
	let circle_inside = circle((5., 5.), 2.);
	let result = boolean_union(&rectangle, &circle_inside);
	assert_paths_equivalent(&result, &rectangle);
}

#[test]
fn circle_fully_inside_rectangle_becomes_a_hole_under_difference() {
	let rectangle = rect((0., 0.), (10., 10.));
	let circle_inside = circle((5., 5.), 2.);
	let result = boolean_difference(&rectangle, &circle_inside);

	let mut expected = rectangle.clone();
	expected.elements.extend(circle_inside.elements.iter().copied());
	assert_paths_equivalent(&result, &expected);

	// Outer boundary and hole boundary must be two distinct contours.
	assert_eq!(normalize(&result).len(), 2);
}

#[test]
fn externally_tangent_circles_both_survive_union() {
	let left = circle((0., 0.), 5.);
	let right = circle((10., 0.), 5.);
	let result = boolean_union(&left, &right);

	let mut expected = left.clone();
	expected.elements.extend(right.elements.iter().copied());
	assert_paths_equivalent(&result, &expected);
}
