//! The top-level orchestrator: converts paths to graphs, inserts crossings,
//! resolves containment, classifies entry/exit per operation, and stitches
//! the result back into a path.

use crate::contour::{Contour, Inside};
use crate::crossing::{Crossing, CrossingArena, CrossingKey, EdgeRef, Side};
use crate::curve::Curve;
use crate::edge::Edge;
use crate::geom::{self, Point};
use crate::overlap::{ContourOverlap, EdgeOverlap};
use crate::path::{Path, PathElement};
use crate::solver::{self, Intersection, IntersectionResult};
use rustc_hash::{FxHashMap, FxHashSet};

/// A boolean set operation over two graphs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Op {
	Union,
	Intersect,
	Difference,
}

/// A set of contours, the unit one operand of a boolean operation.
#[derive(Debug, Clone, Default)]
pub struct Graph {
	pub contours: Vec<Contour>,
}

impl Graph {
	/// Walks `path`'s elements into one contour per subpath, lifting
	/// `Line`/`Close` segments into the uniform cubic representation and
	/// materializing any implicit closing segment.
	pub fn from_path(path: &Path) -> Graph {
		let mut contours = Vec::new();
		let mut current: Option<Contour> = None;
		let mut subpath_start: Option<Point> = None;
		let mut last_point: Option<Point> = None;

		for element in &path.elements {
			match *element {
				PathElement::Move(p) => {
					if let Some(contour) = current.take() {
						push_closed(&mut contours, contour);
					}
					current = Some(Contour::new());
					subpath_start = Some(p);
					last_point = Some(p);
				}
				PathElement::Line(p) => {
					let start = last_point.expect("Line element without a preceding Move");
					current.as_mut().expect("Line element without a preceding Move").add_curve(Curve::line(start, p));
					last_point = Some(p);
				}
				PathElement::Cubic(c1, c2, p) => {
					let start = last_point.expect("Cubic element without a preceding Move");
					current.as_mut().expect("Cubic element without a preceding Move").add_curve(Curve::cubic(start, c1, c2, p));
					last_point = Some(p);
				}
				PathElement::Close => {
					let start = last_point.expect("Close element without a preceding Move");
					let target = subpath_start.expect("Close element without a preceding Move");
					if !geom::points_close(start, target) {
						current.as_mut().expect("Close element without a preceding Move").add_curve(Curve::line(start, target));
					}
					last_point = Some(target);
				}
			}
		}
		if let Some(contour) = current.take() {
			push_closed(&mut contours, contour);
		}

		Graph { contours }
	}

	/// Emits each contour as `Move`, then `Line`/`Cubic` per edge, then
	/// `Close`. Straight edges round-trip as `Line` rather than a
	/// degenerate-looking `Cubic`.
	pub fn to_path(&self) -> Path {
		let mut path = Path::new();
		for contour in &self.contours {
			if contour.is_empty() {
				continue;
			}
			path.push(PathElement::Move(contour.edges[0].curve.start()));
			for edge in &contour.edges {
				if edge.curve.straight {
					path.push(PathElement::Line(edge.curve.end()));
				} else {
					path.push(PathElement::Cubic(edge.curve.c1, edge.curve.c2, edge.curve.end()));
				}
			}
			path.push(PathElement::Close);
		}
		path
	}

	/// Whether `point` lies inside the filled region this graph's contours
	/// describe as a whole, under even-odd nesting: a point is inside iff an
	/// odd number of the graph's contours contain it (a hole nested inside a
	/// filled contour cancels it back out).
	pub fn contains_point_as_region(&self, point: Point) -> bool {
		self.contours.iter().filter(|c| c.contains_point(point)).count() % 2 == 1
	}

	/// For each contour, counts how many of the graph's other contours
	/// contain its representative point and assigns `Hole` on odd depth.
	pub fn resolve_containment(&mut self) {
		let reps: Vec<Option<Point>> = self.contours.iter().map(|c| c.representative_point()).collect();
		for i in 0..self.contours.len() {
			let rep = match reps[i] {
				Some(p) => p,
				None => continue,
			};
			let depth = (0..self.contours.len()).filter(|&j| j != i && self.contours[j].contains_point(rep)).count();
			self.contours[i].inside = if depth % 2 == 1 { Inside::Hole } else { Inside::Filled };
		}
	}
}

fn push_closed(contours: &mut Vec<Contour>, mut contour: Contour) {
	if contour.is_empty() {
		return;
	}
	contour.close();
	contours.push(contour);
}

/// Runs one boolean operation end to end: graph construction, intersection
/// insertion, containment/classification, stitching, and re-emission.
pub fn compute(op: Op, p1: &Path, p2: &Path) -> Path {
	let mut a = Graph::from_path(p1);
	let mut b = Graph::from_path(p2);
	a.resolve_containment();
	b.resolve_containment();

	let mut arena = CrossingArena::new();
	let mut overlaps: FxHashMap<(usize, usize), ContourOverlap> = FxHashMap::default();

	insert_intersections(&mut a, &mut b, &mut arena, &mut overlaps);
	remove_non_crossings(&mut a, &mut b, &mut arena);
	dedupe_shared_endpoints(&mut a, &mut b, &mut arena);
	synthesize_overlap_crossings(&mut a, &mut b, &mut arena, &overlaps);

	#[cfg(feature = "logging")]
	log::debug!(
		"graph: {} contours on A, {} contours on B, {} crossings after insertion",
		a.contours.len(),
		b.contours.len(),
		arena.len()
	);

	let (mark_self, mark_other) = match op {
		Op::Union => (false, false),
		Op::Intersect => (true, true),
		Op::Difference => (false, true),
	};
	mark_entries(&a, &b, &mut arena, mark_self);
	mark_entries(&b, &a, &mut arena, mark_other);

	let mut out_contours = stitch(&a, &b, &mut arena);
	out_contours.extend(copy_uncrossed_contours(&a, &b, op));
	normalize_winding(&mut out_contours);

	// Snap emitted endpoints to a coarse grid so the output of one operation
	// compares and re-intersects deterministically when fed into another,
	// rather than carrying forward solver-precision noise in its coordinates.
	let out_contours: Vec<Contour> = out_contours.iter().map(|c| c.round()).collect();

	Graph { contours: out_contours }.to_path()
}

/// Assigns `Inside` by containment depth within the output itself, then
/// orients each contour by its role: filled contours clockwise, holes
/// anticlockwise. Stitched contours carry no winding guarantee from the
/// crossing walk that produced them, so this is computed fresh on the
/// output rather than inherited from either operand.
fn normalize_winding(contours: &mut [Contour]) {
	let reps: Vec<Option<Point>> = contours.iter().map(|c| c.representative_point()).collect();
	let mut insides = vec![Inside::Filled; contours.len()];
	for i in 0..contours.len() {
		let rep = match reps[i] {
			Some(p) => p,
			None => continue,
		};
		let depth = (0..contours.len()).filter(|&j| j != i && contours[j].contains_point(rep)).count();
		insides[i] = if depth % 2 == 1 { Inside::Hole } else { Inside::Filled };
	}
	for (contour, inside) in contours.iter_mut().zip(insides) {
		*contour = match inside {
			Inside::Filled => contour.made_clockwise_if_necessary(),
			Inside::Hole => contour.made_anticlockwise_if_necessary(),
		};
		contour.inside = inside;
	}
}

fn mark_entries(graph: &Graph, other: &Graph, arena: &mut CrossingArena, mark_inside: bool) {
	for contour in &graph.contours {
		contour.mark_crossings_as_entry_or_exit(mark_inside, arena, |point| other.contains_point_as_region(point));
	}
}

fn edge_mut<'a>(a: &'a mut Graph, b: &'a mut Graph, r: EdgeRef) -> &'a mut Edge {
	match r.side {
		Side::A => &mut a.contours[r.contour].edges[r.edge],
		Side::B => &mut b.contours[r.contour].edges[r.edge],
	}
}

fn owning_contour<'a>(a: &'a Graph, b: &'a Graph, r: EdgeRef) -> &'a Contour {
	match r.side {
		Side::A => &a.contours[r.contour],
		Side::B => &b.contours[r.contour],
	}
}

/// The tangent direction just before `t` on `r`'s curve. A straight edge's
/// tangent is constant, so probing near its own `t=0` says nothing about the
/// direction the contour actually arrives from — cross into the previous
/// edge in that case instead.
fn tangent_before(a: &Graph, b: &Graph, r: EdgeRef, t: f64, probe: f64) -> Point {
	let contour = owning_contour(a, b, r);
	if t < probe {
		let prev = &contour.edges[contour.previous_edge_index(r.edge)];
		prev.curve.tangent_at(1. - probe)
	} else {
		contour.edges[r.edge].curve.tangent_at(t - probe)
	}
}

/// The tangent direction just after `t` on `r`'s curve, crossing into the
/// next edge when `t` sits at this edge's own endpoint.
fn tangent_after(a: &Graph, b: &Graph, r: EdgeRef, t: f64, probe: f64) -> Point {
	let contour = owning_contour(a, b, r);
	if t > 1. - probe {
		let next = &contour.edges[contour.next_edge_index(r.edge)];
		next.curve.tangent_at(probe)
	} else {
		contour.edges[r.edge].curve.tangent_at(t + probe)
	}
}

/// Pairwise bbox-filtered curve intersection between every contour of `a`
/// and every contour of `b`, recording point intersections as counterpart
/// crossing pairs and forwarding coincident ranges to the appropriate
/// [`ContourOverlap`].
fn insert_intersections(a: &mut Graph, b: &mut Graph, arena: &mut CrossingArena, overlaps: &mut FxHashMap<(usize, usize), ContourOverlap>) {
	for ca in 0..a.contours.len() {
		for cb in 0..b.contours.len() {
			if !a.contours[ca].bounds().overlaps(&b.contours[cb].bounds(), crate::consts::POINT_EPS) {
				continue;
			}
			for ea in 0..a.contours[ca].edges.len() {
				for eb in 0..b.contours[cb].edges.len() {
					let curve_a = a.contours[ca].edges[ea].curve;
					let curve_b = b.contours[cb].edges[eb].curve;
					if !curve_a.bounds().overlaps(&curve_b.bounds(), crate::consts::POINT_EPS) {
						continue;
					}

					let edge_a_ref = EdgeRef { side: Side::A, contour: ca, edge: ea };
					let edge_b_ref = EdgeRef { side: Side::B, contour: cb, edge: eb };

					match solver::intersect(&curve_a, &curve_b) {
						IntersectionResult::Points(points) => {
							for p in points {
								insert_point_crossing(a, b, arena, edge_a_ref, edge_b_ref, p);
							}
						}
						IntersectionResult::Range(range) => {
							let overlap = EdgeOverlap {
								edge1: edge_a_ref,
								edge2: edge_b_ref,
								range1: range.range1,
								range2: range.range2,
								reversed: range.reversed,
							};
							overlaps.entry((ca, cb)).or_default().add_overlap(overlap, &a.contours[ca], &b.contours[cb]);
							if !a.contours[ca].overlaps.contains(&cb) {
								a.contours[ca].overlaps.push(cb);
							}
							if !b.contours[cb].overlaps.contains(&ca) {
								b.contours[cb].overlaps.push(ca);
							}
						}
					}
				}
			}
		}
	}
}

fn insert_point_crossing(a: &mut Graph, b: &mut Graph, arena: &mut CrossingArena, edge_a: EdgeRef, edge_b: EdgeRef, p: Intersection) {
	let ka = arena.insert(Crossing {
		edge: edge_a,
		intersection: Intersection { location: p.location, t1: p.t1, t2: p.t2, tangent: p.tangent },
		counterpart: None,
		entry: false,
		processed: false,
		index: 0,
	});
	let kb = arena.insert(Crossing {
		edge: edge_b,
		intersection: Intersection { location: p.location, t1: p.t2, t2: p.t1, tangent: p.tangent },
		counterpart: None,
		entry: false,
		processed: false,
		index: 0,
	});
	arena.link_counterparts(ka, kb);

	a.contours[edge_a.contour].edges[edge_a.edge].add_crossing(arena, ka);
	b.contours[edge_b.contour].edges[edge_b.edge].add_crossing(arena, kb);

	if p.t1 < crate::consts::POINT_EPS {
		a.contours[edge_a.contour].edges[edge_a.edge].start_shared = true;
	}
	if p.t1 > 1. - crate::consts::POINT_EPS {
		a.contours[edge_a.contour].edges[edge_a.edge].stop_shared = true;
	}
	if p.t2 < crate::consts::POINT_EPS {
		b.contours[edge_b.contour].edges[edge_b.edge].start_shared = true;
	}
	if p.t2 > 1. - crate::consts::POINT_EPS {
		b.contours[edge_b.contour].edges[edge_b.edge].stop_shared = true;
	}
}

/// Drops crossing pairs the solver flagged as tangent (near-zero tangent
/// cross-product, or a line/line touch landing on either segment's endpoint)
/// once [`geom::tangents_cross`] confirms they don't actually interleave — a
/// tangential touch, not a true boundary crossing.
fn remove_non_crossings(a: &mut Graph, b: &mut Graph, arena: &mut CrossingArena) {
	const PROBE: f64 = crate::consts::TANGENT_PROBE;

	let tangent_keys: Vec<CrossingKey> = arena.keys().filter(|&k| arena.get(k).intersection.tangent).collect();
	let mut removed: FxHashSet<CrossingKey> = FxHashSet::default();

	for key in tangent_keys {
		if removed.contains(&key) {
			continue;
		}
		let crossing = arena.get(key).clone();
		let cp_key = match crossing.counterpart {
			Some(k) => k,
			None => continue,
		};
		if removed.contains(&cp_key) {
			continue;
		}
		let counterpart = arena.get(cp_key).clone();

		let t_own = crossing.intersection.t1;
		let t_other = counterpart.intersection.t1;
		let own_before = tangent_before(a, b, crossing.edge, t_own, PROBE);
		let own_after = tangent_after(a, b, crossing.edge, t_own, PROBE);
		let other_before = tangent_before(a, b, counterpart.edge, t_other, PROBE);
		let other_after = tangent_after(a, b, counterpart.edge, t_other, PROBE);

		if geom::tangents_cross([own_before, own_after], [other_before, other_after]) {
			continue;
		}

		edge_mut(a, b, crossing.edge).remove_crossing(arena, key);
		edge_mut(a, b, counterpart.edge).remove_crossing(arena, cp_key);
		arena.remove(key);
		arena.remove(cp_key);
		removed.insert(key);
		removed.insert(cp_key);
	}
}

/// Folds a crossing at an edge's `t=1` into the next edge's `t=0` crossing
/// when they land on the same physical point, so a vertex shared by two
/// edges of a contour isn't counted as two separate crossings.
fn dedupe_shared_endpoints(a: &mut Graph, b: &mut Graph, arena: &mut CrossingArena) {
	dedupe_side(Side::A, a.contours.len(), a, b, arena);
	dedupe_side(Side::B, b.contours.len(), a, b, arena);
}

fn dedupe_side(side: Side, contour_count: usize, a: &mut Graph, b: &mut Graph, arena: &mut CrossingArena) {
	for ci in 0..contour_count {
		let edge_count = match side {
			Side::A => a.contours[ci].edges.len(),
			Side::B => b.contours[ci].edges.len(),
		};
		if edge_count < 2 {
			continue;
		}
		for i in 0..edge_count {
			let j = match side {
				Side::A => a.contours[ci].next_edge_index(i),
				Side::B => b.contours[ci].next_edge_index(i),
			};
			let (prev_last, cur_first) = match side {
				Side::A => (a.contours[ci].edges[i].last_crossing(), a.contours[ci].edges[j].first_crossing()),
				Side::B => (b.contours[ci].edges[i].last_crossing(), b.contours[ci].edges[j].first_crossing()),
			};
			let (pk, ck) = match (prev_last, cur_first) {
				(Some(p), Some(c)) if p != c => (p, c),
				_ => continue,
			};
			if !(arena.get(pk).at_end() && arena.get(ck).at_start()) {
				continue;
			}
			if !geom::points_close(arena.get(pk).location(), arena.get(ck).location()) {
				continue;
			}

			let ck_counterpart = arena.get(ck).counterpart;
			let j_ref = EdgeRef { side, contour: ci, edge: j };
			edge_mut(a, b, j_ref).remove_crossing(arena, ck);
			arena.remove(ck);
			if let Some(cp) = ck_counterpart {
				let cp_ref = arena.get(cp).edge;
				edge_mut(a, b, cp_ref).remove_crossing(arena, cp);
				arena.remove(cp);
			}

			match side {
				Side::A => {
					a.contours[ci].edges[i].stop_shared = true;
					a.contours[ci].edges[j].start_shared = true;
				}
				Side::B => {
					b.contours[ci].edges[i].stop_shared = true;
					b.contours[ci].edges[j].start_shared = true;
				}
			}
		}
	}
}

struct OverlapTerminus {
	edge_a: EdgeRef,
	edge_b: EdgeRef,
	t_a: f64,
	t_b: f64,
}

/// For every overlap run classified as a true crossing (not a tangential
/// slide), synthesizes a counterpart crossing pair at each of its two
/// termini so stitching can treat the coincident range's boundary like any
/// other crossing.
fn synthesize_overlap_crossings(a: &mut Graph, b: &mut Graph, arena: &mut CrossingArena, overlaps: &FxHashMap<(usize, usize), ContourOverlap>) {
	let mut termini: Vec<OverlapTerminus> = Vec::new();

	for (&(ca, cb), contour_overlap) in overlaps.iter() {
		for run in &contour_overlap.runs {
			if !run.is_crossing(&a.contours[ca], &b.contours[cb]) {
				continue;
			}
			let first = run.overlaps[0];
			let last = *run.overlaps.last().expect("a run always has at least one overlap");

			termini.push(OverlapTerminus {
				edge_a: first.edge1,
				edge_b: first.edge2,
				t_a: first.range1.min,
				t_b: if first.reversed { first.range2.max } else { first.range2.min },
			});
			termini.push(OverlapTerminus {
				edge_a: last.edge1,
				edge_b: last.edge2,
				t_a: last.range1.max,
				t_b: if last.reversed { last.range2.min } else { last.range2.max },
			});
		}
	}

	for terminus in termini {
		let edge_a = &a.contours[terminus.edge_a.contour].edges[terminus.edge_a.edge];
		if edge_a.intersecting_edges(arena).contains(&terminus.edge_b) {
			// This edge pair already has a crossing linking them (typically a
			// point intersection found at the same locus as this overlap run's
			// terminus) — inserting another would duplicate the stitch point.
			continue;
		}

		let location = a.contours[terminus.edge_a.contour].edges[terminus.edge_a.edge].curve.point_at(terminus.t_a);

		let ka = arena.insert(Crossing {
			edge: terminus.edge_a,
			intersection: Intersection { location, t1: terminus.t_a, t2: terminus.t_b, tangent: false },
			counterpart: None,
			entry: false,
			processed: false,
			index: 0,
		});
		let kb = arena.insert(Crossing {
			edge: terminus.edge_b,
			intersection: Intersection { location, t1: terminus.t_b, t2: terminus.t_a, tangent: false },
			counterpart: None,
			entry: false,
			processed: false,
			index: 0,
		});
		arena.link_counterparts(ka, kb);

		a.contours[terminus.edge_a.contour].edges[terminus.edge_a.edge].add_crossing(arena, ka);
		b.contours[terminus.edge_b.contour].edges[terminus.edge_b.edge].add_crossing(arena, kb);
	}
}

/// Emits output contours by walking from each unprocessed entry crossing:
/// follow the current edge/contour forward to the next crossing, jump to its
/// counterpart (swapping which graph is being traversed), and repeat until
/// back at the start.
fn stitch(a: &Graph, b: &Graph, arena: &mut CrossingArena) -> Vec<Contour> {
	let mut output = Vec::new();

	loop {
		let start = arena.keys().find(|&k| !arena.get(k).processed && arena.get(k).entry);
		let start = match start {
			Some(k) => k,
			None => break,
		};

		let mut contour = Contour::new();
		let mut current = start;
		loop {
			let next = walk_to_next_crossing(a, b, arena, current, &mut contour);
			arena.get_mut(next).processed = true;
			if let Some(cp) = arena.get(next).counterpart {
				arena.get_mut(cp).processed = true;
			}
			if next == start {
				contour.close();
				break;
			}
			current = arena.get(next).counterpart.expect("a crossing mid-stitch must have a counterpart");
		}
		if !contour.is_empty() {
			output.push(contour);
		}
	}

	output
}

/// Appends the curve from `current` up to (but not including) the next
/// crossing met while walking forward, possibly spanning several edges of
/// `current`'s contour, and returns that crossing's key.
fn walk_to_next_crossing(a: &Graph, b: &Graph, arena: &CrossingArena, current: CrossingKey, contour: &mut Contour) -> CrossingKey {
	let start_ref = arena.get(current).edge;
	let owner = match start_ref.side {
		Side::A => &a.contours[start_ref.contour],
		Side::B => &b.contours[start_ref.contour],
	};
	let edge = &owner.edges[start_ref.edge];

	if let Some(next) = edge.crossing_after(current) {
		contour.add_curve_from(&edge.curve, Some(arena.get(current)), Some(arena.get(next)));
		return next;
	}

	contour.add_curve_from(&edge.curve, Some(arena.get(current)), None);
	let mut index = owner.next_edge_index(start_ref.edge);
	loop {
		let edge = &owner.edges[index];
		if let Some(next) = edge.first_crossing() {
			contour.add_curve_from(&edge.curve, None, Some(arena.get(next)));
			return next;
		}
		contour.add_curve(edge.curve);
		index = owner.next_edge_index(index);
	}
}

/// Contours with no crossings at all belong in the output wholesale or not
/// at all, decided by containment against the other graph (or, for
/// identical contributed geometry, deduplicated via
/// [`Contour::is_equivalent`] instead).
fn copy_uncrossed_contours(a: &Graph, b: &Graph, op: Op) -> Vec<Contour> {
	let mut out = Vec::new();

	let a_uncrossed: Vec<usize> = (0..a.contours.len()).filter(|&i| is_uncrossed(&a.contours[i])).collect();
	let b_uncrossed: Vec<usize> = (0..b.contours.len()).filter(|&i| is_uncrossed(&b.contours[i])).collect();

	let mut a_handled: FxHashSet<usize> = FxHashSet::default();
	let mut b_handled: FxHashSet<usize> = FxHashSet::default();

	for &ca in &a_uncrossed {
		for &cb in &b_uncrossed {
			if b_handled.contains(&cb) {
				continue;
			}
			if a.contours[ca].is_equivalent(&b.contours[cb]) {
				a_handled.insert(ca);
				b_handled.insert(cb);
				if matches!(op, Op::Union | Op::Intersect) {
					out.push(a.contours[ca].clone());
				}
				break;
			}
		}
	}

	for &ca in &a_uncrossed {
		if a_handled.contains(&ca) {
			continue;
		}
		let contour = &a.contours[ca];
		let rep = match contour.representative_point() {
			Some(p) => p,
			None => continue,
		};
		let inside_other = b.contains_point_as_region(rep);
		let keep = match op {
			Op::Union => !inside_other,
			Op::Intersect => inside_other,
			Op::Difference => !inside_other,
		};
		if keep {
			out.push(contour.clone());
		}
	}

	for &cb in &b_uncrossed {
		if b_handled.contains(&cb) {
			continue;
		}
		let contour = &b.contours[cb];
		let rep = match contour.representative_point() {
			Some(p) => p,
			None => continue,
		};
		let inside_self = a.contains_point_as_region(rep);
		match op {
			Op::Union => {
				if !inside_self {
					out.push(contour.clone());
				}
			}
			Op::Intersect => {
				if inside_self {
					out.push(contour.clone());
				}
			}
			Op::Difference => {
				if inside_self {
					out.push(contour.reversed());
				}
			}
		}
	}

	out
}

fn is_uncrossed(contour: &Contour) -> bool {
	contour.edges.iter().all(|e| e.crossings().is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::curve::Curve;

	fn rect(min: Point, max: Point) -> Path {
		let mut path = Path::new();
		path.push(PathElement::Move(Point::new(min.x, min.y)));
		path.push(PathElement::Line(Point::new(max.x, min.y)));
		path.push(PathElement::Line(Point::new(max.x, max.y)));
		path.push(PathElement::Line(Point::new(min.x, max.y)));
		path.push(PathElement::Close);
		path
	}

	#[test]
	fn from_path_closes_open_subpath() {
		let mut path = Path::new();
		path.push(PathElement::Move(Point::new(0., 0.)));
		path.push(PathElement::Line(Point::new(10., 0.)));
		path.push(PathElement::Line(Point::new(10., 10.)));
		let graph = Graph::from_path(&path);
		assert_eq!(graph.contours.len(), 1);
		let last = graph.contours[0].edges.last().unwrap();
		assert!(geom::points_close(last.curve.end(), Point::new(0., 0.)));
	}

	#[test]
	fn union_of_disjoint_rectangles_keeps_both() {
		let r1 = rect(Point::new(0., 0.), Point::new(10., 10.));
		let r2 = rect(Point::new(20., 20.), Point::new(30., 30.));
		let result = compute(Op::Union, &r1, &r2);
		let graph = Graph::from_path(&result);
		assert_eq!(graph.contours.len(), 2);
	}

	#[test]
	fn intersect_of_disjoint_rectangles_is_empty() {
		let r1 = rect(Point::new(0., 0.), Point::new(10., 10.));
		let r2 = rect(Point::new(20., 20.), Point::new(30., 30.));
		let result = compute(Op::Intersect, &r1, &r2);
		assert!(result.is_empty());
	}

	#[test]
	fn union_of_overlapping_rectangles_has_eight_vertices() {
		let r1 = rect(Point::new(0., 0.), Point::new(10., 10.));
		let r2 = rect(Point::new(5., 5.), Point::new(15., 15.));
		let result = compute(Op::Union, &r1, &r2);
		let graph = Graph::from_path(&result);
		assert_eq!(graph.contours.len(), 1);
		assert_eq!(graph.contours[0].edges.len(), 8);
	}

	#[test]
	fn difference_of_identical_rectangles_is_empty() {
		let r1 = rect(Point::new(0., 0.), Point::new(10., 10.));
		let r2 = rect(Point::new(0., 0.), Point::new(10., 10.));
		let result = compute(Op::Difference, &r1, &r2);
		assert!(result.is_empty());
	}

	#[test]
	fn union_of_identical_rectangles_yields_one_copy() {
		let r1 = rect(Point::new(0., 0.), Point::new(10., 10.));
		let r2 = rect(Point::new(0., 0.), Point::new(10., 10.));
		let result = compute(Op::Union, &r1, &r2);
		let graph = Graph::from_path(&result);
		assert_eq!(graph.contours.len(), 1);
	}

	#[test]
	fn circle_fully_inside_rectangle_vanishes_under_union() {
		let rectangle = rect(Point::new(0., 0.), Point::new(10., 10.));
		let circle = circle_path(Point::new(5., 5.), 2.);
		let result = compute(Op::Union, &rectangle, &circle);
		let graph = Graph::from_path(&result);
		assert_eq!(graph.contours.len(), 1);
	}

	fn circle_path(center: Point, radius: f64) -> Path {
		const K: f64 = 0.5522847498;
		let mut path = Path::new();
		let top = center + Point::new(0., -radius);
		let right = center + Point::new(radius, 0.);
		let bottom = center + Point::new(0., radius);
		let left = center + Point::new(-radius, 0.);
		path.push(PathElement::Move(top));
		path.push(PathElement::Cubic(top + Point::new(radius * K, 0.), right + Point::new(0., -radius * K), right));
		path.push(PathElement::Cubic(right + Point::new(0., radius * K), bottom + Point::new(radius * K, 0.), bottom));
		path.push(PathElement::Cubic(bottom + Point::new(-radius * K, 0.), left + Point::new(0., radius * K), left));
		path.push(PathElement::Cubic(left + Point::new(0., -radius * K), top + Point::new(-radius * K, 0.), top));
		path.push(PathElement::Close);
		path
	}
}
