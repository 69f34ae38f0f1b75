// Implementation constants

/// Default tolerance used to decide whether two scalar values are equal.
pub const EPS: f64 = 1e-10;
/// Tolerance used to decide whether two points are coincident.
pub const POINT_EPS: f64 = 1e-7;
/// Number of decimal places two parameter-range endpoints must agree to
/// before the fat-line clipping loop is considered converged.
pub const CONVERGENCE_PLACES: i32 = 9;
/// Hard cap on fat-line clipping recursion depth, guaranteeing termination
/// even on pathological inputs.
pub const MAX_RECURSION_DEPTH: u32 = 39;
/// If a parameter range fails to shrink by at least this fraction in one
/// clipping iteration, the curves are considered "too wide" and the wider
/// range is bisected instead of clipped further.
pub const MIN_SHRINK_FRACTION: f64 = 0.2;
/// Grid used by `Curve::round`/`Contour::round` to snap endpoints for
/// deterministic stitching.
pub const ROUND_GRID: f64 = 1e-3;
/// Threshold on the tangent-vector cross product below which two curves
/// meeting at a point are considered tangent rather than crossing.
pub const TANGENT_CROSS_EPS: f64 = 1e-6;
/// Parameter-space offset used to sample a curve's direction just before or
/// after a point intersection, to classify it as a true crossing versus a
/// tangential touch.
pub const TANGENT_PROBE: f64 = 1e-4;
/// As `TANGENT_PROBE`, but for overlap-run termini, whose parameter is an
/// exact range boundary rather than an iteratively converged value, so a
/// coarser offset is used.
pub const OVERLAP_TANGENT_PROBE: f64 = 0.01;
/// Looser point tolerance used by the coincidence-sampling heuristics
/// (`segments_coincident`, `project_point_onto_curve`), which compare
/// sampled points rather than exact parameter values.
pub const SAMPLING_POINT_EPS: f64 = POINT_EPS * 50.;
