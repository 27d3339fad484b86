//! Polygon-based topological morphing between curve profiles.
//!
//! [`create_curve_profile_lerp`] reconciles two arbitrary profiles -
//! mismatched segment counts, open/closed topology, multiple subpaths -
//! by flattening every subpath into a polygon, aligning the polygons once,
//! and lerping points per animation frame.

use glam::Vec2;

use crate::line::LineSegment;
use crate::polyline::get_polyline_profile;
use crate::profile::{get_point_at_distance, split_profile, CurveProfile, Subcurve};
use crate::segment::Segment;

/// Tuning for polygon-based morphing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MorphOptions {
    /// Desired maximum distance between consecutive polygon points.
    pub precision: f32,
    /// Number of decimals coordinates are rounded to.
    pub round: u32,
}

impl Default for MorphOptions {
    fn default() -> Self {
        Self {
            precision: 5.0,
            round: 4,
        }
    }
}

/// Bookkeeping for a polygon that was artificially closed so it could pair
/// with a closed polygon. The tracked indices delimit the original open
/// stretch, which gets re-emitted as an open polyline when sampling.
#[derive(Debug, Clone, Copy)]
struct ForceClosed {
    first_index: usize,
    last_index: usize,
}

#[derive(Debug, Clone)]
struct PolygonProfile {
    points: Vec<Vec2>,
    closed: bool,
    force_closed: Option<ForceClosed>,
}

struct PolygonPair {
    from: PolygonProfile,
    to: PolygonProfile,
}

/// Removes the last point when it repeats the first one.
fn remove_recurring_point(points: &mut Vec<Vec2>) {
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
}

/// Splits polygon edges until no edge is longer than `max_length`.
fn bisect(points: &mut Vec<Vec2>, closed: bool, max_length: f32) {
    let mut i = 0;
    while i < points.len() {
        if i == points.len() - 1 && !closed {
            break;
        }
        let a = points[i];
        let mut b = points[(i + 1) % points.len()];
        while (a - b).length() > max_length {
            b = a.lerp(b, 0.5);
            points.insert(i + 1, b);
        }
        i += 1;
    }
}

/// Converts a line-only subpath into its exact vertices.
///
/// Returns `None` as soon as any non-line segment appears.
fn exact_polygon_points(curve: &Subcurve, max_length: f32) -> Option<Vec<Vec2>> {
    let mut points = Vec::new();
    let mut end_point: Option<Vec2> = None;

    for segment in &curve.profile.segments {
        let Segment::Line(line) = segment else {
            return None;
        };
        points.push(line.from);
        end_point = Some(line.to);
    }

    if let Some(end) = end_point {
        if points.first() != Some(&end) {
            points.push(end);
        }
    }

    remove_recurring_point(&mut points);

    if max_length.is_finite() && max_length > 0.0 {
        bisect(&mut points, curve.closed, max_length);
    }

    Some(points)
}

/// Signed area of the polygon.
fn polygon_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    if n == 0 {
        return 0.0;
    }
    let mut b = points[n - 1];
    let mut area = 0.0;
    for &point in points {
        let a = b;
        b = point;
        area += a.y * b.x - a.x * b.y;
    }
    area / 2.0
}

/// Converts a subpath into a polygon by uniform arc-length sampling, with
/// the winding normalized by signed area.
fn approximate_polygon_points(curve: &Subcurve, max_length: f32) -> Vec<Vec2> {
    let mut num_points = 3usize;
    if max_length.is_finite() && max_length > 0.0 {
        num_points = num_points.max((curve.profile.arc_length / max_length).ceil() as usize);
    }

    let mut points = Vec::with_capacity(num_points);
    for i in 0..num_points {
        let distance = curve.profile.arc_length * (i as f32 / num_points as f32);
        points.push(get_point_at_distance(&curve.profile, distance).position);
    }

    if polygon_area(&points) > 0.0 {
        points.reverse();
    }

    remove_recurring_point(&mut points);
    points
}

fn subcurve_to_polygon(curve: &Subcurve, max_length: f32) -> PolygonProfile {
    let points = exact_polygon_points(curve, max_length)
        .unwrap_or_else(|| approximate_polygon_points(curve, max_length));
    PolygonProfile {
        points,
        closed: curve.closed,
        force_closed: None,
    }
}

/// Perimeter of the open polygon walk.
fn polygon_length(points: &[Vec2]) -> f32 {
    points
        .windows(2)
        .map(|pair| (pair[0] - pair[1]).length())
        .sum()
}

/// Inserts `num_points` extra points, spread proportionally along the
/// polygon's longer edges, so the polygon can pair point-for-point with a
/// denser one. Tracked force-close indices shift with the insertions.
fn add_points(ring: &mut PolygonProfile, num_points: usize) {
    if num_points == 0 {
        return;
    }

    let points = &mut ring.points;
    let desired = points.len() + num_points;
    let step = polygon_length(points) / num_points as f32;

    let mut i = 0;
    let mut cursor = 0.0;
    let mut insert_at = step / 2.0;

    while points.len() < desired {
        if i + 1 > points.len() {
            // Numeric drift exhausted the walk; repeat the last point.
            match points.last().copied() {
                Some(last) => points.push(last),
                None => break,
            }
            continue;
        }

        let a = points[i.min(points.len() - 1)];
        let b = points[(i + 1) % points.len()];
        let length = (a - b).length();

        if insert_at <= cursor + length || i + 1 == points.len() {
            let point = if length > 0.0 {
                a.lerp(b, ((insert_at - cursor) / length).clamp(0.0, 1.0))
            } else {
                a
            };
            points.insert(i + 1, point);
            if let Some(fc) = &mut ring.force_closed {
                if fc.first_index > i {
                    fc.first_index += 1;
                }
                if fc.last_index > i {
                    fc.last_index += 1;
                }
            }
            insert_at += step;
        } else {
            cursor += length;
            i += 1;
        }
    }
}

/// Total squared displacement when pairing `points` (cyclically shifted by
/// `offset`) with `reference`.
fn lerp_distance(points: &[Vec2], reference: &[Vec2], offset: usize) -> f32 {
    let len = points.len();
    let mut sum_of_squares = 0.0;
    for (i, &b) in reference.iter().enumerate() {
        let a = points[(offset + i) % len];
        sum_of_squares += (a - b).length_squared();
    }
    sum_of_squares
}

/// Reorders a polygon to minimize point travel against its reference:
/// closed polygons try every cyclic offset, open polygons only their
/// reversal.
fn rotate_polygon(polygon: &mut PolygonProfile, reference: &PolygonProfile) {
    if polygon.points.is_empty() {
        return;
    }

    if !polygon.closed {
        let original = lerp_distance(&polygon.points, &reference.points, 0);
        let mut reversed = polygon.points.clone();
        reversed.reverse();
        if lerp_distance(&reversed, &reference.points, 0) < original {
            polygon.points = reversed;
        }
    } else {
        let len = polygon.points.len();
        let mut min_distance = f32::INFINITY;
        let mut best_offset = 0;
        for offset in 0..len {
            let distance = lerp_distance(&polygon.points, &reference.points, offset);
            if distance < min_distance {
                min_distance = distance;
                best_offset = offset;
            }
        }

        if best_offset > 0 {
            polygon.points.rotate_left(best_offset);
            if let Some(fc) = &mut polygon.force_closed {
                fc.first_index = (fc.first_index + len - best_offset) % len;
                fc.last_index = (fc.last_index + len - best_offset) % len;
            }
        }
    }
}

/// Rounds coordinates to a fixed number of decimals for deterministic
/// output.
fn round_polygon(polygon: &mut PolygonProfile, round: u32) {
    let pow = if round >= 1 { 10f32.powi(round as i32) } else { 1.0 };
    for point in &mut polygon.points {
        *point = Vec2::new((point.x * pow).round() / pow, (point.y * pow).round() / pow);
    }
}

/// Artificially closes an open polygon by appending its interior points in
/// reverse, remembering the original endpoints for later unfolding.
fn force_close(polygon: &mut PolygonProfile) {
    polygon.closed = true;
    let n = polygon.points.len();
    polygon.force_closed = Some(ForceClosed {
        first_index: 0,
        last_index: n.saturating_sub(1),
    });
    if n > 2 {
        let mut mirrored = polygon.points[1..n - 1].to_vec();
        mirrored.reverse();
        polygon.points.extend(mirrored);
    }
}

/// Prepares one aligned polygon pair for a subpath pair.
fn subcurve_interpolation_polygons(
    from: &Subcurve,
    to: &Subcurve,
    options: MorphOptions,
) -> PolygonPair {
    let mut from_ring = subcurve_to_polygon(from, options.precision);
    let mut to_ring = subcurve_to_polygon(to, options.precision);

    if from_ring.closed && !to_ring.closed {
        force_close(&mut to_ring);
    } else if !from_ring.closed && to_ring.closed {
        force_close(&mut from_ring);
    }

    let diff = from_ring.points.len() as isize - to_ring.points.len() as isize;
    add_points(&mut from_ring, diff.min(0).unsigned_abs());
    add_points(&mut to_ring, diff.max(0) as usize);

    rotate_polygon(&mut from_ring, &to_ring);

    for ring in [&mut from_ring, &mut to_ring] {
        if let Some(fc) = &mut ring.force_closed {
            if fc.first_index > fc.last_index {
                std::mem::swap(&mut fc.first_index, &mut fc.last_index);
            }
        }
    }

    round_polygon(&mut from_ring, options.round);
    round_polygon(&mut to_ring, options.round);

    PolygonPair {
        from: from_ring,
        to: to_ring,
    }
}

/// Pads the shorter subpath list with degenerate point subpaths placed at
/// the start of their pairing counterpart.
fn balance_subcurves(subcurves: &mut Vec<Subcurve>, reference: &[Subcurve]) {
    for i in subcurves.len()..reference.len() {
        let point = reference[i].profile.segments[0].get_point(0.0).position;
        let mut profile = CurveProfile::new();
        profile.push(LineSegment::new(point, point).into());
        profile.min_sin = 0.0;
        subcurves.push(Subcurve {
            profile,
            closed: false,
        });
    }
}

fn interpolation_polygons(
    from: &CurveProfile,
    to: &CurveProfile,
    options: MorphOptions,
) -> Vec<PolygonPair> {
    let mut from_subs = split_profile(from);
    let mut to_subs = split_profile(to);

    if from_subs.len() < to_subs.len() {
        balance_subcurves(&mut from_subs, &to_subs);
    } else {
        balance_subcurves(&mut to_subs, &from_subs);
    }

    from_subs
        .iter()
        .zip(&to_subs)
        .map(|(from, to)| subcurve_interpolation_polygons(from, to, options))
        .collect()
}

/// Interpolates point-for-point; the endpoints return the original point
/// sets exactly so repeated round trips cannot drift.
fn lerp_points(from: &[Vec2], to: &[Vec2], value: f32) -> Vec<Vec2> {
    if value == 0.0 {
        return from.to_vec();
    }
    if value == 1.0 {
        return to.to_vec();
    }
    from.iter()
        .zip(to)
        .map(|(a, b)| a.lerp(*b, value))
        .collect()
}

/// Creates an interpolator tweening between two curve profiles.
///
/// All alignment work - subpath balancing, polygon conversion, point-count
/// equalization, rotation - happens once up front; the returned closure is
/// linear in the point count and intended to be called once per frame.
pub fn create_curve_profile_lerp(
    a: &CurveProfile,
    b: &CurveProfile,
) -> impl Fn(f32) -> CurveProfile {
    create_curve_profile_lerp_with(a, b, MorphOptions::default())
}

/// [`create_curve_profile_lerp`] with explicit tuning.
pub fn create_curve_profile_lerp_with(
    a: &CurveProfile,
    b: &CurveProfile,
    options: MorphOptions,
) -> impl Fn(f32) -> CurveProfile {
    let pairs = interpolation_polygons(a, b, options);

    move |progress: f32| {
        let mut curve = CurveProfile::new();
        for pair in &pairs {
            let points = lerp_points(&pair.from.points, &pair.to.points, progress);
            curve.extend_from(get_polyline_profile(&points, 0.0, pair.from.closed));

            let force_closed = pair.to.force_closed.or(pair.from.force_closed);
            if let Some(fc) = force_closed {
                if !points.is_empty() {
                    let last = fc.last_index.min(points.len() - 1);
                    let slice = &points[fc.first_index.min(last)..=last];
                    curve.extend_from(get_polyline_profile(slice, 0.0, false));
                }
            }
        }
        curve
    }
}
