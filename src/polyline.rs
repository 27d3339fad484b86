//! Filleted polyline profiles.

use glam::Vec2;

use crate::circle::CircleSegment;
use crate::geometry::perp;
use crate::line::LineSegment;
use crate::profile::CurveProfile;

/// Builds a profile from a point list, rounding each interior corner with a
/// circular fillet of at most `radius`.
///
/// Fillets are clamped so they never overlap: each corner may consume at
/// most half of either adjacent edge (the full edge at the open ends).
/// Closed curves duplicate a wrap-around midpoint so the same corner walk
/// applies uniformly. A degenerate fillet - zero radius or a straight
/// corner - contributes no circle segment. Empty input yields the empty,
/// zero-length profile.
pub fn get_polyline_profile(points: &[Vec2], radius: f32, closed: bool) -> CurveProfile {
    let mut profile = CurveProfile::new();
    if points.is_empty() {
        return profile;
    }

    let radius = radius.max(0.0);
    let mut walk: Vec<Vec2> = Vec::with_capacity(points.len() + 2);
    if closed {
        let middle = (points[0] + points[points.len() - 1]) * 0.5;
        walk.push(middle);
        walk.extend_from_slice(points);
        walk.push(middle);
    } else {
        walk.extend_from_slice(points);
    }

    let mut last = walk[0];
    for i in 2..walk.len() {
        let start = walk[i - 2];
        let center = walk[i - 1];
        let end = walk[i];

        let center_to_start = start - center;
        let center_to_end = end - center;
        let start_vector = center_to_start.normalize_or_zero();
        let end_vector = center_to_end.normalize_or_zero();

        let angle_between = start_vector.dot(end_vector).clamp(-1.0, 1.0).acos();
        let angle_sin = (angle_between / 2.0).sin();
        // tan(θ/2) is non-negative for corner angles in [0, π]; the straight
        // corner lands on the pole and must collapse to a degenerate fillet
        // instead of overflowing.
        let angle_tan = {
            let tangent = (angle_between / 2.0).tan();
            if tangent.is_finite() && tangent > 0.0 {
                tangent
            } else {
                0.0
            }
        };

        let start_share = if i == 2 { 1.0 } else { 0.5 };
        let end_share = if i == walk.len() - 1 { 1.0 } else { 0.5 };
        let safe_radius = if angle_tan > 0.0 {
            radius
                .min(angle_tan * center_to_start.length() * start_share)
                .min(angle_tan * center_to_end.length() * end_share)
        } else {
            0.0
        };

        let circle_offset = if angle_sin.abs() < f32::EPSILON {
            0.0
        } else {
            safe_radius / angle_sin
        };
        let point_offset = if angle_tan < f32::EPSILON {
            0.0
        } else {
            safe_radius / angle_tan
        };
        let circle_center = ((start_vector + end_vector) * 0.5).normalize_or_zero() * circle_offset
            + center;

        let counter = perp(start_vector).dot(end_vector) < 0.0;
        let line = LineSegment::new(last, center + start_vector * point_offset);
        profile.push(line.into());

        let circle = CircleSegment::new(
            circle_center,
            safe_radius,
            perp(start_vector) * if counter { 1.0 } else { -1.0 },
            perp(end_vector) * if counter { -1.0 } else { 1.0 },
            counter,
        );
        if circle.arc_length() > 1e-6 {
            profile.push(circle.into());
        }

        profile.min_sin = profile.min_sin.min(angle_sin.abs());
        last = center + end_vector * point_offset;
    }

    let line = LineSegment::new(last, walk[walk.len() - 1]);
    profile.push(line.into());
    profile
}
