//! Bezier spline profiles built from knots.

use glam::Vec2;

use crate::bezier::{CubicBezierSegment, QuadBezierSegment};
use crate::profile::CurveProfile;
use crate::segment::Segment;

/// How strongly a knot's auto-calculated handles override the
/// user-provided ones, per side.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnotAuto {
    pub start: f32,
    pub end: f32,
}

/// A single control point of a Bezier spline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Knot {
    /// Position the spline passes through.
    pub position: Vec2,
    /// Handle controlling the incoming curve.
    pub start_handle: Vec2,
    /// Handle controlling the outgoing curve.
    pub end_handle: Vec2,
    /// Blend factors between user handles (0) and auto handles (1).
    pub auto: KnotAuto,
}

impl Knot {
    /// A knot with fully automatic handles.
    pub fn auto(position: Vec2) -> Self {
        Self {
            position,
            start_handle: position,
            end_handle: position,
            auto: KnotAuto {
                start: 1.0,
                end: 1.0,
            },
        }
    }

    /// A knot with explicit handles.
    pub fn with_handles(position: Vec2, start_handle: Vec2, end_handle: Vec2) -> Self {
        Self {
            position,
            start_handle,
            end_handle,
            auto: KnotAuto {
                start: 0.0,
                end: 0.0,
            },
        }
    }
}

/// Updates a knot's handles to a blend between the user-provided handles
/// and auto-calculated ones that smoothly connect its two neighbors.
fn calculate_smooth_handles(knots: &mut [Knot], index: usize, previous: usize, next: usize, smoothness: f32) {
    let knot = knots[index];
    if knot.auto.start == 0.0 && knot.auto.end == 0.0 {
        return;
    }

    let previous = knots[previous].position;
    let next = knots[next].position;

    let distance_to_previous = (knot.position - previous).length();
    let distance_to_next = (next - knot.position).length();
    let total = distance_to_previous + distance_to_next;
    let fa = if total < f32::EPSILON {
        0.0
    } else {
        smoothness * distance_to_previous / total
    };
    let fb = smoothness - fa;

    let start_handle = knot.position - (next - previous) * fa;
    let end_handle = knot.position + (next - previous) * fb;

    let updated = &mut knots[index];
    updated.start_handle = updated.start_handle.lerp(start_handle, knot.auto.start);
    updated.end_handle = updated.end_handle.lerp(end_handle, knot.auto.end);
}

/// The `min_sin` pass for spline profiles.
///
/// Quadratic segments always join smoothly, and mirrored cubic handles
/// cannot produce a miter join, so only broken cubic-to-cubic joints are
/// considered.
fn update_min_sin(profile: &mut CurveProfile) {
    for i in 0..profile.segments.len() {
        let (Segment::Cubic(a), Segment::Cubic(b)) = (
            &profile.segments[i],
            &profile.segments[(i + 1) % profile.segments.len()],
        ) else {
            continue;
        };

        let start_vector = (a.p2 - a.p3).normalize_or_zero();
        let end_vector = (b.p1 - b.p0).normalize_or_zero();
        let dot = start_vector.dot(end_vector).clamp(-1.0, 1.0);

        let is_broken = 1.0 - dot.abs() > 1e-4;
        if !is_broken {
            continue;
        }

        let angle_between = dot.acos();
        let angle_sin = (angle_between / 2.0).sin();
        profile.min_sin = profile.min_sin.min(angle_sin.abs());
    }
}

fn push_quad(profile: &mut CurveProfile, p0: Vec2, p1: Vec2, p2: Vec2) {
    profile.push(QuadBezierSegment::new(p0, p1, p2).into());
}

fn push_cubic(profile: &mut CurveProfile, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) {
    profile.push(CubicBezierSegment::new(p0, p1, p2, p3).into());
}

/// Calculates the curve profile of a Bezier spline through `knots`.
///
/// Each knot's handles are first resolved by blending the user handles
/// with auto-calculated smooth ones. Open splines whose end knots are
/// fully automatic start and end with quadratic segments; everything else
/// is cubic.
pub fn get_bezier_spline_profile(knots: &[Knot], closed: bool, smoothness: f32) -> CurveProfile {
    let mut profile = CurveProfile::new();
    if knots.len() < 2 {
        return profile;
    }

    let mut knots = knots.to_vec();
    let count = knots.len();
    for i in 0..count {
        let previous = (i + count - 1) % count;
        let next = (i + 1) % count;
        calculate_smooth_handles(&mut knots, i, previous, next, smoothness);
    }

    let first = knots[0];
    let second = knots[1];

    // An open spline with a fully automatic first knot starts with a
    // quadratic segment; the first knot has no meaningful outgoing handle.
    if !closed && first.auto.start == 1.0 && first.auto.end == 1.0 {
        push_quad(&mut profile, first.position, second.start_handle, second.position);
    } else {
        push_cubic(
            &mut profile,
            first.position,
            first.end_handle,
            second.start_handle,
            second.position,
        );
    }

    for i in 1..count.saturating_sub(2) {
        let start = knots[i];
        let end = knots[i + 1];
        push_cubic(
            &mut profile,
            start.position,
            start.end_handle,
            end.start_handle,
            end.position,
        );
    }

    let last = knots[count - 1];
    let second_to_last = knots[count - 2];

    if count > 2 {
        if !closed && last.auto.start == 1.0 && last.auto.end == 1.0 {
            push_quad(
                &mut profile,
                second_to_last.position,
                second_to_last.end_handle,
                last.position,
            );
        } else {
            push_cubic(
                &mut profile,
                second_to_last.position,
                second_to_last.end_handle,
                last.start_handle,
                last.position,
            );
        }
    }

    if closed {
        push_cubic(
            &mut profile,
            last.position,
            last.end_handle,
            first.start_handle,
            first.position,
        );
    }

    update_min_sin(&mut profile);
    profile
}
