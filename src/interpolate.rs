//! Bezier-preserving morphing between curve profiles.
//!
//! Unlike the polygon morph, [`interpolate_curve_profile`] keeps curvature
//! through the whole transition: every segment of both profiles becomes an
//! equivalent cubic Bezier, segment counts are equalized by splitting, and
//! the closure lerps control points instead of flattened polygons.

use std::f32::consts::FRAC_PI_4;

use glam::Vec2;

use crate::bezier::CubicBezierSegment;
use crate::profile::{split_profile, CurveProfile};
use crate::segment::Segment;

/// One subpath converted to cubic-only form.
#[derive(Debug, Clone)]
struct CubicSubpath {
    segments: Vec<CubicBezierSegment>,
    closed: bool,
}

/// A matched subpath pair with equalized segment counts.
struct SubpathPair {
    from: Vec<CubicBezierSegment>,
    to: Vec<CubicBezierSegment>,
}

/// Emits cubic segments equivalent to an elliptical sweep, split so no
/// piece spans more than 45 degrees.
fn ellipse_arc_cubics(
    center: Vec2,
    radii: Vec2,
    rotation: f32,
    start_angle: f32,
    delta: f32,
    out: &mut Vec<CubicBezierSegment>,
) {
    let count = ((delta.abs() / FRAC_PI_4).ceil()).max(1.0) as usize;
    let step = delta / count as f32;
    let quarter_tan = (step / 4.0).tan();
    let alpha = step.sin() * ((4.0 + 3.0 * quarter_tan * quarter_tan).sqrt() - 1.0) / 3.0;

    let frame = Vec2::from_angle(rotation);
    let position =
        |angle: f32| frame.rotate(Vec2::new(radii.x * angle.cos(), radii.y * angle.sin())) + center;
    let velocity =
        |angle: f32| frame.rotate(Vec2::new(-radii.x * angle.sin(), radii.y * angle.cos()));

    for i in 0..count {
        let from_angle = start_angle + step * i as f32;
        let to_angle = from_angle + step;
        let p0 = position(from_angle);
        let p3 = position(to_angle);
        out.push(CubicBezierSegment::new(
            p0,
            p0 + velocity(from_angle) * alpha,
            p3 - velocity(to_angle) * alpha,
            p3,
        ));
    }
}

/// Converts any segment into equivalent cubics. Lines and quadratics
/// convert exactly; circular and elliptical arcs go through the 45-degree
/// arc-to-cubic approximation.
fn segment_to_cubics(segment: &Segment, out: &mut Vec<CubicBezierSegment>) {
    match segment {
        Segment::Line(line) => {
            let third = (line.to - line.from) / 3.0;
            out.push(CubicBezierSegment::new(
                line.from,
                line.from + third,
                line.to - third,
                line.to,
            ));
        }
        Segment::Quad(quad) => {
            // Exact degree elevation.
            let control1 = quad.p0 + (quad.p1 - quad.p0) * (2.0 / 3.0);
            let control2 = quad.p2 + (quad.p1 - quad.p2) * (2.0 / 3.0);
            out.push(CubicBezierSegment::new(quad.p0, control1, control2, quad.p2));
        }
        Segment::Cubic(cubic) => out.push(cubic.clone()),
        Segment::Circle(circle) => ellipse_arc_cubics(
            circle.center(),
            Vec2::splat(circle.radius()),
            0.0,
            circle.start_angle(),
            circle.sweep_angle(),
            out,
        ),
        Segment::Arc(arc) => ellipse_arc_cubics(
            arc.center(),
            arc.radius(),
            arc.x_axis_rotation(),
            arc.start_angle(),
            arc.delta_angle(),
            out,
        ),
    }
}

fn to_cubic_subpaths(profile: &CurveProfile) -> Vec<CubicSubpath> {
    split_profile(profile)
        .iter()
        .map(|subcurve| {
            let mut segments = Vec::with_capacity(subcurve.profile.segments.len());
            for segment in &subcurve.profile.segments {
                segment_to_cubics(segment, &mut segments);
            }
            CubicSubpath {
                segments,
                closed: subcurve.closed,
            }
        })
        .collect()
}

/// Splits off the trailing subpath.
fn remove_sub_path(subpaths: &mut Vec<CubicSubpath>) -> Option<CubicSubpath> {
    subpaths.pop()
}

/// Replaces the longest segment with its two halves.
fn split_longest(segments: &mut Vec<CubicBezierSegment>) {
    let longest = segments
        .iter()
        .enumerate()
        .max_by(|a, b| {
            a.1.arc_length()
                .partial_cmp(&b.1.arc_length())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(index, _)| index);

    let Some(index) = longest else {
        return;
    };
    let (left, right) = segments[index].split(0.5);
    segments[index] = left;
    segments.insert(index + 1, right);
}

/// Cyclically rotates a closed subpath so its starting segment minimizes
/// the start-point displacement against `reference`.
fn align_start(subpath: &mut CubicSubpath, reference: &CubicSubpath) {
    if !subpath.closed || subpath.segments.is_empty() {
        return;
    }
    let Some(target) = reference.segments.first().map(|segment| segment.p0) else {
        return;
    };

    let best = subpath
        .segments
        .iter()
        .enumerate()
        .min_by(|a, b| {
            (a.1.p0 - target)
                .length_squared()
                .partial_cmp(&(b.1.p0 - target).length_squared())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(index, _)| index)
        .unwrap_or(0);
    subpath.segments.rotate_left(best);
}

fn align_pair(mut from: CubicSubpath, mut to: CubicSubpath, align: bool) -> SubpathPair {
    if align {
        align_start(&mut to, &from);
    }
    while from.segments.len() < to.segments.len() {
        split_longest(&mut from.segments);
    }
    while to.segments.len() < from.segments.len() {
        split_longest(&mut to.segments);
    }
    SubpathPair {
        from: from.segments,
        to: to.segments,
    }
}

fn lerp_cubics(profile: &mut CurveProfile, from: &[CubicBezierSegment], to: &[CubicBezierSegment], t: f32) {
    for (a, b) in from.iter().zip(to) {
        profile.push(
            CubicBezierSegment::new(
                a.p0.lerp(b.p0, t),
                a.p1.lerp(b.p1, t),
                a.p2.lerp(b.p2, t),
                a.p3.lerp(b.p3, t),
            )
            .into(),
        );
    }
}

/// Emits a subpath scaled toward its own start point; `collapse` of 0 is
/// the full subpath, 1 a single degenerate point.
fn collapse_cubics(profile: &mut CurveProfile, segments: &[CubicBezierSegment], collapse: f32) {
    let Some(anchor) = segments.first().map(|segment| segment.p0) else {
        return;
    };
    for segment in segments {
        profile.push(
            CubicBezierSegment::new(
                segment.p0.lerp(anchor, collapse),
                segment.p1.lerp(anchor, collapse),
                segment.p2.lerp(anchor, collapse),
                segment.p3.lerp(anchor, collapse),
            )
            .into(),
        );
    }
}

/// Creates a Bezier-preserving interpolator between two curve profiles.
///
/// Trailing subpaths without a counterpart are peeled off and staged over
/// fixed checkpoints: extra source subpaths collapse into their start
/// points during the first tenth of the transition, extra target subpaths
/// grow out of theirs during the last tenth, and the matched subpaths morph
/// in between. With `align` set, closed target subpaths are first rotated
/// to start near their partner's starting point.
pub fn interpolate_curve_profile(
    from: &CurveProfile,
    to: &CurveProfile,
    align: bool,
) -> impl Fn(f32) -> CurveProfile {
    let mut from_subs = to_cubic_subpaths(from);
    let mut to_subs = to_cubic_subpaths(to);

    let matched = from_subs.len().min(to_subs.len());
    let mut extra_from = Vec::new();
    while from_subs.len() > matched {
        if let Some(subpath) = remove_sub_path(&mut from_subs) {
            extra_from.push(subpath);
        }
    }
    extra_from.reverse();
    let mut extra_to = Vec::new();
    while to_subs.len() > matched {
        if let Some(subpath) = remove_sub_path(&mut to_subs) {
            extra_to.push(subpath);
        }
    }
    extra_to.reverse();

    let pairs: Vec<SubpathPair> = from_subs
        .into_iter()
        .zip(to_subs)
        .map(|(from, to)| align_pair(from, to, align))
        .collect();

    let start_checkpoint = if extra_from.is_empty() { 0.0 } else { 0.1 };
    let end_checkpoint = if extra_to.is_empty() { 1.0 } else { 0.9 };

    move |progress: f32| {
        let progress = progress.clamp(0.0, 1.0);
        let main_t =
            ((progress - start_checkpoint) / (end_checkpoint - start_checkpoint)).clamp(0.0, 1.0);

        let mut profile = CurveProfile::new();
        for pair in &pairs {
            lerp_cubics(&mut profile, &pair.from, &pair.to, main_t);
        }

        if !extra_from.is_empty() {
            let shrink = (progress / start_checkpoint).min(1.0);
            if shrink < 1.0 {
                for subpath in &extra_from {
                    collapse_cubics(&mut profile, &subpath.segments, shrink);
                }
            }
        }
        if !extra_to.is_empty() {
            let grow = ((progress - end_checkpoint) / (1.0 - end_checkpoint)).clamp(0.0, 1.0);
            if grow > 0.0 {
                for subpath in &extra_to {
                    collapse_cubics(&mut profile, &subpath.segments, 1.0 - grow);
                }
            }
        }

        profile.update_min_sin();
        profile
    }
}
