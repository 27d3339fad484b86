//! Curve geometry and path morphing for 2D vector animation.
//!
//! This crate provides:
//! - [`Polynomial`] / [`Polynomial2D`] - cubic polynomial algebra (eval,
//!   differentiate, split)
//! - [`Segment`] - the closed set of drawable path pieces: [`LineSegment`],
//!   [`CircleSegment`], [`ArcSegment`], [`QuadBezierSegment`],
//!   [`CubicBezierSegment`]
//! - [`UniformCurveSampler`] - arc-length reparameterization for curves
//!   without a closed-form inverse
//! - [`CurveProfile`] - an ordered segment list with aggregate arc length,
//!   queried through [`get_point_at_distance`] for proportional trimming
//!   and decoration placement
//! - Profile builders: [`get_path_profile`] (SVG path data),
//!   [`get_polyline_profile`] (filleted polylines),
//!   [`get_circle_profile`], [`get_rect_profile`],
//!   [`get_bezier_spline_profile`]
//! - Morphing: [`create_curve_profile_lerp`] (polygon-based) and
//!   [`interpolate_curve_profile`] (Bezier-preserving), both returning a
//!   cheap per-frame closure
//!
//! # Example
//!
//! ```
//! use pathmorph::{create_curve_profile_lerp, get_path_profile, get_point_at_distance};
//!
//! let square = get_path_profile("M0,0 L10,0 L10,10 L0,10 Z");
//! let triangle = get_path_profile("M0,0 L20,0 L10,15 Z");
//!
//! // Place a marker 30% of the way along the square's outline.
//! let marker = get_point_at_distance(&square, square.arc_length * 0.3);
//! assert!(marker.position.is_finite());
//!
//! // Morph one shape into the other.
//! let morph = create_curve_profile_lerp(&square, &triangle);
//! let halfway = morph(0.5);
//! assert!(halfway.arc_length > 0.0);
//! ```

mod arc;
mod bezier;
mod circle;
mod geometry;
mod interpolate;
mod line;
mod morph;
mod path;
mod polyline;
mod polynomial;
mod profile;
mod sampler;
mod segment;
mod shapes;
mod spline;
mod svg;

pub use arc::ArcSegment;
pub use bezier::{CubicBezierSegment, QuadBezierSegment};
pub use circle::CircleSegment;
pub use geometry::Rect;
pub use interpolate::interpolate_curve_profile;
pub use line::LineSegment;
pub use morph::{create_curve_profile_lerp, create_curve_profile_lerp_with, MorphOptions};
pub use path::{Path, PathCommand, PathSink};
pub use polyline::get_polyline_profile;
pub use polynomial::{Polynomial, Polynomial2D, UnsupportedDerivative};
pub use profile::{get_point_at_distance, CurveProfile};
pub use sampler::{SampledPoint, UniformCurveSampler};
pub use segment::{CurvePoint, Segment};
pub use shapes::{get_circle_profile, get_rect_profile, CornerRadius};
pub use spline::{get_bezier_spline_profile, Knot, KnotAuto};
pub use svg::{get_path_profile, PathDataError};

// ============================================================================
// Invariant tests
// ============================================================================

/// Invariant tests for the curve engine.
///
/// These verify mathematical properties that should hold for all segment
/// types and builders. Run with:
///
/// ```sh
/// cargo test --features invariant-tests
/// ```
#[cfg(all(test, feature = "invariant-tests"))]
mod invariant_tests {
    use super::*;
    use glam::Vec2;

    /// Simple LCG random number generator for tests.
    fn rand_f32(min: f32, max: f32) -> f32 {
        use std::cell::Cell;
        thread_local! {
            static SEED: Cell<u64> = const { Cell::new(54321) };
        }
        SEED.with(|seed| {
            let s = seed.get().wrapping_mul(6364136223846793005).wrapping_add(1);
            seed.set(s);
            let t = ((s >> 33) as u32) as f32 / u32::MAX as f32;
            min + t * (max - min)
        })
    }

    fn rand_point() -> Vec2 {
        Vec2::new(rand_f32(-50.0, 50.0), rand_f32(-50.0, 50.0))
    }

    fn sample_segments() -> Vec<(&'static str, Segment)> {
        vec![
            (
                "line",
                LineSegment::new(rand_point(), rand_point()).into(),
            ),
            (
                "circle",
                CircleSegment::new(rand_point(), rand_f32(0.5, 10.0), Vec2::X, Vec2::Y, false)
                    .into(),
            ),
            (
                "arc",
                ArcSegment::new(
                    Vec2::ZERO,
                    Vec2::new(rand_f32(5.0, 15.0), rand_f32(5.0, 15.0)),
                    rand_f32(0.0, 90.0),
                    false,
                    true,
                    Vec2::new(8.0, 3.0),
                )
                .into(),
            ),
            (
                "quad",
                QuadBezierSegment::new(rand_point(), rand_point(), rand_point()).into(),
            ),
            (
                "cubic",
                CubicBezierSegment::new(rand_point(), rand_point(), rand_point(), rand_point())
                    .into(),
            ),
        ]
    }

    /// Polynomial split halves always meet at the split point.
    #[test]
    fn test_polynomial_split_continuity() {
        for _ in 0..50 {
            let p = Polynomial::cubic(
                rand_f32(-5.0, 5.0),
                rand_f32(-5.0, 5.0),
                rand_f32(-5.0, 5.0),
                rand_f32(-5.0, 5.0),
            );
            let u = rand_f32(0.05, 0.95);
            let (pre, post) = p.split(u);
            let at_split = p.eval(u);
            assert!((pre.eval(1.0) - at_split).abs() < 1e-3);
            assert!((post.eval(0.0) - at_split).abs() < 1e-3);
        }
    }

    /// Arc length is never negative, for any variant.
    #[test]
    fn test_segment_arc_length_non_negative() {
        for _ in 0..20 {
            for (name, segment) in sample_segments() {
                assert!(segment.arc_length() >= 0.0, "{name}");
            }
        }
    }

    /// `get_point` traversal is continuous in the query fraction.
    #[test]
    fn test_segment_point_continuity() {
        for (name, segment) in sample_segments() {
            let mut previous = segment.get_point(0.0).position;
            for i in 1..=64 {
                let point = segment.get_point(i as f32 / 64.0).position;
                let max_step = segment.arc_length() / 8.0 + 0.1;
                assert!(
                    (point - previous).length() <= max_step,
                    "{name}: jump at sample {i}"
                );
                previous = point;
            }
        }
    }

    /// Profile queries at the extremes return the profile's endpoints.
    #[test]
    fn test_profile_distance_endpoints() {
        for _ in 0..20 {
            let points: Vec<Vec2> = (0..5).map(|_| rand_point()).collect();
            let profile = get_polyline_profile(&points, rand_f32(0.0, 5.0), false);
            if profile.arc_length == 0.0 {
                continue;
            }
            let start = get_point_at_distance(&profile, 0.0).position;
            let end = get_point_at_distance(&profile, profile.arc_length).position;
            assert!((start - points[0]).length() < 1e-3);
            assert!((end - points[4]).length() < 1e-3);
        }
    }

    /// The polygon morph never produces non-finite geometry.
    #[test]
    fn test_morph_stays_finite() {
        for _ in 0..10 {
            let a_points: Vec<Vec2> = (0..4).map(|_| rand_point()).collect();
            let b_points: Vec<Vec2> = (0..6).map(|_| rand_point()).collect();
            let a = get_polyline_profile(&a_points, 0.0, true);
            let b = get_polyline_profile(&b_points, 0.0, false);
            let lerp = create_curve_profile_lerp(&a, &b);
            for i in 0..=10 {
                let frame = lerp(i as f32 / 10.0);
                assert!(frame.arc_length.is_finite());
                for segment in &frame.segments {
                    assert!(segment.get_point(0.5).position.is_finite());
                }
            }
        }
    }
}
