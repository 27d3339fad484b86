//! Segment variants and their shared operations.

use glam::Vec2;

use crate::arc::ArcSegment;
use crate::bezier::{CubicBezierSegment, QuadBezierSegment};
use crate::circle::CircleSegment;
use crate::geometry::Rect;
use crate::line::LineSegment;
use crate::path::PathSink;

/// A point on a curve together with its orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    pub position: Vec2,
    pub tangent: Vec2,
}

/// One atomic drawable piece of a path.
///
/// The variant set is closed; code that matches on it exhaustively (such as
/// the cubic conversion used for morphing) stays total.
#[derive(Debug, Clone)]
pub enum Segment {
    Line(LineSegment),
    Circle(CircleSegment),
    Arc(ArcSegment),
    Quad(QuadBezierSegment),
    Cubic(CubicBezierSegment),
}

impl Segment {
    /// Precomputed length of the segment, never negative.
    pub fn arc_length(&self) -> f32 {
        match self {
            Segment::Line(segment) => segment.arc_length(),
            Segment::Circle(segment) => segment.arc_length(),
            Segment::Arc(segment) => segment.arc_length(),
            Segment::Quad(segment) => segment.arc_length(),
            Segment::Cubic(segment) => segment.arc_length(),
        }
    }

    /// Point at the given fraction (`0..=1`) of the segment's length.
    pub fn get_point(&self, distance: f32) -> CurvePoint {
        match self {
            Segment::Line(segment) => segment.get_point(distance),
            Segment::Circle(segment) => segment.get_point(distance),
            Segment::Arc(segment) => segment.get_point(distance),
            Segment::Quad(segment) => segment.get_point(distance),
            Segment::Cubic(segment) => segment.get_point(distance),
        }
    }

    /// Emits the `[start, end]` range of the segment into `sink` and returns
    /// the trimmed endpoints with their tangents.
    pub fn draw(
        &self,
        sink: &mut dyn PathSink,
        start: f32,
        end: f32,
        move_to: bool,
    ) -> (CurvePoint, CurvePoint) {
        match self {
            Segment::Line(segment) => segment.draw(sink, start, end, move_to),
            Segment::Circle(segment) => segment.draw(sink, start, end, move_to),
            Segment::Arc(segment) => segment.draw(sink, start, end, move_to),
            Segment::Quad(segment) => segment.draw(sink, start, end, move_to),
            Segment::Cubic(segment) => segment.draw(sink, start, end, move_to),
        }
    }

    /// Axis-aligned bounding box of the segment.
    pub fn bounds(&self) -> Rect {
        match self {
            Segment::Line(segment) => segment.bounds(),
            Segment::Circle(segment) => segment.bounds(),
            Segment::Arc(segment) => segment.bounds(),
            Segment::Quad(segment) => segment.bounds(),
            Segment::Cubic(segment) => segment.bounds(),
        }
    }
}

impl From<LineSegment> for Segment {
    fn from(segment: LineSegment) -> Self {
        Segment::Line(segment)
    }
}

impl From<CircleSegment> for Segment {
    fn from(segment: CircleSegment) -> Self {
        Segment::Circle(segment)
    }
}

impl From<ArcSegment> for Segment {
    fn from(segment: ArcSegment) -> Self {
        Segment::Arc(segment)
    }
}

impl From<QuadBezierSegment> for Segment {
    fn from(segment: QuadBezierSegment) -> Self {
        Segment::Quad(segment)
    }
}

impl From<CubicBezierSegment> for Segment {
    fn from(segment: CubicBezierSegment) -> Self {
        Segment::Cubic(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;

    fn variants() -> Vec<(&'static str, Segment)> {
        vec![
            (
                "line",
                LineSegment::new(Vec2::ZERO, Vec2::new(10.0, 5.0)).into(),
            ),
            (
                "circle",
                CircleSegment::new(Vec2::ZERO, 5.0, Vec2::X, Vec2::Y, false).into(),
            ),
            (
                "arc",
                ArcSegment::new(
                    Vec2::ZERO,
                    Vec2::new(10.0, 10.0),
                    0.0,
                    false,
                    true,
                    Vec2::new(10.0, 10.0),
                )
                .into(),
            ),
            (
                "quad",
                QuadBezierSegment::new(Vec2::ZERO, Vec2::new(5.0, 10.0), Vec2::new(10.0, 0.0))
                    .into(),
            ),
            (
                "cubic",
                CubicBezierSegment::new(
                    Vec2::ZERO,
                    Vec2::new(2.0, 5.0),
                    Vec2::new(8.0, 5.0),
                    Vec2::new(10.0, 0.0),
                )
                .into(),
            ),
        ]
    }

    #[test]
    fn test_arc_length_never_negative() {
        for (name, segment) in variants() {
            assert!(segment.arc_length() >= 0.0, "{name} has negative length");
        }
    }

    #[test]
    fn test_draw_start_matches_get_point_zero() {
        for (name, segment) in variants() {
            let mut path = Path::new();
            let (start, _) = segment.draw(&mut path, 0.0, 1.0, true);
            let point = segment.get_point(0.0);
            assert!(
                (start.position - point.position).length() < 1e-3,
                "{name}: draw start {:?} != get_point(0) {:?}",
                start.position,
                point.position
            );

            // A degenerate draw still starts at the same point.
            let mut path = Path::new();
            let (collapsed, _) = segment.draw(&mut path, 0.0, 0.0, true);
            assert!(
                (collapsed.position - point.position).length() < 1e-3,
                "{name}: degenerate draw start mismatch"
            );
        }
    }

    #[test]
    fn test_bounds_contain_sampled_points() {
        for (name, segment) in variants() {
            let rect = segment.bounds();
            for i in 0..=16 {
                let p = segment.get_point(i as f32 / 16.0).position;
                assert!(
                    p.x >= rect.min.x - 1e-2
                        && p.x <= rect.max.x + 1e-2
                        && p.y >= rect.min.y - 1e-2
                        && p.y <= rect.max.y + 1e-2,
                    "{name}: point {p:?} outside {rect:?}"
                );
            }
        }
    }
}
