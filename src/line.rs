//! Straight line segment.

use glam::Vec2;

use crate::geometry::{perp, Rect};
use crate::path::PathSink;
use crate::segment::CurvePoint;

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: Vec2,
    pub to: Vec2,
    vector: Vec2,
    normal: Vec2,
    length: f32,
}

impl LineSegment {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        let vector = to - from;
        let length = vector.length();
        let normal = perp(vector).normalize_or_zero();
        Self {
            from,
            to,
            vector,
            normal,
            length,
        }
    }

    pub fn arc_length(&self) -> f32 {
        self.length
    }

    /// Unit normal of the line. Reported tangents are this normal, flipped
    /// at the segment start so consecutive segments stay oriented.
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// Point at the given fraction of the segment's length.
    pub fn get_point(&self, distance: f32) -> CurvePoint {
        CurvePoint {
            position: self.from + self.vector * distance,
            tangent: self.normal,
        }
    }

    pub fn draw(
        &self,
        sink: &mut dyn PathSink,
        start: f32,
        end: f32,
        move_to: bool,
    ) -> (CurvePoint, CurvePoint) {
        let from = self.from + self.vector * start;
        let to = self.from + self.vector * end;
        if move_to {
            sink.move_to(from);
        }
        sink.line_to(to);

        (
            CurvePoint {
                position: from,
                tangent: -self.normal,
            },
            CurvePoint {
                position: to,
                tangent: self.normal,
            },
        )
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.from.min(self.to), self.from.max(self.to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{Path, PathCommand};

    #[test]
    fn test_arc_length_is_euclidean() {
        let line = LineSegment::new(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((line.arc_length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_get_point_midway() {
        let line = LineSegment::new(Vec2::new(2.0, 0.0), Vec2::new(6.0, 0.0));
        let point = line.get_point(0.5);
        assert!((point.position - Vec2::new(4.0, 0.0)).length() < 1e-6);
        // Normal of a rightward line points down-screen in the (y, -x)
        // convention.
        assert!((point.tangent - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_draw_trims_and_flips_start_tangent() {
        let line = LineSegment::new(Vec2::ZERO, Vec2::new(10.0, 0.0));
        let mut path = Path::new();
        let (start, end) = line.draw(&mut path, 0.3, 0.7, true);

        assert_eq!(path.commands().len(), 2);
        assert_eq!(path.commands()[0], PathCommand::MoveTo(Vec2::new(3.0, 0.0)));
        assert_eq!(path.commands()[1], PathCommand::LineTo(Vec2::new(7.0, 0.0)));
        assert!((start.tangent + end.tangent).length() < 1e-6);
        assert!((start.position - Vec2::new(3.0, 0.0)).length() < 1e-6);
        assert!((end.position - Vec2::new(7.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_zero_length_line_is_degenerate_not_nan() {
        let line = LineSegment::new(Vec2::ONE, Vec2::ONE);
        assert_eq!(line.arc_length(), 0.0);
        let point = line.get_point(0.5);
        assert!(point.position.is_finite());
        assert_eq!(point.tangent, Vec2::ZERO);
    }
}
