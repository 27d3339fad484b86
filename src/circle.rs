//! Circular fillet arc segment.

use glam::Vec2;

use crate::geometry::Rect;
use crate::path::PathSink;
use crate::segment::CurvePoint;

/// A circular arc rounding the corner between two edges.
///
/// `from` and `to` are unit directions from the center toward the arc's
/// endpoints, and the traversed angle is the unsigned angle between them.
/// The angle interpolation is linear, so sweeps must stay within half a
/// turn; the fillet builders that construct these segments guarantee it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSegment {
    center: Vec2,
    radius: f32,
    from: Vec2,
    to: Vec2,
    counter: bool,
    angle: f32,
    length: f32,
}

impl CircleSegment {
    pub fn new(center: Vec2, radius: f32, from: Vec2, to: Vec2, counter: bool) -> Self {
        let angle = from.dot(to).clamp(-1.0, 1.0).acos();
        Self {
            center,
            radius,
            from,
            to,
            counter,
            angle,
            length: (angle * radius).abs(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Circle angle of the arc start.
    pub fn start_angle(&self) -> f32 {
        self.from.to_angle()
    }

    /// Signed traversed angle.
    pub fn sweep_angle(&self) -> f32 {
        if self.counter {
            -self.angle
        } else {
            self.angle
        }
    }

    pub fn arc_length(&self) -> f32 {
        self.length
    }

    /// Point at the given fraction of the arc.
    ///
    /// The reported tangent is the radial direction, flipped when the arc
    /// runs clockwise.
    pub fn get_point(&self, distance: f32) -> CurvePoint {
        let factor = if self.counter { -1.0 } else { 1.0 };
        let angle = self.from.to_angle() + distance * self.angle * factor;
        let normal = Vec2::from_angle(angle);

        CurvePoint {
            position: self.center + normal * self.radius,
            tangent: if self.counter { normal } else { -normal },
        }
    }

    pub fn draw(
        &self,
        sink: &mut dyn PathSink,
        start: f32,
        end: f32,
        move_to: bool,
    ) -> (CurvePoint, CurvePoint) {
        let factor = if self.counter { -1.0 } else { 1.0 };
        let start_angle = self.from.to_angle() + start * self.angle * factor;
        let end_angle = self.to.to_angle() - (1.0 - end) * self.angle * factor;
        let start_normal = Vec2::from_angle(start_angle);
        let end_normal = Vec2::from_angle(end_angle);
        let start_point = CurvePoint {
            position: self.center + start_normal * self.radius,
            tangent: if self.counter {
                start_normal
            } else {
                -start_normal
            },
        };

        if move_to {
            sink.move_to(start_point.position);
        }
        if self.angle.abs() > 1e-4 {
            sink.arc(self.center, self.radius, start_angle, end_angle, self.counter);
        }

        (
            start_point,
            CurvePoint {
                position: self.center + end_normal * self.radius,
                tangent: if self.counter { -end_normal } else { end_normal },
            },
        )
    }

    pub fn bounds(&self) -> Rect {
        let start = self.get_point(0.0).position;
        let end = self.get_point(1.0).position;
        let mut rect = Rect::new(start.min(end), start.max(end));

        // Extend by every quarter-turn axis crossing inside the sweep.
        let factor = if self.counter { -1.0 } else { 1.0 };
        let from_angle = self.from.to_angle();
        let sweep = self.angle * factor;
        let (lo, hi) = if sweep < 0.0 {
            (from_angle + sweep, from_angle)
        } else {
            (from_angle, from_angle + sweep)
        };
        let mut k = (lo / std::f32::consts::FRAC_PI_2).ceil();
        while k * std::f32::consts::FRAC_PI_2 <= hi {
            let crossing = Vec2::from_angle(k * std::f32::consts::FRAC_PI_2);
            rect.expand(self.center + crossing * self.radius);
            k += 1.0;
        }
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_quarter_arc_length() {
        let segment = CircleSegment::new(Vec2::ZERO, 2.0, Vec2::X, Vec2::Y, false);
        assert!((segment.arc_length() - 2.0 * FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_points_stay_on_radius() {
        let segment = CircleSegment::new(Vec2::new(5.0, 5.0), 3.0, Vec2::X, Vec2::Y, false);
        for i in 0..=10 {
            let point = segment.get_point(i as f32 / 10.0);
            let distance = (point.position - Vec2::new(5.0, 5.0)).length();
            assert!((distance - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_half_turn_length() {
        let segment = CircleSegment::new(Vec2::ZERO, 1.0, Vec2::X, Vec2::new(-1.0, 0.0), false);
        assert!((segment.arc_length() - PI).abs() < 1e-5);
    }

    #[test]
    fn test_get_point_endpoint_positions() {
        let segment = CircleSegment::new(Vec2::ZERO, 1.0, Vec2::X, Vec2::Y, false);
        let start = segment.get_point(0.0);
        let end = segment.get_point(1.0);
        assert!((start.position - Vec2::X).length() < 1e-5);
        assert!((end.position - Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn test_counter_flag_reverses_sweep() {
        // Same endpoints, opposite traversal.
        let cw = CircleSegment::new(Vec2::ZERO, 1.0, Vec2::X, Vec2::Y, false);
        let ccw = CircleSegment::new(Vec2::ZERO, 1.0, Vec2::X, Vec2::Y, true);
        let mid_cw = cw.get_point(0.5).position;
        let mid_ccw = ccw.get_point(0.5).position;
        assert!((mid_cw - mid_ccw).length() > 1.0);
    }

    #[test]
    fn test_bounds_cover_axis_crossing() {
        // Arc from +x to -x through +y crosses the top of the circle.
        let segment = CircleSegment::new(Vec2::ZERO, 1.0, Vec2::X, Vec2::new(-1.0, 0.0), false);
        let rect = segment.bounds();
        assert!(rect.max.y > 0.99);
    }
}
