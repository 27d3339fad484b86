//! Elliptical arc segment in SVG endpoint parameterization.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::geometry::{angle_between, integrate, Rect};
use crate::path::PathSink;
use crate::segment::CurvePoint;

/// An elliptical arc described by its endpoints, radii, x-axis rotation and
/// the SVG large-arc/sweep flags.
///
/// Construction converts the endpoint form to a center, start angle and
/// signed delta angle. Degenerate radii are clamped to a tiny epsilon; the
/// path parser replaces zero-radius arcs with lines before they get here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    start: Vec2,
    end: Vec2,
    radius: Vec2,
    x_axis_rotation: f32,
    large_arc: bool,
    sweep: bool,
    center: Vec2,
    start_angle: f32,
    delta_angle: f32,
    length: f32,
    extrema: Rect,
}

impl ArcSegment {
    pub fn new(
        start: Vec2,
        radius: Vec2,
        x_axis_rotation_deg: f32,
        large_arc: bool,
        sweep: bool,
        end: Vec2,
    ) -> Self {
        let phi = x_axis_rotation_deg.to_radians();
        let mut radius = radius.abs().max(Vec2::splat(1e-6));

        // Midpoint in the rotated frame.
        let p = Vec2::from_angle(-phi).rotate((start - end) / 2.0);

        // Scale radii up when no ellipse through both endpoints fits.
        let lambda = (p.x * p.x) / (radius.x * radius.x) + (p.y * p.y) / (radius.y * radius.y);
        if lambda > 1.0 {
            radius *= lambda.sqrt();
        }

        let rxsq = radius.x * radius.x;
        let rysq = radius.y * radius.y;
        let pxsq = p.x * p.x;
        let pysq = p.y * p.y;

        let mut radicand = (rxsq * rysq - rxsq * pysq - rysq * pxsq) / (rxsq * pysq + rysq * pxsq);
        if !radicand.is_finite() {
            // Coincident endpoints leave the center underdetermined.
            radicand = 0.0;
        }
        let coef = if large_arc != sweep { 1.0 } else { -1.0 } * radicand.max(0.0).sqrt();

        let cp = Vec2::new(
            coef * radius.x * p.y / radius.y,
            -coef * radius.y * p.x / radius.x,
        );
        let center = Vec2::from_angle(phi).rotate(cp) + (start + end) / 2.0;

        let q = (p - cp) / radius;
        let s = (-p - cp) / radius;
        let start_angle = angle_between(Vec2::X, q);
        let mut delta_angle = angle_between(q, s) % TAU;
        if !sweep && delta_angle > 0.0 {
            delta_angle -= TAU;
        }
        if sweep && delta_angle < 0.0 {
            delta_angle += TAU;
        }

        let length = integrate(
            |angle| Vec2::new(-radius.x * angle.sin(), radius.y * angle.cos()).length(),
            start_angle,
            start_angle + delta_angle,
        )
        .abs();

        let mut segment = Self {
            start,
            end,
            radius,
            x_axis_rotation: phi,
            large_arc,
            sweep,
            center,
            start_angle,
            delta_angle,
            length,
            extrema: Rect::new(start.min(end), start.max(end)),
        };
        segment.extrema = segment.calculate_extrema();
        segment
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> Vec2 {
        self.radius
    }

    /// X-axis rotation in radians.
    pub fn x_axis_rotation(&self) -> f32 {
        self.x_axis_rotation
    }

    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    /// Signed traversed angle, wrapped according to the sweep flag.
    pub fn delta_angle(&self) -> f32 {
        self.delta_angle
    }

    pub fn large_arc(&self) -> bool {
        self.large_arc
    }

    pub fn sweep(&self) -> bool {
        self.sweep
    }

    pub fn arc_length(&self) -> f32 {
        self.length
    }

    /// Point on the ellipse at the given ellipse angle.
    pub fn angle_position(&self, angle: f32) -> Vec2 {
        Vec2::from_angle(self.x_axis_rotation).rotate(Vec2::new(
            self.radius.x * angle.cos(),
            self.radius.y * angle.sin(),
        )) + self.center
    }

    /// Velocity of the sweep at the given ellipse angle.
    pub fn angle_derivative(&self, angle: f32) -> Vec2 {
        Vec2::from_angle(self.x_axis_rotation).rotate(Vec2::new(
            -self.radius.x * angle.sin(),
            self.radius.y * angle.cos(),
        ))
    }

    /// Point at the given fraction of the traversed angle.
    pub fn get_point(&self, distance: f32) -> CurvePoint {
        let angle = self.start_angle + distance * self.delta_angle;
        CurvePoint {
            position: self.angle_position(angle),
            tangent: self.angle_derivative(angle).normalize_or_zero(),
        }
    }

    pub fn draw(
        &self,
        sink: &mut dyn PathSink,
        start: f32,
        end: f32,
        move_to: bool,
    ) -> (CurvePoint, CurvePoint) {
        let start_angle = self.start_angle + self.delta_angle * start;
        let end_angle = self.start_angle + self.delta_angle * end;
        let start_point = self.get_point(start);
        let end_point = self.get_point(end);

        if move_to {
            sink.move_to(start_point.position);
        }
        sink.ellipse(
            self.center,
            self.radius,
            self.x_axis_rotation,
            start_angle,
            end_angle,
            !self.sweep,
        );

        (start_point, end_point)
    }

    /// Axis-aligned extrema of the traversed arc.
    pub fn bounds(&self) -> Rect {
        self.extrema
    }

    // Resolves which of the two antipodal tangent-zero angles per axis lies
    // on the traversed arc; the others collapse to the endpoint extremes.
    fn calculate_extrema(&self) -> Rect {
        let rx = self.radius.x;
        let ry = self.radius.y;
        let phi = self.x_axis_rotation;

        let tx = -(ry * phi.tan() / rx).atan();
        let mut x_min_pos = self.angle_position(tx);
        let mut x_max_pos = self.angle_position(PI + tx);
        let mut x_min = x_min_pos.x;
        let mut x_max = x_max_pos.x;
        if x_min > x_max {
            std::mem::swap(&mut x_min, &mut x_max);
            std::mem::swap(&mut x_min_pos, &mut x_max_pos);
        }
        let tx_min = angle_between(Vec2::X, x_min_pos - self.center);
        let tx_max = angle_between(Vec2::X, x_max_pos - self.center);

        let ty = (ry / (phi.tan() * rx)).atan();
        let mut y_min_pos = self.angle_position(ty);
        let mut y_max_pos = self.angle_position(PI + ty);
        let mut y_min = y_min_pos.y;
        let mut y_max = y_max_pos.y;
        if y_min > y_max {
            std::mem::swap(&mut y_min, &mut y_max);
            std::mem::swap(&mut y_min_pos, &mut y_max_pos);
        }
        let ty_min = angle_between(Vec2::X, y_min_pos - self.center);
        let ty_max = angle_between(Vec2::X, y_max_pos - self.center);

        let mut angle1 = self.start_angle % TAU;
        let mut angle2 = (self.start_angle + self.delta_angle) % TAU;
        if !self.sweep {
            std::mem::swap(&mut angle1, &mut angle2);
        }
        let mut other_arc = false;
        if angle1 > angle2 {
            std::mem::swap(&mut angle1, &mut angle2);
            other_arc = true;
        }

        let outside = |angle: f32| angle1 > angle || angle2 < angle;

        if (!other_arc && outside(tx_min)) || (other_arc && !outside(tx_min)) {
            x_min = self.start.x.min(self.end.x);
        }
        if (!other_arc && outside(tx_max)) || (other_arc && !outside(tx_max)) {
            x_max = self.start.x.max(self.end.x);
        }
        if (!other_arc && outside(ty_min)) || (other_arc && !outside(ty_min)) {
            y_min = self.start.y.min(self.end.y);
        }
        if (!other_arc && outside(ty_max)) || (other_arc && !outside(ty_max)) {
            y_max = self.start.y.max(self.end.y);
        }

        Rect::new(Vec2::new(x_min, y_min), Vec2::new(x_max, y_max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_quarter_circle_center_and_delta() {
        let arc = ArcSegment::new(
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            0.0,
            false,
            true,
            Vec2::new(10.0, 10.0),
        );
        let center = arc.center();
        assert!(((center - Vec2::ZERO).length() - 10.0).abs() < 1e-3);
        assert!(((center - Vec2::new(10.0, 10.0)).length() - 10.0).abs() < 1e-3);
        assert!((arc.delta_angle().abs() - FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_quarter_circle_arc_length() {
        let arc = ArcSegment::new(
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            0.0,
            false,
            true,
            Vec2::new(10.0, 10.0),
        );
        assert!((arc.arc_length() - 10.0 * FRAC_PI_2).abs() < 1e-2);
    }

    #[test]
    fn test_endpoints_match_inputs() {
        let start = Vec2::new(1.0, 2.0);
        let end = Vec2::new(7.0, -3.0);
        let arc = ArcSegment::new(start, Vec2::new(5.0, 4.0), 30.0, true, false, end);
        assert!((arc.get_point(0.0).position - start).length() < 1e-3);
        assert!((arc.get_point(1.0).position - end).length() < 1e-3);
    }

    #[test]
    fn test_small_radii_scale_up() {
        // Radii too small for the endpoint distance get scaled uniformly.
        let arc = ArcSegment::new(
            Vec2::ZERO,
            Vec2::new(1.0, 1.0),
            0.0,
            false,
            true,
            Vec2::new(10.0, 0.0),
        );
        assert!(arc.radius().x >= 5.0 - 1e-3);
        assert!((arc.get_point(1.0).position - Vec2::new(10.0, 0.0)).length() < 1e-2);
    }

    #[test]
    fn test_sweep_flag_picks_side() {
        let up = ArcSegment::new(
            Vec2::ZERO,
            Vec2::new(5.0, 5.0),
            0.0,
            false,
            true,
            Vec2::new(10.0, 0.0),
        );
        let down = ArcSegment::new(
            Vec2::ZERO,
            Vec2::new(5.0, 5.0),
            0.0,
            false,
            false,
            Vec2::new(10.0, 0.0),
        );
        let mid_up = up.get_point(0.5).position;
        let mid_down = down.get_point(0.5).position;
        assert!((mid_up.y - mid_down.y).abs() > 5.0);
    }

    #[test]
    fn test_bounds_contain_traversed_arc() {
        let arc = ArcSegment::new(
            Vec2::ZERO,
            Vec2::new(5.0, 5.0),
            0.0,
            false,
            true,
            Vec2::new(10.0, 0.0),
        );
        let rect = arc.bounds();
        for i in 0..=20 {
            let p = arc.get_point(i as f32 / 20.0).position;
            assert!(p.x >= rect.min.x - 1e-2 && p.x <= rect.max.x + 1e-2);
            assert!(p.y >= rect.min.y - 1e-2 && p.y <= rect.max.y + 1e-2);
        }
    }

    #[test]
    fn test_large_arc_flag_lengthens_arc() {
        let small = ArcSegment::new(
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            0.0,
            false,
            true,
            Vec2::new(10.0, 10.0),
        );
        let large = ArcSegment::new(
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            0.0,
            true,
            true,
            Vec2::new(10.0, 10.0),
        );
        assert!(large.arc_length() > small.arc_length() * 2.0);
    }
}
