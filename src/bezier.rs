//! Quadratic and cubic Bezier segments backed by polynomials.

use glam::Vec2;

use crate::geometry::{integrate, Rect};
use crate::path::PathSink;
use crate::polynomial::Polynomial2D;
use crate::sampler::UniformCurveSampler;
use crate::segment::CurvePoint;

fn polynomial_arc_length(curve: &Polynomial2D) -> f32 {
    integrate(|t| curve.eval_derivative(t).length(), 0.0, 1.0).abs()
}

/// A quadratic Bezier curve segment.
#[derive(Debug, Clone)]
pub struct QuadBezierSegment {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    curve: Polynomial2D,
    length: f32,
    sampler: UniformCurveSampler,
}

impl QuadBezierSegment {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2) -> Self {
        let curve = Polynomial2D::quadratic(p0, (p1 - p0) * 2.0, p0 - p1 * 2.0 + p2);
        let length = polynomial_arc_length(&curve);
        let sampler = UniformCurveSampler::new(curve, length, UniformCurveSampler::DEFAULT_SAMPLES);
        Self {
            p0,
            p1,
            p2,
            curve,
            length,
            sampler,
        }
    }

    /// Reconstructs control points from polynomial coefficients.
    fn from_polynomial(curve: &Polynomial2D) -> Self {
        let c0 = Vec2::new(curve.x.c0, curve.y.c0);
        let c1 = Vec2::new(curve.x.c1, curve.y.c1);
        let c2 = Vec2::new(curve.x.c2, curve.y.c2);
        Self::new(c0, c0 + c1 / 2.0, c0 + c1 + c2)
    }

    pub fn points(&self) -> [Vec2; 3] {
        [self.p0, self.p1, self.p2]
    }

    pub fn arc_length(&self) -> f32 {
        self.length
    }

    /// Evaluates the curve at the given parameter.
    pub fn eval(&self, t: f32) -> CurvePoint {
        CurvePoint {
            position: self.curve.eval(t),
            tangent: self.tangent(t),
        }
    }

    /// Unit tangent at the given parameter.
    pub fn tangent(&self, t: f32) -> Vec2 {
        self.curve.eval_derivative(t).normalize_or_zero()
    }

    /// Splits into two quadratics forming the same overall shape.
    pub fn split(&self, t: f32) -> (Self, Self) {
        let (pre, post) = self.curve.split(t);
        (Self::from_polynomial(&pre), Self::from_polynomial(&post))
    }

    /// Point at the given fraction of the curve's arc length.
    pub fn get_point(&self, distance: f32) -> CurvePoint {
        let sample = self.sampler.point_at_distance(self.length * distance);
        CurvePoint {
            position: sample.position,
            tangent: sample.tangent,
        }
    }

    pub fn draw(
        &self,
        sink: &mut dyn PathSink,
        start: f32,
        end: f32,
        move_to: bool,
    ) -> (CurvePoint, CurvePoint) {
        let (points, start_t, end_t) = if start != 0.0 || end != 1.0 {
            let start_t = self.sampler.distance_to_t(self.length * start);
            let end_t = self.sampler.distance_to_t(self.length * end);
            let remainder = 1.0 - start_t;
            let relative_end = if remainder.abs() < f32::EPSILON {
                0.0
            } else {
                (end_t - start_t) / remainder
            };
            let (_, rest) = self.split(start_t);
            let (middle, _) = rest.split(relative_end);
            (middle.points(), start_t, end_t)
        } else {
            (self.points(), 0.0, 1.0)
        };

        if move_to {
            sink.move_to(points[0]);
        }
        sink.quadratic_to(points[1], points[2]);

        (
            CurvePoint {
                position: points[0],
                tangent: self.tangent(start_t),
            },
            CurvePoint {
                position: points[2],
                tangent: self.tangent(end_t),
            },
        )
    }

    pub fn bounds(&self) -> Rect {
        self.curve.bounds()
    }
}

/// A cubic Bezier curve segment.
#[derive(Debug, Clone)]
pub struct CubicBezierSegment {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
    curve: Polynomial2D,
    length: f32,
    sampler: UniformCurveSampler,
}

impl CubicBezierSegment {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        let curve = Polynomial2D::cubic(
            p0,
            (p1 - p0) * 3.0,
            p0 * 3.0 - p1 * 6.0 + p2 * 3.0,
            -p0 + p1 * 3.0 - p2 * 3.0 + p3,
        );
        let length = polynomial_arc_length(&curve);
        let sampler = UniformCurveSampler::new(curve, length, UniformCurveSampler::DEFAULT_SAMPLES);
        Self {
            p0,
            p1,
            p2,
            p3,
            curve,
            length,
            sampler,
        }
    }

    fn from_polynomial(curve: &Polynomial2D) -> Self {
        let c0 = Vec2::new(curve.x.c0, curve.y.c0);
        let c1 = Vec2::new(curve.x.c1, curve.y.c1);
        let c2 = Vec2::new(curve.x.c2, curve.y.c2);
        let c3 = Vec2::new(curve.x.c3, curve.y.c3);
        Self::new(
            c0,
            c0 + c1 / 3.0,
            c0 + c1 * (2.0 / 3.0) + c2 / 3.0,
            c0 + c1 + c2 + c3,
        )
    }

    pub fn points(&self) -> [Vec2; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    pub fn arc_length(&self) -> f32 {
        self.length
    }

    pub fn eval(&self, t: f32) -> CurvePoint {
        CurvePoint {
            position: self.curve.eval(t),
            tangent: self.tangent(t),
        }
    }

    pub fn tangent(&self, t: f32) -> Vec2 {
        self.curve.eval_derivative(t).normalize_or_zero()
    }

    /// Splits into two cubics forming the same overall shape.
    pub fn split(&self, t: f32) -> (Self, Self) {
        let (pre, post) = self.curve.split(t);
        (Self::from_polynomial(&pre), Self::from_polynomial(&post))
    }

    pub fn get_point(&self, distance: f32) -> CurvePoint {
        let sample = self.sampler.point_at_distance(self.length * distance);
        CurvePoint {
            position: sample.position,
            tangent: sample.tangent,
        }
    }

    pub fn draw(
        &self,
        sink: &mut dyn PathSink,
        start: f32,
        end: f32,
        move_to: bool,
    ) -> (CurvePoint, CurvePoint) {
        let (points, start_t, end_t) = if start != 0.0 || end != 1.0 {
            let start_t = self.sampler.distance_to_t(self.length * start);
            let end_t = self.sampler.distance_to_t(self.length * end);
            let remainder = 1.0 - start_t;
            let relative_end = if remainder.abs() < f32::EPSILON {
                0.0
            } else {
                (end_t - start_t) / remainder
            };
            let (_, rest) = self.split(start_t);
            let (middle, _) = rest.split(relative_end);
            (middle.points(), start_t, end_t)
        } else {
            (self.points(), 0.0, 1.0)
        };

        if move_to {
            sink.move_to(points[0]);
        }
        sink.cubic_to(points[1], points[2], points[3]);

        (
            CurvePoint {
                position: points[0],
                tangent: self.tangent(start_t),
            },
            CurvePoint {
                position: points[3],
                tangent: self.tangent(end_t),
            },
        )
    }

    pub fn bounds(&self) -> Rect {
        self.curve.bounds()
    }
}
