//! Scalar and planar polynomial algebra, up to cubic degree.

use glam::Vec2;
use thiserror::Error;

use crate::geometry::Rect;

/// Error returned when a derivative beyond the cubic degree is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported derivative order {0}, a cubic polynomial has at most 3")]
pub struct UnsupportedDerivative(pub u32);

/// A polynomial in the form `c3·t³ + c2·t² + c1·t + c0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Polynomial {
    pub c0: f32,
    pub c1: f32,
    pub c2: f32,
    pub c3: f32,
}

impl Polynomial {
    /// Constructs a constant polynomial.
    pub fn constant(c0: f32) -> Self {
        Self::cubic(c0, 0.0, 0.0, 0.0)
    }

    /// Constructs a linear polynomial.
    pub fn linear(c0: f32, c1: f32) -> Self {
        Self::cubic(c0, c1, 0.0, 0.0)
    }

    /// Constructs a quadratic polynomial.
    pub fn quadratic(c0: f32, c1: f32, c2: f32) -> Self {
        Self::cubic(c0, c1, c2, 0.0)
    }

    /// Constructs a cubic polynomial.
    pub fn cubic(c0: f32, c1: f32, c2: f32, c3: f32) -> Self {
        Self { c0, c1, c2, c3 }
    }

    /// Evaluates the polynomial at `t`.
    pub fn eval(&self, t: f32) -> f32 {
        self.c3 * (t * t * t) + self.c2 * (t * t) + self.c1 * t + self.c0
    }

    /// The first derivative.
    pub fn derivative(&self) -> Polynomial {
        Self::cubic(self.c1, 2.0 * self.c2, 3.0 * self.c3, 0.0)
    }

    /// The nth derivative, for `n` in `0..=3`.
    pub fn differentiate(&self, n: u32) -> Result<Polynomial, UnsupportedDerivative> {
        match n {
            0 => Ok(*self),
            1 => Ok(self.derivative()),
            2 => Ok(Self::cubic(2.0 * self.c2, 6.0 * self.c3, 0.0, 0.0)),
            3 => Ok(Self::constant(6.0 * self.c3)),
            _ => Err(UnsupportedDerivative(n)),
        }
    }

    /// Splits the polynomial at `u` into two polynomials of the same overall
    /// shape, each reparameterized over `[0, 1]`.
    ///
    /// The halves meet at the split point:
    /// `pre.eval(1) == post.eval(0) == self.eval(u)`.
    pub fn split(&self, u: f32) -> (Polynomial, Polynomial) {
        let d = 1.0 - u;

        let pre = Self::cubic(self.c0, self.c1 * u, self.c2 * u * u, self.c3 * u * u * u);

        // Taylor expansion around u, scaled onto the remaining interval.
        let d1 = self.derivative().eval(u);
        let d2 = 2.0 * self.c2 + 6.0 * self.c3 * u;
        let d3 = 6.0 * self.c3;
        let post = Self::cubic(
            self.eval(u),
            d * d1,
            (d * d) / 2.0 * d2,
            (d * d * d) / 6.0 * d3,
        );

        (pre, post)
    }
}

/// A pair of polynomials describing a planar curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polynomial2D {
    pub x: Polynomial,
    pub y: Polynomial,
}

impl Polynomial2D {
    pub fn new(x: Polynomial, y: Polynomial) -> Self {
        Self { x, y }
    }

    /// Curve with quadratic coefficient vectors `c0 + c1·t + c2·t²`.
    pub fn quadratic(c0: Vec2, c1: Vec2, c2: Vec2) -> Self {
        Self {
            x: Polynomial::quadratic(c0.x, c1.x, c2.x),
            y: Polynomial::quadratic(c0.y, c1.y, c2.y),
        }
    }

    /// Curve with cubic coefficient vectors `c0 + c1·t + c2·t² + c3·t³`.
    pub fn cubic(c0: Vec2, c1: Vec2, c2: Vec2, c3: Vec2) -> Self {
        Self {
            x: Polynomial::cubic(c0.x, c1.x, c2.x, c3.x),
            y: Polynomial::cubic(c0.y, c1.y, c2.y, c3.y),
        }
    }

    /// Evaluates the curve position at `t`.
    pub fn eval(&self, t: f32) -> Vec2 {
        Vec2::new(self.x.eval(t), self.y.eval(t))
    }

    /// The componentwise first derivative.
    pub fn derivative(&self) -> Polynomial2D {
        Self::new(self.x.derivative(), self.y.derivative())
    }

    /// Evaluates the curve velocity at `t`.
    pub fn eval_derivative(&self, t: f32) -> Vec2 {
        Vec2::new(self.x.derivative().eval(t), self.y.derivative().eval(t))
    }

    /// The componentwise nth derivative, for `n` in `0..=3`.
    pub fn differentiate(&self, n: u32) -> Result<Polynomial2D, UnsupportedDerivative> {
        Ok(Self::new(self.x.differentiate(n)?, self.y.differentiate(n)?))
    }

    /// Splits the curve at `u`; see [`Polynomial::split`].
    pub fn split(&self, u: f32) -> (Polynomial2D, Polynomial2D) {
        let (x_pre, x_post) = self.x.split(u);
        let (y_pre, y_post) = self.y.split(u);
        (Self::new(x_pre, y_pre), Self::new(x_post, y_post))
    }

    /// Axis-aligned extrema of the curve over `t` in `[0, 1]`.
    ///
    /// Solves the (at most quadratic) derivative roots per axis and extends
    /// the endpoint box by any interior extremum.
    pub fn bounds(&self) -> Rect {
        let start = self.eval(0.0);
        let end = self.eval(1.0);
        let mut rect = Rect::new(start.min(end), start.max(end));

        for axis in [self.x, self.y] {
            // Derivative a·t² + b·t + c per axis.
            let a = 3.0 * axis.c3;
            let b = 2.0 * axis.c2;
            let c = axis.c1;

            if a.abs() < 1e-10 {
                if b.abs() > 1e-10 {
                    let t = -c / b;
                    if t > 0.0 && t < 1.0 {
                        rect.expand(self.eval(t));
                    }
                }
                continue;
            }

            let discriminant = b * b - 4.0 * a * c;
            if discriminant >= 0.0 {
                let sqrt_d = discriminant.sqrt();
                for t in [(-b + sqrt_d) / (2.0 * a), (-b - sqrt_d) / (2.0 * a)] {
                    if t > 0.0 && t < 1.0 {
                        rect.expand(self.eval(t));
                    }
                }
            }
        }

        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_cubic() {
        let p = Polynomial::cubic(1.0, 2.0, 3.0, 4.0);
        assert!((p.eval(0.0) - 1.0).abs() < 1e-6);
        assert!((p.eval(1.0) - 10.0).abs() < 1e-6);
        assert!((p.eval(2.0) - (1.0 + 4.0 + 12.0 + 32.0)).abs() < 1e-5);
    }

    #[test]
    fn test_differentiate_orders() {
        let p = Polynomial::cubic(1.0, 2.0, 3.0, 4.0);
        let d1 = p.differentiate(1).unwrap();
        assert_eq!(d1, Polynomial::cubic(2.0, 6.0, 12.0, 0.0));
        let d2 = p.differentiate(2).unwrap();
        assert_eq!(d2, Polynomial::cubic(6.0, 24.0, 0.0, 0.0));
        let d3 = p.differentiate(3).unwrap();
        assert_eq!(d3, Polynomial::constant(24.0));
        assert_eq!(p.differentiate(0).unwrap(), p);
    }

    #[test]
    fn test_differentiate_too_far() {
        let p = Polynomial::cubic(1.0, 2.0, 3.0, 4.0);
        assert_eq!(p.differentiate(4), Err(UnsupportedDerivative(4)));
    }

    #[test]
    fn test_split_continuity() {
        let p = Polynomial::cubic(0.5, -1.0, 2.0, 3.0);
        for u in [0.2, 0.5, 0.8] {
            let (pre, post) = p.split(u);
            let at_split = p.eval(u);
            assert!((pre.eval(1.0) - at_split).abs() < 1e-4, "pre mismatch at {u}");
            assert!((post.eval(0.0) - at_split).abs() < 1e-4, "post mismatch at {u}");
        }
    }

    #[test]
    fn test_split_matches_original_shape() {
        let p = Polynomial::cubic(1.0, 0.0, -2.0, 1.5);
        let u = 0.4;
        let (pre, post) = p.split(u);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((pre.eval(t) - p.eval(t * u)).abs() < 1e-4);
            assert!((post.eval(t) - p.eval(u + t * (1.0 - u))).abs() < 1e-4);
        }
    }

    #[test]
    fn test_split_2d_continuity() {
        let curve = Polynomial2D::cubic(
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(-3.0, 6.0),
            Vec2::new(1.0, -4.0),
        );
        let (pre, post) = curve.split(0.3);
        let at_split = curve.eval(0.3);
        assert!((pre.eval(1.0) - at_split).length() < 1e-4);
        assert!((post.eval(0.0) - at_split).length() < 1e-4);
    }

    #[test]
    fn test_bounds_catches_bulge() {
        // Cubic Bezier bulging above its endpoints.
        let curve = Polynomial2D::cubic(
            Vec2::ZERO,
            Vec2::new(3.0, 6.0),
            Vec2::new(-3.0, 0.0),
            Vec2::new(1.0, -4.0),
        );
        let rect = curve.bounds();
        assert!(rect.min.y <= 0.0);
        assert!(rect.max.y > 1.9);
    }
}
