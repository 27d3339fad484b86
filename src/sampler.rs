//! Arc-length reparameterization of polynomial curves.

use glam::Vec2;

use crate::polynomial::Polynomial2D;

/// A point sampled from a curve, ordered by distance along it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampledPoint {
    /// Curve parameter of the sample.
    pub t: f32,
    /// Position on the curve.
    pub position: Vec2,
    /// Unit tangent at the sample.
    pub tangent: Vec2,
    /// Distance traveled along the curve up to this sample.
    pub distance: f32,
}

/// Uniformly samples points on a given curve.
///
/// Non-linear curves have no closed-form distance → parameter inverse, so
/// the sampler re-parameterizes the curve by arc length over a fixed set of
/// samples. More samples raise the resolution, and therefore the precision,
/// of the inversion.
#[derive(Debug, Clone)]
pub struct UniformCurveSampler {
    curve: Polynomial2D,
    arc_length: f32,
    points: Vec<SampledPoint>,
}

impl UniformCurveSampler {
    /// Sample count used by the Bezier segments.
    pub const DEFAULT_SAMPLES: usize = 20;

    /// Creates a sampler over `curve`, whose authoritative arc length is
    /// `arc_length`.
    pub fn new(curve: Polynomial2D, arc_length: f32, samples: usize) -> Self {
        let mut sampler = Self {
            curve,
            arc_length,
            points: Vec::new(),
        };
        sampler.resample(samples.max(2));
        sampler
    }

    /// Discards all previously sampled points and resamples the curve with
    /// the provided number of points.
    pub fn resample(&mut self, samples: usize) {
        let samples = samples.max(2);
        self.points.clear();
        self.points.push(SampledPoint {
            t: 0.0,
            distance: 0.0,
            position: self.curve.eval(0.0),
            tangent: self.tangent(0.0),
        });

        let mut length = 0.0;
        for i in 1..samples {
            let t = i as f32 / (samples - 1) as f32;
            let position = self.curve.eval(t);
            length += self.points[i - 1].position.distance(position);
            self.points.push(SampledPoint {
                t,
                distance: length,
                position,
                tangent: self.tangent(t),
            });
        }

        // The chord sum accumulates floating point error and always falls
        // short of the true arc length; the last sample is pinned to the
        // authoritative value.
        if let Some(last) = self.points.last_mut() {
            last.distance = self.arc_length;
        }
    }

    /// Returns the point at the provided distance along the curve.
    ///
    /// Finds the two samples bracketing the distance, interpolates only the
    /// curve parameter between them, and re-evaluates the curve at the
    /// interpolated parameter, so the result always lies exactly on the
    /// curve rather than on a chord.
    pub fn point_at_distance(&self, distance: f32) -> SampledPoint {
        if self.points.len() < 2 {
            // Resampling always leaves at least two points; degrade to the
            // curve start if the sampler was somehow emptied.
            return SampledPoint {
                t: 0.0,
                distance: 0.0,
                position: self.curve.eval(0.0),
                tangent: self.tangent(0.0),
            };
        }
        if distance < 0.0 {
            return self.points[0];
        }
        if distance > self.arc_length {
            return self.points[self.points.len() - 1];
        }

        let last = self.points.len() - 1;
        let snapped = self
            .points
            .iter()
            .position(|point| point.distance >= distance)
            .unwrap_or(last);

        let (lower, upper) = if snapped == 0 {
            (0, 1)
        } else if snapped == last {
            (last - 1, last)
        } else {
            let to_next = self.points[snapped + 1].distance - distance;
            let to_previous = distance - self.points[snapped - 1].distance;
            if to_next < to_previous {
                (snapped, snapped + 1)
            } else {
                (snapped - 1, snapped)
            }
        };

        let lower = self.points[lower];
        let upper = self.points[upper];
        let span = upper.distance - lower.distance;
        let distance_t = if span.abs() < f32::EPSILON {
            0.0
        } else {
            (distance - lower.distance) / span
        };
        let t = lower.t + (upper.t - lower.t) * distance_t;

        SampledPoint {
            t,
            distance,
            position: self.curve.eval(t),
            tangent: self.tangent(t),
        }
    }

    /// The curve parameter matching the provided distance.
    pub fn distance_to_t(&self, distance: f32) -> f32 {
        self.point_at_distance(distance).t
    }

    fn tangent(&self, t: f32) -> Vec2 {
        self.curve.eval_derivative(t).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_curve() -> Polynomial2D {
        // Straight line from (0, 0) to (10, 0).
        Polynomial2D::cubic(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::ZERO, Vec2::ZERO)
    }

    #[test]
    fn test_distances_increase() {
        let sampler = UniformCurveSampler::new(line_curve(), 10.0, 20);
        let mut previous = -1.0;
        for point in &sampler.points {
            assert!(point.distance > previous);
            previous = point.distance;
        }
        assert_eq!(sampler.points[0].distance, 0.0);
        assert_eq!(sampler.points.last().unwrap().distance, 10.0);
    }

    #[test]
    fn test_point_at_distance_on_line() {
        let sampler = UniformCurveSampler::new(line_curve(), 10.0, 20);
        let point = sampler.point_at_distance(2.5);
        assert!((point.position - Vec2::new(2.5, 0.0)).length() < 1e-3);
        assert!((point.tangent - Vec2::X).length() < 1e-3);
    }

    #[test]
    fn test_point_at_distance_clamps() {
        let sampler = UniformCurveSampler::new(line_curve(), 10.0, 20);
        let before = sampler.point_at_distance(-5.0);
        assert!((before.position - Vec2::ZERO).length() < 1e-5);
        let after = sampler.point_at_distance(25.0);
        assert!((after.position - Vec2::new(10.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_resampled_point_lies_on_curve() {
        // Quadratic arc; samples interpolate t, never positions.
        let curve = Polynomial2D::quadratic(
            Vec2::ZERO,
            Vec2::new(2.0, 4.0),
            Vec2::new(0.0, -4.0),
        );
        let length = crate::geometry::integrate(
            |t| curve.eval_derivative(t).length(),
            0.0,
            1.0,
        );
        let sampler = UniformCurveSampler::new(curve, length, 20);
        for i in 0..=10 {
            let d = length * i as f32 / 10.0;
            let point = sampler.point_at_distance(d);
            // Re-evaluate the curve at the reported parameter.
            assert!((curve.eval(point.t) - point.position).length() < 1e-5);
        }
    }
}
