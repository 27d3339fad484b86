//! Shared geometric primitives and numeric helpers.

use glam::Vec2;

/// Axis-aligned bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut min = first;
        let mut max = first;
        for p in iter {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: Rect) -> Rect {
        Rect {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grows the rectangle to contain `point`.
    pub fn expand(&mut self, point: Vec2) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }
}

/// Clockwise perpendicular, `(y, -x)`.
///
/// This is the handedness the whole crate uses for line normals and fillet
/// directions; segment tangent conventions depend on it.
#[inline]
pub(crate) fn perp(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Signed angle from `u` to `v` in radians.
pub(crate) fn angle_between(u: Vec2, v: Vec2) -> f32 {
    let n = u.length() * v.length();
    if n < 1e-6 {
        return 0.0;
    }
    let c = (u.dot(v) / n).clamp(-1.0, 1.0);
    let sign = if u.x * v.y - u.y * v.x < 0.0 { -1.0 } else { 1.0 };
    sign * c.acos()
}

// 5-node Gauss-Legendre abscissae and weights on [-1, 1].
const GL_NODES: [(f32, f32); 5] = [
    (0.0, 0.568_888_9),
    (-0.538_469_31, 0.478_628_67),
    (0.538_469_31, 0.478_628_67),
    (-0.906_179_85, 0.236_926_89),
    (0.906_179_85, 0.236_926_89),
];

const GL_PANELS: usize = 8;

/// Integrates `f` over `[a, b]` with composite Gauss-Legendre quadrature.
///
/// Used for arc lengths, where `f` is the curve speed. Eight 5-node panels
/// keep the error well below what proportional trimming can resolve.
pub(crate) fn integrate(f: impl Fn(f32) -> f32, a: f32, b: f32) -> f32 {
    let step = (b - a) / GL_PANELS as f32;
    let half = step * 0.5;
    let mut total = 0.0;
    for panel in 0..GL_PANELS {
        let mid = a + step * (panel as f32 + 0.5);
        for (x, w) in GL_NODES {
            total += w * f(mid + half * x);
        }
    }
    total * half
}
