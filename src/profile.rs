//! Curve profiles: ordered segment lists with aggregate metadata.

use glam::Vec2;

use crate::geometry::Rect;
use crate::segment::{CurvePoint, Segment};

/// An ordered list of segments describing one complete, possibly
/// multi-subpath, path.
///
/// Profiles are built once by a profile builder and treated as immutable
/// afterwards; the owning shape rebuilds the profile whenever its
/// parameters change.
#[derive(Debug, Clone)]
pub struct CurveProfile {
    /// Segments in draw order; within a subpath each segment starts where
    /// the previous one ends.
    pub segments: Vec<Segment>,
    /// Sum of all segment lengths.
    pub arc_length: f32,
    /// Smallest half-angle sine across all segment joints, used as a
    /// curvature sensitivity signal (miter limits, morph sampling).
    pub min_sin: f32,
}

impl Default for CurveProfile {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            arc_length: 0.0,
            min_sin: 1.0,
        }
    }
}

impl CurveProfile {
    /// Creates an empty, zero-length profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment, keeping the aggregate length current.
    pub(crate) fn push(&mut self, segment: Segment) {
        self.arc_length += segment.arc_length();
        self.segments.push(segment);
    }

    /// Appends all of `source`, merging aggregates.
    pub(crate) fn extend_from(&mut self, source: CurveProfile) {
        self.arc_length += source.arc_length;
        self.min_sin = self.min_sin.min(source.min_sin);
        self.segments.extend(source.segments);
    }

    /// Recomputes `min_sin` from all consecutive segment pairs, wrapping
    /// from the last segment back to the first.
    pub(crate) fn update_min_sin(&mut self) {
        for i in 0..self.segments.len() {
            let outgoing = &self.segments[i];
            let incoming = &self.segments[(i + 1) % self.segments.len()];

            let start_vector = -outgoing.get_point(1.0).tangent;
            let end_vector = incoming.get_point(0.0).tangent;
            let dot = start_vector.dot(end_vector).clamp(-1.0, 1.0);

            let angle_between = dot.acos();
            let angle_sin = (angle_between / 2.0).sin();

            self.min_sin = self.min_sin.min(angle_sin.abs());
        }
    }

    /// Union of all segment bounding boxes, `None` for an empty profile.
    pub fn bounds(&self) -> Option<Rect> {
        let mut iter = self.segments.iter();
        let mut rect = iter.next()?.bounds();
        for segment in iter {
            rect = rect.union(segment.bounds());
        }
        Some(rect)
    }
}

/// Returns the point at the provided distance along the profile.
///
/// The distance is clamped into `[0, arc_length]`; the segment covering the
/// clamped distance resolves the point at its local fraction. Zero-length
/// segments are skipped to keep the fraction finite.
pub fn get_point_at_distance(profile: &CurveProfile, distance: f32) -> CurvePoint {
    let clamped = distance.clamp(0.0, profile.arc_length);

    let mut traveled = 0.0;
    for segment in &profile.segments {
        let length = segment.arc_length();
        if traveled + length >= clamped && length > f32::EPSILON {
            return segment.get_point((clamped - traveled) / length);
        }
        traveled += length;
    }

    CurvePoint {
        position: Vec2::ZERO,
        tangent: Vec2::Y,
    }
}

/// One maximal run of contiguous segments.
#[derive(Debug, Clone)]
pub(crate) struct Subcurve {
    pub profile: CurveProfile,
    pub closed: bool,
}

impl Subcurve {
    pub(crate) fn empty() -> Self {
        Self {
            profile: CurveProfile {
                segments: Vec::new(),
                arc_length: 0.0,
                min_sin: 0.0,
            },
            closed: false,
        }
    }
}

/// Splits a profile into maximal contiguous subpaths: a new subpath begins
/// whenever a segment's start does not coincide with the previous segment's
/// end. Each subpath records whether its endpoints coincide.
pub(crate) fn split_profile(profile: &CurveProfile) -> Vec<Subcurve> {
    if profile.segments.is_empty() {
        return Vec::new();
    }

    let mut composite = vec![Subcurve::empty()];
    let mut end_point: Option<Vec2> = None;

    for segment in &profile.segments {
        let start = segment.get_point(0.0).position;
        if let Some(end) = end_point {
            if start != end {
                composite.push(Subcurve::empty());
            }
        }

        end_point = Some(segment.get_point(1.0).position);
        if let Some(current) = composite.last_mut() {
            current.profile.push(segment.clone());
        }
    }

    for subcurve in &mut composite {
        let first = subcurve.profile.segments.first();
        let last = subcurve.profile.segments.last();
        if let (Some(first), Some(last)) = (first, last) {
            subcurve.closed = first.get_point(0.0).position == last.get_point(1.0).position;
        }
    }

    composite
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineSegment;

    fn square() -> CurveProfile {
        let mut profile = CurveProfile::new();
        profile.push(LineSegment::new(Vec2::ZERO, Vec2::new(10.0, 0.0)).into());
        profile.push(LineSegment::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)).into());
        profile.push(LineSegment::new(Vec2::new(10.0, 10.0), Vec2::new(0.0, 10.0)).into());
        profile.push(LineSegment::new(Vec2::new(0.0, 10.0), Vec2::ZERO).into());
        profile
    }

    #[test]
    fn test_arc_length_is_sum() {
        let profile = square();
        assert!((profile.arc_length - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_point_at_zero_and_full_distance() {
        let profile = square();
        let start = get_point_at_distance(&profile, 0.0);
        assert!((start.position - Vec2::ZERO).length() < 1e-5);
        let end = get_point_at_distance(&profile, profile.arc_length);
        assert!((end.position - Vec2::ZERO).length() < 1e-5);
    }

    #[test]
    fn test_point_at_distance_walks_segments() {
        let profile = square();
        let point = get_point_at_distance(&profile, 15.0);
        assert!((point.position - Vec2::new(10.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_point_at_distance_clamps() {
        let profile = square();
        let before = get_point_at_distance(&profile, -5.0);
        assert!((before.position - Vec2::ZERO).length() < 1e-5);
        let after = get_point_at_distance(&profile, 1000.0);
        assert!((after.position - Vec2::ZERO).length() < 1e-5);
    }

    #[test]
    fn test_empty_profile_yields_zero_point() {
        let profile = CurveProfile::new();
        let point = get_point_at_distance(&profile, 3.0);
        assert_eq!(point.position, Vec2::ZERO);
        assert_eq!(profile.arc_length, 0.0);
    }

    #[test]
    fn test_split_detects_subpaths_and_closedness() {
        let mut profile = square();
        // Disjoint open tail.
        profile.push(LineSegment::new(Vec2::new(50.0, 0.0), Vec2::new(60.0, 0.0)).into());

        let subcurves = split_profile(&profile);
        assert_eq!(subcurves.len(), 2);
        assert!(subcurves[0].closed);
        assert!(!subcurves[1].closed);
        assert_eq!(subcurves[0].profile.segments.len(), 4);
    }

    #[test]
    fn test_zero_length_segments_are_skipped() {
        let mut profile = CurveProfile::new();
        profile.push(LineSegment::new(Vec2::ZERO, Vec2::ZERO).into());
        profile.push(LineSegment::new(Vec2::ZERO, Vec2::new(10.0, 0.0)).into());
        let point = get_point_at_distance(&profile, 5.0);
        assert!((point.position - Vec2::new(5.0, 0.0)).length() < 1e-4);
    }
}
