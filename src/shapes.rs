//! Profiles for basic shapes: circle sectors and rounded rectangles.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::arc::ArcSegment;
use crate::bezier::CubicBezierSegment;
use crate::circle::CircleSegment;
use crate::geometry::Rect;
use crate::line::LineSegment;
use crate::profile::CurveProfile;

/// Builds the profile of a circle or ellipse sector.
///
/// `size` holds the radii. The sweep from `start_angle` to `end_angle` is
/// normalized into a single turn and emitted as two arc segments meeting at
/// the middle angle; `closed` adds the radius lines through the center so
/// the sector forms a closed pie slice.
pub fn get_circle_profile(
    size: Vec2,
    start_angle: f32,
    mut end_angle: f32,
    closed: bool,
    counterclockwise: bool,
) -> CurveProfile {
    let mut profile = CurveProfile::new();

    if end_angle < start_angle {
        let loops = ((start_angle - end_angle) / TAU).floor() + 1.0;
        end_angle += TAU * loops;
    } else if end_angle > start_angle + TAU {
        let loops = ((end_angle - start_angle) / TAU).floor();
        end_angle -= TAU * loops;
    }

    let middle_angle = (start_angle + end_angle) / 2.0;
    let from = size * Vec2::from_angle(start_angle);
    let to = size * Vec2::from_angle(end_angle);
    let middle = size * Vec2::from_angle(middle_angle) * if counterclockwise { -1.0 } else { 1.0 };

    if closed {
        profile.push(LineSegment::new(Vec2::ZERO, from).into());
    }

    add_arc(
        &mut profile,
        size,
        from,
        middle,
        start_angle,
        middle_angle,
        counterclockwise,
    );
    add_arc(
        &mut profile,
        size,
        middle,
        to,
        middle_angle,
        end_angle,
        counterclockwise,
    );

    if closed {
        profile.push(LineSegment::new(to, Vec2::ZERO).into());
    }

    profile
}

fn add_arc(
    profile: &mut CurveProfile,
    size: Vec2,
    from: Vec2,
    to: Vec2,
    from_angle: f32,
    to_angle: f32,
    counterclockwise: bool,
) {
    let small = u8::from((from_angle - to_angle).abs() <= PI);
    let flip = u8::from(from_angle <= to_angle);
    let counter = u8::from(!counterclockwise);
    let sweep = (small ^ counter ^ flip) != 0;
    profile.push(ArcSegment::new(from, size, 0.0, false, sweep, to).into());
}

/// Per-corner fillet radii of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadius {
    /// The same radius on every corner.
    pub fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }
}

/// Shrinks a corner radius so it cannot overlap its neighbors on either
/// adjacent side.
fn adjust_rect_radius(radius: f32, horizontal: f32, vertical: f32, rect: &Rect) -> f32 {
    let width = if radius + horizontal > rect.width() {
        rect.width() * (radius / (radius + horizontal))
    } else {
        radius
    };
    let height = if radius + vertical > rect.height() {
        rect.height() * (radius / (radius + vertical))
    } else {
        radius
    };
    width.min(height)
}

/// Builds a rounded-rectangle profile.
///
/// Square corners become line joins, round corners circular fillets, and
/// `smooth_corners` swaps the fillets for cubic segments whose handles are
/// scaled by `sharpness`.
pub fn get_rect_profile(
    rect: Rect,
    radius: CornerRadius,
    smooth_corners: bool,
    sharpness: f32,
) -> CurveProfile {
    let mut profile = CurveProfile::new();

    let top_left = adjust_rect_radius(radius.top_left, radius.top_right, radius.bottom_left, &rect);
    let top_right = adjust_rect_radius(radius.top_right, radius.top_left, radius.bottom_right, &rect);
    let bottom_right =
        adjust_rect_radius(radius.bottom_right, radius.bottom_left, radius.top_right, &rect);
    let bottom_left =
        adjust_rect_radius(radius.bottom_left, radius.bottom_right, radius.top_left, &rect);

    let (left, right) = (rect.min.x, rect.max.x);
    let (top, bottom) = (rect.min.y, rect.max.y);

    // Direction constants toward each side of the rectangle.
    let toward_top = Vec2::new(0.0, -1.0);
    let toward_bottom = Vec2::new(0.0, 1.0);
    let toward_left = Vec2::new(-1.0, 0.0);
    let toward_right = Vec2::new(1.0, 0.0);

    profile.push(
        LineSegment::new(
            Vec2::new(left + top_left, top),
            Vec2::new(right - top_right, top),
        )
        .into(),
    );

    if top_right > 0.0 {
        add_corner(
            &mut profile,
            Vec2::new(right - top_right, top + top_right),
            top_right,
            toward_top,
            toward_right,
            smooth_corners,
            sharpness,
        );
    }
    profile.push(
        LineSegment::new(
            Vec2::new(right, top + top_right),
            Vec2::new(right, bottom - bottom_right),
        )
        .into(),
    );

    if bottom_right > 0.0 {
        add_corner(
            &mut profile,
            Vec2::new(right - bottom_right, bottom - bottom_right),
            bottom_right,
            toward_right,
            toward_bottom,
            smooth_corners,
            sharpness,
        );
    }
    profile.push(
        LineSegment::new(
            Vec2::new(right - bottom_right, bottom),
            Vec2::new(left + bottom_left, bottom),
        )
        .into(),
    );

    if bottom_left > 0.0 {
        add_corner(
            &mut profile,
            Vec2::new(left + bottom_left, bottom - bottom_left),
            bottom_left,
            toward_bottom,
            toward_left,
            smooth_corners,
            sharpness,
        );
    }
    profile.push(
        LineSegment::new(
            Vec2::new(left, bottom - bottom_left),
            Vec2::new(left, top + top_left),
        )
        .into(),
    );

    if top_left > 0.0 {
        add_corner(
            &mut profile,
            Vec2::new(left + top_left, top + top_left),
            top_left,
            toward_left,
            toward_top,
            smooth_corners,
            sharpness,
        );
    }

    profile
}

fn add_corner(
    profile: &mut CurveProfile,
    center: Vec2,
    radius: f32,
    from_normal: Vec2,
    to_normal: Vec2,
    smooth: bool,
    sharpness: f32,
) {
    let from = center + from_normal * radius;
    let to = center + to_normal * radius;
    if smooth {
        profile.push(
            CubicBezierSegment::new(
                from,
                from + to_normal * (sharpness * radius),
                to + from_normal * (sharpness * radius),
                to,
            )
            .into(),
        );
    } else {
        profile.push(CircleSegment::new(center, radius, from_normal, to_normal, false).into());
    }
}
