//! SVG path data parsing.
//!
//! Parses the `d` attribute mini-language into a [`CurveProfile`].
//! Malformed input is reported through the `log` facade and skipped, so a
//! broken path degrades to a partial shape instead of aborting.

use std::iter::Peekable;
use std::str::Chars;

use glam::Vec2;
use thiserror::Error;

use crate::arc::ArcSegment;
use crate::bezier::{CubicBezierSegment, QuadBezierSegment};
use crate::line::LineSegment;
use crate::profile::CurveProfile;
use crate::segment::Segment;

/// Error raised while scanning numbers in path data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathDataError {
    /// The data ended where a number was expected.
    #[error("unexpected end of path data")]
    UnexpectedEnd,
    /// A token could not be parsed as a number.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
}

/// Parses SVG path data into a curve profile.
///
/// Supported commands: M/m, L/l, H/h, V/v, Q/q, T/t, C/c, S/s, A/a, Z/z,
/// with absolute vs. relative selected by case and implicit command
/// repetition (`M` repeats as `L`). Smooth variants reflect the previous
/// control point only when the previous segment belongs to the same curve
/// family.
///
/// # Example
///
/// ```
/// use pathmorph::get_path_profile;
///
/// let triangle = get_path_profile("M 0,0 L 10,0 L 10,10 Z");
/// assert_eq!(triangle.segments.len(), 3);
/// ```
pub fn get_path_profile(data: &str) -> CurveProfile {
    let mut profile = CurveProfile::new();
    let mut chars = data.chars().peekable();
    let mut current = Vec2::ZERO;
    let mut first_point: Option<Vec2> = None;
    let mut last_command: Option<char> = None;

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() || c == ',' {
            chars.next();
            continue;
        }

        let command = if c.is_ascii_alphabetic() {
            chars.next();
            c
        } else if let Some(previous) = last_command {
            // Implicit repetition; a move continues as a line.
            match previous {
                'M' => 'L',
                'm' => 'l',
                other => other,
            }
        } else {
            log::warn!("path data starts with {c:?} instead of a command, skipping");
            chars.next();
            continue;
        };

        if !matches!(
            command.to_ascii_uppercase(),
            'M' | 'L' | 'H' | 'V' | 'Q' | 'T' | 'C' | 'S' | 'A' | 'Z'
        ) {
            log::warn!("unknown path command {command:?}, skipping");
            recover(&mut chars);
            last_command = None;
            continue;
        }

        let relative = command.is_ascii_lowercase();
        let base = if relative { current } else { Vec2::ZERO };

        let parsed = apply_command(
            &mut profile,
            &mut chars,
            command,
            base,
            &mut current,
            &mut first_point,
        );
        if let Err(error) = parsed {
            log::warn!("path command {command:?} has malformed arguments ({error}), skipping");
            recover(&mut chars);
        }

        // Z takes no parameters and must not become the implicit command.
        last_command = if command.eq_ignore_ascii_case(&'z') {
            None
        } else {
            Some(command)
        };
    }

    profile.update_min_sin();
    profile
}

fn apply_command(
    profile: &mut CurveProfile,
    chars: &mut Peekable<Chars>,
    command: char,
    base: Vec2,
    current: &mut Vec2,
    first_point: &mut Option<Vec2>,
) -> Result<(), PathDataError> {
    let relative = command.is_ascii_lowercase();
    match command.to_ascii_uppercase() {
        'M' => {
            let point = base + parse_point(chars)?;
            *current = point;
            *first_point = Some(point);
        }
        'L' => {
            let point = base + parse_point(chars)?;
            push(profile, LineSegment::new(*current, point).into());
            *current = point;
        }
        'H' => {
            let x = parse_number(chars)?;
            let point = if relative {
                *current + Vec2::new(x, 0.0)
            } else {
                Vec2::new(x, current.y)
            };
            push(profile, LineSegment::new(*current, point).into());
            *current = point;
        }
        'V' => {
            let y = parse_number(chars)?;
            let point = if relative {
                *current + Vec2::new(0.0, y)
            } else {
                Vec2::new(current.x, y)
            };
            push(profile, LineSegment::new(*current, point).into());
            *current = point;
        }
        'Q' => {
            let control = base + parse_point(chars)?;
            let point = base + parse_point(chars)?;
            push(
                profile,
                QuadBezierSegment::new(*current, control, point).into(),
            );
            *current = point;
        }
        'T' => {
            let control = match profile.segments.last() {
                Some(Segment::Quad(previous)) => reflect(previous.p1, *current),
                _ => *current,
            };
            let point = base + parse_point(chars)?;
            push(
                profile,
                QuadBezierSegment::new(*current, control, point).into(),
            );
            *current = point;
        }
        'C' => {
            let control1 = base + parse_point(chars)?;
            let control2 = base + parse_point(chars)?;
            let point = base + parse_point(chars)?;
            push(
                profile,
                CubicBezierSegment::new(*current, control1, control2, point).into(),
            );
            *current = point;
        }
        'S' => {
            let control1 = match profile.segments.last() {
                Some(Segment::Cubic(previous)) => reflect(previous.p2, *current),
                _ => *current,
            };
            let control2 = base + parse_point(chars)?;
            let point = base + parse_point(chars)?;
            push(
                profile,
                CubicBezierSegment::new(*current, control1, control2, point).into(),
            );
            *current = point;
        }
        'A' => {
            let radius = parse_point(chars)?;
            let rotation = parse_number(chars)?;
            let large_arc = parse_number(chars)? != 0.0;
            let sweep = parse_number(chars)? != 0.0;
            let point = base + parse_point(chars)?;

            if (point - *current).length() < 1e-6 {
                // Zero-extent arcs draw nothing.
            } else if radius.x.abs() < 1e-6 || radius.y.abs() < 1e-6 {
                push(profile, LineSegment::new(*current, point).into());
            } else {
                push(
                    profile,
                    ArcSegment::new(*current, radius, rotation, large_arc, sweep, point).into(),
                );
            }
            *current = point;
        }
        'Z' => {
            if let Some(first) = *first_point {
                if *current != first {
                    push(profile, LineSegment::new(*current, first).into());
                }
                *current = first;
            }
        }
        // Unknown letters are filtered out before dispatch.
        _ => {}
    }
    Ok(())
}

fn push(profile: &mut CurveProfile, segment: Segment) {
    profile.push(segment);
}

fn reflect(control: Vec2, through: Vec2) -> Vec2 {
    through + (through - control)
}

fn parse_point(chars: &mut Peekable<Chars>) -> Result<Vec2, PathDataError> {
    let x = parse_number(chars)?;
    let y = parse_number(chars)?;
    Ok(Vec2::new(x, y))
}

fn parse_number(chars: &mut Peekable<Chars>) -> Result<f32, PathDataError> {
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() || c == ',' {
            chars.next();
        } else {
            break;
        }
    }

    let mut token = String::new();
    if let Some(&c) = chars.peek() {
        if c == '-' || c == '+' {
            token.push(c);
            chars.next();
        }
    }

    let mut has_dot = false;
    let mut has_exp = false;
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            token.push(c);
            chars.next();
        } else if c == '.' && !has_dot && !has_exp {
            has_dot = true;
            token.push(c);
            chars.next();
        } else if (c == 'e' || c == 'E') && !has_exp && !token.is_empty() {
            has_exp = true;
            token.push(c);
            chars.next();
            if let Some(&sign) = chars.peek() {
                if sign == '-' || sign == '+' {
                    token.push(sign);
                    chars.next();
                }
            }
        } else {
            break;
        }
    }

    if token.is_empty() || token == "-" || token == "+" {
        return Err(PathDataError::UnexpectedEnd);
    }
    token
        .parse::<f32>()
        .map_err(|_| PathDataError::InvalidNumber(token))
}

/// Skips to the next command letter after a malformed argument group.
fn recover(chars: &mut Peekable<Chars>) {
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphabetic() {
            break;
        }
        chars.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::get_point_at_distance;

    #[test]
    fn test_triangle_scenario() {
        let profile = get_path_profile("M0,0 L10,0 L10,10 Z");
        assert_eq!(profile.segments.len(), 3);

        let expected = 10.0 + 10.0 + 200.0_f32.sqrt();
        assert!((profile.arc_length - expected).abs() < 1e-3);

        let point = get_point_at_distance(&profile, 10.0);
        assert!((point.position - Vec2::new(10.0, 0.0)).length() < 1e-4);

        // Closed: the last segment returns to the first point.
        let last = profile.segments.last().unwrap().get_point(1.0).position;
        assert!((last - Vec2::ZERO).length() < 1e-5);
    }

    #[test]
    fn test_relative_commands() {
        let profile = get_path_profile("m 5,5 l 10,0 v 10 h -10 z");
        assert_eq!(profile.segments.len(), 4);
        let end = profile.segments[1].get_point(1.0).position;
        assert!((end - Vec2::new(15.0, 15.0)).length() < 1e-5);
    }

    #[test]
    fn test_implicit_lineto_after_move() {
        let profile = get_path_profile("M 0,0 10,0 10,10");
        assert_eq!(profile.segments.len(), 2);
    }

    #[test]
    fn test_cubic_and_smooth_reflection() {
        let profile = get_path_profile("M0,0 C 0,-10 10,-10 10,0 S 20,10 20,0");
        assert_eq!(profile.segments.len(), 2);

        let Segment::Cubic(second) = &profile.segments[1] else {
            panic!("expected a cubic segment");
        };
        // Reflection of (10, -10) through (10, 0).
        assert!((second.p1 - Vec2::new(10.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn test_smooth_without_previous_curve_uses_current_point() {
        let profile = get_path_profile("M0,0 L10,0 T20,0");
        let Segment::Quad(quad) = &profile.segments[1] else {
            panic!("expected a quad segment");
        };
        assert!((quad.p1 - Vec2::new(10.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_quad_and_smooth_quad() {
        let profile = get_path_profile("M0,0 Q 5,10 10,0 t 10,0");
        assert_eq!(profile.segments.len(), 2);
        let Segment::Quad(second) = &profile.segments[1] else {
            panic!("expected a quad segment");
        };
        // Reflected control of (5, 10) through (10, 0).
        assert!((second.p1 - Vec2::new(15.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn test_arc_command() {
        let profile = get_path_profile("M0,0 A 10 10 0 0 1 10,10");
        assert_eq!(profile.segments.len(), 1);
        let Segment::Arc(arc) = &profile.segments[0] else {
            panic!("expected an arc segment");
        };
        assert!((arc.delta_angle().abs() - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_zero_radius_arc_becomes_line() {
        let profile = get_path_profile("M0,0 A 0 10 0 0 1 10,10");
        assert!(matches!(profile.segments[0], Segment::Line(_)));
    }

    #[test]
    fn test_malformed_arguments_degrade_to_partial_shape() {
        // The lone `L` misses its y coordinate; parsing continues with the
        // next command.
        let profile = get_path_profile("M0,0 L10 L 5,5");
        assert_eq!(profile.segments.len(), 1);
        let end = profile.segments[0].get_point(1.0).position;
        assert!((end - Vec2::new(5.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_garbage_input_is_empty_not_panic() {
        let profile = get_path_profile("not a path at all");
        assert_eq!(profile.arc_length, 0.0);
        let profile = get_path_profile("");
        assert!(profile.segments.is_empty());
    }

    #[test]
    fn test_scientific_notation_numbers() {
        let profile = get_path_profile("M0,0 L1e1,0");
        let end = profile.segments[0].get_point(1.0).position;
        assert!((end - Vec2::new(10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_min_sin_sharp_corner() {
        // Sharp 180-degree reversal drives min_sin toward zero.
        let spike = get_path_profile("M0,0 L10,0 L0,0");
        assert!(spike.min_sin < 0.1);
    }
}
