//! Draw target abstraction and a recording path.

use glam::Vec2;

/// Receiver for path drawing commands, shaped after the Canvas2D path API.
///
/// Segments emit their geometry into a `PathSink`; renderers implement it
/// over their native path type, and [`Path`] records the commands verbatim.
pub trait PathSink {
    fn move_to(&mut self, to: Vec2);
    fn line_to(&mut self, to: Vec2);
    fn quadratic_to(&mut self, control: Vec2, to: Vec2);
    fn cubic_to(&mut self, control1: Vec2, control2: Vec2, to: Vec2);
    /// Circular arc around `center`, from `start_angle` to `end_angle`.
    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32, counterclockwise: bool);
    /// Elliptical arc with the ellipse x-axis rotated by `rotation`.
    fn ellipse(
        &mut self,
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        start_angle: f32,
        end_angle: f32,
        counterclockwise: bool,
    );
}

/// A single recorded drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo {
        control: Vec2,
        to: Vec2,
    },
    CubicTo {
        control1: Vec2,
        control2: Vec2,
        to: Vec2,
    },
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        counterclockwise: bool,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        start_angle: f32,
        end_angle: f32,
        counterclockwise: bool,
    },
}

/// A 2D path that records drawing commands.
#[derive(Debug, Clone, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded commands.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Serializes the path back to SVG path data.
    ///
    /// Arcs are emitted in endpoint form (the `A` command), so the output
    /// can be fed back into the path parser.
    pub fn to_path_data(&self) -> String {
        use std::fmt::Write;

        let mut data = String::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    write!(&mut data, "M {} {} ", p.x, p.y).unwrap();
                }
                PathCommand::LineTo(p) => {
                    write!(&mut data, "L {} {} ", p.x, p.y).unwrap();
                }
                PathCommand::QuadTo { control, to } => {
                    write!(&mut data, "Q {} {} {} {} ", control.x, control.y, to.x, to.y).unwrap();
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                } => {
                    write!(
                        &mut data,
                        "C {} {} {} {} {} {} ",
                        control1.x, control1.y, control2.x, control2.y, to.x, to.y
                    )
                    .unwrap();
                }
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    counterclockwise,
                } => {
                    write_arc_data(
                        &mut data,
                        center,
                        Vec2::splat(radius),
                        0.0,
                        start_angle,
                        end_angle,
                        counterclockwise,
                    );
                }
                PathCommand::Ellipse {
                    center,
                    radii,
                    rotation,
                    start_angle,
                    end_angle,
                    counterclockwise,
                } => {
                    write_arc_data(
                        &mut data,
                        center,
                        radii,
                        rotation,
                        start_angle,
                        end_angle,
                        counterclockwise,
                    );
                }
            }
        }
        data.trim_end().to_string()
    }
}

fn write_arc_data(
    data: &mut String,
    center: Vec2,
    radii: Vec2,
    rotation: f32,
    start_angle: f32,
    end_angle: f32,
    counterclockwise: bool,
) {
    use std::fmt::Write;

    // Convert the center form back to SVG's endpoint form.
    let sweep_angle = if counterclockwise {
        // Canvas semantics: counterclockwise arcs run toward smaller angles.
        let mut delta = end_angle - start_angle;
        while delta > 0.0 {
            delta -= std::f32::consts::TAU;
        }
        delta
    } else {
        let mut delta = end_angle - start_angle;
        while delta < 0.0 {
            delta += std::f32::consts::TAU;
        }
        delta
    };
    let end_point = center
        + Vec2::from_angle(rotation).rotate(Vec2::new(
            radii.x * end_angle.cos(),
            radii.y * end_angle.sin(),
        ));
    let large_arc = i32::from(sweep_angle.abs() > std::f32::consts::PI);
    let sweep = i32::from(sweep_angle > 0.0);
    write!(
        data,
        "A {} {} {} {} {} {} {} ",
        radii.x,
        radii.y,
        rotation.to_degrees(),
        large_arc,
        sweep,
        end_point.x,
        end_point.y
    )
    .unwrap();
}

impl PathSink for Path {
    fn move_to(&mut self, to: Vec2) {
        self.commands.push(PathCommand::MoveTo(to));
    }

    fn line_to(&mut self, to: Vec2) {
        self.commands.push(PathCommand::LineTo(to));
    }

    fn quadratic_to(&mut self, control: Vec2, to: Vec2) {
        self.commands.push(PathCommand::QuadTo { control, to });
    }

    fn cubic_to(&mut self, control1: Vec2, control2: Vec2, to: Vec2) {
        self.commands.push(PathCommand::CubicTo {
            control1,
            control2,
            to,
        });
    }

    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32, counterclockwise: bool) {
        self.commands.push(PathCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            counterclockwise,
        });
    }

    fn ellipse(
        &mut self,
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        start_angle: f32,
        end_angle: f32,
        counterclockwise: bool,
    ) {
        self.commands.push(PathCommand::Ellipse {
            center,
            radii,
            rotation,
            start_angle,
            end_angle,
            counterclockwise,
        });
    }
}
