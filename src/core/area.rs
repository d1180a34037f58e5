use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::aggregation::AggregatedPoint;
use crate::core::scale::{LinearScale, PowScale};

/// Curve used to connect consecutive area vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Straight segments through every vertex.
    Linear,
    /// Uniform cubic B-spline; smooth, passes through the end points only.
    #[default]
    Basis,
}

/// One area sample in band pixel space: `y1` is the silhouette edge, `y0`
/// the baseline it is filled against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaVertex {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

impl AreaVertex {
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            x: mix(self.x, other.x),
            y0: mix(self.y0, other.y0),
            y1: mix(self.y1, other.y1),
        }
    }
}

/// Path command in band pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    Close,
}

impl PathCommand {
    #[must_use]
    pub fn is_finite(self) -> bool {
        match self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } => x.is_finite() && y.is_finite(),
            Self::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => [x1, y1, x2, y2, x, y].iter().all(|value| value.is_finite()),
            Self::Close => true,
        }
    }
}

/// Projects aggregated points into band space.
///
/// `baseline` is `height * bands`; `size` scales the silhouette height and is
/// `0` for the collapsed baseline shape and `1` for the full band shape.
/// Non-finite values are drawn as zero.
#[must_use]
pub fn project_area_vertices<S>(
    points: &[AggregatedPoint<S>],
    x_scale: LinearScale,
    y_scale: PowScale,
    baseline: f64,
    size: f64,
) -> Vec<AreaVertex> {
    points
        .iter()
        .map(|point| {
            let y = if point.y.is_finite() { point.y } else { 0.0 };
            AreaVertex {
                x: x_scale.apply(point.x),
                y0: baseline,
                y1: baseline - y_scale.apply(y) * size,
            }
        })
        .collect()
}

/// Builds a closed area outline: the `y1` edge forward, then the `y0` edge
/// backward, both traced with `curve`.
#[must_use]
pub fn area_path(vertices: &[AreaVertex], curve: CurveKind) -> Vec<PathCommand> {
    if vertices.is_empty() {
        return Vec::new();
    }

    let mut writer = CurveWriter::new(curve, vertices.len() * 2 + 4);
    writer.line_start();
    for vertex in vertices {
        writer.point(vertex.x, vertex.y1);
    }
    writer.line_end();
    writer.line_start();
    for vertex in vertices.iter().rev() {
        writer.point(vertex.x, vertex.y0);
    }
    writer.line_end();
    writer.commands
}

/// Serializes commands as SVG path data.
#[must_use]
pub fn svg_path_data(commands: &[PathCommand]) -> String {
    let mut out = String::with_capacity(commands.len() * 16);
    for command in commands {
        let _ = match *command {
            PathCommand::MoveTo { x, y } => write!(out, "M{x},{y}"),
            PathCommand::LineTo { x, y } => write!(out, "L{x},{y}"),
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => write!(out, "C{x1},{y1},{x2},{y2},{x},{y}"),
            PathCommand::Close => write!(out, "Z"),
        };
    }
    out
}

/// Area curve state machine. The first traced line opens the path, the
/// second continues it and closes it.
struct CurveWriter {
    curve: CurveKind,
    commands: Vec<PathCommand>,
    closing_line: bool,
    point: u8,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl CurveWriter {
    fn new(curve: CurveKind, capacity: usize) -> Self {
        Self {
            curve,
            commands: Vec::with_capacity(capacity),
            closing_line: false,
            point: 0,
            x0: f64::NAN,
            y0: f64::NAN,
            x1: f64::NAN,
            y1: f64::NAN,
        }
    }

    fn line_start(&mut self) {
        self.point = 0;
        self.x0 = f64::NAN;
        self.y0 = f64::NAN;
        self.x1 = f64::NAN;
        self.y1 = f64::NAN;
    }

    fn line_end(&mut self) {
        if self.curve == CurveKind::Basis {
            match self.point {
                3 => {
                    self.basis_segment(self.x1, self.y1);
                    self.line_to(self.x1, self.y1);
                }
                2 => self.line_to(self.x1, self.y1),
                _ => {}
            }
        }
        if self.closing_line {
            self.commands.push(PathCommand::Close);
        }
        self.closing_line = !self.closing_line;
    }

    fn point(&mut self, x: f64, y: f64) {
        match self.curve {
            CurveKind::Linear => {
                if self.point == 0 {
                    self.point = 1;
                    self.open_or_continue(x, y);
                } else {
                    self.point = 2;
                    self.line_to(x, y);
                }
            }
            CurveKind::Basis => match self.point {
                0 => {
                    self.point = 1;
                    self.open_or_continue(x, y);
                }
                1 => self.point = 2,
                2 => {
                    self.point = 3;
                    self.line_to(
                        (5.0 * self.x0 + self.x1) / 6.0,
                        (5.0 * self.y0 + self.y1) / 6.0,
                    );
                    self.basis_segment(x, y);
                }
                _ => self.basis_segment(x, y),
            },
        }
        self.x0 = self.x1;
        self.x1 = x;
        self.y0 = self.y1;
        self.y1 = y;
    }

    fn open_or_continue(&mut self, x: f64, y: f64) {
        if self.closing_line {
            self.line_to(x, y);
        } else {
            self.commands.push(PathCommand::MoveTo { x, y });
        }
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    fn basis_segment(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::CubicTo {
            x1: (2.0 * self.x0 + self.x1) / 3.0,
            y1: (2.0 * self.y0 + self.y1) / 3.0,
            x2: (self.x0 + 2.0 * self.x1) / 3.0,
            y2: (self.y0 + 2.0 * self.y1) / 3.0,
            x: (self.x0 + 4.0 * self.x1 + x) / 6.0,
            y: (self.y0 + 4.0 * self.y1 + y) / 6.0,
        });
    }
}
