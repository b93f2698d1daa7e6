// Drawing context that records primitive calls instead of rasterising them
use crate::domain::needle::DrawContext;
use serde::Serialize;

const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum DrawOp {
    Translate(f64, f64),
    Rotate(f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc(f64, f64, f64, f64, f64),
    FillStyle(String),
    Fill,
}

/// Keeps the call log plus the current transform as a canvas-style
/// `[a, b, c, d, e, f]` matrix.
#[derive(Debug, Clone)]
pub struct RecordingContext {
    ops: Vec<DrawOp>,
    transform: [f64; 6],
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingContext {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            transform: IDENTITY,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn transform(&self) -> [f64; 6] {
        self.transform
    }

    pub fn transform_is_identity(&self) -> bool {
        self.transform
            .iter()
            .zip(IDENTITY.iter())
            .all(|(current, identity)| (current - identity).abs() < 1e-9)
    }

    fn multiply(&mut self, [a2, b2, c2, d2, e2, f2]: [f64; 6]) {
        let [a, b, c, d, e, f] = self.transform;
        self.transform = [
            a * a2 + c * b2,
            b * a2 + d * b2,
            a * c2 + c * d2,
            b * c2 + d * d2,
            a * e2 + c * f2 + e,
            b * e2 + d * f2 + f,
        ];
    }
}

impl DrawContext for RecordingContext {
    fn translate(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::Translate(x, y));
        self.multiply([1.0, 0.0, 0.0, 1.0, x, y]);
    }

    fn rotate(&mut self, angle: f64) {
        self.ops.push(DrawOp::Rotate(angle));
        let (sin, cos) = angle.sin_cos();
        self.multiply([cos, sin, -sin, cos, 0.0, 0.0]);
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo(x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.ops
            .push(DrawOp::Arc(x, y, radius, start_angle, end_angle));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ops.push(DrawOp::FillStyle(color.to_string()));
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill);
    }
}
