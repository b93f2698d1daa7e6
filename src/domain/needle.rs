// Gauge needle geometry and the drawing-context port it renders through
use crate::domain::layout::TileSize;
use crate::domain::series::GaugeScale;
use serde::Serialize;
use std::f64::consts::PI;

/// Angle used when the scale has no span to sweep across.
pub const DEGENERATE_ANGLE: f64 = PI * 1.5;

const PIVOT_OFFSET: f64 = 6.0;
const NEEDLE_MARGIN: f64 = 20.0;
const NEEDLE_HALF_WIDTH: f64 = 3.0;
const CAP_RADIUS: f64 = 5.0;

/// Subset of a 2D canvas context the needle overlay needs.
pub trait DrawContext {
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn set_fill_style(&mut self, color: &str);
    fn fill(&mut self);
}

/// Rotation for `value` on a half-circle arc running from π (min) to 2π (max).
pub fn needle_angle(value: f64, scale: &GaugeScale) -> f64 {
    let range = scale.range();
    if !value.is_finite() || !range.is_finite() || range <= 0.0 {
        return DEGENERATE_ANGLE;
    }
    PI + (scale.clamp(value) - scale.min()) / range * PI
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Needle {
    pub angle: f64,
    pub pivot_x: f64,
    pub pivot_y: f64,
    pub length: f64,
    pub color: String,
}

impl Needle {
    /// Needle pivoting at the bottom centre of a canvas of the given size.
    pub fn new(value: f64, scale: &GaugeScale, canvas: TileSize, color: &str) -> Self {
        Self {
            angle: needle_angle(value, scale),
            pivot_x: canvas.width / 2.0,
            pivot_y: canvas.height - PIVOT_OFFSET,
            length: (canvas.height - NEEDLE_MARGIN).max(0.0),
            color: color.to_string(),
        }
    }

    /// Post-draw overlay. Leaves the context transform as it found it.
    pub fn draw<C: DrawContext + ?Sized>(&self, ctx: &mut C) {
        ctx.translate(self.pivot_x, self.pivot_y);
        ctx.rotate(self.angle);
        ctx.begin_path();
        ctx.move_to(0.0, -NEEDLE_HALF_WIDTH);
        ctx.line_to(self.length, 0.0);
        ctx.line_to(0.0, NEEDLE_HALF_WIDTH);
        ctx.set_fill_style(&self.color);
        ctx.fill();
        ctx.rotate(-self.angle);
        ctx.translate(-self.pivot_x, -self.pivot_y);

        ctx.begin_path();
        ctx.arc(self.pivot_x, self.pivot_y, CAP_RADIUS, 0.0, PI * 2.0);
        ctx.fill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::canvas_recorder::{DrawOp, RecordingContext};

    #[test]
    fn test_angle_sweeps_half_circle() {
        let scale = GaugeScale::from_sections(&[0.0, 50.0, 100.0]);
        assert_eq!(needle_angle(0.0, &scale), PI);
        assert_eq!(needle_angle(50.0, &scale), PI * 1.5);
        assert_eq!(needle_angle(100.0, &scale), PI * 2.0);
    }

    #[test]
    fn test_angle_uses_clamped_value() {
        let scale = GaugeScale::from_sections(&[0.0, 50.0, 100.0]);
        assert_eq!(needle_angle(150.0, &scale), needle_angle(100.0, &scale));
        assert_eq!(needle_angle(-10.0, &scale), needle_angle(0.0, &scale));
    }

    #[test]
    fn test_zero_range_uses_default_angle() {
        let scale = GaugeScale::from_sections(&[40.0, 40.0]);
        assert_eq!(needle_angle(40.0, &scale), DEGENERATE_ANGLE);
        assert_eq!(needle_angle(f64::NAN, &GaugeScale::from_sections(&[0.0, 1.0])), DEGENERATE_ANGLE);
    }

    #[test]
    fn test_draw_sequence_restores_transform() {
        let scale = GaugeScale::from_sections(&[0.0, 100.0]);
        let needle = Needle::new(25.0, &scale, TileSize::new(200.0, 100.0), "#123456");
        let mut ctx = RecordingContext::new();

        needle.draw(&mut ctx);

        let angle = PI * 1.25;
        assert_eq!(
            ctx.ops(),
            &[
                DrawOp::Translate(100.0, 94.0),
                DrawOp::Rotate(angle),
                DrawOp::BeginPath,
                DrawOp::MoveTo(0.0, -3.0),
                DrawOp::LineTo(80.0, 0.0),
                DrawOp::LineTo(0.0, 3.0),
                DrawOp::FillStyle("#123456".to_string()),
                DrawOp::Fill,
                DrawOp::Rotate(-angle),
                DrawOp::Translate(-100.0, -94.0),
                DrawOp::BeginPath,
                DrawOp::Arc(100.0, 94.0, 5.0, 0.0, PI * 2.0),
                DrawOp::Fill,
            ]
        );
        assert!(ctx.transform_is_identity());
    }

    #[test]
    fn test_tiny_canvas_has_no_negative_length() {
        let scale = GaugeScale::from_sections(&[0.0, 100.0]);
        let needle = Needle::new(25.0, &scale, TileSize::new(10.0, 5.0), "#000");
        assert_eq!(needle.length, 0.0);
    }
}
