//! Canvas rendering for points and segments.
//!
//! [`PainterSurface`] implements [`Surface`] on top of an egui painter, mapping
//! world positions through the viewport's [`RenderTransform`].

use crate::constants::{
    POINT_FILL_RATIO, POINT_OUTLINE_RATIO, POINT_OUTLINE_WIDTH, POINT_SIZE, SEGMENT_DASH,
    SEGMENT_WIDTH,
};
use crate::surface::{PointStyle, SegmentStyle, Surface};
use crate::viewport::RenderTransform;
use eframe::egui;

/// Canvas background.
pub const BACKGROUND_COLOR: egui::Color32 = egui::Color32::from_rgb(34, 170, 85);
/// Body color of points and segments.
const INK_COLOR: egui::Color32 = egui::Color32::BLACK;
/// Hover/selection emphasis.
const HIGHLIGHT_COLOR: egui::Color32 = egui::Color32::YELLOW;

/// A [`Surface`] drawing into an egui painter.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Vec2,
    transform: RenderTransform,
}

impl<'a> PainterSurface<'a> {
    /// Creates a surface for a canvas whose top-left corner is at `canvas_rect.min`.
    pub fn new(
        painter: &'a egui::Painter,
        canvas_rect: egui::Rect,
        transform: RenderTransform,
    ) -> Self {
        Self {
            painter,
            origin: canvas_rect.min.to_vec2(),
            transform,
        }
    }

    fn to_screen(&self, world: egui::Pos2) -> egui::Pos2 {
        self.transform.to_device(world) + self.origin
    }

    /// World lengths shrink on screen as the zoom grows.
    fn scaled(&self, length: f32) -> f32 {
        length * self.transform.inverse_scale
    }
}

impl Surface for PainterSurface<'_> {
    fn draw_point(&mut self, position: egui::Pos2, style: PointStyle) {
        let center = self.to_screen(position);
        let radius = self.scaled(POINT_SIZE / 2.0);
        self.painter.circle_filled(center, radius, INK_COLOR);
        if style.outline {
            self.painter.circle_stroke(
                center,
                radius * POINT_OUTLINE_RATIO,
                egui::Stroke::new(self.scaled(POINT_OUTLINE_WIDTH), HIGHLIGHT_COLOR),
            );
        }
        if style.fill {
            self.painter
                .circle_filled(center, radius * POINT_FILL_RATIO, HIGHLIGHT_COLOR);
        }
    }

    fn draw_segment(&mut self, from: egui::Pos2, to: egui::Pos2, style: SegmentStyle) {
        let points = [self.to_screen(from), self.to_screen(to)];
        let stroke = egui::Stroke::new(self.scaled(SEGMENT_WIDTH), INK_COLOR);
        if style.dashed {
            let dash = self.scaled(SEGMENT_DASH);
            self.painter
                .extend(egui::Shape::dashed_line(&points, stroke, dash, dash));
        } else {
            self.painter.line_segment(points, stroke);
        }
    }
}
