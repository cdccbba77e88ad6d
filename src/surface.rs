//! Drawing seam between world-space content and a concrete renderer.
//!
//! Everything the graph and the editor draw goes through [`Surface`] in world
//! coordinates; the implementation applies the view transform.

use eframe::egui;

/// How a point is emphasized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointStyle {
    /// Ring drawn around the point (selection)
    pub outline: bool,
    /// Inner dot drawn inside the point (hover)
    pub fill: bool,
}

impl PointStyle {
    /// Style used for the hovered point.
    pub const HOVERED: Self = Self {
        outline: false,
        fill: true,
    };
    /// Style used for the selected point.
    pub const SELECTED: Self = Self {
        outline: true,
        fill: false,
    };
}

/// How a segment is stroked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentStyle {
    /// Dashed stroke, used for the segment preview
    pub dashed: bool,
}

impl SegmentStyle {
    /// Style used for the in-progress segment preview.
    pub const PREVIEW: Self = Self { dashed: true };
}

/// A render target accepting world-space drawing commands.
pub trait Surface {
    /// Draws a point at a world position.
    fn draw_point(&mut self, position: egui::Pos2, style: PointStyle);
    /// Draws a segment between two world positions.
    fn draw_segment(&mut self, from: egui::Pos2, to: egui::Pos2, style: SegmentStyle);
}

/// A recorded draw command.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawCall {
    Point(egui::Pos2, PointStyle),
    Segment(egui::Pos2, egui::Pos2, SegmentStyle),
}

/// Test surface capturing every draw call in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn draw_point(&mut self, position: egui::Pos2, style: PointStyle) {
        self.calls.push(DrawCall::Point(position, style));
    }

    fn draw_segment(&mut self, from: egui::Pos2, to: egui::Pos2, style: SegmentStyle) {
        self.calls.push(DrawCall::Segment(from, to, style));
    }
}
