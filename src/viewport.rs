//! Canvas navigation: pan, zoom, and device/world coordinate mapping.
//!
//! World coordinates are derived from device coordinates as
//! `(device - center) * zoom - offset`, optionally also subtracting the offset
//! proposed by an in-progress pan gesture. The renderer applies the inverse
//! (see [`RenderTransform`]), so everything drawn in world space stays
//! independent of the current pan and zoom.

use crate::constants::{ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
use crate::events::{EventOutcome, InputEvent, Key, PointerButton};
use eframe::egui;
use serde::{Deserialize, Serialize};

/// Transient state of a pan gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanDrag {
    /// World position where the gesture started
    pub start: egui::Pos2,
    /// Latest world position of the gesture
    pub end: egui::Pos2,
    /// Offset proposed by the gesture, not yet committed
    pub offset: egui::Vec2,
    /// Whether a gesture is in progress
    pub active: bool,
}

impl Default for PanDrag {
    fn default() -> Self {
        Self {
            start: egui::Pos2::ZERO,
            end: egui::Pos2::ZERO,
            offset: egui::Vec2::ZERO,
            active: false,
        }
    }
}

/// The transform a renderer applies before drawing world content.
///
/// Applied in field order: translate to the canvas center, scale by
/// `inverse_scale`, then translate by the effective pan offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTransform {
    /// Canvas half-extent
    pub translate_to_center: egui::Vec2,
    /// `1 / zoom`
    pub inverse_scale: f32,
    /// Committed offset plus any in-progress pan offset
    pub translate_by_offset: egui::Vec2,
}

impl RenderTransform {
    /// Projects a world position onto the canvas (device space).
    pub fn to_device(&self, world: egui::Pos2) -> egui::Pos2 {
        ((world.to_vec2() + self.translate_by_offset) * self.inverse_scale
            + self.translate_to_center)
            .to_pos2()
    }

    /// Maps a device position back into world space.
    pub fn to_world(&self, device: egui::Pos2) -> egui::Pos2 {
        ((device.to_vec2() - self.translate_to_center) / self.inverse_scale
            - self.translate_by_offset)
            .to_pos2()
    }
}

/// Persisted part of the view: zoom and committed offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    /// Zoom factor
    pub zoom: f32,
    /// Committed offset; `None` means "center the canvas on first layout"
    pub offset: Option<(f32, f32)>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: ZOOM_MIN,
            offset: None,
        }
    }
}

/// Pan/zoom state of the canvas and the mapping between device and world space.
#[derive(Debug, Clone)]
pub struct CoordinateSpace {
    center: egui::Vec2,
    offset: egui::Vec2,
    zoom: f32,
    drag: PanDrag,
    modifier_active: bool,
    pan_key: Key,
}

impl CoordinateSpace {
    /// Creates a coordinate space for a canvas of the given size at zoom 1.
    pub fn new(canvas_size: egui::Vec2) -> Self {
        Self::with_view(canvas_size, ZOOM_MIN, None)
    }

    /// Creates a coordinate space with an initial zoom and offset.
    ///
    /// `zoom` is clamped into the allowed range. Without an explicit offset the
    /// committed offset starts at `-center`.
    pub fn with_view(canvas_size: egui::Vec2, zoom: f32, offset: Option<egui::Vec2>) -> Self {
        let center = canvas_size / 2.0;
        let zoom = if zoom.is_finite() {
            zoom.clamp(ZOOM_MIN, ZOOM_MAX)
        } else {
            ZOOM_MIN
        };
        Self {
            center,
            offset: offset.unwrap_or(-center),
            zoom,
            drag: PanDrag::default(),
            modifier_active: false,
            pan_key: Key::Command,
        }
    }

    /// Restores a coordinate space from persisted view state.
    pub fn from_view(canvas_size: egui::Vec2, view: &ViewState) -> Self {
        Self::with_view(
            canvas_size,
            view.zoom,
            view.offset.map(|(x, y)| egui::vec2(x, y)),
        )
    }

    /// The view state to persist. Any in-progress pan is not included.
    pub fn view_state(&self) -> ViewState {
        ViewState {
            zoom: self.zoom,
            offset: Some((self.offset.x, self.offset.y)),
        }
    }

    /// Canvas half-extent.
    pub fn center(&self) -> egui::Vec2 {
        self.center
    }

    /// Committed offset.
    pub fn offset(&self) -> egui::Vec2 {
        self.offset
    }

    /// Current zoom factor, always within `[ZOOM_MIN, ZOOM_MAX]`.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Current pan gesture state.
    pub fn drag(&self) -> &PanDrag {
        &self.drag
    }

    /// Whether a pan gesture is in progress.
    pub fn is_panning(&self) -> bool {
        self.drag.active
    }

    /// Whether the pan-enable key is held.
    pub fn modifier_active(&self) -> bool {
        self.modifier_active
    }

    /// The key that enables panning.
    pub fn pan_key(&self) -> Key {
        self.pan_key
    }

    /// Changes the key that enables panning. Releases a held modifier.
    pub fn set_pan_key(&mut self, key: Key) {
        if key != self.pan_key {
            self.pan_key = key;
            self.modifier_active = false;
        }
    }

    /// Updates the canvas size. The committed offset is left untouched.
    pub fn set_canvas_size(&mut self, canvas_size: egui::Vec2) {
        self.center = canvas_size / 2.0;
    }

    /// Maps a device position to world space.
    ///
    /// Scales by zoom first, then subtracts the committed offset. With
    /// `include_drag_offset` the in-progress pan offset is subtracted as well,
    /// which matches what is currently rendered.
    pub fn map_to_world(&self, device: egui::Pos2, include_drag_offset: bool) -> egui::Pos2 {
        let world = ((device.to_vec2() - self.center) * self.zoom - self.offset).to_pos2();
        if include_drag_offset {
            world - self.drag.offset
        } else {
            world
        }
    }

    /// Committed offset plus the offset of any in-progress pan.
    pub fn effective_offset(&self) -> egui::Vec2 {
        self.offset + self.drag.offset
    }

    /// The transform a renderer applies before drawing world content.
    pub fn render_transform(&self) -> RenderTransform {
        RenderTransform {
            translate_to_center: self.center,
            inverse_scale: 1.0 / self.zoom,
            translate_by_offset: self.effective_offset(),
        }
    }

    /// Starts a pan gesture at a device position.
    ///
    /// Only starts while the pan modifier is held and no pan is active.
    /// Returns whether a gesture was started.
    pub fn begin_pan(&mut self, device: egui::Pos2) -> bool {
        if !self.modifier_active || self.drag.active {
            return false;
        }
        self.drag.start = self.map_to_world(device, false);
        self.drag.end = self.drag.start;
        self.drag.offset = egui::Vec2::ZERO;
        self.drag.active = true;
        true
    }

    /// Updates the in-progress pan with the current device position.
    ///
    /// Positions are mapped without the drag offset so the gesture does not feed
    /// back into itself. Returns `false` when no pan is active.
    pub fn update_pan(&mut self, device: egui::Pos2) -> bool {
        if !self.drag.active {
            return false;
        }
        self.drag.end = self.map_to_world(device, false);
        self.drag.offset = self.drag.end - self.drag.start;
        true
    }

    /// Commits the in-progress pan into the offset.
    ///
    /// Returns `false` (and changes nothing) when no pan is active.
    pub fn end_pan(&mut self) -> bool {
        if !self.drag.active {
            return false;
        }
        self.offset += self.drag.offset;
        self.drag = PanDrag::default();
        log::debug!("pan committed, offset now ({}, {})", self.offset.x, self.offset.y);
        true
    }

    /// Steps the zoom in the direction of `direction`'s sign.
    ///
    /// Zero or NaN leaves the zoom unchanged. Returns the new zoom.
    pub fn zoom_by(&mut self, direction: f32) -> f32 {
        if direction == 0.0 || direction.is_nan() {
            return self.zoom;
        }
        self.zoom = (self.zoom + direction.signum() * ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX);
        log::trace!("zoom now {}", self.zoom);
        self.zoom
    }

    /// Sets whether the pan-enable key is held.
    ///
    /// Releasing the key does not end an active pan; the gesture runs until
    /// the pointer is released.
    pub fn set_modifier(&mut self, active: bool) {
        self.modifier_active = active;
    }

    /// Applies an input event to the view.
    pub fn handle_event(&mut self, event: &InputEvent) -> EventOutcome {
        let changed = match *event {
            InputEvent::KeyDown { key } if key == self.pan_key => {
                self.set_modifier(true);
                true
            }
            InputEvent::KeyUp { key } if key == self.pan_key => {
                self.set_modifier(false);
                true
            }
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Primary,
            } => self.begin_pan(pos),
            InputEvent::PointerMove { pos } => self.update_pan(pos),
            InputEvent::PointerUp { .. } => self.end_pan(),
            InputEvent::Wheel { delta_y } => {
                let before = self.zoom;
                self.zoom_by(delta_y) != before
            }
            InputEvent::FocusLost => {
                let ended = self.end_pan();
                let released = std::mem::replace(&mut self.modifier_active, false);
                ended || released
            }
            _ => false,
        };
        if changed {
            EventOutcome::Handled
        } else {
            EventOutcome::Ignored
        }
    }
}
