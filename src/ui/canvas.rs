//! Canvas interaction and drawing.
//!
//! This module turns the frame's raw egui input into [`InputEvent`]s, feeds them
//! to the viewport and then the editor in delivery order, and paints the result.

use super::rendering::{PainterSurface, BACKGROUND_COLOR};
use super::state::GraphEditorApp;
use crate::events::{InputEvent, Key, PointerButton};
use crate::viewport::CoordinateSpace;
use eframe::egui;

impl GraphEditorApp {
    /// Draws the interactive canvas filling the available space.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        // The view's initial offset depends on the canvas size, so apply it here
        if let Some(view) = self.pending_view.take() {
            self.viewport = CoordinateSpace::from_view(canvas_rect.size(), &view);
        } else {
            self.viewport.set_canvas_size(canvas_rect.size());
        }

        for event in self.collect_input(ui, canvas_rect) {
            self.dispatch(&event);
        }

        painter.rect_filled(canvas_rect, 0.0, BACKGROUND_COLOR);
        let transform = self.viewport.render_transform();
        let mut surface = PainterSurface::new(&painter, canvas_rect, transform);
        self.editor.display(&mut surface);
    }

    /// Delivers one event to the viewport, then to the editor.
    pub fn dispatch(&mut self, event: &InputEvent) {
        self.viewport.handle_event(event);
        self.editor.handle_event(event, &self.viewport);
    }

    /// Translates this frame's egui input into canvas events.
    ///
    /// Pointer presses outside the canvas are dropped; moves and releases are
    /// always forwarded so gestures that leave the canvas still finish.
    fn collect_input(&mut self, ui: &egui::Ui, canvas_rect: egui::Rect) -> Vec<InputEvent> {
        let key = self.viewport.pan_key();
        let (raw_events, held, scroll_y) = ui.input(|i| {
            (
                i.events.clone(),
                modifier_held(key, i.modifiers),
                i.raw_scroll_delta.y,
            )
        });
        let origin = canvas_rect.min.to_vec2();
        let mut events = Vec::new();

        if held != self.pan_modifier_down {
            self.pan_modifier_down = held;
            events.push(if held {
                InputEvent::KeyDown { key }
            } else {
                InputEvent::KeyUp { key }
            });
        }

        for event in raw_events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    events.push(InputEvent::PointerMove { pos: pos - origin });
                }
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    let Some(button) = map_button(button) else {
                        continue;
                    };
                    let pos = pos - origin;
                    if !pressed {
                        events.push(InputEvent::PointerUp { pos, button });
                    } else if canvas_rect.contains(pos + origin) {
                        events.push(InputEvent::PointerDown { pos, button });
                        if button == PointerButton::Secondary {
                            events.push(InputEvent::ContextMenu);
                        }
                    }
                }
                egui::Event::WindowFocused(false) => events.push(InputEvent::FocusLost),
                _ => {}
            }
        }

        // egui reports positive y when scrolling up; the editor expects browser-style deltas
        if scroll_y != 0.0 && ui.rect_contains_pointer(canvas_rect) {
            events.push(InputEvent::Wheel { delta_y: -scroll_y });
        }

        events
    }
}

/// Whether the egui modifier state holds `key` down.
fn modifier_held(key: Key, modifiers: egui::Modifiers) -> bool {
    match key {
        Key::Command => modifiers.command,
        Key::Shift => modifiers.shift,
        Key::Alt => modifiers.alt,
    }
}

fn map_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}
