//! Input events understood by the viewport and the editor.
//!
//! Hosts translate their native input into these variants and hand each one,
//! in delivery order, to [`crate::CoordinateSpace::handle_event`] and then
//! [`crate::GraphEditor::handle_event`]. Positions are device coordinates
//! relative to the canvas' top-left corner.

use eframe::egui;
use serde::{Deserialize, Serialize};

/// Mouse button discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button
    Primary,
    /// Right button
    Secondary,
    /// Wheel button
    Middle,
}

/// Keys the editor cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Cmd on macOS, Ctrl elsewhere
    Command,
    /// Shift
    Shift,
    /// Alt / Option
    Alt,
}

/// A single input event delivered to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A mouse button was pressed
    PointerDown {
        /// Device position
        pos: egui::Pos2,
        /// Which button
        button: PointerButton,
    },
    /// The pointer moved
    PointerMove {
        /// Device position
        pos: egui::Pos2,
    },
    /// A mouse button was released
    PointerUp {
        /// Device position
        pos: egui::Pos2,
        /// Which button
        button: PointerButton,
    },
    /// Vertical wheel scroll; positive values scroll down, browser style
    Wheel {
        /// Scroll amount, only the sign is used
        delta_y: f32,
    },
    /// A key was pressed
    KeyDown {
        /// Which key
        key: Key,
    },
    /// A key was released
    KeyUp {
        /// Which key
        key: Key,
    },
    /// The platform is about to open its native context menu
    ContextMenu,
    /// The canvas lost keyboard/pointer focus
    FocusLost,
}

/// What a handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event did not apply in the current state
    Ignored,
    /// The event changed state
    Handled,
    /// The host must not run its default action for the event
    Suppressed,
}

impl EventOutcome {
    /// Whether the event had any effect.
    pub fn is_ignored(self) -> bool {
        self == EventOutcome::Ignored
    }
}
