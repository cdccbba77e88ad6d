//! # Graph Editor
//!
//! A direct-manipulation editor for planar graphs of points and segments on a
//! pannable, zoomable 2D canvas.
//!
//! ## Interaction
//! - Click empty space to create a point; it becomes the selection
//! - Click a point while another is selected to connect the two
//! - Drag a point to move it
//! - Right-click to deselect, or to delete the hovered point when nothing is selected
//! - Hold Cmd/Ctrl and drag to pan, scroll to zoom
//!
//! The interaction core ([`CoordinateSpace`] and [`GraphEditor`]) is independent
//! of egui's event loop: hosts feed it [`InputEvent`]s and render through a
//! [`Surface`].

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
mod editor;
mod events;
mod geometry;
mod surface;
mod types;
mod ui;
mod viewport;

pub use editor::{EditState, GraphEditor};
pub use events::{EventOutcome, InputEvent, Key, PointerButton};
pub use geometry::{distance, nearest_point};
pub use surface::{PointStyle, SegmentStyle, Surface};
pub use types::*;
pub use ui::{GraphEditorApp, PainterSurface, PersistedState};
pub use viewport::{CoordinateSpace, PanDrag, RenderTransform, ViewState};

/// Runs the graph editor application with default settings.
///
/// This function initializes the egui application window and starts the main event loop.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use graph_editor::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Graph Editor",
        options,
        Box::new(|cc| Ok(Box::new(GraphEditorApp::new(cc)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui;

    #[test]
    fn test_graph_default() {
        let graph = Graph::default();
        assert!(graph.points().is_empty());
        assert!(graph.segments().is_empty());
    }

    #[test]
    fn test_editor_starts_idle_and_disabled() {
        let editor = GraphEditor::new(Graph::new());
        assert_eq!(editor.state(), EditState::Idle);
        assert!(!editor.is_enabled());
        assert_eq!(editor.hovered(), None);
    }

    #[test]
    fn test_clicks_through_public_api() {
        let mut viewport =
            CoordinateSpace::with_view(egui::vec2(100.0, 100.0), 1.0, Some(egui::Vec2::ZERO));
        let mut editor = GraphEditor::new(Graph::new());
        editor.enable();

        for pos in [egui::pos2(0.0, 0.0), egui::pos2(100.0, 50.0)] {
            for event in [
                InputEvent::PointerMove { pos },
                InputEvent::PointerDown {
                    pos,
                    button: PointerButton::Primary,
                },
                InputEvent::PointerUp {
                    pos,
                    button: PointerButton::Primary,
                },
            ] {
                viewport.handle_event(&event);
                editor.handle_event(&event, &viewport);
            }
        }

        let points = editor.graph().points();
        assert_eq!(points[0].position, (-50.0, -50.0));
        assert_eq!(points[1].position, (50.0, 0.0));
        assert_eq!(
            editor.graph().segments(),
            &[Segment::new(points[0].id, points[1].id)]
        );
    }
}
