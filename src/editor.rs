//! Point/segment editing driven by pointer input.
//!
//! [`GraphEditor`] turns pointer events into graph edits and keeps the
//! hover/selection/drag state that drives on-canvas feedback:
//!
//! - primary click on empty space creates a point and selects it
//! - primary press on a point selects it and starts dragging it
//! - selecting a point while another is selected connects the two
//! - secondary click deselects, or deletes the hovered point when nothing is
//!   selected

use crate::constants::HOVER_RADIUS;
use crate::events::{EventOutcome, InputEvent, PointerButton};
use crate::geometry::nearest_point;
use crate::surface::{PointStyle, SegmentStyle, Surface};
use crate::types::{Graph, PointId, Segment};
use crate::viewport::CoordinateSpace;
use eframe::egui;

/// Selection and drag state of the editor.
///
/// Dragging always implies a selection, so the two cannot disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditState {
    /// Nothing selected
    #[default]
    Idle,
    /// A point is selected
    Selected(PointId),
    /// A point is selected and follows the pointer
    Dragging(PointId),
}

impl EditState {
    /// The selected point, dragged or not.
    pub fn selected(&self) -> Option<PointId> {
        match *self {
            EditState::Idle => None,
            EditState::Selected(id) | EditState::Dragging(id) => Some(id),
        }
    }

    /// Whether a point is being dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self, EditState::Dragging(_))
    }
}

/// Interactive editor for a [`Graph`].
#[derive(Debug)]
pub struct GraphEditor {
    graph: Graph,
    state: EditState,
    hovered: Option<PointId>,
    mouse: Option<egui::Pos2>,
    enabled: bool,
}

impl GraphEditor {
    /// Creates a disabled editor for `graph`.
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            state: EditState::Idle,
            hovered: None,
            mouse: None,
            enabled: false,
        }
    }

    /// The graph being edited.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Current selection/drag state.
    pub fn state(&self) -> EditState {
        self.state
    }

    /// The selected point, if any.
    pub fn selected(&self) -> Option<PointId> {
        self.state.selected()
    }

    /// The point under the pointer, if any.
    pub fn hovered(&self) -> Option<PointId> {
        self.hovered
    }

    /// Whether the selected point follows the pointer.
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Last pointer position in world space.
    pub fn mouse(&self) -> Option<egui::Pos2> {
        self.mouse
    }

    /// Whether the editor currently reacts to input.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Starts reacting to input.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stops reacting to input and clears hover and selection.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.state = EditState::Idle;
        self.hovered = None;
    }

    /// Releases the graph's content. The editor cannot be used afterwards.
    pub fn dispose(mut self) {
        self.graph.dispose();
        self.state = EditState::Idle;
        self.hovered = None;
        self.mouse = None;
        log::debug!("graph editor disposed");
    }

    /// Applies an input event. Must be called after the viewport has seen the
    /// same event so world positions reflect any pan in progress.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        viewport: &CoordinateSpace,
    ) -> EventOutcome {
        if !self.enabled {
            return EventOutcome::Ignored;
        }
        match *event {
            InputEvent::PointerMove { pos } => {
                self.pointer_moved(pos, viewport);
                EventOutcome::Handled
            }
            InputEvent::PointerDown { pos, button } => {
                self.track_pointer(pos, viewport);
                match button {
                    PointerButton::Primary => self.primary_down(viewport.modifier_active()),
                    PointerButton::Secondary => self.secondary_down(),
                    PointerButton::Middle => EventOutcome::Ignored,
                }
            }
            InputEvent::PointerUp { .. } | InputEvent::FocusLost => self.end_drag(),
            InputEvent::ContextMenu => EventOutcome::Suppressed,
            InputEvent::Wheel { .. } | InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } => {
                EventOutcome::Ignored
            }
        }
    }

    /// Selects a point, first connecting it to the previously selected one.
    ///
    /// The graph decides whether the connection is accepted. Selecting a point
    /// that is not in the graph does nothing. Returns whether the selection was
    /// applied.
    pub fn select(&mut self, point: PointId) -> bool {
        if !self.graph.contains_point(point) {
            return false;
        }
        if let Some(previous) = self.state.selected() {
            if previous != point {
                self.graph.try_add_segment(Segment::new(previous, point));
            }
        }
        self.state = EditState::Selected(point);
        true
    }

    /// Deletes a point with its segments and drops every reference to it.
    ///
    /// Returns `false` if the point was no longer in the graph.
    pub fn remove_point(&mut self, point: PointId) -> bool {
        let removed = self.graph.remove_point(point);
        if removed || self.hovered == Some(point) {
            self.hovered = None;
        }
        if self.state.selected() == Some(point) {
            self.state = EditState::Idle;
        }
        removed
    }

    /// Draws the graph followed by hover, preview and selection feedback.
    pub fn display(&self, surface: &mut dyn Surface) {
        self.graph.draw(surface);

        let hovered = self.hovered.and_then(|id| self.graph.point(id)).map(|p| p.pos());
        if let Some(pos) = hovered {
            surface.draw_point(pos, PointStyle::HOVERED);
        }

        if let Some(selected) = self.selected().and_then(|id| self.graph.point(id)) {
            if let Some(intent) = hovered.or(self.mouse) {
                surface.draw_segment(selected.pos(), intent, SegmentStyle::PREVIEW);
            }
            surface.draw_point(selected.pos(), PointStyle::SELECTED);
        }
    }

    fn track_pointer(&mut self, device: egui::Pos2, viewport: &CoordinateSpace) -> egui::Pos2 {
        let mouse = viewport.map_to_world(device, true);
        self.mouse = Some(mouse);
        self.hovered = nearest_point(mouse, self.graph.points(), HOVER_RADIUS * viewport.zoom());
        mouse
    }

    fn pointer_moved(&mut self, device: egui::Pos2, viewport: &CoordinateSpace) {
        let mouse = self.track_pointer(device, viewport);
        if let EditState::Dragging(id) = self.state {
            self.graph.move_point(id, mouse);
        }
    }

    fn primary_down(&mut self, modifier_active: bool) -> EventOutcome {
        if let Some(hovered) = self.hovered {
            if self.select(hovered) {
                self.state = EditState::Dragging(hovered);
                return EventOutcome::Handled;
            }
            return EventOutcome::Ignored;
        }
        if modifier_active {
            return EventOutcome::Ignored;
        }
        let Some(mouse) = self.mouse else {
            return EventOutcome::Ignored;
        };
        let id = self.graph.add_point(mouse);
        self.select(id);
        self.hovered = Some(id);
        EventOutcome::Handled
    }

    fn secondary_down(&mut self) -> EventOutcome {
        if self.state.selected().is_some() {
            self.state = EditState::Idle;
            return EventOutcome::Handled;
        }
        if let Some(hovered) = self.hovered {
            if self.remove_point(hovered) {
                return EventOutcome::Handled;
            }
        }
        EventOutcome::Ignored
    }

    fn end_drag(&mut self) -> EventOutcome {
        match self.state {
            EditState::Dragging(id) => {
                self.state = EditState::Selected(id);
                EventOutcome::Handled
            }
            _ => EventOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Key;
    use crate::surface::{DrawCall, RecordingSurface};

    fn viewport_100() -> CoordinateSpace {
        CoordinateSpace::with_view(egui::vec2(100.0, 100.0), 1.0, Some(egui::Vec2::ZERO))
    }

    fn enabled_editor() -> GraphEditor {
        let mut editor = GraphEditor::new(Graph::new());
        editor.enable();
        editor
    }

    /// Feeds an event to the viewport and then the editor, like a host would.
    fn send(
        editor: &mut GraphEditor,
        viewport: &mut CoordinateSpace,
        event: InputEvent,
    ) -> EventOutcome {
        viewport.handle_event(&event);
        editor.handle_event(&event, viewport)
    }

    fn move_to(editor: &mut GraphEditor, viewport: &mut CoordinateSpace, x: f32, y: f32) {
        send(editor, viewport, InputEvent::PointerMove { pos: egui::pos2(x, y) });
    }

    fn press(
        editor: &mut GraphEditor,
        viewport: &mut CoordinateSpace,
        x: f32,
        y: f32,
        button: PointerButton,
    ) -> EventOutcome {
        let pos = egui::pos2(x, y);
        send(editor, viewport, InputEvent::PointerDown { pos, button })
    }

    fn release(editor: &mut GraphEditor, viewport: &mut CoordinateSpace, x: f32, y: f32) {
        send(
            editor,
            viewport,
            InputEvent::PointerUp {
                pos: egui::pos2(x, y),
                button: PointerButton::Primary,
            },
        );
    }

    fn click(
        editor: &mut GraphEditor,
        viewport: &mut CoordinateSpace,
        x: f32,
        y: f32,
        button: PointerButton,
    ) {
        move_to(editor, viewport, x, y);
        press(editor, viewport, x, y, button);
        release(editor, viewport, x, y);
    }

    fn position(editor: &GraphEditor, id: PointId) -> (f32, f32) {
        editor.graph().point(id).expect("point exists").position
    }

    #[test]
    fn test_click_creates_points_and_connects_them() {
        let mut viewport = viewport_100();
        let mut editor = enabled_editor();

        click(&mut editor, &mut viewport, 0.0, 0.0, PointerButton::Primary);
        let first = editor.selected().expect("first point selected");
        assert_eq!(position(&editor, first), (-50.0, -50.0));
        assert_eq!(editor.hovered(), Some(first));

        click(&mut editor, &mut viewport, 100.0, 50.0, PointerButton::Primary);
        let second = editor.selected().expect("second point selected");
        assert_ne!(first, second);
        assert_eq!(position(&editor, second), (50.0, 0.0));
        assert_eq!(editor.graph().segments(), &[Segment::new(first, second)]);
    }

    #[test]
    fn test_press_without_prior_move_uses_press_position() {
        let mut viewport = viewport_100();
        let mut editor = enabled_editor();

        press(&mut editor, &mut viewport, 70.0, 20.0, PointerButton::Primary);

        let id = editor.selected().expect("point created");
        assert_eq!(position(&editor, id), (20.0, -30.0));
    }

    #[test]
    fn test_reselecting_same_point_adds_no_segment() {
        let mut viewport = viewport_100();
        let mut editor = enabled_editor();

        click(&mut editor, &mut viewport, 10.0, 10.0, PointerButton::Primary);
        let id = editor.selected().expect("selected");
        click(&mut editor, &mut viewport, 12.0, 10.0, PointerButton::Primary);

        assert_eq!(editor.selected(), Some(id));
        assert_eq!(editor.graph().points().len(), 1);
        assert!(editor.graph().segments().is_empty());
    }

    #[test]
    fn test_selecting_existing_points_connects_once() {
        let mut graph = Graph::new();
        let a = graph.add_point(egui::pos2(0.0, 0.0));
        let b = graph.add_point(egui::pos2(30.0, 0.0));
        let mut editor = GraphEditor::new(graph);

        assert!(editor.select(a));
        assert!(editor.graph().segments().is_empty());
        assert!(editor.select(b));
        assert_eq!(editor.graph().segments(), &[Segment::new(a, b)]);

        // Going back the other way is the same unordered pair and gets rejected.
        assert!(editor.select(a));
        assert_eq!(editor.graph().segments().len(), 1);
        assert_eq!(editor.selected(), Some(a));
    }

    #[test]
    fn test_select_missing_point_is_noop() {
        let mut graph = Graph::new();
        let a = graph.add_point(egui::pos2(0.0, 0.0));
        let mut editor = GraphEditor::new(graph);
        editor.select(a);

        assert!(!editor.select(uuid::Uuid::new_v4()));
        assert_eq!(editor.selected(), Some(a));
        assert!(editor.graph().segments().is_empty());
    }

    #[test]
    fn test_drag_moves_point_without_creating_anything() {
        let mut viewport = viewport_100();
        let mut editor = enabled_editor();
        click(&mut editor, &mut viewport, 50.0, 50.0, PointerButton::Primary);
        let id = editor.selected().expect("selected");

        move_to(&mut editor, &mut viewport, 52.0, 51.0);
        press(&mut editor, &mut viewport, 52.0, 51.0, PointerButton::Primary);
        assert_eq!(editor.state(), EditState::Dragging(id));

        for (x, y) in [(60.0, 55.0), (75.0, 80.0), (90.0, 20.0)] {
            move_to(&mut editor, &mut viewport, x, y);
            assert_eq!(position(&editor, id), (x - 50.0, y - 50.0));
            assert_eq!(editor.graph().points().len(), 1);
            assert!(editor.graph().segments().is_empty());
        }

        release(&mut editor, &mut viewport, 90.0, 20.0);
        assert_eq!(editor.state(), EditState::Selected(id));
        move_to(&mut editor, &mut viewport, 10.0, 10.0);
        assert_eq!(position(&editor, id), (40.0, -30.0));
    }

    #[test]
    fn test_pointer_up_of_any_button_ends_drag() {
        let mut viewport = viewport_100();
        let mut editor = enabled_editor();
        click(&mut editor, &mut viewport, 50.0, 50.0, PointerButton::Primary);
        press(&mut editor, &mut viewport, 50.0, 50.0, PointerButton::Primary);

        send(
            &mut editor,
            &mut viewport,
            InputEvent::PointerUp {
                pos: egui::pos2(50.0, 50.0),
                button: PointerButton::Middle,
            },
        );

        assert!(!editor.is_dragging());
        assert!(editor.selected().is_some());
    }

    #[test]
    fn test_secondary_click_deselects_before_deleting() {
        let mut viewport = viewport_100();
        let mut editor = enabled_editor();
        click(&mut editor, &mut viewport, 50.0, 50.0, PointerButton::Primary);
        let id = editor.selected().expect("selected");

        // Hovering the selected point: first right-click only deselects.
        click(&mut editor, &mut viewport, 50.0, 50.0, PointerButton::Secondary);
        assert_eq!(editor.state(), EditState::Idle);
        assert!(editor.graph().contains_point(id));

        // Second right-click deletes the hovered point.
        click(&mut editor, &mut viewport, 50.0, 50.0, PointerButton::Secondary);
        assert!(!editor.graph().contains_point(id));
        assert_eq!(editor.hovered(), None);
    }

    #[test]
    fn test_secondary_click_on_unselected_point_deletes_it() {
        let mut graph = Graph::new();
        let keep = graph.add_point(egui::pos2(-40.0, -40.0));
        let doomed = graph.add_point(egui::pos2(30.0, 30.0));
        graph.try_add_segment(Segment::new(keep, doomed));
        let mut editor = GraphEditor::new(graph);
        editor.enable();
        let mut viewport = viewport_100();

        move_to(&mut editor, &mut viewport, 80.0, 80.0);
        assert_eq!(editor.hovered(), Some(doomed));
        let outcome = press(&mut editor, &mut viewport, 80.0, 80.0, PointerButton::Secondary);
        assert_eq!(outcome, EventOutcome::Handled);

        assert!(!editor.graph().contains_point(doomed));
        assert!(editor.graph().segments().is_empty());
        assert_eq!(editor.hovered(), None);
        assert!(editor.graph().contains_point(keep));
    }

    #[test]
    fn test_secondary_click_away_from_points_is_ignored() {
        let mut graph = Graph::new();
        let id = graph.add_point(egui::pos2(30.0, 30.0));
        let mut editor = GraphEditor::new(graph);
        editor.enable();
        let mut viewport = viewport_100();

        move_to(&mut editor, &mut viewport, 10.0, 10.0);
        assert_eq!(editor.hovered(), None);
        let outcome = press(&mut editor, &mut viewport, 10.0, 10.0, PointerButton::Secondary);
        assert_eq!(outcome, EventOutcome::Ignored);
        assert!(editor.graph().contains_point(id));
        assert_eq!(editor.state(), EditState::Idle);
    }

    #[test]
    fn test_remove_point_leaves_unrelated_selection() {
        let mut graph = Graph::new();
        let keep = graph.add_point(egui::pos2(0.0, 0.0));
        let doomed = graph.add_point(egui::pos2(30.0, 30.0));
        let mut editor = GraphEditor::new(graph);
        editor.select(keep);

        assert!(editor.remove_point(doomed));
        assert_eq!(editor.selected(), Some(keep));
        assert_eq!(editor.hovered(), None);
    }

    #[test]
    fn test_remove_point_clears_references() {
        let mut viewport = viewport_100();
        let mut editor = enabled_editor();
        click(&mut editor, &mut viewport, 50.0, 50.0, PointerButton::Primary);
        let id = editor.selected().expect("selected");
        press(&mut editor, &mut viewport, 50.0, 50.0, PointerButton::Primary);
        assert!(editor.is_dragging());

        assert!(editor.remove_point(id));
        assert_ne!(editor.hovered(), Some(id));
        assert_ne!(editor.selected(), Some(id));
        assert_eq!(editor.state(), EditState::Idle);

        assert!(!editor.remove_point(id));
        assert_eq!(editor.state(), EditState::Idle);
    }

    #[test]
    fn test_modifier_suppresses_point_creation_and_pans() {
        let mut viewport = viewport_100();
        let mut editor = enabled_editor();

        send(&mut editor, &mut viewport, InputEvent::KeyDown { key: Key::Command });
        move_to(&mut editor, &mut viewport, 20.0, 20.0);
        let outcome = press(&mut editor, &mut viewport, 20.0, 20.0, PointerButton::Primary);
        assert!(outcome.is_ignored());
        move_to(&mut editor, &mut viewport, 40.0, 25.0);
        // The world position under the cursor is unchanged while panning.
        assert_eq!(editor.mouse(), Some(egui::pos2(-30.0, -30.0)));
        release(&mut editor, &mut viewport, 40.0, 25.0);

        assert!(editor.graph().points().is_empty());
        assert_eq!(viewport.offset(), egui::vec2(20.0, 5.0));
    }

    #[test]
    fn test_hover_radius_scales_with_zoom() {
        let mut graph = Graph::new();
        let id = graph.add_point(egui::pos2(0.0, 0.0));
        let mut editor = GraphEditor::new(graph);
        editor.enable();
        let mut viewport = viewport_100();

        // 15 world units away: outside the radius at zoom 1.
        move_to(&mut editor, &mut viewport, 65.0, 50.0);
        assert_eq!(editor.hovered(), None);

        // At zoom 2 the radius is 20 world units; 7.5 device px = 15 world units.
        for _ in 0..10 {
            viewport.zoom_by(1.0);
        }
        move_to(&mut editor, &mut viewport, 57.5, 50.0);
        assert_eq!(editor.hovered(), Some(id));
    }

    #[test]
    fn test_disable_then_enable_starts_clean() {
        let mut viewport = viewport_100();
        let mut editor = enabled_editor();
        click(&mut editor, &mut viewport, 50.0, 50.0, PointerButton::Primary);
        assert!(editor.selected().is_some());

        editor.disable();
        let moved = InputEvent::PointerMove {
            pos: egui::pos2(50.0, 50.0),
        };
        assert!(send(&mut editor, &mut viewport, moved).is_ignored());
        editor.enable();

        assert_eq!(editor.selected(), None);
        assert_eq!(editor.hovered(), None);
        assert_eq!(editor.graph().points().len(), 1);
    }

    #[test]
    fn test_disabled_editor_ignores_clicks() {
        let mut viewport = viewport_100();
        let mut editor = GraphEditor::new(Graph::new());

        click(&mut editor, &mut viewport, 10.0, 10.0, PointerButton::Primary);

        assert!(editor.graph().points().is_empty());
    }

    #[test]
    fn test_context_menu_is_suppressed() {
        let viewport = viewport_100();
        let mut editor = enabled_editor();
        assert_eq!(
            editor.handle_event(&InputEvent::ContextMenu, &viewport),
            EventOutcome::Suppressed
        );
    }

    #[test]
    fn test_focus_lost_ends_drag() {
        let mut viewport = viewport_100();
        let mut editor = enabled_editor();
        click(&mut editor, &mut viewport, 50.0, 50.0, PointerButton::Primary);
        let id = editor.selected().expect("selected");
        press(&mut editor, &mut viewport, 50.0, 50.0, PointerButton::Primary);

        send(&mut editor, &mut viewport, InputEvent::FocusLost);
        move_to(&mut editor, &mut viewport, 90.0, 90.0);

        assert_eq!(editor.state(), EditState::Selected(id));
        assert_eq!(position(&editor, id), (0.0, 0.0));
    }

    #[test]
    fn test_display_draws_feedback_in_order() {
        let mut viewport = viewport_100();
        let mut editor = enabled_editor();
        click(&mut editor, &mut viewport, 50.0, 50.0, PointerButton::Primary);
        move_to(&mut editor, &mut viewport, 90.0, 50.0);

        let mut surface = RecordingSurface::default();
        editor.display(&mut surface);

        let origin = egui::pos2(0.0, 0.0);
        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Point(origin, PointStyle::default()),
                DrawCall::Segment(origin, egui::pos2(40.0, 0.0), SegmentStyle::PREVIEW),
                DrawCall::Point(origin, PointStyle::SELECTED),
            ]
        );
    }

    #[test]
    fn test_display_preview_snaps_to_hovered_point() {
        let mut graph = Graph::new();
        let a = graph.add_point(egui::pos2(0.0, 0.0));
        let b = graph.add_point(egui::pos2(30.0, 0.0));
        let mut editor = GraphEditor::new(graph);
        editor.enable();
        let mut viewport = viewport_100();
        editor.select(a);
        move_to(&mut editor, &mut viewport, 83.0, 52.0);
        assert_eq!(editor.hovered(), Some(b));

        let mut surface = RecordingSurface::default();
        editor.display(&mut surface);

        let b_pos = egui::pos2(30.0, 0.0);
        assert_eq!(
            &surface.calls[2..],
            &[
                DrawCall::Point(b_pos, PointStyle::HOVERED),
                DrawCall::Segment(egui::pos2(0.0, 0.0), b_pos, SegmentStyle::PREVIEW),
                DrawCall::Point(egui::pos2(0.0, 0.0), PointStyle::SELECTED),
            ]
        );
    }
}
