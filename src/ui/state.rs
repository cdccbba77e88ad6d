//! Application state management structures.
//!
//! This module contains the main application struct, which owns the viewport,
//! the graph editor, and the bits of host state needed to translate egui input
//! into editor events.

use crate::editor::GraphEditor;
use crate::events::Key;
use crate::types::{Graph, GraphError};
use crate::viewport::{CoordinateSpace, ViewState};
use eframe::egui;
use serde::{Deserialize, Serialize};

/// What gets written to eframe storage between sessions.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// The edited graph
    pub graph: Graph,
    /// Zoom and committed pan offset
    pub view: ViewState,
}

/// The main application structure containing the viewport and the editor.
///
/// Implements `eframe::App`; each frame the canvas translates egui input into
/// [`crate::InputEvent`]s, dispatches them, and paints the editor's output.
pub struct GraphEditorApp {
    /// Pan/zoom state of the canvas
    pub(crate) viewport: CoordinateSpace,
    /// Graph editor receiving canvas input
    pub(crate) editor: GraphEditor,
    /// View to apply once the canvas size is known
    pub(crate) pending_view: Option<ViewState>,
    /// Pan modifier state seen on the previous frame
    pub(crate) pan_modifier_down: bool,
}

impl Default for GraphEditorApp {
    fn default() -> Self {
        Self::from_state(PersistedState::default())
    }
}

impl GraphEditorApp {
    /// Creates the app, restoring the previous session from eframe storage.
    ///
    /// A stored state that fails to load is logged and replaced by an empty graph.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        if let Some(json) = cc
            .storage
            .and_then(|storage| storage.get_string(crate::constants::STORAGE_KEY))
        {
            match Self::from_json(&json) {
                Ok(app) => return app,
                Err(err) => log::warn!("Discarding stored graph: {err}"),
            }
        }
        Self::default()
    }

    fn from_state(state: PersistedState) -> Self {
        let mut editor = GraphEditor::new(state.graph);
        editor.enable();
        Self {
            viewport: CoordinateSpace::new(egui::Vec2::ZERO),
            editor,
            pending_view: Some(state.view),
            pan_modifier_down: false,
        }
    }

    /// Serializes the graph and view to JSON.
    pub fn to_json(&self) -> Result<String, GraphError> {
        let state = PersistedState {
            graph: self.editor.graph().clone(),
            view: self.pending_view.unwrap_or_else(|| self.viewport.view_state()),
        };
        Ok(serde_json::to_string_pretty(&state)?)
    }

    /// Restores an app from JSON produced by [`GraphEditorApp::to_json`].
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let state: PersistedState = serde_json::from_str(json)?;
        state.graph.validate()?;
        Ok(Self::from_state(state))
    }

    /// The graph editor.
    pub fn editor(&self) -> &GraphEditor {
        &self.editor
    }

    /// The canvas coordinate space.
    pub fn viewport(&self) -> &CoordinateSpace {
        &self.viewport
    }

    /// Turns canvas editing on or off. The view can still be panned and zoomed
    /// while editing is off.
    pub fn set_editing_enabled(&mut self, enabled: bool) {
        if enabled {
            self.editor.enable();
        } else {
            self.editor.disable();
        }
    }

    /// Chooses which modifier key turns primary drags into pans.
    pub fn set_pan_key(&mut self, key: Key) {
        self.viewport.set_pan_key(key);
        // The viewport released its modifier; resync on the next frame.
        self.pan_modifier_down = false;
    }

    /// Disposes the current graph and starts over with an empty one.
    pub fn clear_graph(&mut self) {
        let enabled = self.editor.is_enabled();
        let old = std::mem::replace(&mut self.editor, GraphEditor::new(Graph::new()));
        old.dispose();
        self.set_editing_enabled(enabled);
    }
}
