//! User interface for the graph editor.
//!
//! This module contains the eframe application, the canvas input translation,
//! and the egui-backed renderer.
//!
//! # Module Organization
//!
//! - `state` - The `GraphEditorApp` struct and its persistence
//! - `canvas` - Input translation, event dispatch, and canvas painting
//! - `rendering` - Drawing points and segments with an egui painter

mod canvas;
mod rendering;
mod state;


pub use rendering::PainterSurface;
pub use state::{GraphEditorApp, PersistedState};

use eframe::egui;

impl eframe::App for GraphEditorApp {
    /// Persist the graph and view between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => {
                storage.set_string(crate::constants::STORAGE_KEY, json);
            }
            Err(err) => {
                log::error!("Failed to serialize app state: {err}");
            }
        }
    }

    /// Lays out the toolbar and the canvas for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_canvas(ui);
            });
    }
}

impl GraphEditorApp {
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut editing = self.editor.is_enabled();
            if ui.checkbox(&mut editing, "Edit").changed() {
                self.set_editing_enabled(editing);
            }
            if ui.button("Clear").clicked() {
                self.clear_graph();
            }

            ui.separator();

            let graph = self.editor.graph();
            ui.label(format!(
                "{} points, {} segments",
                graph.points().len(),
                graph.segments().len()
            ));
            ui.separator();
            ui.label(format!("Zoom: {:.1}", self.viewport.zoom()));
        });
    }
}
