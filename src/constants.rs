//! Shared application-wide constants.
//! Centralizes tweakable values used across the viewport, editor and rendering.

// Zoom
/// Smallest allowed zoom factor (world units per device pixel).
pub const ZOOM_MIN: f32 = 1.0;
/// Largest allowed zoom factor.
pub const ZOOM_MAX: f32 = 5.0;
/// Zoom change applied per wheel notch.
pub const ZOOM_STEP: f32 = 0.1;

// Hit testing
/// Base hover radius in world units at zoom 1.0. Multiplied by the current zoom
/// so the on-screen tolerance stays constant.
pub const HOVER_RADIUS: f32 = 10.0;

// Point drawing (world units, shrinks on screen as zoom grows)
/// Diameter of a point's body.
pub const POINT_SIZE: f32 = 18.0;
/// Outline ring radius as a fraction of the point radius.
pub const POINT_OUTLINE_RATIO: f32 = 0.6;
/// Filled emphasis radius as a fraction of the point radius.
pub const POINT_FILL_RATIO: f32 = 0.4;
/// Stroke width of the selection outline ring.
pub const POINT_OUTLINE_WIDTH: f32 = 2.0;

// Segment drawing
/// Stroke width of a segment.
pub const SEGMENT_WIDTH: f32 = 2.0;
/// Dash and gap length of the in-progress segment preview.
pub const SEGMENT_DASH: f32 = 3.0;

// Persistence
/// Key under which the app state is stored by eframe.
pub const STORAGE_KEY: &str = "graph_editor_state";
