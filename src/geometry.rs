//! Geometric helpers used for hit testing.
//!
//! Vector arithmetic comes from egui's `Pos2`/`Vec2` operators; this module only
//! adds the queries the editor needs on top of them.

use crate::types::{Point, PointId};
use eframe::egui;

/// Euclidean distance between two positions.
pub fn distance(a: egui::Pos2, b: egui::Pos2) -> f32 {
    (a - b).length()
}

/// Finds the point closest to `target` that lies strictly within `max_distance`.
///
/// Candidates are scanned in order and only a strictly closer point replaces the
/// current best, so the earliest of several equidistant points wins.
///
/// # Returns
///
/// The id of the nearest point, or `None` if no candidate is close enough
pub fn nearest_point<'a, I>(target: egui::Pos2, candidates: I, max_distance: f32) -> Option<PointId>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut best: Option<(PointId, f32)> = None;
    for point in candidates {
        let dist = distance(point.pos(), target);
        if dist >= max_distance {
            continue;
        }
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((point.id, dist));
        }
    }
    best.map(|(id, _)| id)
}
