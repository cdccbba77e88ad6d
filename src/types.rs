//! Core data types for the graph editor.
//!
//! This module defines the graph the editor manipulates: points with stable
//! identity, undirected segments between them, and the [`Graph`] container that
//! enforces segment validity and owns persistence.

use crate::surface::{PointStyle, SegmentStyle, Surface};
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for graph points.
///
/// Two points at the same location are still distinct entities; identity is
/// carried by this id, never by coordinates.
pub type PointId = Uuid;

/// Errors raised while loading or saving a graph.
#[derive(Error, Debug)]
pub enum GraphError {
    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two stored points share one id
    #[error("duplicate point id {0}")]
    DuplicatePoint(PointId),

    /// A stored segment is degenerate, duplicated, or references a missing point
    #[error("invalid segment {a} -> {b}")]
    InvalidSegment {
        /// First endpoint id
        a: PointId,
        /// Second endpoint id
        b: PointId,
    },
}

/// A point in world space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    /// Unique identifier for this point
    pub id: PointId,
    /// Position in world space as (x, y)
    pub position: (f32, f32),
}

impl Point {
    /// Creates a point with a fresh identity at the given world position.
    pub fn new(pos: egui::Pos2) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: (pos.x, pos.y),
        }
    }

    /// The point's position as an egui position.
    pub fn pos(&self) -> egui::Pos2 {
        egui::pos2(self.position.0, self.position.1)
    }
}

/// An undirected edge between two points.
///
/// Equality ignores endpoint order: `Segment::new(a, b) == Segment::new(b, a)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Segment {
    /// First endpoint
    pub a: PointId,
    /// Second endpoint
    pub b: PointId,
}

impl Segment {
    /// Creates a segment between two points.
    pub fn new(a: PointId, b: PointId) -> Self {
        Self { a, b }
    }

    /// Whether both endpoints are the same point.
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    /// Whether `point` is one of the endpoints.
    pub fn includes(&self, point: PointId) -> bool {
        self.a == point || self.b == point
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl Eq for Segment {}

/// The point/segment container edited by [`crate::GraphEditor`].
///
/// Points keep insertion order, which is also their draw order and the
/// tie-break order for nearest-point queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Graph {
    points: Vec<Point>,
    segments: Vec<Segment>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the graph to a JSON string.
    pub fn to_json(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a graph from a JSON string, rejecting inconsistent content.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let graph: Graph = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Checks that point ids are unique and every segment is valid.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut ids = HashSet::with_capacity(self.points.len());
        for point in &self.points {
            if !ids.insert(point.id) {
                return Err(GraphError::DuplicatePoint(point.id));
            }
        }
        for (idx, seg) in self.segments.iter().enumerate() {
            let dangling = !ids.contains(&seg.a) || !ids.contains(&seg.b);
            let repeated = self.segments[..idx].contains(seg);
            if seg.is_degenerate() || dangling || repeated {
                return Err(GraphError::InvalidSegment { a: seg.a, b: seg.b });
            }
        }
        Ok(())
    }

    /// All points in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// All segments in insertion order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Looks up a point by id.
    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Whether a point with this id is present.
    pub fn contains_point(&self, id: PointId) -> bool {
        self.point(id).is_some()
    }

    /// Adds a new point at `pos` and returns its id.
    pub fn add_point(&mut self, pos: egui::Pos2) -> PointId {
        let point = Point::new(pos);
        self.points.push(point);
        log::debug!("added point {} at ({}, {})", point.id, pos.x, pos.y);
        point.id
    }

    /// Moves a point to a new world position.
    ///
    /// Returns `false` if the point does not exist.
    pub fn move_point(&mut self, id: PointId, pos: egui::Pos2) -> bool {
        match self.points.iter_mut().find(|p| p.id == id) {
            Some(point) => {
                point.position = (pos.x, pos.y);
                true
            }
            None => false,
        }
    }

    /// Removes a point and every segment touching it.
    ///
    /// Returns `false` if the point was not present.
    pub fn remove_point(&mut self, id: PointId) -> bool {
        let before = self.points.len();
        self.points.retain(|p| p.id != id);
        if self.points.len() == before {
            return false;
        }
        self.segments.retain(|s| !s.includes(id));
        log::debug!("removed point {id}");
        true
    }

    /// Whether an equal (unordered) segment is already present.
    pub fn includes_segment(&self, segment: &Segment) -> bool {
        self.segments.contains(segment)
    }

    /// Segments that have `id` as an endpoint.
    pub fn segments_with_point(&self, id: PointId) -> Vec<Segment> {
        self.segments
            .iter()
            .filter(|s| s.includes(id))
            .copied()
            .collect()
    }

    /// Adds a segment unless it is degenerate, already present, or references a
    /// missing point.
    ///
    /// Returns `true` if the segment was added.
    pub fn try_add_segment(&mut self, segment: Segment) -> bool {
        if segment.is_degenerate()
            || self.includes_segment(&segment)
            || !self.contains_point(segment.a)
            || !self.contains_point(segment.b)
        {
            log::debug!("rejected segment {} -> {}", segment.a, segment.b);
            return false;
        }
        self.segments.push(segment);
        log::debug!("added segment {} -> {}", segment.a, segment.b);
        true
    }

    /// Removes every point and segment.
    pub fn dispose(&mut self) {
        self.segments.clear();
        self.points.clear();
    }

    /// Draws all segments, then all points on top.
    pub fn draw(&self, surface: &mut dyn Surface) {
        for segment in &self.segments {
            if let (Some(a), Some(b)) = (self.point(segment.a), self.point(segment.b)) {
                surface.draw_segment(a.pos(), b.pos(), SegmentStyle::default());
            }
        }
        for point in &self.points {
            surface.draw_point(point.pos(), PointStyle::default());
        }
    }
}
