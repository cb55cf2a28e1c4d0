//! Domain types for the prerequisite topic graph.
//!
//! These types mirror the session wire format: nodes and edges serialize
//! with camelCase field names and positions serialize as `[x, y, z]`
//! arrays, so a saved session and an exported payload share one shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a topic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicId(pub String);

impl TopicId {
    /// Create a new topic ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TopicId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TopicId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Completion status of a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TopicStatus {
    /// Reachable and available to study
    Orbit,

    /// Finished; counts toward completion statistics
    Completed,

    /// Not yet started (the default after parsing)
    Locked,
}

impl fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orbit => write!(f, "orbit"),
            Self::Completed => write!(f, "completed"),
            Self::Locked => write!(f, "locked"),
        }
    }
}

/// 3D position of a topic in the orbital layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Position {
    /// X coordinate
    pub x: f64,

    /// Y coordinate (vertical jitter only)
    pub y: f64,

    /// Z coordinate
    pub z: f64,
}

impl Position {
    /// The origin
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a position from coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance to another position
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<[f64; 3]> for Position {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Position> for [f64; 3] {
    fn from(p: Position) -> Self {
        [p.x, p.y, p.z]
    }
}

/// External learning resource attached to a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource URL, unique within one topic
    pub url: String,

    /// Human-readable title
    pub title: String,
}

/// A learning topic in the prerequisite graph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicNode {
    /// Unique identifier, immutable once assigned
    pub id: TopicId,

    /// Display name; exact-match key for dependency references
    pub name: String,

    /// Completion status
    pub status: TopicStatus,

    /// Longest dependency-chain distance from a root
    pub depth: u32,

    /// IDs of topics this one directly depends on, no duplicates.
    /// Kept in sync with the edge list by every mutating operation.
    pub dependencies: Vec<TopicId>,

    /// Layout position, present once layout has run
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub position: Option<Position>,

    /// Estimated study time in minutes
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub estimated_time: Option<u32>,

    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,

    /// Attached learning resources
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub resources: Vec<Resource>,

    /// Accumulated study minutes
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub study_time: Option<u32>,

    /// When the topic was marked complete
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub completed_date: Option<DateTime<Utc>>,
}

impl TopicNode {
    /// Create a topic with parse-time defaults: locked, depth 0, at the
    /// origin, with no dependencies or metadata.
    pub fn new(id: TopicId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: TopicStatus::Locked,
            depth: 0,
            dependencies: Vec::new(),
            position: Some(Position::ZERO),
            estimated_time: None,
            notes: None,
            resources: Vec::new(),
            study_time: None,
            completed_date: None,
        }
    }
}

/// Directed prerequisite edge: `source` must be learned before `target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// The prerequisite topic
    pub source: TopicId,

    /// The dependent topic
    pub target: TopicId,
}

/// Result of a study-path search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPath {
    /// Topic IDs from start to end, both inclusive
    pub node_ids: Vec<TopicId>,

    /// Total estimated minutes over every topic in the path
    pub total_time: u32,
}

/// A complete prerequisite graph: topic nodes plus directed edges
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicGraph {
    /// Topics in first-seen order
    #[serde(default)]
    pub nodes: Vec<TopicNode>,

    /// Prerequisite edges in discovery order
    #[serde(default)]
    pub edges: Vec<DependencyEdge>,
}

impl TopicGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of topics
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph has no topics
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a topic by ID
    pub fn node(&self, id: &TopicId) -> Option<&TopicNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Look up a topic by ID, mutably
    pub fn node_mut(&mut self, id: &TopicId) -> Option<&mut TopicNode> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    /// Look up a topic by exact display name
    pub fn node_by_name(&self, name: &str) -> Option<&TopicNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// True when a topic with this ID exists
    pub fn contains(&self, id: &TopicId) -> bool {
        self.nodes.iter().any(|n| &n.id == id)
    }
}
