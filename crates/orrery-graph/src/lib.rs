//! Orrery graph engine.
//!
//! A prerequisite graph over learning topics: parse a textual syllabus
//! into nodes and edges, lay the nodes out on depth-based orbital rings,
//! search for the cheapest study path between two topics, and track
//! progress across the graph. Everything here is synchronous and free of
//! I/O; callers own the snapshot and persist it however they like.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod domain;
pub mod error;
pub mod graph;
pub mod id;
pub mod layout;
pub mod parser;
pub mod path;
pub mod progress;

pub use domain::{
    DependencyEdge, Position, Resource, StudyPath, TopicGraph, TopicId, TopicNode, TopicStatus,
};
pub use error::{GraphError, Result};
pub use graph::EdgeOutcome;
pub use layout::{calculate_orbits, calculate_orbits_with, Jitter, NoJitter, ThreadRngJitter};
pub use parser::{parse_syllabus, ParsedSyllabus, UnresolvedDependency};
pub use path::find_path;
