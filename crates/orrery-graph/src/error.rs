//! Error types for graph operations.

use crate::domain::TopicId;
use std::fmt;

/// The error type for graph mutation operations.
///
/// Parsing and path search never fail with these: the parser tolerates
/// malformed input and `find_path` expresses absence with `None`.
///
/// `Display` and `Error` are implemented by hand rather than derived:
/// thiserror treats any field named `source` as an error source, and
/// `WouldCycle::source` is an edge endpoint, not a cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Referenced topic does not exist in the graph.
    UnknownTopic(TopicId),

    /// A topic cannot depend on itself.
    SelfLoop(TopicId),

    /// Adding the edge would create a dependency cycle.
    WouldCycle {
        /// The prerequisite end of the rejected edge.
        source: TopicId,
        /// The dependent end of the rejected edge.
        target: TopicId,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTopic(id) => write!(f, "Unknown topic: {id}"),
            Self::SelfLoop(id) => write!(f, "Topic cannot depend on itself: {id}"),
            Self::WouldCycle { source, target } => {
                write!(f, "Adding dependency would create a cycle: {source} -> {target}")
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// A specialized Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
