//! Graph mutation operations.
//!
//! [`TopicGraph`] snapshots are mutated through the methods here, which
//! keep the two dependency representations in sync: the flat edge list
//! and each node's `dependencies` vector. Edge insertion is validated
//! (unknown endpoints, self-loops, and cycle-creating edges are
//! rejected) and triggers a full re-layout; metadata operations leave
//! structure and layout alone.
//!
//! Cycle detection builds a petgraph index of the current edge set and
//! asks whether a reverse path already connects the endpoints.

use crate::domain::{DependencyEdge, TopicGraph, TopicId, TopicNode, TopicStatus};
use crate::error::{GraphError, Result};
use crate::layout::{self, Jitter, ThreadRngJitter};
use chrono::{DateTime, Utc};
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Result of an edge insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// The edge was inserted and the layout re-ran.
    Added,

    /// An identical edge already existed; the graph is unchanged.
    Duplicate,
}

impl TopicGraph {
    /// Add a prerequisite edge with the default random jitter source.
    ///
    /// See [`add_edge_with`](Self::add_edge_with).
    pub fn add_edge(&mut self, source: &TopicId, target: &TopicId) -> Result<EdgeOutcome> {
        self.add_edge_with(source, target, &mut ThreadRngJitter)
    }

    /// Add a prerequisite edge `source -> target` and re-run the layout.
    ///
    /// Inserting an edge that already exists is a no-op reported as
    /// [`EdgeOutcome::Duplicate`]. On success the target's `dependencies`
    /// vector gains the source ID (if absent) and every depth and
    /// position is recomputed.
    ///
    /// # Errors
    ///
    /// - [`GraphError::UnknownTopic`] if either endpoint does not exist
    /// - [`GraphError::SelfLoop`] if `source == target`
    /// - [`GraphError::WouldCycle`] if a path from `target` back to
    ///   `source` already exists
    pub fn add_edge_with(
        &mut self,
        source: &TopicId,
        target: &TopicId,
        jitter: &mut dyn Jitter,
    ) -> Result<EdgeOutcome> {
        if !self.contains(source) {
            return Err(GraphError::UnknownTopic(source.clone()));
        }
        if !self.contains(target) {
            return Err(GraphError::UnknownTopic(target.clone()));
        }
        if source == target {
            return Err(GraphError::SelfLoop(source.clone()));
        }
        if self
            .edges
            .iter()
            .any(|e| &e.source == source && &e.target == target)
        {
            return Ok(EdgeOutcome::Duplicate);
        }
        if self.would_create_cycle(source, target) {
            return Err(GraphError::WouldCycle {
                source: source.clone(),
                target: target.clone(),
            });
        }

        self.edges.push(DependencyEdge {
            source: source.clone(),
            target: target.clone(),
        });
        let node = self
            .node_mut(target)
            .ok_or_else(|| GraphError::UnknownTopic(target.clone()))?;
        if !node.dependencies.contains(source) {
            node.dependencies.push(source.clone());
        }

        layout::calculate_orbits_with(&mut self.nodes, &self.edges, jitter);
        Ok(EdgeOutcome::Added)
    }

    /// Check whether adding `source -> target` would close a cycle, i.e.
    /// whether a path from `target` to `source` already exists.
    fn would_create_cycle(&self, source: &TopicId, target: &TopicId) -> bool {
        let mut dag: DiGraph<TopicId, ()> = DiGraph::new();
        let mut node_map: HashMap<&TopicId, NodeIndex> = HashMap::new();

        for node in &self.nodes {
            node_map.insert(&node.id, dag.add_node(node.id.clone()));
        }
        for edge in &self.edges {
            if let (Some(&s), Some(&t)) = (node_map.get(&edge.source), node_map.get(&edge.target))
            {
                dag.add_edge(s, t, ());
            }
        }

        match (node_map.get(source), node_map.get(target)) {
            (Some(&s), Some(&t)) => algo::has_path_connecting(&dag, t, s, None),
            _ => false,
        }
    }

    /// Mark a topic completed as of now.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownTopic`] if the ID does not exist.
    pub fn mark_complete(&mut self, id: &TopicId) -> Result<()> {
        self.mark_complete_at(id, Utc::now())
    }

    /// Mark a topic completed with an explicit completion timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownTopic`] if the ID does not exist.
    pub fn mark_complete_at(&mut self, id: &TopicId, when: DateTime<Utc>) -> Result<()> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| GraphError::UnknownTopic(id.clone()))?;
        node.status = TopicStatus::Completed;
        node.completed_date = Some(when);
        Ok(())
    }

    /// Return a completed topic to circulation: status becomes `Orbit`
    /// and the completion date is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownTopic`] if the ID does not exist.
    pub fn mark_incomplete(&mut self, id: &TopicId) -> Result<()> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| GraphError::UnknownTopic(id.clone()))?;
        node.status = TopicStatus::Orbit;
        node.completed_date = None;
        Ok(())
    }

    /// Replace a topic's notes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownTopic`] if the ID does not exist.
    pub fn set_notes(&mut self, id: &TopicId, notes: impl Into<String>) -> Result<()> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| GraphError::UnknownTopic(id.clone()))?;
        node.notes = Some(notes.into());
        Ok(())
    }

    /// Attach a learning resource. Returns `false` when a resource with
    /// the same URL is already attached (nothing is added).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownTopic`] if the ID does not exist.
    pub fn add_resource(
        &mut self,
        id: &TopicId,
        url: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<bool> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| GraphError::UnknownTopic(id.clone()))?;
        let url = url.into();
        if node.resources.iter().any(|r| r.url == url) {
            return Ok(false);
        }
        node.resources.push(crate::domain::Resource {
            url,
            title: title.into(),
        });
        Ok(true)
    }

    /// Remove the resource with the given URL. Returns `false` when no
    /// such resource was attached.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownTopic`] if the ID does not exist.
    pub fn remove_resource(&mut self, id: &TopicId, url: &str) -> Result<bool> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| GraphError::UnknownTopic(id.clone()))?;
        let before = node.resources.len();
        node.resources.retain(|r| r.url != url);
        Ok(node.resources.len() < before)
    }

    /// Add study minutes to a topic's accumulated total.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownTopic`] if the ID does not exist.
    pub fn add_study_time(&mut self, id: &TopicId, minutes: u32) -> Result<()> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| GraphError::UnknownTopic(id.clone()))?;
        node.study_time = Some(node.study_time.unwrap_or(0) + minutes);
        Ok(())
    }

    /// Direct prerequisites of a topic, in dependency-list order.
    /// Unknown IDs yield an empty list.
    pub fn prerequisites_of(&self, id: &TopicId) -> Vec<&TopicNode> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        node.dependencies
            .iter()
            .filter_map(|dep| self.node(dep))
            .collect()
    }

    /// Topics that directly depend on the given one, in edge order with
    /// duplicates collapsed. Unknown IDs yield an empty list.
    pub fn dependents_of(&self, id: &TopicId) -> Vec<&TopicNode> {
        let mut seen = HashSet::new();
        self.edges
            .iter()
            .filter(|e| &e.source == id)
            .filter(|e| seen.insert(&e.target))
            .filter_map(|e| self.node(&e.target))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::NoJitter;
    use crate::parser::parse_syllabus;
    use chrono::TimeZone;

    fn graph_of(text: &str) -> TopicGraph {
        parse_syllabus(text).graph
    }

    fn id_of(graph: &TopicGraph, name: &str) -> TopicId {
        graph.node_by_name(name).unwrap().id.clone()
    }

    #[test]
    fn test_add_edge_appends_and_syncs() {
        let mut graph = graph_of("A\nB");
        let a = id_of(&graph, "A");
        let b = id_of(&graph, "B");

        let outcome = graph.add_edge_with(&a, &b, &mut NoJitter).unwrap();
        assert_eq!(outcome, EdgeOutcome::Added);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.node(&b).unwrap().dependencies, vec![a.clone()]);
        // The layout re-ran: B moved one ring out.
        assert_eq!(graph.node(&b).unwrap().depth, 1);
        let pos = graph.node(&b).unwrap().position.unwrap();
        assert!(((pos.x * pos.x + pos.z * pos.z).sqrt() - 23.0).abs() < 1e-9);
    }

    #[test]
    fn test_add_edge_twice_is_idempotent() {
        let mut graph = graph_of("A\nB");
        let a = id_of(&graph, "A");
        let b = id_of(&graph, "B");

        assert_eq!(
            graph.add_edge_with(&a, &b, &mut NoJitter).unwrap(),
            EdgeOutcome::Added
        );
        assert_eq!(
            graph.add_edge_with(&a, &b, &mut NoJitter).unwrap(),
            EdgeOutcome::Duplicate
        );
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.node(&b).unwrap().dependencies.len(), 1);
    }

    #[test]
    fn test_add_edge_unknown_topic() {
        let mut graph = graph_of("A");
        let a = id_of(&graph, "A");
        let ghost = TopicId::new("topic-zzzz");

        let err = graph.add_edge_with(&ghost, &a, &mut NoJitter).unwrap_err();
        assert_eq!(err, GraphError::UnknownTopic(ghost.clone()));
        let err = graph.add_edge_with(&a, &ghost, &mut NoJitter).unwrap_err();
        assert_eq!(err, GraphError::UnknownTopic(ghost));
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_add_edge_self_loop_rejected() {
        let mut graph = graph_of("A");
        let a = id_of(&graph, "A");

        let err = graph.add_edge_with(&a, &a, &mut NoJitter).unwrap_err();
        assert_eq!(err, GraphError::SelfLoop(a));
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_add_edge_direct_cycle_rejected() {
        let mut graph = graph_of("A\nB: A");
        let a = id_of(&graph, "A");
        let b = id_of(&graph, "B");

        let err = graph.add_edge_with(&b, &a, &mut NoJitter).unwrap_err();
        assert_eq!(
            err,
            GraphError::WouldCycle {
                source: b,
                target: a,
            }
        );
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_add_edge_transitive_cycle_rejected() {
        let mut graph = graph_of("A\nB: A\nC: B");
        let a = id_of(&graph, "A");
        let c = id_of(&graph, "C");

        let err = graph.add_edge_with(&c, &a, &mut NoJitter).unwrap_err();
        assert!(matches!(err, GraphError::WouldCycle { .. }));
    }

    #[test]
    fn test_mark_complete_and_reopen() {
        let mut graph = graph_of("A");
        let a = id_of(&graph, "A");
        let when = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();

        graph.mark_complete_at(&a, when).unwrap();
        let node = graph.node(&a).unwrap();
        assert_eq!(node.status, TopicStatus::Completed);
        assert_eq!(node.completed_date, Some(when));

        graph.mark_incomplete(&a).unwrap();
        let node = graph.node(&a).unwrap();
        assert_eq!(node.status, TopicStatus::Orbit);
        assert!(node.completed_date.is_none());
    }

    #[test]
    fn test_mark_complete_unknown_topic() {
        let mut graph = graph_of("A");
        let err = graph.mark_complete(&TopicId::new("topic-zzzz")).unwrap_err();
        assert!(matches!(err, GraphError::UnknownTopic(_)));
    }

    #[test]
    fn test_set_notes_replaces() {
        let mut graph = graph_of("A");
        let a = id_of(&graph, "A");

        graph.set_notes(&a, "first pass").unwrap();
        graph.set_notes(&a, "second pass").unwrap();
        assert_eq!(graph.node(&a).unwrap().notes.as_deref(), Some("second pass"));
    }

    #[test]
    fn test_resources_unique_by_url() {
        let mut graph = graph_of("A");
        let a = id_of(&graph, "A");

        assert!(graph.add_resource(&a, "https://e.com/1", "One").unwrap());
        assert!(!graph.add_resource(&a, "https://e.com/1", "Again").unwrap());
        assert_eq!(graph.node(&a).unwrap().resources.len(), 1);

        assert!(graph.remove_resource(&a, "https://e.com/1").unwrap());
        assert!(!graph.remove_resource(&a, "https://e.com/1").unwrap());
        assert!(graph.node(&a).unwrap().resources.is_empty());
    }

    #[test]
    fn test_add_study_time_accumulates() {
        let mut graph = graph_of("A");
        let a = id_of(&graph, "A");

        graph.add_study_time(&a, 25).unwrap();
        graph.add_study_time(&a, 15).unwrap();
        assert_eq!(graph.node(&a).unwrap().study_time, Some(40));
    }

    #[test]
    fn test_prerequisites_and_dependents() {
        let graph = graph_of("A\nB: A\nC: A, B");
        let a = id_of(&graph, "A");
        let c = id_of(&graph, "C");

        let prereqs: Vec<_> = graph
            .prerequisites_of(&c)
            .iter()
            .map(|n| n.name.clone())
            .collect();
        assert_eq!(prereqs, vec!["A", "B"]);

        let dependents: Vec<_> = graph
            .dependents_of(&a)
            .iter()
            .map(|n| n.name.clone())
            .collect();
        assert_eq!(dependents, vec!["B", "C"]);
    }

    #[test]
    fn test_dependents_collapse_duplicate_edges() {
        let graph = graph_of("A\nB: A, A");
        let a = id_of(&graph, "A");
        assert_eq!(graph.dependents_of(&a).len(), 1);
    }
}
