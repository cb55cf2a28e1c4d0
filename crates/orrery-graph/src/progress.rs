//! Progress queries over a topic graph.
//!
//! Read-side aggregation: which topics are worth studying next, how much
//! time has gone in, how far along the graph is, and the current streak
//! of consecutive study days. Nothing here mutates the graph.

use crate::domain::{TopicGraph, TopicNode, TopicStatus};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Topics that are available to study: not yet completed, with every
/// direct dependency completed (vacuously true for roots). Sorted by
/// depth, shallowest first, capped at `limit`.
///
/// A dependency ID that resolves to no node keeps its topic out of the
/// list, the same as an incomplete dependency would.
pub fn recommended_topics(graph: &TopicGraph, limit: usize) -> Vec<&TopicNode> {
    let mut available: Vec<&TopicNode> = graph
        .nodes
        .iter()
        .filter(|node| node.status != TopicStatus::Completed)
        .filter(|node| {
            node.dependencies.iter().all(|dep| {
                graph
                    .node(dep)
                    .is_some_and(|d| d.status == TopicStatus::Completed)
            })
        })
        .collect();

    available.sort_by_key(|node| node.depth);
    available.truncate(limit);
    available
}

/// Total accumulated study minutes across all topics.
pub fn total_study_time(graph: &TopicGraph) -> u32 {
    graph
        .nodes
        .iter()
        .map(|node| node.study_time.unwrap_or(0))
        .sum()
}

/// Completed share of the graph as a rounded whole percentage.
/// An empty graph reports 0.
pub fn completion_percent(graph: &TopicGraph) -> u8 {
    if graph.nodes.is_empty() {
        return 0;
    }
    let completed = graph
        .nodes
        .iter()
        .filter(|node| node.status == TopicStatus::Completed)
        .count();
    let percent = (completed as f64 / graph.nodes.len() as f64) * 100.0;
    percent.round() as u8
}

/// Length of the trailing run of consecutive study days.
///
/// Collects the distinct UTC calendar dates of every completion and
/// counts back from the most recent one while each previous day is
/// exactly one day earlier. Several completions on one day count once;
/// no completions mean no streak.
pub fn study_streak(graph: &TopicGraph) -> u32 {
    let mut days: Vec<NaiveDate> = graph
        .nodes
        .iter()
        .filter_map(|node| node.completed_date)
        .map(|ts| ts.date_naive())
        .collect();
    days.sort_unstable();
    days.dedup();

    let mut streak = 0;
    let mut later: Option<NaiveDate> = None;
    for day in days.into_iter().rev() {
        match later {
            None => streak = 1,
            Some(next) => {
                if (next - day).num_days() == 1 {
                    streak += 1;
                } else {
                    break;
                }
            }
        }
        later = Some(day);
    }
    streak
}

/// Number of topics on each depth ring, keyed by depth.
pub fn layer_sizes(graph: &TopicGraph) -> BTreeMap<u32, usize> {
    let mut layers = BTreeMap::new();
    for node in &graph.nodes {
        *layers.entry(node.depth).or_insert(0) += 1;
    }
    layers
}
