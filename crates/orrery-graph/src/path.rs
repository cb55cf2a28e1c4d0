//! Study-path search.
//!
//! A* over the prerequisite graph, following forward edges only
//! (prerequisite to dependent). Step cost is the estimated study time of
//! the topic being entered; the heuristic is the straight-line distance
//! between layout positions, zero when either position is missing (the
//! search then degrades to Dijkstra). The frontier is a binary heap with
//! deterministic tie-breaking, so equal-cost graphs always produce the
//! same path.

use crate::domain::{StudyPath, TopicGraph, TopicId};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Step cost in minutes for a topic with no estimated time.
///
/// Deliberately different from the parse-time default of 30: search cost
/// and reported totals treat a missing estimate differently, and both
/// numbers are part of the observable behavior.
pub const FALLBACK_STEP_MINUTES: f64 = 60.0;

/// Search frontier entry.
#[derive(Debug, Clone)]
struct SearchState {
    node: usize,
    g_cost: f64,
    f_cost: f64,
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.node == other.node
    }
}

impl Eq for SearchState {}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap: lower f_cost = higher priority.
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
            // Deterministic tie-breaking: prefer the lower node index.
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Find the cheapest study path from `start` to `end`, both inclusive.
///
/// Returns `None` when either ID is unknown or no forward route exists;
/// the two cases are deliberately indistinguishable. `total_time` sums
/// the estimated time of every topic on the path, counting missing
/// estimates as zero (the start topic is included).
pub fn find_path(graph: &TopicGraph, start: &TopicId, end: &TopicId) -> Option<StudyPath> {
    let index: HashMap<&TopicId, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (&n.id, i))
        .collect();

    let start_idx = *index.get(start)?;
    let end_idx = *index.get(end)?;

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); graph.nodes.len()];
    for edge in &graph.edges {
        if let (Some(&src), Some(&tgt)) = (index.get(&edge.source), index.get(&edge.target)) {
            adjacency[src].push(tgt);
        }
    }

    let heuristic = |from: usize| -> f64 {
        match (graph.nodes[from].position, graph.nodes[end_idx].position) {
            (Some(a), Some(b)) => a.distance(&b),
            _ => 0.0,
        }
    };

    let mut g_best = vec![f64::INFINITY; graph.nodes.len()];
    let mut parent: Vec<Option<usize>> = vec![None; graph.nodes.len()];
    let mut heap = BinaryHeap::new();

    g_best[start_idx] = 0.0;
    heap.push(SearchState {
        node: start_idx,
        g_cost: 0.0,
        f_cost: heuristic(start_idx),
    });

    while let Some(state) = heap.pop() {
        if state.node == end_idx {
            return Some(reconstruct(graph, &parent, start_idx, end_idx));
        }
        if state.g_cost > g_best[state.node] {
            continue;
        }

        for &next in &adjacency[state.node] {
            let step = graph.nodes[next]
                .estimated_time
                .map_or(FALLBACK_STEP_MINUTES, f64::from);
            let g_next = state.g_cost + step;
            if g_next < g_best[next] {
                g_best[next] = g_next;
                parent[next] = Some(state.node);
                heap.push(SearchState {
                    node: next,
                    g_cost: g_next,
                    f_cost: g_next + heuristic(next),
                });
            }
        }
    }

    None
}

fn reconstruct(graph: &TopicGraph, parent: &[Option<usize>], start: usize, end: usize) -> StudyPath {
    let mut order = vec![end];
    let mut current = end;
    while current != start {
        match parent[current] {
            Some(prev) => {
                order.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    order.reverse();

    let total_time = order
        .iter()
        .map(|&i| graph.nodes[i].estimated_time.unwrap_or(0))
        .sum();

    StudyPath {
        node_ids: order.iter().map(|&i| graph.nodes[i].id.clone()).collect(),
        total_time,
    }
}
