//! Orbital layout engine.
//!
//! Assigns every topic a depth (longest dependency-chain distance from a
//! root) and a 3D position on a ring whose radius grows with depth. Nodes
//! sharing a depth are spread evenly around their ring; the y coordinate
//! is cosmetic jitter drawn from an injectable source so layouts can be
//! made deterministic in tests and by configuration.

use crate::domain::{DependencyEdge, Position, TopicId, TopicNode};
use rand::Rng;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Ring radius for depth 0.
pub const BASE_RADIUS: f64 = 15.0;

/// Radius added per depth level.
pub const RADIUS_STEP: f64 = 8.0;

/// Magnitude bound for vertical jitter.
pub const JITTER_SPAN: f64 = 2.5;

/// Source of vertical jitter for layout positions.
pub trait Jitter {
    /// Next y offset, within `[-JITTER_SPAN, JITTER_SPAN]`.
    fn sample(&mut self) -> f64;
}

/// Uniform random jitter from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngJitter;

impl Jitter for ThreadRngJitter {
    fn sample(&mut self) -> f64 {
        rand::thread_rng().gen_range(-JITTER_SPAN..=JITTER_SPAN)
    }
}

/// Zero jitter, for deterministic layouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn sample(&mut self) -> f64 {
        0.0
    }
}

/// Recompute every node's depth from the edge set.
///
/// Depths are reset to 0 and then relaxed: for each edge, the target must
/// sit at least one level deeper than the source. At most `nodes.len()`
/// rounds run, which is enough for any acyclic edge set to converge; a
/// cyclic edge set (possible only in imported or hand-edited data) stops
/// at the round cap with understated depths rather than looping.
///
/// Edges referencing unknown IDs are skipped.
pub fn assign_depths(nodes: &mut [TopicNode], edges: &[DependencyEdge]) {
    let index: HashMap<TopicId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.clone(), i))
        .collect();

    for node in nodes.iter_mut() {
        node.depth = 0;
    }

    for round in 0..nodes.len() {
        let mut changed = false;
        for edge in edges {
            let (Some(&src), Some(&tgt)) = (index.get(&edge.source), index.get(&edge.target))
            else {
                continue;
            };
            let candidate = nodes[src].depth + 1;
            if candidate > nodes[tgt].depth {
                nodes[tgt].depth = candidate;
                changed = true;
            }
        }
        if !changed {
            debug!(rounds = round + 1, "Depth relaxation converged");
            return;
        }
    }
}

/// Run the full layout with the default random jitter source.
pub fn calculate_orbits(nodes: &mut [TopicNode], edges: &[DependencyEdge]) {
    calculate_orbits_with(nodes, edges, &mut ThreadRngJitter);
}

/// Run the full layout: recompute depths, then place every node on the
/// ring for its depth.
///
/// Within one ring, nodes keep their overall order and are spread evenly:
/// the node at ring index `i` of `len` sits at angle `i / len * 2π`. The
/// radius is `BASE_RADIUS + depth * RADIUS_STEP`. x and z are fully
/// determined by depth and order; y comes from the jitter source.
pub fn calculate_orbits_with(
    nodes: &mut [TopicNode],
    edges: &[DependencyEdge],
    jitter: &mut dyn Jitter,
) {
    assign_depths(nodes, edges);

    let mut rings: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, node) in nodes.iter().enumerate() {
        rings.entry(node.depth).or_default().push(i);
    }

    for (depth, members) in &rings {
        let radius = BASE_RADIUS + f64::from(*depth) * RADIUS_STEP;
        let len = members.len();
        for (ring_index, &node_index) in members.iter().enumerate() {
            let angle = (ring_index as f64 / len as f64) * std::f64::consts::TAU;
            nodes[node_index].position = Some(Position::new(
                angle.cos() * radius,
                jitter.sample(),
                angle.sin() * radius,
            ));
        }
    }
}
