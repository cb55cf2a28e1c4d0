//! Syllabus text parser.
//!
//! Turns line-oriented syllabus text into topic nodes and prerequisite
//! edges. One topic per non-blank line, either `Name` or
//! `Name: Dep1, Dep2, ...`. Dependency references are exact-string and
//! case-sensitive.
//!
//! Parsing never fails: malformed lines are skipped and dependency
//! mentions that match no topic line are dropped (reported back to the
//! caller in [`ParsedSyllabus::unresolved`] so the shell can log them).

use crate::domain::{DependencyEdge, TopicGraph, TopicId, TopicNode};
use crate::id::TopicIdGenerator;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Estimated study minutes assigned to every parsed topic.
pub const DEFAULT_ESTIMATED_TIME: u32 = 30;

/// A dependency mention that matched no topic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedDependency {
    /// Name of the topic whose line carried the mention.
    pub topic: String,

    /// The mentioned name that matched nothing.
    pub name: String,
}

/// Output of [`parse_syllabus`].
#[derive(Debug, Clone, Default)]
pub struct ParsedSyllabus {
    /// The parsed graph. Depths and positions carry parse-time defaults
    /// until the layout engine runs.
    pub graph: TopicGraph,

    /// Dependency mentions that resolved to no topic, in input order.
    pub unresolved: Vec<UnresolvedDependency>,
}

/// Parse syllabus text into a topic graph.
///
/// Two passes. The first creates one node per distinct topic name (the
/// part of each line before the first `:`, trimmed; blank lines and empty
/// names are skipped; repeated names keep the first node). The second
/// resolves the comma-separated mentions after the `:` into edges and
/// into the target's `dependencies` list.
///
/// Every resolved mention appends an edge; the `dependencies` list is
/// deduplicated but the edge list is not, matching the layout and search
/// engines which tolerate repeated edges.
pub fn parse_syllabus(text: &str) -> ParsedSyllabus {
    let mut nodes: Vec<TopicNode> = Vec::new();
    let mut name_index: HashMap<String, usize> = HashMap::new();
    let mut generator = TopicIdGenerator::default();

    // Pass 1: a node for the first occurrence of every name.
    for (line_no, line) in text.lines().enumerate() {
        let name = match line.split_once(':') {
            Some((before, _)) => before.trim(),
            None => line.trim(),
        };
        if name.is_empty() || name_index.contains_key(name) {
            continue;
        }

        let id = generator.generate(name).unwrap_or_else(|e| {
            // Needs MAX_NONCE hash collisions at full length; keep the
            // topic rather than failing the parse.
            warn!(topic = name, error = %e, "ID generation exhausted, using line fallback");
            TopicId::new(format!("topic-fallback-{}", line_no))
        });

        let mut node = TopicNode::new(id, name);
        node.estimated_time = Some(DEFAULT_ESTIMATED_TIME);
        name_index.insert(name.to_string(), nodes.len());
        nodes.push(node);
    }

    // Pass 2: resolve dependency mentions.
    let mut edges: Vec<DependencyEdge> = Vec::new();
    let mut unresolved: Vec<UnresolvedDependency> = Vec::new();

    for line in text.lines() {
        let Some((before, after)) = line.split_once(':') else {
            continue;
        };
        let Some(&target_idx) = name_index.get(before.trim()) else {
            continue;
        };
        let target_id = nodes[target_idx].id.clone();

        for token in after.split(',') {
            let dep_name = token.trim();
            if dep_name.is_empty() {
                continue;
            }
            if let Some(&dep_idx) = name_index.get(dep_name) {
                let dep_id = nodes[dep_idx].id.clone();
                edges.push(DependencyEdge {
                    source: dep_id.clone(),
                    target: target_id.clone(),
                });
                let target = &mut nodes[target_idx];
                if !target.dependencies.contains(&dep_id) {
                    target.dependencies.push(dep_id);
                }
            } else {
                debug!(
                    topic = %nodes[target_idx].name,
                    dependency = dep_name,
                    "Dependency mention matched no topic, dropping"
                );
                unresolved.push(UnresolvedDependency {
                    topic: nodes[target_idx].name.clone(),
                    name: dep_name.to_string(),
                });
            }
        }
    }

    ParsedSyllabus {
        graph: TopicGraph { nodes, edges },
        unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TopicStatus;
    use rstest::rstest;

    #[test]
    fn test_single_dependency() {
        let parsed = parse_syllabus("A\nB: A");
        let graph = &parsed.graph;

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);

        let a = graph.node_by_name("A").unwrap();
        let b = graph.node_by_name("B").unwrap();
        assert_eq!(graph.edges[0].source, a.id);
        assert_eq!(graph.edges[0].target, b.id);
        assert_eq!(b.dependencies, vec![a.id.clone()]);
        assert!(parsed.unresolved.is_empty());
    }

    #[test]
    fn test_parse_time_defaults() {
        let parsed = parse_syllabus("Rust Basics");
        let node = &parsed.graph.nodes[0];

        assert_eq!(node.status, TopicStatus::Locked);
        assert_eq!(node.depth, 0);
        assert_eq!(node.estimated_time, Some(DEFAULT_ESTIMATED_TIME));
        assert!(node.dependencies.is_empty());
        assert_eq!(node.position, Some(crate::domain::Position::ZERO));
    }

    #[test]
    fn test_duplicate_name_keeps_first_node() {
        let parsed = parse_syllabus("A\nA: ");
        assert_eq!(parsed.graph.nodes.len(), 1);
        assert_eq!(parsed.graph.edges.len(), 0);
    }

    #[test]
    fn test_duplicate_name_line_still_augments_dependencies() {
        let parsed = parse_syllabus("A\nB\nA: B");
        let graph = &parsed.graph;

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        let a = graph.node_by_name("A").unwrap();
        let b = graph.node_by_name("B").unwrap();
        assert_eq!(a.dependencies, vec![b.id.clone()]);
        assert_eq!(graph.edges[0].source, b.id);
        assert_eq!(graph.edges[0].target, a.id);
    }

    #[test]
    fn test_unknown_dependency_is_dropped_and_reported() {
        let parsed = parse_syllabus("A: Ghost");
        assert_eq!(parsed.graph.nodes.len(), 1);
        assert!(parsed.graph.edges.is_empty());
        assert!(parsed.graph.nodes[0].dependencies.is_empty());
        assert_eq!(
            parsed.unresolved,
            vec![UnresolvedDependency {
                topic: "A".to_string(),
                name: "Ghost".to_string(),
            }]
        );
    }

    #[test]
    fn test_names_and_mentions_are_trimmed() {
        let parsed = parse_syllabus("  A  \n\n  B :  A ");
        let graph = &parsed.graph;

        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.node_by_name("A").is_some());
        assert!(graph.node_by_name("B").is_some());
        assert_eq!(graph.edges.len(), 1);
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank_lines("\n\n\n")]
    #[case::colon_only(":")]
    #[case::empty_name_with_deps(": X, Y")]
    #[case::whitespace_name("   : X")]
    fn test_lines_without_a_name_produce_nothing(#[case] text: &str) {
        let parsed = parse_syllabus(text);
        assert!(parsed.graph.nodes.is_empty());
        assert!(parsed.graph.edges.is_empty());
    }

    #[test]
    fn test_repeated_mention_duplicates_edge_but_not_dependency() {
        let parsed = parse_syllabus("A\nB: A, A");
        let graph = &parsed.graph;

        // The edge list keeps both mentions; the dependencies list does not.
        assert_eq!(graph.edges.len(), 2);
        let b = graph.node_by_name("B").unwrap();
        assert_eq!(b.dependencies.len(), 1);
    }

    #[test]
    fn test_second_colon_stays_part_of_the_mention() {
        // "A: extra" names no topic, so the whole token is dropped.
        let parsed = parse_syllabus("A\nB: A: extra");
        assert_eq!(parsed.graph.nodes.len(), 2);
        assert!(parsed.graph.edges.is_empty());
        assert_eq!(parsed.unresolved.len(), 1);
        assert_eq!(parsed.unresolved[0].name, "A: extra");
    }

    #[test]
    fn test_trailing_commas_are_ignored() {
        let parsed = parse_syllabus("A\nB: A,,");
        assert_eq!(parsed.graph.edges.len(), 1);
        assert!(parsed.unresolved.is_empty());
    }

    #[test]
    fn test_self_mention_is_kept() {
        // The parser resolves mentions mechanically; a line naming itself
        // produces a self-edge. Validated insertion is add_edge's concern.
        let parsed = parse_syllabus("A: A");
        let graph = &parsed.graph;

        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source, graph.edges[0].target);
    }

    #[test]
    fn test_ids_are_stable_across_parses() {
        let text = "HTML\nCSS: HTML\nJavaScript: HTML, CSS";
        let first = parse_syllabus(text);
        let second = parse_syllabus(text);

        let ids_first: Vec<_> = first.graph.nodes.iter().map(|n| n.id.clone()).collect();
        let ids_second: Vec<_> = second.graph.nodes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids_first, ids_second);
    }

    #[test]
    fn test_nodes_keep_input_order() {
        let parsed = parse_syllabus("C\nA\nB: C");
        let names: Vec<_> = parsed.graph.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_forward_reference_resolves() {
        // Pass 1 creates every node before pass 2 resolves mentions, so a
        // line may depend on a topic introduced later in the text.
        let parsed = parse_syllabus("B: A\nA");
        assert_eq!(parsed.graph.nodes.len(), 2);
        assert_eq!(parsed.graph.edges.len(), 1);
        assert!(parsed.unresolved.is_empty());
    }
}
