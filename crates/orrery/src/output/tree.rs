//! Prerequisite tree rendering for `orrery tree` output.

use std::collections::HashSet;
use std::io::{self, Write};

use colored::Colorize;
use orrery_graph::{TopicGraph, TopicId, TopicNode, TopicStatus};

use super::color::{bold, colored_root_icon, colored_status_icon, colorize_id};
use super::{OutputConfig, OutputMode};

/// A node in a prerequisite tree for rendering purposes.
#[derive(Debug, Clone)]
pub struct TopicTreeNode {
    /// Topic ID of this node.
    pub id: TopicId,
    /// Topic name.
    pub name: String,
    /// Topic status (for status icon rendering).
    pub status: TopicStatus,
    /// Direct prerequisites of this node.
    pub children: Vec<TopicTreeNode>,
}

impl TopicTreeNode {
    /// Build a prerequisite tree rooted at `root`, following dependency
    /// links downward. `max_depth` limits how many levels below the root
    /// are expanded; `None` means unlimited.
    ///
    /// Returns `None` when `root` is not in the graph. A topic already on
    /// the current path is not expanded again, so a cyclic graph (possible
    /// through a hand-written syllabus) renders as a finite tree.
    pub fn build(graph: &TopicGraph, root: &TopicId, max_depth: Option<usize>) -> Option<Self> {
        let mut on_path = HashSet::new();
        Self::build_inner(graph, root, max_depth, 0, &mut on_path)
    }

    fn build_inner(
        graph: &TopicGraph,
        id: &TopicId,
        max_depth: Option<usize>,
        depth: usize,
        on_path: &mut HashSet<TopicId>,
    ) -> Option<Self> {
        let node = graph.node(id)?;
        on_path.insert(id.clone());

        let expand = max_depth.map_or(true, |max| depth < max);
        let children = if expand {
            node.dependencies
                .iter()
                .filter_map(|dep| {
                    if on_path.contains(dep) {
                        None
                    } else {
                        Self::build_inner(graph, dep, max_depth, depth + 1, on_path)
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        on_path.remove(id);
        Some(Self {
            id: id.clone(),
            name: node.name.clone(),
            status: node.status,
            children,
        })
    }
}

/// Print a prerequisite tree with ASCII/Unicode connectors.
///
/// Renders a tree like:
/// ```text
/// ◆ Async/Await (topic-ab12) ○
/// ├── Fetch API (topic-cd34) ✓
/// │   └── JavaScript (topic-ef56) ✓
/// └── Promises (topic-gh78) ○
/// ```
pub fn print_topic_tree(root: &TopicTreeNode, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_topic_tree_text(&mut handle, root, &config),
        OutputMode::Json => {
            let json = topic_tree_to_json(root);
            let output = serde_json::to_string_pretty(&json).map_err(io::Error::other)?;
            writeln!(handle, "{}", output)
        }
    }
}

/// Render the prerequisite tree with ASCII art connectors.
fn print_topic_tree_text<W: Write>(
    w: &mut W,
    root: &TopicTreeNode,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {} {} {}",
        colored_root_icon(config),
        bold(&root.name, config),
        colorize_id(&format!("({})", root.id), config),
        colored_status_icon(root.status, config)
    )?;

    print_topic_tree_children(w, &root.children, &[], config)
}

/// Recursively render tree children with proper connector lines.
///
/// `prefix_segments` tracks which ancestor levels still have siblings below,
/// used to draw the vertical continuation lines (`│`).
fn print_topic_tree_children<W: Write>(
    w: &mut W,
    children: &[TopicTreeNode],
    prefix_segments: &[bool],
    config: &OutputConfig,
) -> io::Result<()> {
    let (branch, corner, pipe, space) = if config.use_ascii {
        ("|-- ", "`-- ", "|   ", "    ")
    } else {
        ("├── ", "└── ", "│   ", "    ")
    };

    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;

        // Build prefix from ancestor continuation lines
        let mut prefix = String::new();
        for &has_more in prefix_segments {
            let segment = if has_more { pipe } else { space };
            if config.use_colors {
                prefix.push_str(&segment.dimmed().to_string());
            } else {
                prefix.push_str(segment);
            }
        }

        // Add branch or corner connector
        let connector = if is_last { corner } else { branch };
        let connector_str = if config.use_colors {
            connector.dimmed().to_string()
        } else {
            connector.to_string()
        };

        let id_str = format!("({})", child.id);
        let id_display = if config.use_colors {
            id_str.dimmed().to_string()
        } else {
            id_str
        };

        writeln!(
            w,
            "{}{}{} {} {}",
            prefix,
            connector_str,
            child.name,
            id_display,
            colored_status_icon(child.status, config)
        )?;

        // Recurse into children
        if !child.children.is_empty() {
            let mut next_segments = prefix_segments.to_vec();
            next_segments.push(!is_last);
            print_topic_tree_children(w, &child.children, &next_segments, config)?;
        }
    }

    Ok(())
}

/// Convert a prerequisite tree to a JSON value for programmatic output.
fn topic_tree_to_json(node: &TopicTreeNode) -> serde_json::Value {
    serde_json::json!({
        "id": node.id,
        "name": node.name,
        "status": node.status,
        "prerequisites": node
            .children
            .iter()
            .map(topic_tree_to_json)
            .collect::<Vec<_>>(),
    })
}

/// Convert a prerequisite tree to JSON including unlocked topics for the
/// `tree` command.
pub fn topic_tree_to_json_public(
    root: &TopicTreeNode,
    unlocks: &[&TopicNode],
) -> serde_json::Value {
    let mut json = topic_tree_to_json(root);
    json["unlocks"] = serde_json::json!(unlocks
        .iter()
        .map(|node| {
            serde_json::json!({
                "id": node.id,
                "name": node.name,
                "status": node.status,
            })
        })
        .collect::<Vec<_>>());
    json
}

/// Print the "Unlocks" (reverse dependencies) section for tree output.
pub fn print_topic_tree_unlocks<W: Write>(
    w: &mut W,
    unlocks: &[&TopicNode],
    config: &OutputConfig,
) -> io::Result<()> {
    if unlocks.is_empty() {
        return Ok(());
    }

    writeln!(w)?;
    writeln!(w, "{} ({}):", bold("Unlocks", config), unlocks.len())?;

    let corner = if config.use_ascii { "`-- " } else { "└── " };

    for node in unlocks {
        let connector_str = if config.use_colors {
            corner.dimmed().to_string()
        } else {
            corner.to_string()
        };

        writeln!(
            w,
            "  {}{} {}",
            connector_str,
            node.name,
            colored_status_icon(node.status, config)
        )?;
    }

    Ok(())
}
