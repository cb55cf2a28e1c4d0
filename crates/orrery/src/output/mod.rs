//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, status icons)
//! - [`tree`]: Prerequisite tree rendering with ASCII/Unicode connectors

pub mod color;
pub mod tree;

use orrery_graph::{StudyPath, TopicGraph, TopicNode};
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, info, success, warning};
pub use tree::{
    print_topic_tree, print_topic_tree_unlocks, topic_tree_to_json_public, TopicTreeNode,
};

use color::{bold, colored_status_icon, colorize_id, cyan, dimmed, yellow};
use colored::Colorize;

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Configuration for output formatting.
///
/// Holds the settings that control how output is rendered: content width
/// for wrapping, ASCII fallback mode, and color output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `ORRERY_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `ORRERY_ASCII`: Set to "1" or "true" for ASCII-only icons (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `ORRERY_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        Self {
            max_width: parse_max_width(env::var("ORRERY_MAX_WIDTH").ok().as_deref()),
            use_ascii: parse_ascii_flag(env::var("ORRERY_ASCII").ok().as_deref()),
            use_colors: parse_color_choice(
                env::var("NO_COLOR").ok().as_deref(),
                env::var("ORRERY_COLOR").ok().as_deref(),
            ),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

fn parse_max_width(value: Option<&str>) -> usize {
    match value {
        Some(s) if !s.is_empty() => match s.parse() {
            Ok(width) => width,
            Err(_) => {
                tracing::warn!(
                    env_var = "ORRERY_MAX_WIDTH",
                    value = %s,
                    default = DEFAULT_MAX_CONTENT_WIDTH,
                    "Invalid value, using default"
                );
                DEFAULT_MAX_CONTENT_WIDTH
            }
        },
        _ => DEFAULT_MAX_CONTENT_WIDTH,
    }
}

fn parse_ascii_flag(value: Option<&str>) -> bool {
    match value {
        Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
        Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
        Some(v) => {
            tracing::warn!(
                env_var = "ORRERY_ASCII",
                value = %v,
                "Invalid value (expected '1', 'true', '0', or 'false'), using default"
            );
            false
        }
        None => false,
    }
}

// Respect the NO_COLOR standard (https://no-color.org/); ORRERY_COLOR
// gives explicit control.
fn parse_color_choice(no_color: Option<&str>, orrery_color: Option<&str>) -> bool {
    no_color.is_none()
        && orrery_color
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true)
}

// ============================================================================
// Terminal Width Detection
// ============================================================================

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print a one-line topic summary in the specified format
pub fn print_topic(topic: &TopicNode, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_topic_text(&mut handle, topic, &config),
        OutputMode::Json => print_json_to(&mut handle, topic),
    }
}

/// Print a list of topics in the specified format
pub fn print_topics(topics: &[&TopicNode], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_topics_text(&mut handle, topics, &config),
        OutputMode::Json => print_json_to(&mut handle, &topics),
    }
}

/// Print a topic with full details (for the show command)
pub fn print_topic_details(
    topic: &TopicNode,
    prerequisites: &[&TopicNode],
    dependents: &[&TopicNode],
    mode: OutputMode,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => {
            print_topic_details_text(&mut handle, topic, prerequisites, dependents, &config)
        }
        OutputMode::Json => {
            let json = topic_details_json(topic, prerequisites, dependents);
            print_json_to(&mut handle, &json)
        }
    }
}

/// Print a study path with resolved step names
pub fn print_study_path(graph: &TopicGraph, path: &StudyPath, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_study_path_text(&mut handle, graph, path, &config),
        OutputMode::Json => {
            let steps: Vec<serde_json::Value> = path
                .node_ids
                .iter()
                .map(|id| match graph.node(id) {
                    Some(node) => serde_json::json!({
                        "id": id,
                        "name": node.name,
                        "estimatedTime": node.estimated_time,
                    }),
                    None => serde_json::json!({ "id": id }),
                })
                .collect();
            print_json_to(
                &mut handle,
                &serde_json::json!({
                    "found": true,
                    "nodeIds": path.node_ids,
                    "totalTime": path.total_time,
                    "steps": steps,
                }),
            )
        }
    }
}

/// Print a simple message
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", msg)
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    print_json_to(&mut handle, value)
}

fn print_json_to<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{}", json)
}

// ============================================================================
// Text Formatting
// ============================================================================

fn print_topic_text<W: Write>(
    w: &mut W,
    topic: &TopicNode,
    config: &OutputConfig,
) -> io::Result<()> {
    let time_str = topic
        .estimated_time
        .map(|t| format!(" ({t} min)"))
        .unwrap_or_default();

    writeln!(
        w,
        "{} {}  {}  {}{}",
        colored_status_icon(topic.status, config),
        colorize_id(topic.id.as_str(), config),
        dimmed(&format!("L{}", topic.depth), config),
        topic.name,
        time_str
    )
}

fn print_topics_text<W: Write>(
    w: &mut W,
    topics: &[&TopicNode],
    config: &OutputConfig,
) -> io::Result<()> {
    if topics.is_empty() {
        writeln!(w, "No topics found.")?;
        return Ok(());
    }

    writeln!(w, "Found {} topic(s):", topics.len())?;
    writeln!(w)?;

    for topic in topics {
        print_topic_text(w, topic, config)?;
    }

    Ok(())
}

fn print_topic_details_text<W: Write>(
    w: &mut W,
    topic: &TopicNode,
    prerequisites: &[&TopicNode],
    dependents: &[&TopicNode],
    config: &OutputConfig,
) -> io::Result<()> {
    let terminal_width = get_terminal_width();
    let content_width = terminal_width.min(config.max_width);

    // Header: status icon, ID, and name
    writeln!(
        w,
        "{} {}: {}",
        colored_status_icon(topic.status, config),
        colorize_id(topic.id.as_str(), config),
        topic.name
    )?;

    // Metadata line
    writeln!(
        w,
        "{}  {}    {}  L{}    {}  {}",
        dimmed("Status:", config),
        color::colorize_status(topic.status, config),
        dimmed("Depth:", config),
        topic.depth,
        dimmed("Est:", config),
        topic
            .estimated_time
            .map(|t| format!("{t} min"))
            .unwrap_or_else(|| "-".to_string())
    )?;

    if let Some(minutes) = topic.study_time {
        writeln!(w, "{} {} min", dimmed("Studied:", config), minutes)?;
    }

    if let Some(completed) = topic.completed_date {
        writeln!(
            w,
            "{} {}",
            dimmed("Completed:", config),
            completed.format("%Y-%m-%d %H:%M")
        )?;
    }

    print_optional_section(w, "Notes", &topic.notes, content_width, config)?;

    if !topic.resources.is_empty() {
        writeln!(w)?;
        writeln!(w, "{} ({}):", bold("Resources", config), topic.resources.len())?;
        for resource in &topic.resources {
            writeln!(
                w,
                "  {} {}  {}",
                cyan("→", config),
                resource.title,
                dimmed(&resource.url, config)
            )?;
        }
    }

    if !prerequisites.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{} ({}):",
            bold("Prerequisites", config),
            prerequisites.len()
        )?;
        for prereq in prerequisites {
            writeln!(
                w,
                "  {} {} {}",
                cyan("→", config),
                prereq.name,
                colored_status_icon(prereq.status, config)
            )?;
        }
    }

    if !dependents.is_empty() {
        writeln!(w)?;
        writeln!(w, "{} ({}):", bold("Unlocks", config), dependents.len())?;
        for dependent in dependents {
            writeln!(
                w,
                "  {} {} {}",
                yellow("←", config),
                dependent.name,
                colored_status_icon(dependent.status, config)
            )?;
        }
    }

    Ok(())
}

fn topic_details_json(
    topic: &TopicNode,
    prerequisites: &[&TopicNode],
    dependents: &[&TopicNode],
) -> serde_json::Value {
    let mut json = serde_json::to_value(topic).unwrap_or_default();
    json["prerequisites"] = serde_json::json!(prerequisites
        .iter()
        .map(|n| serde_json::json!({ "id": n.id, "name": n.name, "status": n.status }))
        .collect::<Vec<_>>());
    json["dependents"] = serde_json::json!(dependents
        .iter()
        .map(|n| serde_json::json!({ "id": n.id, "name": n.name, "status": n.status }))
        .collect::<Vec<_>>());
    json
}

fn print_study_path_text<W: Write>(
    w: &mut W,
    graph: &TopicGraph,
    path: &StudyPath,
    config: &OutputConfig,
) -> io::Result<()> {
    let first = path.node_ids.first();
    let last = path.node_ids.last();
    let (Some(first), Some(last)) = (first, last) else {
        writeln!(w, "Empty study path.")?;
        return Ok(());
    };

    let name_of = |id: &orrery_graph::TopicId| {
        graph
            .node(id)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    writeln!(
        w,
        "{} {} {} {}",
        bold("Study path:", config),
        name_of(first),
        if config.use_ascii { "->" } else { "→" },
        name_of(last)
    )?;
    writeln!(
        w,
        "{} step(s), {} min total",
        path.node_ids.len(),
        path.total_time
    )?;
    writeln!(w)?;

    for (i, id) in path.node_ids.iter().enumerate() {
        match graph.node(id) {
            Some(node) => {
                let time_str = node
                    .estimated_time
                    .map(|t| format!(" ({t} min)"))
                    .unwrap_or_default();
                writeln!(
                    w,
                    "  {}. {} {}{}",
                    i + 1,
                    colored_status_icon(node.status, config),
                    node.name,
                    time_str
                )?;
            }
            None => writeln!(w, "  {}. {}", i + 1, colorize_id(id.as_str(), config))?,
        }
    }

    Ok(())
}

/// Print a text section with a bold title and wrapped, indented content.
fn print_text_section<W: Write>(
    w: &mut W,
    title: &str,
    content: &str,
    width: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    if content.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    if config.use_colors {
        writeln!(w, "{}:", title.bold())?;
    } else {
        writeln!(w, "{}:", title)?;
    }
    for line in wrap_text(content, width.saturating_sub(2)) {
        writeln!(w, "  {line}")?;
    }
    Ok(())
}

/// Print an optional text section (only if Some and non-empty).
fn print_optional_section<W: Write>(
    w: &mut W,
    title: &str,
    content: &Option<String>,
    width: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    if let Some(text) = content {
        print_text_section(w, title, text, width, config)?;
    }
    Ok(())
}

/// Wrap text to fit within a given width, preserving existing line breaks.
/// Uses textwrap to handle edge cases like long words (URLs, file paths).
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width)
                    .into_iter()
                    .map(|s| s.into_owned())
                    .collect()
            }
        })
        .collect()
}
