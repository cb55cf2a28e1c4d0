//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Ready/Orbit:   blue    (topics whose prerequisites are met)
//!   - Success/Done:  green   (completed topics, successful actions)
//!   - Blocked:       red     (locked topics)
//!   - Info/Reference: cyan   (topic IDs, tree root, prerequisite arrows)
//!   - Active:        yellow  (unlock arrows, warnings)
//!   - Muted:         dimmed  (field labels, connectors, depth markers)
//!   - Emphasis:      bold    (section headers)

use colored::Colorize;
use orrery_graph::TopicStatus;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Apply color to status text based on topic status.
pub(crate) fn colorize_status(status: TopicStatus, config: &OutputConfig) -> String {
    let text = format!("{status}");
    if !config.use_colors {
        return text;
    }
    match status {
        TopicStatus::Orbit => text.blue().to_string(),
        TopicStatus::Completed => text.green().to_string(),
        TopicStatus::Locked => text.red().to_string(),
    }
}

/// Colorize a topic ID (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Get a status icon for topics, with ASCII fallback support.
pub(crate) fn status_icon(status: TopicStatus, config: &OutputConfig) -> &'static str {
    if config.use_ascii {
        match status {
            TopicStatus::Orbit => "o",
            TopicStatus::Completed => "+",
            TopicStatus::Locked => "x",
        }
    } else {
        match status {
            TopicStatus::Orbit => "○",
            TopicStatus::Completed => "✓",
            TopicStatus::Locked => "●",
        }
    }
}

/// Get a colored status icon, with ASCII fallback support.
pub(crate) fn colored_status_icon(status: TopicStatus, config: &OutputConfig) -> String {
    let icon = status_icon(status, config);
    if !config.use_colors {
        return icon.to_string();
    }
    match status {
        TopicStatus::Orbit => icon.blue().to_string(),
        TopicStatus::Completed => icon.green().to_string(),
        TopicStatus::Locked => icon.red().to_string(),
    }
}

/// Get the tree root icon, with ASCII fallback support.
pub(crate) fn root_icon(config: &OutputConfig) -> &'static str {
    if config.use_ascii {
        "*"
    } else {
        "◆"
    }
}

/// Get a colored tree root icon (cyan, bold).
pub(crate) fn colored_root_icon(config: &OutputConfig) -> String {
    let icon = root_icon(config);
    if !config.use_colors {
        return icon.to_string();
    }
    icon.cyan().bold().to_string()
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Apply cyan color to text (for arrows/connectors).
pub(crate) fn cyan(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Apply yellow color to text (for arrows/connectors).
pub(crate) fn yellow(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}
