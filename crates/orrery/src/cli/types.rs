//! CLI value enums and domain type conversions.
//!
//! This module contains the value enums used for CLI argument parsing
//! and their conversions to/from domain types.

use clap::ValueEnum;

use crate::session::templates;
use orrery_graph::TopicStatus;

// ============================================================================
// Value Enums
// ============================================================================

/// Topic status for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStatusArg {
    /// In orbit, ready to study
    Orbit,
    /// Completed
    Completed,
    /// Locked behind unfinished prerequisites
    Locked,
}

impl std::fmt::Display for TopicStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Orbit => write!(f, "orbit"),
            Self::Completed => write!(f, "completed"),
            Self::Locked => write!(f, "locked"),
        }
    }
}

/// Built-in syllabus template for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateArg {
    /// React fundamentals
    React,
    /// Web development basics
    Webdev,
    /// Data science with Python
    Datascience,
}

impl TemplateArg {
    /// Get the syllabus text for this template.
    pub fn text(&self) -> &'static str {
        match self {
            Self::React => templates::REACT,
            Self::Webdev => templates::WEBDEV,
            Self::Datascience => templates::DATASCIENCE,
        }
    }
}

impl std::fmt::Display for TemplateArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::React => write!(f, "react"),
            Self::Webdev => write!(f, "webdev"),
            Self::Datascience => write!(f, "datascience"),
        }
    }
}

// ============================================================================
// Domain Type Conversions
// ============================================================================

impl From<TopicStatusArg> for TopicStatus {
    fn from(arg: TopicStatusArg) -> Self {
        match arg {
            TopicStatusArg::Orbit => TopicStatus::Orbit,
            TopicStatusArg::Completed => TopicStatus::Completed,
            TopicStatusArg::Locked => TopicStatus::Locked,
        }
    }
}

impl From<TopicStatus> for TopicStatusArg {
    fn from(s: TopicStatus) -> Self {
        match s {
            TopicStatus::Orbit => TopicStatusArg::Orbit,
            TopicStatus::Completed => TopicStatusArg::Completed,
            TopicStatus::Locked => TopicStatusArg::Locked,
        }
    }
}
