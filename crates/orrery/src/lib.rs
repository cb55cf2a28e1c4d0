//! Orrery - a study path planner for prerequisite-heavy subjects.
//!
//! This crate provides both a CLI application and a thin library around
//! the `orrery-graph` engine: workspace discovery, session persistence,
//! configuration, and text/JSON output formatting.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod app;
pub mod error;
pub mod session;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

// Output formatting
pub mod output;
