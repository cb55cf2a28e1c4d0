//! Common test utilities shared across integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Get the workspace root directory
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // Go up from crates/orrery to workspace root
    manifest_dir
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Helper that builds the binary once and runs it directly
pub fn get_orrery_binary() -> PathBuf {
    let workspace = workspace_root();

    // Build the binary first (this should be quick if already built)
    let status = Command::new("cargo")
        .args(["build", "--package", "orrery", "--quiet"])
        .current_dir(&workspace)
        .status()
        .expect("Failed to build orrery");

    assert!(status.success(), "Failed to build orrery binary");

    workspace.join("target/debug/orrery")
}

/// Run the orrery binary directly in the specified directory
pub fn run_orrery_in_dir(dir: &Path, args: &[&str]) -> Output {
    let binary = get_orrery_binary();

    Command::new(&binary)
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute orrery binary")
}

/// Initialize a workspace in the given directory, asserting success
#[allow(dead_code)]
pub fn init_workspace(dir: &Path) {
    let output = run_orrery_in_dir(dir, &["init", "--quiet"]);
    assert!(
        output.status.success(),
        "Failed to initialize orrery: {:?}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Load the built-in React template into an initialized workspace
#[allow(dead_code)]
pub fn load_react_template(dir: &Path) {
    let output = run_orrery_in_dir(dir, &["load", "--template", "react"]);
    assert!(
        output.status.success(),
        "Failed to load template: {:?}",
        String::from_utf8_lossy(&output.stderr)
    );
}
