//! Integration Test: Core Independence
//!
//! **Policy**: `summarizer-core` is UI-agnostic and fully async.
//! - No terminal or UI crates in its dependencies
//! - No binary-only crates (argument parsing, subscriber setup)
//! - No `reqwest::blocking`

use std::fs;

use architectural_enforcement::{find_violations, workspace_root};

const FORBIDDEN_DEPENDENCIES: &[&str] = &[
    "ratatui",
    "crossterm",
    "clap",
    "tracing-subscriber",
    "anyhow",
];

/// Dependency names in the `[dependencies]` table only
fn runtime_dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();
    for line in manifest.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if in_dependencies && !line.is_empty() && !line.starts_with('#') {
            if let Some((name, _)) = line.split_once('=') {
                names.push(name.trim().to_string());
            }
        }
    }
    names
}

#[test]
fn test_core_has_no_ui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("summarizer/core/Cargo.toml"))
        .expect("core manifest should exist");

    let deps = runtime_dependencies(&manifest);
    assert!(deps.contains(&"tokio".to_string()), "manifest parse failed: {deps:?}");

    let offending: Vec<&String> = deps
        .iter()
        .filter(|d| FORBIDDEN_DEPENDENCIES.contains(&d.as_str()))
        .collect();
    assert!(
        offending.is_empty(),
        "summarizer-core must stay UI-agnostic, found: {offending:?}"
    );
}

#[test]
fn test_core_uses_async_http_only() {
    let violations = find_violations("summarizer/core/src", &["reqwest::blocking"]);
    assert!(
        violations.is_empty(),
        "Blocking HTTP in the client core:\n{}",
        violations.join("\n")
    );
}
