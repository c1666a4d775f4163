//! Formatted output helpers for CLI commands.
//!
//! Human-facing lines go to stderr; machine output (`--dry-run` commands,
//! JSON) goes to stdout.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::Path;

use robotainer_docker::command::CommandLine;
use robotainer_env::{ResolvedEnvironment, keys};

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

const UNSET: &str = "-";

/// Renders the project, image, and container summary of `env`.
#[must_use]
pub fn format_summary(env: &ResolvedEnvironment) -> String {
    let get = |key| env.get(key).unwrap_or(UNSET);
    let rows = [
        ("Project", format!("{} ({})", get(keys::PROJECT_REPO), get(keys::REPO_AUTHOR))),
        (
            "Image",
            format!("{}:{}", get(keys::DOCKER_IMAGE), get(keys::DOCKER_IMAGE_TAG)),
        ),
        ("Container", get(keys::DOCKER_CONTAINER).to_string()),
        (
            "Stage",
            format!("{} [{}]", get(keys::BUILD_STAGE), get(keys::TARGET_ARCH)),
        ),
        ("Base", get(keys::BASE_IMAGE).to_string()),
        (
            "Workspace",
            format!("{} -> {}", get(keys::LOCAL_WS_PATH), get(keys::CONTAINER_WS)),
        ),
    ];
    rows.iter()
        .map(|(label, value)| format!("  {label:<10} {value}\n"))
        .collect()
}

/// Prints [`format_summary`] to stderr.
pub fn print_summary(env: &ResolvedEnvironment) {
    eprintln!();
    for line in format_summary(env).lines() {
        eprintln!("{BOLD}{line}{RESET}");
    }
    eprintln!();
}

/// Reports where the environment was persisted.
pub fn print_written(path: &Path) {
    eprintln!("  {GREEN}wrote{RESET} {}", path.display());
}

/// Prints an informational note.
pub fn print_note(message: &str) {
    eprintln!("  {CYAN}note:{RESET} {message}");
}

/// Prints a command that `--dry-run` suppressed.
pub fn print_command(command: &CommandLine) {
    eprintln!("  {DIM}dry run, not executed:{RESET}");
    println!("{}", command.render());
}

/// Prints a JSON document to stdout.
pub fn print_json(json: &str) {
    println!("{json}");
}

/// Serializes `env` as a pretty JSON object.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(env: &ResolvedEnvironment) -> serde_json::Result<String> {
    serde_json::to_string_pretty(env)
}
