//! Flat `KEY=VALUE` persistence of a resolved environment.
//!
//! The file at `config/.env` is the hand-off between resolution and the
//! build/run/push commands. One entry per line, in resolution order. Blank
//! lines and lines starting with `#` are skipped on read.

use std::fmt::Write as _;
use std::path::Path;

use robotainer_common::error::{Result, RobotainerError};

use crate::environment::ResolvedEnvironment;

/// Renders `env` in the persisted format.
///
/// # Errors
///
/// Returns `EnvFormat` if a value contains a line break, or a key would not
/// read back as itself.
pub fn render(env: &ResolvedEnvironment, path: &Path) -> Result<String> {
    let mut out = String::new();
    for (key, value) in env.iter() {
        if key.is_empty()
            || key.trim() != key
            || key.starts_with('#')
            || key.contains(['=', '\n', '\r'])
        {
            return Err(format_error(path, 0, format!("invalid key {key:?}")));
        }
        if value.contains(['\n', '\r']) {
            return Err(format_error(
                path,
                0,
                format!("value of {key} contains a line break"),
            ));
        }
        let _ = writeln!(out, "{key}={value}");
    }
    Ok(out)
}

/// Parses the persisted format.
///
/// Lines without `=` are ignored. Keys are trimmed, values are kept
/// verbatim. A repeated key keeps its first value.
pub fn parse(content: &str) -> ResolvedEnvironment {
    let mut env = ResolvedEnvironment::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let _ = env.insert(key.trim(), value);
    }
    env
}

/// Writes `env` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns `EnvFormat` for unrepresentable entries, `Io` on write failure.
pub fn write_env_file(path: &Path, env: &ResolvedEnvironment) -> Result<()> {
    let content = render(env, path)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| RobotainerError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, content).map_err(|e| RobotainerError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), entries = env.len(), "environment written");
    Ok(())
}

/// Reads the persisted environment at `path`.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read.
pub fn read_env_file(path: &Path) -> Result<ResolvedEnvironment> {
    let content = std::fs::read_to_string(path).map_err(|e| RobotainerError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let env = parse(&content);
    tracing::debug!(path = %path.display(), entries = env.len(), "environment loaded");
    Ok(env)
}

fn format_error(path: &Path, line: usize, message: String) -> RobotainerError {
    RobotainerError::EnvFormat {
        path: path.to_path_buf(),
        line,
        message,
    }
}
