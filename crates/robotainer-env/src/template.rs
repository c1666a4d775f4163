//! Literal placeholder substitution for image and artifact name templates.
//!
//! Templates are scanned for runs of `[A-Z0-9_]`, e.g. `ROS2_DISTRO` in
//! `osrf/ros:ROS2_DISTRO-desktop-full` or `PROJECT_REPO_TAG` in a container
//! name. Inside a run, known placeholders are matched longest first on `_`
//! boundaries. A remaining segment of three or more characters starting with
//! an upper-case letter is an unresolved placeholder and fails the
//! substitution.

use robotainer_common::error::{Result, RobotainerError};

const MIN_PLACEHOLDER_LEN: usize = 3;

/// Placeholder token to value pairs.
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    pairs: Vec<(&'static str, String)>,
}

impl Substitutions {
    /// Creates an empty substitution table.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Adds a placeholder and its replacement.
    #[must_use]
    pub fn with(mut self, placeholder: &'static str, value: impl Into<String>) -> Self {
        self.pairs.push((placeholder, value.into()));
        self
    }

    /// Longest placeholder that `rest` starts with, ending at `_` or the end.
    fn longest_match(&self, rest: &str) -> Option<(&'static str, &str)> {
        self.pairs
            .iter()
            .filter(|(k, _)| {
                rest.strip_prefix(*k)
                    .is_some_and(|tail| tail.is_empty() || tail.starts_with('_'))
            })
            .max_by_key(|(k, _)| k.len())
            .map(|(k, v)| (*k, v.as_str()))
    }
}

const fn is_token_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'
}

/// Replaces every placeholder in `template`.
///
/// Replaced values are not scanned again. `field` names the configuration
/// entry in error messages.
///
/// # Errors
///
/// Returns `TemplateSubstitution` for the first placeholder that has no
/// entry in `subs`.
pub fn substitute(field: &'static str, template: &str, subs: &Substitutions) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(is_token_char) {
        out.push_str(&rest[..start]);
        let run_len = rest[start..]
            .find(|c: char| !is_token_char(c))
            .unwrap_or(rest.len() - start);
        let run = &rest[start..start + run_len];
        out.push_str(&expand_run(field, template, run, subs)?);
        rest = &rest[start + run_len..];
    }
    out.push_str(rest);

    tracing::debug!(field, template, resolved = %out, "template substituted");
    Ok(out)
}

fn expand_run(
    field: &'static str,
    template: &str,
    run: &str,
    subs: &Substitutions,
) -> Result<String> {
    let mut out = String::with_capacity(run.len());
    let mut i = 0;

    while i < run.len() {
        let rest = &run[i..];
        if rest.starts_with('_') {
            out.push('_');
            i += 1;
            continue;
        }
        if let Some((key, value)) = subs.longest_match(rest) {
            out.push_str(value);
            i += key.len();
            continue;
        }
        let segment = &rest[..rest.find('_').unwrap_or(rest.len())];
        if is_candidate(segment) {
            return Err(RobotainerError::TemplateSubstitution {
                field,
                template: template.to_string(),
                placeholder: run.trim_matches('_').to_string(),
            });
        }
        out.push_str(segment);
        i += segment.len();
    }

    Ok(out)
}

fn is_candidate(segment: &str) -> bool {
    segment.len() >= MIN_PLACEHOLDER_LEN && segment.starts_with(|c: char| c.is_ascii_uppercase())
}
