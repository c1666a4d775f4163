//! # robotainer-env
//!
//! Environment resolution engine for robotics container builds.
//!
//! Handles:
//! - **Arch**: Normalization of loose architecture spellings.
//! - **Validator**: Supported-value and filesystem checks on the project description.
//! - **Template**: Literal placeholder substitution in image and artifact names.
//! - **Resolver**: Derivation of the full key/value environment for a target.
//! - **Store**: The persisted `KEY=VALUE` hand-off file.
//! - **Volumes**: Bash array encoding of the extra volume list.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod arch;
pub mod environment;
pub mod resolver;
pub mod store;
pub mod template;
pub mod validator;
pub mod volumes;

pub use environment::{ResolvedEnvironment, keys};
pub use resolver::{ResolveRequest, resolve, resolve_to_file};
