//! Docker command assembly and runtime collaborators for Robotainer.
//!
//! - [`platform`]: `--platform` flag selection.
//! - [`assemble`]: build/run/push command assemblers.
//! - [`backend`]: probe and executor seams, and their `docker` CLI implementation.
//! - [`engine`]: resolve, persist, assemble, and execute in one place.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod assemble;
pub mod backend;
pub mod command;
pub mod engine;
pub mod platform;
