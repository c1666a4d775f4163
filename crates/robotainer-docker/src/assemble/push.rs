//! Registry push assembly: tag, push, then drop the local registry tag.

use robotainer_common::constants::REGISTRY;
use robotainer_common::error::Result;
use robotainer_env::{ResolvedEnvironment, keys};

use crate::command::CommandLine;

/// Keys the push commands read.
pub const PUSH_REQUIRED: &[&str] = &[keys::DOCKER_IMAGE, keys::DOCKER_IMAGE_TAG];

/// The three push steps, executed in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushPlan {
    /// Local `image:tag`.
    pub local_ref: String,
    /// Registry reference, lower-cased.
    pub remote_ref: String,
    /// `docker tag local remote`.
    pub tag: CommandLine,
    /// `docker push remote`.
    pub push: CommandLine,
    /// `docker rmi remote`.
    pub remove: CommandLine,
}

impl PushPlan {
    /// The commands in execution order.
    #[must_use]
    pub fn commands(&self) -> [&CommandLine; 3] {
        [&self.tag, &self.push, &self.remove]
    }
}

/// Assembles the push of the resolved image to the registry.
///
/// # Errors
///
/// Returns `MissingRequiredKey` if the image name or tag is absent.
pub fn assemble_push(env: &ResolvedEnvironment) -> Result<PushPlan> {
    env.require_all(PUSH_REQUIRED)?;
    let image = env.require(keys::DOCKER_IMAGE)?;
    let tag = env.require(keys::DOCKER_IMAGE_TAG)?;

    let local_ref = format!("{image}:{tag}");
    let remote_ref = format!("{REGISTRY}/{}:{tag}", image.to_lowercase());

    Ok(PushPlan {
        tag: CommandLine::docker().args(["tag", local_ref.as_str(), remote_ref.as_str()]),
        push: CommandLine::docker().args(["push", remote_ref.as_str()]),
        remove: CommandLine::docker().args(["rmi", remote_ref.as_str()]),
        local_ref,
        remote_ref,
    })
}
