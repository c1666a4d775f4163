//! Command assemblers for `docker build`, `docker run`, and `docker push`.
//!
//! Each assembler reads only the resolved environment. It checks its
//! required keys before anything else, so a missing key fails the command
//! before any process is spawned.

pub mod build;
pub mod push;
pub mod run;

pub use build::{BUILD_REQUIRED, assemble_build};
pub use push::{PUSH_REQUIRED, PushPlan, assemble_push};
pub use run::{RUN_REQUIRED, RunHost, RunPlan, assemble_run};

#[cfg(test)]
pub(crate) mod fixtures {
    use std::cell::RefCell;

    use robotainer_common::error::Result;
    use robotainer_env::ResolvedEnvironment;

    use crate::backend::DockerProbe;

    pub fn resolved_env() -> ResolvedEnvironment {
        [
            ("REPO_AUTHOR", "Acme"),
            ("PROJECT_REPO", "rover"),
            ("LOCAL_WS_PATH", "/work/rover"),
            ("VOLUMES", "('/data/maps' '/opt/my bags')"),
            ("CONTAINER_USR", "ros"),
            ("CONTAINER_PSW", "secret"),
            ("CONTAINER_UID", "1000"),
            ("CONTAINER_GID", "1001"),
            ("CONTAINER_HOME", "/home/ros"),
            ("CONTAINER_WS", "/home/ros/rover"),
            ("CONTAINER_RUN_CMD", "/bin/bash"),
            ("BASE_IMAGE", "osrf/ros:humble-desktop-full"),
            ("BUILD_STAGE", "develop-stage"),
            ("TARGET_ARCH", "x86_64"),
            ("SOURCE_ARCH", "x86_64"),
            ("DOCKERFILE", "Dockerfile.ros2"),
            ("DOCKER_IMAGE", "Acme/rover-humble"),
            ("DOCKER_CONTAINER", "rover-develop"),
            ("DOCKER_IMAGE_TAG", "develop"),
        ]
        .into_iter()
        .collect()
    }

    pub fn without(env: &ResolvedEnvironment, key: &str) -> ResolvedEnvironment {
        env.iter().filter(|(k, _)| *k != key).collect()
    }

    /// Probe with fixed answers that records every query.
    #[derive(Default)]
    pub struct FakeProbe {
        pub image_present: bool,
        pub container_up: bool,
        pub queries: RefCell<Vec<String>>,
    }

    impl DockerProbe for FakeProbe {
        fn image_exists(&self, image: &str, tag: &str) -> Result<bool> {
            self.queries.borrow_mut().push(format!("image {image}:{tag}"));
            Ok(self.image_present)
        }

        fn container_running(&self, name: &str) -> Result<bool> {
            self.queries.borrow_mut().push(format!("container {name}"));
            Ok(self.container_up)
        }
    }
}
