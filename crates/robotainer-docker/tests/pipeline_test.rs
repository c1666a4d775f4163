//! End-to-end tests for the resolve → persist → assemble → execute pipeline.
//!
//! Each test lays out a throwaway workspace:
//! 1. `<tmp>/robotics_container/config/env.yaml`
//! 2. `<tmp>/robotics_container/docker/Dockerfile.<middleware>`
//! 3. `<tmp>/<project_repo>` plus any extra volume directories
//!
//! and drives an [`Engine`] backed by a recording fake runtime.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use robotainer_common::config::ProjectLayout;
use robotainer_common::error::{ErrorCategory, Result, RobotainerError};
use robotainer_docker::assemble::{RunHost, RunPlan};
use robotainer_docker::backend::{DockerProbe, ExecStatus, ProcessExecutor};
use robotainer_docker::command::CommandLine;
use robotainer_docker::engine::Engine;
use robotainer_env::keys;

// ── Fixtures ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Shared {
    image_present: bool,
    container_up: bool,
    fail_on: Option<&'static str>,
    executed: Vec<String>,
}

#[derive(Clone, Default)]
struct FakeRuntime(Rc<RefCell<Shared>>);

impl DockerProbe for FakeRuntime {
    fn image_exists(&self, _image: &str, _tag: &str) -> Result<bool> {
        Ok(self.0.borrow().image_present)
    }

    fn container_running(&self, _name: &str) -> Result<bool> {
        Ok(self.0.borrow().container_up)
    }
}

impl ProcessExecutor for FakeRuntime {
    fn execute(&self, command: &CommandLine) -> Result<ExecStatus> {
        let mut state = self.0.borrow_mut();
        state.executed.push(command.render());
        let verb = command.args.first().map(String::as_str);
        if verb.is_some() && verb == state.fail_on {
            return Ok(ExecStatus::failed(1));
        }
        Ok(ExecStatus::ok())
    }
}

fn config_yaml(middleware: &str, volumes: &[&Path]) -> String {
    let volumes: Vec<String> = volumes
        .iter()
        .map(|v| format!("  - \"{}\"", v.display()))
        .collect();
    let volumes = if volumes.is_empty() {
        "volumes: []".to_string()
    } else {
        format!("volumes:\n{}", volumes.join("\n"))
    };
    format!(
        r#"repo_author: "Acme"
project_repo: "rover"
{volumes}
container_env:
  container_usr: "ros"
  container_psw: "ros"
  container_uid: 1000
  container_gid: 1000
ros2_distro: "humble"
middleware: "{middleware}"
docker_base_images:
  x86_full_image: "osrf/ros:ROS2_DISTRO-desktop-full"
  arm_base_image: "arm64v8/ros:ROS2_DISTRO-ros-base"
  microros_base_image: "microros/base:ROS2_DISTRO"
docker_file_image_container:
  dockerfile: "Dockerfile.MIDDLEWARE"
  docker_image: "REPO_AUTHOR/PROJECT_REPO-ROS2_DISTRO"
  docker_container: "PROJECT_REPO-TAG"
container_run_cmd: "/bin/bash"
supported:
  architectures: ["develop", "deploy", "x86_64", "aarch64", "arm"]
  middlewares: ["ros2", "micro-ros"]
  ros2_distros: ["humble", "jazzy"]
"#
    )
}

struct Workspace {
    _dir: tempfile::TempDir,
    layout: ProjectLayout,
}

fn workspace(middleware: &str, extra_volumes: &[&str]) -> Workspace {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("robotics_container");
    let layout = ProjectLayout::new(&root);
    fs::create_dir_all(layout.docker_dir()).expect("docker dir");
    fs::create_dir_all(root.join("config")).expect("config dir");
    fs::create_dir_all(dir.path().join("rover")).expect("repo dir");
    fs::write(layout.docker_dir().join(format!("Dockerfile.{middleware}")), "FROM scratch\n")
        .expect("dockerfile");

    let volumes: Vec<_> = extra_volumes.iter().map(|v| dir.path().join(v)).collect();
    for v in &volumes {
        fs::create_dir_all(v).expect("volume dir");
    }
    let refs: Vec<&Path> = volumes.iter().map(|v| v.as_path()).collect();
    fs::write(layout.config_file(), config_yaml(middleware, &refs)).expect("env.yaml");

    Workspace { _dir: dir, layout }
}

fn engine(ws: &Workspace, runtime: &FakeRuntime) -> Engine {
    Engine::with_runtime(ws.layout.clone(), Box::new(runtime.clone()))
}

// ── Generate ─────────────────────────────────────────────────────────

#[test]
fn generate_persists_environment_that_reads_back_identically() {
    let ws = workspace("ros2", &["maps"]);
    let env = engine(&ws, &FakeRuntime::default())
        .generate("develop")
        .expect("generate");

    assert_eq!(env.get(keys::DOCKER_IMAGE), Some("Acme/rover-humble"));
    assert_eq!(env.get(keys::DOCKER_CONTAINER), Some("rover-develop"));
    assert_eq!(env.get(keys::DOCKERFILE), Some("Dockerfile.ros2"));
    assert_eq!(env.get(keys::BASE_IMAGE), Some("osrf/ros:humble-desktop-full"));
    assert_eq!(env.get(keys::BUILD_STAGE), Some("develop-stage"));
    assert_eq!(env.get(keys::TARGET_ARCH), Some("x86_64"));
    assert_eq!(env.get(keys::CONTAINER_WS), Some("/home/ros/rover"));

    let on_disk = fs::read_to_string(ws.layout.env_file()).expect("read .env");
    assert!(on_disk.starts_with("REPO_AUTHOR=Acme\nPROJECT_REPO=rover\n"));
    assert!(on_disk.contains("maps'"));
}

#[test]
fn generate_failure_leaves_no_env_file() {
    let ws = workspace("ros2", &[]);
    let err = engine(&ws, &FakeRuntime::default())
        .generate("sparc")
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert!(!ws.layout.env_file().exists());
}

#[test]
fn generate_without_dockerfile_is_resolution_failure() {
    let ws = workspace("ros2", &[]);
    fs::remove_file(ws.layout.docker_dir().join("Dockerfile.ros2")).expect("remove");
    let err = engine(&ws, &FakeRuntime::default())
        .generate("develop")
        .unwrap_err();
    assert!(matches!(err, RobotainerError::MissingDockerfile { .. }));
    assert_eq!(err.category(), ErrorCategory::Resolution);
}

#[test]
fn micro_ros_on_bare_arch_is_rejected() {
    let ws = workspace("micro-ros", &[]);
    let err = engine(&ws, &FakeRuntime::default())
        .generate("x86_64")
        .unwrap_err();
    assert!(matches!(err, RobotainerError::UnsupportedArchitecture { .. }));
}

// ── Build / Run / Push ───────────────────────────────────────────────

#[test]
fn build_executes_assembled_command() {
    let ws = workspace("ros2", &[]);
    let runtime = FakeRuntime::default();
    let engine = engine(&ws, &runtime);

    let prepared = engine.prepare_build("deploy").expect("prepare");
    assert!(prepared.plan.args.contains(&"--target".to_string()));
    assert!(prepared.plan.args.contains(&"deploy-stage".to_string()));
    assert!(prepared.plan.args.contains(&"--platform=linux/arm64".to_string()));
    engine.execute(&prepared.plan).expect("execute");

    let executed = &runtime.0.borrow().executed;
    assert_eq!(executed.len(), 1);
    assert!(executed[0].starts_with("docker build --pull --rm"));
}

#[test]
fn run_without_image_is_image_not_found() {
    let ws = workspace("ros2", &[]);
    let err = engine(&ws, &FakeRuntime::default())
        .prepare_run("develop", &RunHost::default())
        .unwrap_err();
    assert!(matches!(err, RobotainerError::ImageNotFound { ref image } if image == "Acme/rover-humble:develop"));
    assert_eq!(err.category(), ErrorCategory::Precondition);
}

#[test]
fn run_joins_when_container_is_up() {
    let ws = workspace("ros2", &[]);
    let runtime = FakeRuntime::default();
    {
        let mut state = runtime.0.borrow_mut();
        state.image_present = true;
        state.container_up = true;
    }
    let prepared = engine(&ws, &runtime)
        .prepare_run("develop", &RunHost::default())
        .expect("prepare");
    assert!(matches!(prepared.plan, RunPlan::Join(_)));
}

#[test]
fn run_mounts_configured_volumes_under_container_home() {
    let ws = workspace("ros2", &["datasets"]);
    let runtime = FakeRuntime::default();
    runtime.0.borrow_mut().image_present = true;
    let prepared = engine(&ws, &runtime)
        .prepare_run("develop", &RunHost::default())
        .expect("prepare");
    let RunPlan::Create(cmd) = prepared.plan else {
        panic!("expected a create plan");
    };
    assert!(cmd.args.iter().any(|a| a.ends_with(":/home/ros/datasets:rw")));
    assert!(cmd.args.contains(&"localhost".to_string()));
}

#[test]
fn push_stops_at_first_failed_step() {
    let ws = workspace("ros2", &[]);
    let runtime = FakeRuntime::default();
    runtime.0.borrow_mut().fail_on = Some("push");
    let engine = engine(&ws, &runtime);

    let prepared = engine.prepare_push("develop").expect("prepare");
    assert_eq!(prepared.plan.remote_ref, "ghcr.io/acme/rover-humble:develop");
    let err = engine.execute_all(prepared.plan.commands()).unwrap_err();
    assert!(matches!(err, RobotainerError::ProcessFailed { code: 1, .. }));

    let executed = &runtime.0.borrow().executed;
    assert_eq!(executed.len(), 2);
    assert!(executed[1].starts_with("docker push"));
}

#[test]
fn assembly_uses_persisted_file_not_memory() {
    let ws = workspace("ros2", &[]);
    let engine = engine(&ws, &FakeRuntime::default());
    let _ = engine.generate("develop").expect("generate");

    let content = fs::read_to_string(ws.layout.env_file()).expect("read");
    let stripped: String = content
        .lines()
        .filter(|l| !l.starts_with("DOCKER_IMAGE="))
        .map(|l| format!("{l}\n"))
        .collect();
    fs::write(ws.layout.env_file(), stripped).expect("rewrite");

    let env = engine.load_persisted().expect("load");
    let err = robotainer_docker::assemble::assemble_push(&env).unwrap_err();
    assert!(matches!(err, RobotainerError::MissingRequiredKey { ref key } if key == "DOCKER_IMAGE"));
}
