//! Cross-platform flag selection for docker builds and runs.

use robotainer_common::types::PlatformOption;
use robotainer_env::arch::normalize;

/// Picks the `--platform` flag for a target architecture.
///
/// Only the normalized target is branched on. `source_arch` is accepted so
/// callers pass the full (source, target) pair, and is logged, but a
/// cross-architecture host does not change the selected flag.
pub fn platform_option(target_arch: &str, source_arch: &str) -> PlatformOption {
    let target = normalize(target_arch);
    let source = normalize(source_arch);
    let option = match target.as_str() {
        "develop" | "x86_64" => PlatformOption::Amd64,
        "deploy" | "arm" | "aarch64" => PlatformOption::Arm64,
        "armv7" => PlatformOption::ArmV7,
        _ => PlatformOption::Native,
    };
    tracing::debug!(source = %source, target = %target, platform = %option, "platform option selected");
    option
}
