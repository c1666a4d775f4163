//! Architecture token normalization.

use robotainer_common::types::CanonicalArch;

/// Maps a loose architecture spelling to its canonical token.
///
/// The token is trimmed and lower-cased. `arm64` becomes `aarch64`, every
/// `armv7*` spelling becomes `armv7`, anything else passes through. Unknown
/// tokens are not rejected here.
pub fn normalize(token: &str) -> CanonicalArch {
    let lowered = token.trim().to_lowercase();
    let canonical = if lowered == "arm64" {
        "aarch64".to_string()
    } else if lowered.starts_with("armv7") {
        "armv7".to_string()
    } else {
        lowered
    };
    CanonicalArch::new(canonical)
}

/// Normalized architecture of the machine running this process.
pub fn host_arch() -> CanonicalArch {
    normalize(std::env::consts::ARCH)
}
