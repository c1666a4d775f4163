//! The ordered key/value mapping produced by resolution.

use serde::ser::{Serialize, SerializeMap, Serializer};

use robotainer_common::error::{Result, RobotainerError};

/// Keys written by the resolver, grouped by stratum in merge order.
pub mod keys {
    /// Repository owner.
    pub const REPO_AUTHOR: &str = "REPO_AUTHOR";
    /// Project repository name.
    pub const PROJECT_REPO: &str = "PROJECT_REPO";

    /// Host path of the project repository.
    pub const LOCAL_WS_PATH: &str = "LOCAL_WS_PATH";
    /// Extra volumes as a bash array literal.
    pub const VOLUMES: &str = "VOLUMES";

    /// Container user.
    pub const CONTAINER_USR: &str = "CONTAINER_USR";
    /// Container password.
    pub const CONTAINER_PSW: &str = "CONTAINER_PSW";
    /// Container user id.
    pub const CONTAINER_UID: &str = "CONTAINER_UID";
    /// Container group id.
    pub const CONTAINER_GID: &str = "CONTAINER_GID";
    /// Container home directory.
    pub const CONTAINER_HOME: &str = "CONTAINER_HOME";
    /// Container workspace directory.
    pub const CONTAINER_WS: &str = "CONTAINER_WS";
    /// Command run on container creation.
    pub const CONTAINER_RUN_CMD: &str = "CONTAINER_RUN_CMD";

    /// Resolved base image.
    pub const BASE_IMAGE: &str = "BASE_IMAGE";
    /// Dockerfile stage.
    pub const BUILD_STAGE: &str = "BUILD_STAGE";
    /// Resolved target architecture class.
    pub const TARGET_ARCH: &str = "TARGET_ARCH";
    /// Host architecture.
    pub const SOURCE_ARCH: &str = "SOURCE_ARCH";

    /// Dockerfile name.
    pub const DOCKERFILE: &str = "DOCKERFILE";
    /// Image repository name.
    pub const DOCKER_IMAGE: &str = "DOCKER_IMAGE";
    /// Container name.
    pub const DOCKER_CONTAINER: &str = "DOCKER_CONTAINER";
    /// Image tag.
    pub const DOCKER_IMAGE_TAG: &str = "DOCKER_IMAGE_TAG";

    /// X display forwarded to the container (optional).
    pub const DISPLAY: &str = "DISPLAY";
    /// Container hostname (optional).
    pub const HOSTNAME: &str = "HOSTNAME";
}

/// Insertion-ordered string mapping.
///
/// Once a key is present its value is never replaced by a later insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    entries: Vec<(String, String)>,
}

impl ResolvedEnvironment {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts `key` unless it is already present.
    ///
    /// Returns `false` when the key existed and the value was discarded.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains(&key) {
            tracing::debug!(key = %key, "duplicate key ignored");
            return false;
        }
        self.entries.push((key, value.into()));
        true
    }

    /// Appends every entry of `stratum` that is not already present.
    pub fn merge(&mut self, stratum: Self) {
        for (k, v) in stratum.entries {
            let _ = self.insert(k, v);
        }
    }

    /// Looks up a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Looks up a value that a command needs.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredKey` naming `key` if it is absent.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| RobotainerError::MissingRequiredKey {
                key: key.to_string(),
            })
    }

    /// Checks that every key in `required` is present, in order.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredKey` for the first absent key.
    pub fn require_all(&self, required: &[&str]) -> Result<()> {
        required.iter().try_for_each(|k| self.require(k).map(|_| ()))
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResolvedEnvironment {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut env = Self::new();
        for (k, v) in iter {
            let _ = env.insert(k, v);
        }
        env
    }
}

impl Serialize for ResolvedEnvironment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_value() {
        let mut env = ResolvedEnvironment::new();
        assert!(env.insert("TAG", "develop"));
        assert!(!env.insert("TAG", "deploy"));
        assert_eq!(env.get("TAG"), Some("develop"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn merge_preserves_order_and_earlier_strata() {
        let mut env: ResolvedEnvironment = [("A", "1"), ("B", "2")].into_iter().collect();
        env.merge([("B", "overwritten"), ("C", "3")].into_iter().collect());
        let pairs: Vec<_> = env.iter().collect();
        assert_eq!(pairs, vec![("A", "1"), ("B", "2"), ("C", "3")]);
    }

    #[test]
    fn require_names_missing_key() {
        let env: ResolvedEnvironment = [(keys::DOCKER_IMAGE_TAG, "develop")].into_iter().collect();
        let err = env
            .require_all(&[keys::DOCKER_IMAGE_TAG, keys::DOCKER_IMAGE])
            .unwrap_err();
        assert!(matches!(
            err,
            RobotainerError::MissingRequiredKey { ref key } if key == "DOCKER_IMAGE"
        ));
    }
}
