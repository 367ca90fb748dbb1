//! Node string parameters and explicit patches against them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// String parameters of a node, keyed by parameter name.
///
/// A missing key reads as the empty string; callers cannot distinguish
/// "unset" from "explicitly empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigMap(BTreeMap<String, String>);

impl ConfigMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `key`, or `""` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or_default()
    }

    /// Returns true if `key` is absent or empty.
    pub fn is_empty_value(&self, key: &str) -> bool {
        self.get(key).is_empty()
    }

    /// Set `key` to `value`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`ConfigMap::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Write every entry of `patch` into this map.
    pub fn apply(&mut self, patch: ConfigPatch) {
        for (key, value) in patch.0 {
            debug!(%key, "applying derived parameter");
            self.0.insert(key, value);
        }
    }

    /// Returns true if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Values derived from a [`ConfigMap`] that should be written back into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch(BTreeMap<String, String>);

impl ConfigPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a write of `value` to `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value the patch writes to `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true if the patch writes nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_reads_empty() {
        let config = ConfigMap::new().with("port", "30303");
        assert_eq!(config.get("port"), "30303");
        assert_eq!(config.get("rpcport"), "");
        assert!(config.is_empty_value("rpcport"));
    }

    #[test]
    fn test_apply_patch_overwrites() {
        let mut config = ConfigMap::new().with("db_host", "");
        let mut patch = ConfigPatch::new();
        patch.set("db_host", "postgres://a:b@host:5432");

        config.apply(patch);
        assert_eq!(config.get("db_host"), "postgres://a:b@host:5432");
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let config: ConfigMap =
            serde_json::from_str(r#"{"subtype":"fullnode","port":"30303"}"#).unwrap();
        assert_eq!(config.get("subtype"), "fullnode");
    }
}
