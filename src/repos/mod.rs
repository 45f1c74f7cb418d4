pub mod compose;
pub mod store;

use serde::{Deserialize, Serialize};

/// Schema version written by this build.
pub const CURRENT_VERSION: u32 = 1;

/// The persisted state: which directories gopaths manages and what GOPATH
/// looked like before it started managing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    #[serde(default)]
    pub version: u32,
    /// `None` until the first capture; an empty string means GOPATH was unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_path_value: Option<String>,
    #[serde(default)]
    pub managed_paths: Vec<String>,
    #[serde(default)]
    pub disabled_paths: Vec<String>,
}

impl Default for RepoRecord {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            baseline_path_value: None,
            managed_paths: Vec::new(),
            disabled_paths: Vec::new(),
        }
    }
}

impl RepoRecord {
    pub fn baseline(&self) -> &str {
        self.baseline_path_value.as_deref().unwrap_or_default()
    }

    pub fn is_disabled(&self, path: &str) -> bool {
        self.disabled_paths.iter().any(|p| p == path)
    }

    /// Managed paths that take part in composition, in insertion order.
    pub fn active_paths(&self) -> impl Iterator<Item = &str> {
        self.managed_paths
            .iter()
            .map(String::as_str)
            .filter(|p| !self.is_disabled(p))
    }

    /// Record `value` as the baseline unless one was already captured.
    ///
    /// Returns whether the record changed.
    pub fn capture_baseline(&mut self, value: &str) -> bool {
        if self.baseline_path_value.is_some() {
            return false;
        }
        self.baseline_path_value = Some(value.to_string());
        true
    }
}
