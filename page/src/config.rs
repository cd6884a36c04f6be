//! Store configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a resource store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the resource, attached to log events.
    pub resource_name: String,
    /// Verify structural invariants before publishing each revision.
    pub verify_on_commit: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            resource_name: "resource".to_string(),
            verify_on_commit: cfg!(debug_assertions),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = name.into();
        self
    }

    pub fn with_verify_on_commit(mut self, verify: bool) -> Self {
        self.verify_on_commit = verify;
        self
    }

    /// Configuration that always verifies on commit.
    pub fn strict() -> Self {
        Self::default().with_verify_on_commit(true)
    }
}
