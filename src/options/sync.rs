use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::state::default_stripped_fields;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Camera Sync", inline)]
#[serde(default)]
/// Camera synchronization policy.
pub struct SyncOptions {
    /// Restore the previous camera state when the renderer rejects a field
    /// part-way through applying a model state.
    #[schemars(title = "Atomic Apply")]
    pub atomic_apply: bool,
    /// Renderer fields removed from every exported snapshot.
    #[schemars(skip)]
    pub stripped_fields: Vec<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            atomic_apply: true,
            stripped_fields: default_stripped_fields(),
        }
    }
}
