use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Scene import parameters.
pub struct SceneOptions {
    /// Quiet period after the last importer ready callback before the
    /// view redraws, in milliseconds.
    #[schemars(title = "Ready Debounce (ms)", range(min = 0, max = 2000))]
    pub ready_debounce_ms: u64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            ready_debounce_ms: 100,
        }
    }
}
