//! View configuration with TOML preset support.
//!
//! Orientation-marker placement, scene import timing, and camera sync
//! policy are consolidated here. Options serialize to/from TOML so hosts can
//! ship presets alongside their scenes.

mod orientation;
mod scene;
mod sync;

use std::path::Path;

pub use orientation::{Corner, OrientationWidgetOptions};
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use sync::SyncOptions;

use crate::error::ViewSyncError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[scene]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct ViewOptions {
    /// Orientation marker placement.
    pub orientation_widget: OrientationWidgetOptions,
    /// Scene import timing.
    pub scene: SceneOptions,
    /// Camera synchronization policy.
    pub sync: SyncOptions,
}

impl ViewOptions {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ViewOptions)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ViewSyncError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, ViewSyncError> {
        toml::from_str(content)
            .map_err(|e| ViewSyncError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ViewSyncError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewSyncError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = ViewOptions::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: ViewOptions = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[orientation_widget]
corner = "top_left"
viewport_size = 0.2
"#;
        let opts = ViewOptions::from_toml(toml_str).unwrap();
        assert_eq!(opts.orientation_widget.corner, Corner::TopLeft);
        assert_eq!(opts.orientation_widget.viewport_size, 0.2);
        // Everything else should be default
        assert_eq!(opts.orientation_widget.min_pixel_size, 100);
        assert_eq!(opts.scene.ready_debounce_ms, 100);
        assert!(opts.sync.atomic_apply);
        assert_eq!(opts.sync.stripped_fields.len(), 4);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err =
            ViewOptions::from_toml("[scene]\nready_debounce_ms = \"soon\"")
                .unwrap_err();
        assert!(matches!(err, ViewSyncError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!(
            "viewsync-options-{}",
            std::process::id()
        ));
        let path = dir.join("preset.toml");
        let mut opts = ViewOptions::default();
        opts.scene.ready_debounce_ms = 250;
        opts.sync.atomic_apply = false;
        opts.save(&path).unwrap();
        let loaded = ViewOptions::load(&path).unwrap();
        assert_eq!(opts, loaded);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(ViewOptions::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("orientation_widget"));
        assert!(props.contains_key("scene"));
        assert!(props.contains_key("sync"));

        // Skipped fields should be absent
        let widget = &props["orientation_widget"]["properties"];
        assert!(widget.get("viewport_size").is_some());
        assert!(widget.get("min_pixel_size").is_none());
        let sync = &props["sync"]["properties"];
        assert!(sync.get("atomic_apply").is_some());
        assert!(sync.get("stripped_fields").is_none());
    }
}
