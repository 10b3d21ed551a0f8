use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Viewport corner the orientation marker is anchored to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    #[default]
    BottomRight,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orientation Marker", inline)]
#[serde(default)]
/// Placement and sizing of the orientation marker widget.
pub struct OrientationWidgetOptions {
    /// Corner the marker is drawn in.
    #[schemars(title = "Corner")]
    pub corner: Corner,
    /// Marker size as a fraction of the viewport.
    #[schemars(title = "Viewport Size", range(min = 0.05, max = 0.5), extend("step" = 0.01))]
    pub viewport_size: f64,
    /// Lower bound on the marker size in pixels.
    #[schemars(skip)]
    pub min_pixel_size: u32,
    /// Upper bound on the marker size in pixels.
    #[schemars(skip)]
    pub max_pixel_size: u32,
}

impl Default for OrientationWidgetOptions {
    fn default() -> Self {
        Self {
            corner: Corner::BottomRight,
            viewport_size: 0.15,
            min_pixel_size: 100,
            max_pixel_size: 300,
        }
    }
}
