//! Crate-level error types.

use std::fmt;

/// Errors produced by the viewsync crate.
#[derive(Debug)]
pub enum ViewSyncError {
    /// Camera position coincides with its focal point, so no look
    /// direction exists.
    DegenerateCamera {
        /// Measured position-to-focal-point distance.
        distance: f64,
    },
    /// Externally supplied camera state is missing fields or carries
    /// non-numeric / non-finite values.
    InvalidCameraState(String),
    /// Orientation widget delivered a direction that names no axis.
    InvalidAxisRequest(String),
    /// Scene payload could not be decoded or imported.
    SceneLoad(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for ViewSyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateCamera { distance } => write!(
                f,
                "degenerate camera: position is {distance} from focal point"
            ),
            Self::InvalidCameraState(msg) => {
                write!(f, "invalid camera state: {msg}")
            }
            Self::InvalidAxisRequest(msg) => {
                write!(f, "invalid axis request: {msg}")
            }
            Self::SceneLoad(msg) => write!(f, "scene load error: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ViewSyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ViewSyncError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ViewSyncError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidCameraState(e.to_string())
    }
}
