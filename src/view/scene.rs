//! Scene payload decoding and import-ready debouncing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use web_time::{Duration, Instant};

use crate::error::ViewSyncError;

/// Local file header and empty-archive signatures of a zip file.
const ZIP_SIGNATURES: [&[u8; 4]; 2] = [b"PK\x03\x04", b"PK\x05\x06"];

/// Compressed scene archive handed to the importer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneArchive {
    bytes: Vec<u8>,
}

impl SceneArchive {
    /// Wrap already-decoded archive bytes.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Decode the model's base64 `data` property. Surrounding whitespace
    /// is ignored.
    pub fn decode(data: &str) -> Result<Self, ViewSyncError> {
        STANDARD
            .decode(data.trim())
            .map(Self::from_bytes)
            .map_err(|e| {
                ViewSyncError::SceneLoad(format!("invalid base64: {e}"))
            })
    }

    /// Whether the payload starts with a zip signature.
    #[must_use]
    pub fn is_zip(&self) -> bool {
        ZIP_SIGNATURES
            .iter()
            .any(|sig| self.bytes.starts_with(sig.as_slice()))
    }

    /// Raw archive bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Archive size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the archive holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Trailing-edge debounce for importer ready callbacks.
///
/// Each [`schedule`](Self::schedule) pushes the deadline out by `delay`;
/// [`poll`](Self::poll) fires once after the callbacks go quiet.
#[derive(Debug, Clone)]
pub struct ReadyDebounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl ReadyDebounce {
    /// Debounce with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record a ready callback at `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Whether a callback is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once when the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base64_zip_payload() {
        let encoded = STANDARD.encode(b"PK\x03\x04index.json");
        let archive = SceneArchive::decode(&format!("  {encoded}\n")).unwrap();
        assert!(archive.is_zip());
        assert_eq!(archive.len(), 14);
        assert_eq!(&archive.as_bytes()[..2], b"PK");
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = SceneArchive::decode("not*base64!").unwrap_err();
        assert!(matches!(err, ViewSyncError::SceneLoad(_)));
    }

    #[test]
    fn non_zip_bytes_are_detected() {
        let archive = SceneArchive::from_bytes(b"{\"scene\": []}".to_vec());
        assert!(!archive.is_zip());
        assert!(!SceneArchive::from_bytes(Vec::new()).is_zip());
    }

    #[test]
    fn debounce_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debounce = ReadyDebounce::new(Duration::from_millis(100));
        assert!(!debounce.poll(start));

        debounce.schedule(start);
        debounce.schedule(start + Duration::from_millis(60));
        assert!(!debounce.poll(start + Duration::from_millis(120)));
        assert!(debounce.is_pending());
        assert!(debounce.poll(start + Duration::from_millis(160)));
        assert!(!debounce.poll(start + Duration::from_millis(500)));
        assert!(!debounce.is_pending());
    }
}
