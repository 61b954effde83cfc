//! Scene frame records as exchanged with the backend

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{ClientError, Result};

/// One representative image of a detected scene
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Frame {
    /// Base64-encoded JPEG payload
    pub data: String,

    /// Offset from the start of the video in seconds
    pub timestamp: f64,

    /// Source frame number in the decoded video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,

    /// Sharpness score the backend used to pick this frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarity: Option<f64>,

    /// Scene change score that triggered this frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_rate: Option<f64>,
}

impl Frame {
    pub fn new(data: impl Into<String>, timestamp: f64) -> Self {
        Self {
            data: data.into(),
            timestamp,
            index: None,
            clarity: None,
            change_rate: None,
        }
    }

    /// Timestamp as whole seconds, e.g. `12.9` -> `"12s"`
    pub fn display_timestamp(&self) -> String {
        format!("{}s", self.timestamp.floor() as u64)
    }

    /// Inline image URI for the payload
    pub fn data_uri(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.data)
    }

    /// Decode the image bytes. Accepts raw base64 or a `data:` URI.
    pub fn decode_image(&self) -> Result<Vec<u8>> {
        let payload = match self.data.split_once(',') {
            Some((_, encoded)) => encoded,
            None => self.data.as_str(),
        };

        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| ClientError::Validation(format!("frame payload is not base64: {}", e)))
    }

    /// Check the fields the backend must provide
    pub(crate) fn check(&self) -> std::result::Result<(), String> {
        if !self.timestamp.is_finite() || self.timestamp < 0.0 {
            return Err(format!("invalid timestamp {}", self.timestamp));
        }
        Ok(())
    }
}

/// Decode frames into `dir/scene_N.jpg` (1-based).
///
/// Frames whose payload does not decode are skipped with a warning.
pub async fn write_thumbnails(frames: &[Frame], dir: &Path) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir).await?;

    let mut written = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        let bytes = match frame.decode_image() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping scene {}: {}", i + 1, e);
                continue;
            }
        };

        let path = dir.join(format!("scene_{}.jpg", i + 1));
        tokio::fs::write(&path, bytes).await?;
        debug!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_timestamp_truncates() {
        assert_eq!(Frame::new("AAAA", 0.4).display_timestamp(), "0s");
        assert_eq!(Frame::new("BBBB", 12.9).display_timestamp(), "12s");
        assert_eq!(Frame::new("CCCC", 60.0).display_timestamp(), "60s");
    }

    #[test]
    fn test_data_uri() {
        assert_eq!(Frame::new("AAAA", 1.0).data_uri(), "data:image/jpeg;base64,AAAA");
    }

    #[test]
    fn test_decode_image() {
        let frame = Frame::new("aGVsbG8=", 1.0);
        assert_eq!(frame.decode_image().unwrap(), b"hello");

        let uri = Frame::new("data:image/jpeg;base64,aGVsbG8=", 1.0);
        assert_eq!(uri.decode_image().unwrap(), b"hello");

        let bad = Frame::new("not base64!", 1.0);
        assert!(matches!(bad.decode_image(), Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_optional_fields_skipped_on_wire() {
        let frame = Frame::new("BBBB", 12.9);
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json, serde_json::json!({"data": "BBBB", "timestamp": 12.9}));
    }

    #[test]
    fn test_backend_extras_round_trip() {
        let json = r#"{"data":"AAAA","timestamp":3.5,"index":104,"clarity":812.5,"change_rate":0.31}"#;
        let frame: Frame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.index, Some(104));
        assert_eq!(frame.clarity, Some(812.5));

        let back = serde_json::to_value(&frame).unwrap();
        assert_eq!(back["change_rate"], 0.31);
    }

    #[tokio::test]
    async fn test_write_thumbnails_skips_bad_payloads() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let frames = vec![
            Frame::new("aGVsbG8=", 0.0),
            Frame::new("%%%", 1.0),
            Frame::new("d29ybGQ=", 2.0),
        ];

        let written = write_thumbnails(&frames, temp_dir.path()).await.unwrap();
        assert_eq!(
            written,
            vec![temp_dir.path().join("scene_1.jpg"), temp_dir.path().join("scene_3.jpg")]
        );
        assert_eq!(tokio::fs::read(&written[1]).await.unwrap(), b"world");
    }

    #[test]
    fn test_check_rejects_negative_timestamp() {
        assert!(Frame::new("AAAA", -1.0).check().is_err());
        assert!(Frame::new("AAAA", f64::NAN).check().is_err());
        assert!(Frame::new("AAAA", 0.0).check().is_ok());
    }
}
