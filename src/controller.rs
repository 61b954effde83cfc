use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::backend::{AnalyzeResponse, SceneBackend};
use crate::frame::Frame;
use crate::session::Session;
use crate::source::normalize_url;
use crate::{ClientError, Result};

pub const SELECTED_ARCHIVE_NAME: &str = "selected_scenes.zip";
pub const ALL_ARCHIVE_NAME: &str = "all_scenes.zip";

/// Zip archive returned by the backend, ready to be saved
#[derive(Debug, Clone, PartialEq)]
pub struct SceneArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SceneArchive {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the archive as `dir/<file_name>`, creating `dir` if needed
    pub async fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        info!("💾 Saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Owns the backend connection and the current session.
///
/// One controller per run; a successful `analyze` replaces the session and its
/// selection wholesale, a failed one leaves it untouched.
pub struct SceneController<B: SceneBackend> {
    backend: B,
    session: Option<Session>,
}

impl<B: SceneBackend> SceneController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Analyze the video at `url` and start a new session from the result
    pub async fn analyze(&mut self, url: &str) -> Result<&Session> {
        let url = normalize_url(url)?;
        info!("🎬 Analyzing {}", url);

        let frames = self
            .backend
            .analyze_frames(&url)
            .await
            .and_then(AnalyzeResponse::into_frames)
            .map_err(|e| {
                error!("Analysis of {} failed: {}", url, e);
                e
            })?;

        if frames.is_empty() {
            warn!("No scenes returned for {}", url);
        } else {
            info!("✅ Received {} scenes", frames.len());
        }

        Ok(&*self.session.insert(Session::new(url, frames)))
    }

    /// Number of frames in the current session
    pub fn selectable_count(&self) -> usize {
        self.session.as_ref().map_or(0, Session::len)
    }

    /// Flip selection of frame `index`.
    ///
    /// Panics if there is no session or `index` is out of range.
    pub fn toggle(&mut self, index: usize) {
        match self.session.as_mut() {
            Some(session) => session.toggle(index),
            None => panic!("toggle({}) called before any analysis", index),
        }
    }

    /// Clear selection of frame `index`.
    ///
    /// Panics under the same conditions as [`toggle`](Self::toggle).
    pub fn deselect(&mut self, index: usize) {
        match self.session.as_mut() {
            Some(session) => session.deselect(index),
            None => panic!("deselect({}) called before any analysis", index),
        }
    }

    pub fn select_all(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.select_all();
        }
    }

    pub fn deselect_all(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.deselect_all();
        }
    }

    /// Download the selected frames as `selected_scenes.zip`
    pub async fn export_selected(&self) -> Result<SceneArchive> {
        let frames = self
            .session
            .as_ref()
            .map(Session::selected_frames)
            .unwrap_or_default();
        self.export(frames, SELECTED_ARCHIVE_NAME).await
    }

    /// Download every frame of the session as `all_scenes.zip`, ignoring the selection
    pub async fn export_all(&self) -> Result<SceneArchive> {
        let frames = self
            .session
            .as_ref()
            .map(|s| s.frames().to_vec())
            .unwrap_or_default();
        self.export(frames, ALL_ARCHIVE_NAME).await
    }

    async fn export(&self, frames: Vec<Frame>, file_name: &str) -> Result<SceneArchive> {
        if frames.is_empty() {
            return Err(ClientError::EmptySelection);
        }

        info!("📦 Requesting {} with {} scenes", file_name, frames.len());
        let bytes = self.backend.download_frames(&frames).await.map_err(|e| {
            error!("Export of {} failed: {}", file_name, e);
            e
        })?;

        Ok(SceneArchive {
            file_name: file_name.to_string(),
            bytes,
        })
    }
}
