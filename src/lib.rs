//! Scene Picker - client for the scene extraction service
//!
//! Sends a video URL to the analysis backend, keeps the returned scene frames in
//! an in-memory session, lets the caller pick a subset and downloads the chosen
//! frames as a zip archive.

pub mod frame;
pub mod session;
pub mod source;
pub mod backend;
pub mod controller;
pub mod i18n;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use crate::frame::Frame;
pub use crate::session::Session;
pub use crate::backend::{HttpBackend, SceneBackend, AnalyzeResponse};
pub use crate::controller::{SceneArchive, SceneController, ALL_ARCHIVE_NAME, SELECTED_ARCHIVE_NAME};
pub use crate::i18n::{Language, TaggedLabel, TextKey, Translator};
pub use crate::config::{Config, ConfigBuilder};

/// Result type for scene picker operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Error types for scene picker operations
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("No scenes selected")]
    EmptySelection,

    #[error("Export failed with HTTP status {status}")]
    Export { status: u16 },

    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
