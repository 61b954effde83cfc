use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::i18n::Language;
use crate::{ClientError, Result};

/// Configuration for the scene picker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scene extraction service settings
    pub backend: BackendConfig,

    /// Where downloads land
    pub output: OutputConfig,

    /// Terminal UI settings
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the service, e.g. `http://127.0.0.1:5000`
    pub base_url: String,

    /// Request timeout in seconds (unset = transport default)
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory archives are saved into
    pub dir: PathBuf,

    /// Also write each analyzed frame as `scene_N.jpg`
    pub save_thumbnails: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// UI language code
    pub language: Language,
}

impl Config {
    /// Load configuration from the first config file found, else from the environment
    pub fn load() -> Result<Self> {
        let config_paths = ["scene-picker.toml", "config/scene-picker.toml"];

        for path in &config_paths {
            if Path::new(path).exists() {
                match Self::load_from(Path::new(path)) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config file {}: {}", path, e),
                }
            }
        }

        Self::from_env()
    }

    /// Load configuration from a specific TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&config_str)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("SCENE_PICKER_BASE_URL") {
            config.backend.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("SCENE_PICKER_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(seconds) => config.backend.timeout_seconds = Some(seconds),
                Err(e) => tracing::warn!("SCENE_PICKER_TIMEOUT '{}' ignored: {}", timeout, e),
            }
        }

        if let Ok(output_dir) = std::env::var("SCENE_PICKER_OUTPUT_DIR") {
            config.output.dir = PathBuf::from(output_dir);
        }

        if let Ok(lang) = std::env::var("SCENE_PICKER_LANG") {
            match lang.parse() {
                Ok(language) => config.ui.language = language,
                Err(e) => tracing::warn!("SCENE_PICKER_LANG ignored: {}", e),
            }
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str =
            toml::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.backend.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base_url '{}': {}", self.backend.base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.backend.timeout_seconds == Some(0) {
            return Err(ClientError::Config("timeout_seconds must be greater than 0".to_string()));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.backend.timeout_seconds.map(Duration::from_secs)
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Scene Picker Configuration:\n\
            - Backend: {}\n\
            - Timeout: {}\n\
            - Output Directory: {}\n\
            - Save Thumbnails: {}\n\
            - Language: {}",
            self.backend.base_url,
            self.backend
                .timeout_seconds
                .map(|t| format!("{}s", t))
                .unwrap_or_else(|| "transport default".to_string()),
            self.output.dir.display(),
            self.output.save_thumbnails,
            self.ui.language,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: "http://127.0.0.1:5000".to_string(),
                timeout_seconds: None,
            },
            output: OutputConfig {
                dir: PathBuf::from("./downloads"),
                save_thumbnails: false,
            },
            ui: UiConfig {
                language: Language::English,
            },
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.backend.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.config.backend.timeout_seconds = Some(seconds);
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.config.output.dir = dir;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.config.ui.language = language;
        self
    }

    pub fn save_thumbnails(mut self, enable: bool) -> Self {
        self.config.output.save_thumbnails = enable;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // Env vars are process-wide, so every from_env case lives in this one test
    #[test]
    fn test_from_env() {
        const VARS: [&str; 4] = [
            "SCENE_PICKER_BASE_URL",
            "SCENE_PICKER_TIMEOUT",
            "SCENE_PICKER_OUTPUT_DIR",
            "SCENE_PICKER_LANG",
        ];

        std::env::set_var("SCENE_PICKER_BASE_URL", "http://scenes.local:8080");
        std::env::set_var("SCENE_PICKER_TIMEOUT", "45");
        std::env::set_var("SCENE_PICKER_OUTPUT_DIR", "/tmp/scene-picker-env");
        std::env::set_var("SCENE_PICKER_LANG", "vi");
        let config = Config::from_env().unwrap();
        assert_eq!(config.backend.base_url, "http://scenes.local:8080");
        assert_eq!(config.timeout(), Some(Duration::from_secs(45)));
        assert_eq!(config.output.dir, PathBuf::from("/tmp/scene-picker-env"));
        assert_eq!(config.ui.language, Language::Vietnamese);

        std::env::set_var("SCENE_PICKER_TIMEOUT", "soon");
        std::env::set_var("SCENE_PICKER_LANG", "fr");
        let config = Config::from_env().unwrap();
        assert!(config.backend.timeout_seconds.is_none());
        assert_eq!(config.ui.language, Language::English);

        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
        assert!(config.backend.timeout_seconds.is_none());
        assert!(config.timeout().is_none());
        assert_eq!(config.ui.language, Language::English);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_base_url("https://scenes.example.com")
            .with_timeout(90)
            .with_language(Language::MoroccanArabic)
            .save_thumbnails(true)
            .build();

        assert_eq!(config.backend.base_url, "https://scenes.example.com");
        assert_eq!(config.timeout(), Some(Duration::from_secs(90)));
        assert_eq!(config.ui.language, Language::MoroccanArabic);
        assert!(config.output.save_thumbnails);
    }

    #[test]
    fn test_config_validation() {
        let bad_scheme = ConfigBuilder::new().with_base_url("ftp://example.com").build();
        assert!(matches!(bad_scheme.validate(), Err(ClientError::Config(_))));

        let not_a_url = ConfigBuilder::new().with_base_url("localhost").build();
        assert!(not_a_url.validate().is_err());

        let zero_timeout = ConfigBuilder::new().with_timeout(0).build();
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scene-picker.toml");

        let config = ConfigBuilder::new()
            .with_language(Language::Vietnamese)
            .with_timeout(30)
            .build();
        config.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("language = \"vi\""));

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.ui.language, Language::Vietnamese);
        assert_eq!(loaded.backend.timeout_seconds, Some(30));
    }

    #[test]
    fn test_load_from_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        std::fs::write(&path, "backend = 3").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ClientError::Config(_))));
    }
}
