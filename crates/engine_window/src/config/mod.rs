//! Configuration system

pub use serde::{Deserialize, Serialize};

use crate::gpu::{PresentMode, TextureFormat};
use crate::window::WindowRecord;

/// On-disk configuration formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl Format {
    /// Format for a path, if its extension is supported
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        match std::path::Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.to_string())),
        }
    }
}

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Parse configuration text
    fn parse(contents: &str, format: Format) -> Result<Self, ConfigError> {
        match format {
            Format::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Render configuration text
    fn render(&self, format: Format) -> Result<String, ConfigError> {
        match format {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string())),
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }

    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let format = Format::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents, format)
    }

    /// Load configuration from file, falling back to defaults when the file is missing
    fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        match Self::load_from_file(path) {
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {path}, using defaults");
                Ok(Self::default())
            }
            result => result,
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = self.render(Format::from_path(path)?)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Initial window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Title bar text
    pub title: String,
    /// Requested client width
    pub width: u32,
    /// Requested client height
    pub height: u32,
    /// Show title bar and border
    pub decorated: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Engine Window".to_string(),
            width: 1280,
            height: 720,
            decorated: true,
        }
    }
}

impl WindowSettings {
    /// A window record matching these settings
    pub fn record(&self) -> WindowRecord {
        WindowRecord::new(self.title.clone(), self.width, self.height).with_decorated(self.decorated)
    }
}

/// Window backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Name the window class is registered under
    pub class_name: String,
    /// Format every swap chain is created with
    pub swap_chain_format: TextureFormat,
    /// Presentation mode every swap chain is created with
    pub present_mode: PresentMode,
    /// Settings for the first window
    pub window: WindowSettings,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            class_name: "EngineWindowClass".to_string(),
            swap_chain_format: TextureFormat::Bgra8Unorm,
            present_mode: PresentMode::Fifo,
            window: WindowSettings::default(),
        }
    }
}

impl Config for BackendConfig {}
