use adw::Application;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub feedback_clear_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".into(),
            feedback_clear_ms: crate::contacts::feedback::DEFAULT_CLEAR_AFTER.as_millis() as u64,
            request_timeout_secs: 10,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("com", "example", "ContactBook")?;
        Some(proj.config_dir().join("contacts.toml"))
    }

    /// Settings from the user's config dir. Falls back to defaults when the
    /// file is missing or unusable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match Self::read(&path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(Self::from_toml_str(&text)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse settings. A zero request timeout would fail every request,
    /// so it falls back to the default.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut settings: Self = toml::from_str(text)?;
        if settings.request_timeout_secs == 0 {
            let default = Self::default().request_timeout_secs;
            log::warn!("Ignoring request_timeout_secs = 0, using {default}");
            settings.request_timeout_secs = default;
        }
        Ok(settings)
    }

    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_clear_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn build_ui(app: &Application) {
    let settings = Settings::load();
    crate::ui::main_window::show_main_window(app, &settings);
}
