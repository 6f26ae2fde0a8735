//! Lab settings and preferences
//!
//! Persisted in LocalStorage on the web and in a JSON file natively.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::SceneKind;

/// Lab settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scene to open when none is given on the command line or URL
    pub scene: SceneKind,
    /// Fixed RNG seed; a time-based seed is used when unset
    pub seed: Option<u64>,
    /// Wait for vertical sync when presenting
    pub vsync: bool,
    /// Skip clearing the screen between frames
    pub trippy: bool,
    /// Show the FPS graph in scenes that have one
    pub perf_graph: bool,
    /// Window size multiplier over the scene's world size (native only)
    pub window_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene: SceneKind::default(),
            seed: None,
            vsync: false,
            trippy: false,
            perf_graph: true,
            window_scale: 1.0,
        }
    }
}

/// Why settings could not be loaded
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "could not read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "invalid settings: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        if !(settings.window_scale.is_finite() && settings.window_scale > 0.0) {
            log::warn!(
                "Ignoring window_scale {}, using 1.0",
                settings.window_scale
            );
            settings.window_scale = 1.0;
        }
        Ok(settings)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "sprite_lab_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("{e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Settings file path: `$SPRITE_LAB_SETTINGS` or `sprite_lab.json`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn path() -> std::path::PathBuf {
        std::env::var_os("SPRITE_LAB_SETTINGS")
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from("sprite_lab.json"))
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from the settings file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            log::info!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Write settings back, but only to a settings file that already exists
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let path = Self::path();
        if !path.exists() {
            return;
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(e) => log::warn!("Could not save settings: {e}"),
            },
            Err(e) => log::warn!("Could not serialize settings: {e}"),
        }
    }
}
