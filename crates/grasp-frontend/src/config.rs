//! Application configuration
//!
//! Persisted through eframe storage as RON. Covers UI preferences and the
//! renderer settings; scene content is saved separately as snapshots.

use serde::{Deserialize, Serialize};

use grasp_renderer::RendererConfig;

use crate::theme::UiTheme;

/// Storage key for the serialized config.
pub const CONFIG_STORAGE_KEY: &str = "grasp_config";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// UI theme.
    pub theme: UiTheme,
    /// Renderer settings.
    pub renderer: RendererConfig,
}

impl AppConfig {
    /// Load the config from eframe storage, falling back to defaults.
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        let Some(text) = storage.and_then(|s| s.get_string(CONFIG_STORAGE_KEY)) else {
            return Self::default();
        };
        match ron::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to parse stored config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Persist the config to eframe storage.
    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        match ron::to_string(self) {
            Ok(text) => storage.set_string(CONFIG_STORAGE_KEY, text),
            Err(e) => tracing::warn!("Failed to serialize config: {}", e),
        }
    }
}
