//! Persisted UI preferences (lives in the OS config directory).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::{InterventionKind, ReservationStatus, ZoomLevel};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub zoom: ZoomLevel,
    pub show_interventions: bool,
    pub status_filter: Option<ReservationStatus>,
    pub kind_filter: Option<InterventionKind>,
    pub last_portfolio: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zoom: ZoomLevel::Standard,
            show_interventions: true,
            status_filter: None,
            kind_filter: None,
            last_portfolio: None,
        }
    }
}

impl Settings {
    /// Load persisted settings, falling back to defaults on any problem.
    pub fn load() -> Self {
        std::fs::read_to_string(Self::settings_path())
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Persist settings. Failures are logged, never surfaced.
    pub fn save(&self) {
        let path = Self::settings_path();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!("failed to save settings to {}: {e}", path.display());
                }
            }
            Err(e) => tracing::warn!("failed to serialize settings: {e}"),
        }
    }

    pub fn config_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "Staygrid")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn settings_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }
}
