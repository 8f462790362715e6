// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Startup configuration.
//!
//! Default guide settings can be overridden from a YAML or JSON file. The
//! file is looked up in `PERSPECTIVE_GUIDE_CONFIG`, then as
//! `perspective_guide.yaml` in the working directory.

use crate::error::{GuideError, Result};
use crate::models::perspective::PerspectiveMode;
use crate::models::style::GuideColor;
use crate::util::geometry::DEFAULT_ZOOM;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "PERSPECTIVE_GUIDE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "perspective_guide.yaml";

/// Initial settings for a new session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    pub mode: PerspectiveMode,
    pub line_density: i64,
    pub line_color: GuideColor,
    pub line_width: f32,
    pub workspace_zoom: f64,
    pub enable_snapping: bool,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            mode: PerspectiveMode::OnePoint,
            line_density: 10,
            line_color: GuideColor::default(),
            line_width: 1.0,
            workspace_zoom: DEFAULT_ZOOM,
            enable_snapping: true,
        }
    }
}

/// Load configuration from YAML format.
pub fn import_yaml(path: &Path) -> Result<GuideConfig> {
    let yaml = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&yaml).map_err(|e| GuideError::Config(format!("{}: {}", path.display(), e)))
}

/// Load configuration from JSON format.
pub fn import_json(path: &Path) -> Result<GuideConfig> {
    let json = std::fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| GuideError::Config(format!("{}: {}", path.display(), e)))
}

/// Load configuration, choosing the format from the file extension.
pub fn load(path: &Path) -> Result<GuideConfig> {
    let extension = path.extension().and_then(|s| s.to_str());
    match extension {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        _ => Err(GuideError::Config(format!("Unsupported file extension: {:?}", extension))),
    }
}

/// Path of the configuration file to use, if any.
pub fn config_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => Some(PathBuf::from(path)),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            path.exists().then_some(path)
        }
    }
}

/// Resolve the startup configuration, falling back to defaults on any error.
pub fn load_or_default() -> GuideConfig {
    let Some(path) = config_path() else {
        log::info!("Using built-in default settings");
        return GuideConfig::default();
    };

    match load(&path) {
        Ok(config) => {
            log::info!("Loaded settings from {}", path.display());
            config
        }
        Err(e) => {
            log::error!("Failed to load settings: {}", e);
            GuideConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::ProjectionState;
    use crate::models::style::{MAX_DENSITY, MIN_LINE_WIDTH};
    use crate::util::geometry::MAX_ZOOM;

    #[test]
    fn test_load_yaml_with_partial_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.yaml");
        std::fs::write(&path, "mode: three_point\nline_color: \"#ff0000\"\nenable_snapping: false\n").unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.mode, PerspectiveMode::ThreePoint);
        assert_eq!(config.line_color, GuideColor::rgb(255, 0, 0));
        assert!(!config.enable_snapping);
        assert_eq!(config.line_density, 10);
        assert_eq!(config.workspace_zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.json");
        std::fs::write(&path, r#"{"mode":"four_point","line_density":18,"line_width":2.5}"#).unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.mode, PerspectiveMode::FourPoint);
        assert_eq!(config.line_density, 18);
        assert_eq!(config.line_width, 2.5);
    }

    #[test]
    fn test_out_of_range_values_are_clamped_when_applied() {
        let config = GuideConfig {
            line_density: 99,
            line_width: 0.0,
            workspace_zoom: 40.0,
            ..GuideConfig::default()
        };
        let state = ProjectionState::from_config(&config);
        assert_eq!(state.style.density(), MAX_DENSITY);
        assert_eq!(state.style.width(), MIN_LINE_WIDTH);
        assert_eq!(state.view.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();

        let toml = dir.path().join("guide.toml");
        std::fs::write(&toml, "mode = 1").unwrap();
        assert!(matches!(load(&toml), Err(GuideError::Config(_))));

        let yaml = dir.path().join("guide.yaml");
        std::fs::write(&yaml, "line_color: not-a-color\n").unwrap();
        assert!(matches!(load(&yaml), Err(GuideError::Config(_))));

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(load(&missing), Err(GuideError::Io(_))));
    }
}
