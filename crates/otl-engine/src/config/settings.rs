use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use semver::VersionReq;
use serde::Deserialize;

use crate::core::Lifetime;

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "OTL_CONFIG";

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "otl.toml";

/// Root settings schema.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub window: WindowSettings,
    pub timing: TimingSettings,
    pub loading: LoadingSettings,
    pub game: GameSettings,
    pub runtime: RuntimeSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSettings {
    pub title: String,
    pub width: f64,
    pub height: f64,
    /// Present with vsync (FIFO). Off means the frame cap alone limits speed.
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Need For Otl 10".to_string(),
            width: 1280.0,
            height: 720.0,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingSettings {
    /// Frame cap for the game phase; `0` is uncapped.
    pub game_fps: u32,
    /// Upper bound for a single frame delta, in milliseconds.
    pub max_frame_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            game_fps: 0,
            max_frame_ms: 250,
        }
    }
}

impl TimingSettings {
    pub fn max_frame(&self) -> Duration {
        Duration::from_millis(self.max_frame_ms)
    }

    pub fn game_fps_cap(&self) -> Option<u32> {
        (self.game_fps > 0).then_some(self.game_fps)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadingSettings {
    /// Skip straight from the startup check to the game when false.
    pub enabled: bool,
    pub lifetime_secs: f32,
    /// Stripe speed in logical pixels per second.
    pub stripe_speed: f32,
    pub sound: bool,
}

impl Default for LoadingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            lifetime_secs: 6.0,
            stripe_speed: 70.0,
            sound: true,
        }
    }
}

impl LoadingSettings {
    pub fn lifetime(&self) -> Lifetime {
        Lifetime::from_secs_f32(self.lifetime_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    /// Initial camera distance; larger shows more of the level.
    pub camera_distance: f32,
    /// Start with the debug overlay visible (toggle with F3).
    pub debug_overlay: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            camera_distance: 16.0,
            debug_overlay: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeSettings {
    /// Semver requirement the engine version must satisfy at startup.
    pub requires: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            requires: ">=0.1.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// `env_logger` filter, e.g. `"info,otl_engine=debug"`. Falls back to `RUST_LOG`.
    pub filter: Option<String>,
}

impl Settings {
    /// Parse and validate settings TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let settings: Self = toml::from_str(input).context("failed to parse settings TOML")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;

        Self::from_toml_str(&raw).with_context(|| format!("invalid settings at {}", path.display()))
    }

    /// Settings for this process.
    ///
    /// An explicit `OTL_CONFIG` path must exist; the default `otl.toml` is optional.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_path(Path::new(&path));
        }

        let default = Path::new(DEFAULT_CONFIG_PATH);
        if default.exists() {
            Self::from_path(default)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.window.title.trim().is_empty() {
            bail!("window.title must not be empty");
        }
        if !(self.window.width >= 1.0 && self.window.height >= 1.0) {
            bail!(
                "window size must be at least 1x1, got {}x{}",
                self.window.width,
                self.window.height
            );
        }
        if self.timing.max_frame_ms == 0 {
            bail!("timing.max_frame_ms must be positive");
        }
        Duration::try_from_secs_f32(self.loading.lifetime_secs).with_context(|| {
            format!(
                "loading.lifetime_secs must be a non-negative number of seconds, got {}",
                self.loading.lifetime_secs
            )
        })?;
        if !self.loading.stripe_speed.is_finite() {
            bail!("loading.stripe_speed must be finite");
        }
        if !(self.game.camera_distance > 0.0 && self.game.camera_distance.is_finite()) {
            bail!("game.camera_distance must be positive");
        }
        VersionReq::parse(&self.runtime.requires).with_context(|| {
            format!(
                "runtime.requires must be a valid semver requirement: {}",
                self.runtime.requires
            )
        })?;
        Ok(())
    }

    /// The parsed `runtime.requires` requirement.
    pub fn runtime_requirement(&self) -> Result<VersionReq> {
        VersionReq::parse(&self.runtime.requires)
            .with_context(|| format!("invalid runtime.requires: {}", self.runtime.requires))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn defaults_validate() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let s = Settings::from_toml_str(
            r#"
[window]
title = "otl dev"

[loading]
enabled = false

[timing]
game_fps = 144
"#,
        )
        .unwrap();

        assert_eq!(s.window.title, "otl dev");
        assert_eq!(s.window.width, 1280.0);
        assert!(!s.loading.enabled);
        assert_eq!(s.loading.lifetime_secs, 6.0);
        assert_eq!(s.timing.game_fps_cap(), Some(144));
    }

    #[test]
    fn zero_fps_means_uncapped() {
        assert_eq!(TimingSettings::default().game_fps_cap(), None);
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = Settings::from_toml_str("[window]\nfullscreen = true\n").unwrap_err();
        assert!(format!("{err:#}").contains("fullscreen"));
    }

    #[test]
    fn rejects_bad_requirement() {
        let err = Settings::from_toml_str("[runtime]\nrequires = \"newest\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("runtime.requires"));
    }

    #[test]
    fn rejects_non_positive_camera_distance() {
        assert!(Settings::from_toml_str("[game]\ncamera_distance = 0.0\n").is_err());
    }

    #[test]
    fn rejects_negative_loading_lifetime() {
        assert!(Settings::from_toml_str("[loading]\nlifetime_secs = -1.0\n").is_err());
    }

    #[test]
    fn rejects_loading_lifetime_beyond_duration_range() {
        let err = Settings::from_toml_str("[loading]\nlifetime_secs = 1e20\n").unwrap_err();
        assert!(format!("{err:#}").contains("loading.lifetime_secs"));
    }

    #[test]
    fn loading_lifetime_is_finite_seconds() {
        let s = Settings::from_toml_str("[loading]\nlifetime_secs = 0.25\n").unwrap();
        assert_eq!(s.loading.lifetime(), Lifetime::Finite(Duration::from_millis(250)));

        let oversized = LoadingSettings {
            lifetime_secs: 1e20,
            ..LoadingSettings::default()
        };
        assert_eq!(oversized.lifetime(), Lifetime::Finite(Duration::ZERO));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = Settings::from_path(Path::new("/nonexistent/otl.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/otl.toml"));
    }

    #[test]
    fn logging_filter_round_trips() {
        let s = Settings::from_toml_str("[logging]\nfilter = \"debug\"\n").unwrap();
        assert_eq!(s.logging.filter.as_deref(), Some("debug"));
    }
}
