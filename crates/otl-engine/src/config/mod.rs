//! Process settings.
//!
//! One TOML file (`otl.toml`, or the path in `OTL_CONFIG`) configures the
//! window, frame timing, phases and logging. Every field has a default, so a
//! missing file is the same as an empty one.

mod settings;

pub use settings::{
    GameSettings, LoadingSettings, LoggingSettings, RuntimeSettings, Settings, TimingSettings,
    WindowSettings, CONFIG_ENV, DEFAULT_CONFIG_PATH,
};
