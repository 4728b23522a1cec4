use std::fmt;

use semver::{Version, VersionReq};

/// The host cannot run the program. Raised before any frame is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvironmentError {
    /// Engine version does not satisfy the configured requirement.
    UnsupportedEngine { version: Version, requires: VersionReq },
    /// The display reported a zero-sized drawable area.
    EmptyDisplay { width: f32, height: f32 },
}

impl fmt::Display for EnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentError::UnsupportedEngine { version, requires } => {
                write!(f, "engine version {version} does not satisfy `{requires}`")
            }
            EnvironmentError::EmptyDisplay { width, height } => {
                write!(f, "display surface is empty ({width}x{height})")
            }
        }
    }
}

impl std::error::Error for EnvironmentError {}
