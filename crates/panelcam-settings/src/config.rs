//! Machine profile configuration for PanelCAM
//!
//! The machine profile selects the target controller dialect and supplies
//! the defaults the program generator falls back on: safe traverse height,
//! spindle speed, feed and plunge rates, and whether tool-radius
//! compensation is emitted.
//!
//! Profiles are stored as JSON or TOML. Every field has a default, so a
//! partial file deserializes into a complete profile.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Target controller dialect
///
/// Unknown names fall back to [`MachineDialect::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum MachineDialect {
    /// Plain ISO G-code
    #[default]
    Generic,
    /// Biesse panel routers
    Biesse,
    /// Homag panel routers
    Homag,
    /// SCM panel routers
    Scm,
    /// Minimal hobby controller (GRBL)
    Grbl,
}

impl MachineDialect {
    /// Get all dialects
    pub fn all() -> &'static [MachineDialect] {
        &[
            MachineDialect::Generic,
            MachineDialect::Biesse,
            MachineDialect::Homag,
            MachineDialect::Scm,
            MachineDialect::Grbl,
        ]
    }

    /// Stable identifier used in profile files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Biesse => "biesse",
            Self::Homag => "homag",
            Self::Scm => "scm",
            Self::Grbl => "grbl",
        }
    }

    /// Parse a dialect name, falling back to `Generic` for unknown names
    pub fn parse_lossy(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "generic" | "iso" => Self::Generic,
            "biesse" | "vendor_a" | "vendor-a" => Self::Biesse,
            "homag" | "vendor_b" | "vendor-b" => Self::Homag,
            "scm" | "vendor_c" | "vendor-c" => Self::Scm,
            "grbl" | "minimal" | "minimal_controller" | "minimal-controller" => Self::Grbl,
            other => {
                tracing::warn!("Unknown machine dialect '{}', using generic", other);
                Self::Generic
            }
        }
    }
}

impl From<String> for MachineDialect {
    fn from(value: String) -> Self {
        Self::parse_lossy(&value)
    }
}

impl From<MachineDialect> for &'static str {
    fn from(value: MachineDialect) -> Self {
        value.as_str()
    }
}

impl std::fmt::Display for MachineDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic => write!(f, "Generic ISO"),
            Self::Biesse => write!(f, "Biesse"),
            Self::Homag => write!(f, "Homag"),
            Self::Scm => write!(f, "SCM"),
            Self::Grbl => write!(f, "GRBL"),
        }
    }
}

/// Machine profile
///
/// Immutable for the duration of one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineProfile {
    /// Target dialect
    pub dialect: MachineDialect,
    /// Safe traverse height above the panel surface in mm
    pub safe_height: f64,
    /// Spindle speed in RPM when a tool does not specify one
    pub spindle_speed: u32,
    /// Cutting feed rate in mm/min when a tool does not specify one
    pub feed_rate: f64,
    /// Plunge rate in mm/min when a tool does not specify one
    pub plunge_rate: f64,
    /// Emit G41/G42 tool-radius compensation for contours
    pub tool_compensation: bool,
}

impl Default for MachineProfile {
    fn default() -> Self {
        Self {
            dialect: MachineDialect::Generic,
            safe_height: 10.0,
            spindle_speed: 18000,
            feed_rate: 3000.0,
            plunge_rate: 1000.0,
            tool_compensation: false,
        }
    }
}

impl MachineProfile {
    /// Create a default profile for the given dialect
    pub fn for_dialect(dialect: MachineDialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Default profile location inside the platform config directory
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("panelcam").join("machine.toml"))
            .ok_or(SettingsError::NoConfigDirectory)
    }

    /// Load profile from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let profile: Self = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                )
                .into())
            }
        };

        profile.validate()?;
        tracing::debug!("Loaded machine profile from {}", path.display());
        Ok(profile)
    }

    /// Save profile to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                )
                .into())
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|source| SettingsError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(())
    }

    /// Validate profile values
    pub fn validate(&self) -> ConfigResult<()> {
        require_positive("safe_height", self.safe_height)?;
        if self.spindle_speed == 0 {
            return Err(ConfigError::OutOfRange {
                key: "spindle_speed",
                value: "0".to_string(),
                expected: "at least 1 RPM",
            });
        }
        require_feed_rate("feed_rate", self.feed_rate)?;
        require_feed_rate("plunge_rate", self.plunge_rate)
    }
}

/// Feed words are printed as whole mm/min; a value below one would emit `F0`.
fn require_feed_rate(key: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            key,
            value: value.to_string(),
            expected: "at least 1 mm/min",
        })
    }
}

fn require_positive(key: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            key,
            value: value.to_string(),
            expected: "positive",
        })
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
