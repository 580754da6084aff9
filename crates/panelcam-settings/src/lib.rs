//! PanelCAM Settings Crate
//!
//! Handles the machine profile: target dialect, safe height, default
//! cutting parameters and tool compensation, with JSON/TOML persistence.

pub mod config;
pub mod error;

pub use config::{MachineDialect, MachineProfile};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
