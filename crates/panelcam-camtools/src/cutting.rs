//! Effective cutting parameters for a tool on a machine.

use panelcam_core::Tool;
use panelcam_settings::MachineProfile;

/// Speeds and feeds after falling back on machine profile defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuttingParams {
    /// Spindle speed in RPM
    pub spindle_speed: u32,
    /// Cutting feed rate in mm/min
    pub feed_rate: f64,
    /// Vertical feed rate in mm/min
    pub plunge_rate: f64,
}

impl CuttingParams {
    /// Resolve the tool's values, using the profile where the tool leaves
    /// a value unset (zero, or no plunge rate).
    pub fn resolve(tool: &Tool, profile: &MachineProfile) -> Self {
        Self {
            spindle_speed: if tool.spindle_speed > 0 {
                tool.spindle_speed
            } else {
                profile.spindle_speed
            },
            feed_rate: if tool.feed_rate > 0.0 {
                tool.feed_rate
            } else {
                profile.feed_rate
            },
            plunge_rate: tool.plunge_rate().unwrap_or(profile.plunge_rate),
        }
    }
}
