//! Vertical boring.
//!
//! Drilling is always a single plunge; multi-pass subdivision does not
//! apply. Through holes go [`THROUGH_OVERTRAVEL`] below the stated depth so
//! the bit fully clears the panel.

use crate::cutting::CuttingParams;
use crate::writer::GcodeWriter;
use panelcam_core::{DrillOperation, Tool};
use panelcam_settings::MachineProfile;

/// Extra depth for through holes, in mm
pub const THROUGH_OVERTRAVEL: f64 = 2.0;

/// Generator for a single drilled hole
pub struct DrillGenerator<'a> {
    op: &'a DrillOperation,
    tool: &'a Tool,
    profile: &'a MachineProfile,
}

impl<'a> DrillGenerator<'a> {
    pub fn new(op: &'a DrillOperation, tool: &'a Tool, profile: &'a MachineProfile) -> Self {
        Self { op, tool, profile }
    }

    /// Final Z of the plunge
    pub fn final_depth(&self) -> f64 {
        if self.op.through {
            -(self.op.depth + THROUGH_OVERTRAVEL)
        } else {
            -self.op.depth
        }
    }

    /// Emit the drilling motion
    pub fn generate(&self, out: &mut GcodeWriter) {
        let params = CuttingParams::resolve(self.tool, self.profile);
        let p = &self.op.position;
        let safe_z = self.profile.safe_height;

        out.rapid_xy(p.x, p.y);
        out.rapid_z(safe_z);
        out.linear_z(self.final_depth(), params.plunge_rate);
        out.rapid_z(safe_z);
    }
}
