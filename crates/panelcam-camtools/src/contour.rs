//! Profile cutting along a path.
//!
//! Each pass rapids to the first path point, engages the material, cuts
//! through every path point and retracts. The entry strategy applies to the
//! first pass only (later passes plunge vertically) and the exit strategy
//! to the last pass only.
//!
//! Tool-radius compensation, when enabled on the machine and requested by
//! the operation, is switched on at pass depth before the path and
//! switched off after the path and any exit move of the same pass.

use crate::cutting::CuttingParams;
use crate::multipass::{Pass, PassPlan};
use crate::writer::GcodeWriter;
use panelcam_core::units::format_mm;
use panelcam_core::{
    CompensationSide, ContourOperation, EntryStrategy, ExitStrategy, ModelError, ModelResult,
    Point2D, Tool,
};
use panelcam_settings::MachineProfile;

/// Lateral distance of ramp entry and exit moves, in mm.
///
/// Fixed; it does not follow the ramp angle of the entry descriptor.
pub const RAMP_DISTANCE: f64 = 10.0;

/// Maximum descent per helical turn of a spiral entry, in mm.
pub const SPIRAL_MAX_STEP: f64 = 1.0;

/// Generator for a contour operation
pub struct ContourGenerator<'a> {
    op: &'a ContourOperation,
    tool: &'a Tool,
    profile: &'a MachineProfile,
}

impl<'a> ContourGenerator<'a> {
    pub fn new(op: &'a ContourOperation, tool: &'a Tool, profile: &'a MachineProfile) -> Self {
        Self { op, tool, profile }
    }

    /// Depth plan for this contour
    pub fn pass_plan(&self) -> PassPlan {
        PassPlan::for_operation(
            self.op.multi_pass,
            self.op.depth,
            self.op.per_pass_depth,
            self.tool,
        )
    }

    /// Compensation side to emit, if any
    pub fn active_compensation(&self) -> Option<CompensationSide> {
        match self.op.compensation {
            CompensationSide::None => None,
            side if self.profile.tool_compensation => Some(side),
            _ => None,
        }
    }

    /// Emit all passes of the contour
    pub fn generate(&self, out: &mut GcodeWriter) -> ModelResult<()> {
        let start = *self
            .op
            .path
            .first()
            .ok_or(ModelError::EmptyPath { operation: "Contour" })?;
        let params = CuttingParams::resolve(self.tool, self.profile);
        let plan = self.pass_plan();
        let compensation = self.active_compensation();

        for pass in plan.passes() {
            if pass.count > 1 {
                out.comment(format!(
                    "Pass {} of {} at Z{}",
                    pass.index + 1,
                    pass.count,
                    format_mm(pass.z)
                ));
            }
            self.generate_pass(out, &pass, start, &params, compensation);
        }

        Ok(())
    }

    fn generate_pass(
        &self,
        out: &mut GcodeWriter,
        pass: &Pass,
        start: Point2D,
        params: &CuttingParams,
        compensation: Option<CompensationSide>,
    ) {
        let safe_z = self.profile.safe_height;

        out.rapid_xy(start.x, start.y);
        out.rapid_z(safe_z);

        let entry = if pass.is_first() {
            self.op.entry.unwrap_or(EntryStrategy::Vertical)
        } else {
            EntryStrategy::Vertical
        };
        self.enter(out, entry, start, pass.z, params);

        if let Some(side) = compensation {
            out.compensation_on(side, self.tool.diameter);
        }

        for point in &self.op.path {
            out.linear_xy(point.x, point.y, params.feed_rate);
        }
        if self.op.closed {
            out.linear_xy(start.x, start.y, params.feed_rate);
        }

        if pass.is_last() && self.op.exit == Some(ExitStrategy::Ramp) {
            out.linear_xyz(start.x + RAMP_DISTANCE, start.y, 0.0, params.feed_rate);
        }

        if compensation.is_some() {
            out.compensation_off();
        }

        out.rapid_z(safe_z);
    }

    fn enter(
        &self,
        out: &mut GcodeWriter,
        entry: EntryStrategy,
        start: Point2D,
        z: f64,
        params: &CuttingParams,
    ) {
        match entry {
            EntryStrategy::Vertical => out.linear_z(z, params.plunge_rate),
            EntryStrategy::Ramp { .. } => {
                out.linear_z(0.0, params.plunge_rate);
                out.linear_xyz(start.x + RAMP_DISTANCE, start.y, z, params.plunge_rate);
                out.linear_xy(start.x, start.y, params.feed_rate);
            }
            EntryStrategy::Spiral { radius } if radius > 0.0 => {
                spiral_entry(out, start, radius, z, params)
            }
            EntryStrategy::Spiral { .. } => out.linear_z(z, params.plunge_rate),
        }
    }
}

/// Helical descent around `center`, ending back on `center` at depth `z`.
fn spiral_entry(
    out: &mut GcodeWriter,
    center: Point2D,
    radius: f64,
    z: f64,
    params: &CuttingParams,
) {
    let helix_start = center.offset(radius, 0.0);
    let turns = (z.abs() / SPIRAL_MAX_STEP).ceil().max(1.0) as usize;

    out.linear_z(0.0, params.plunge_rate);
    out.linear_xy(helix_start.x, helix_start.y, params.feed_rate);
    for turn in 1..=turns {
        let turn_z = z * turn as f64 / turns as f64;
        out.helix_cw(
            helix_start.x,
            helix_start.y,
            -radius,
            0.0,
            turn_z,
            params.plunge_rate,
        );
    }
    out.linear_xy(center.x, center.y, params.feed_rate);
}
