//! Pocket clearing for closed and open pockets.
//!
//! Pockets trace their path once per depth pass with a vertical plunge.
//! Closed pockets always return to the first point; open pockets never do.
//! The clearing strategy is informational and only named in the block
//! comment.

use crate::cutting::CuttingParams;
use crate::multipass::PassPlan;
use crate::writer::GcodeWriter;
use panelcam_core::units::format_mm;
use panelcam_core::{
    ClosedPocketOperation, EntryStrategy, ModelError, ModelResult, OpenPocketOperation,
    OperationKind, Point2D, PocketStrategy, Tool,
};
use panelcam_settings::MachineProfile;

/// Generator for either pocket variant
pub struct PocketGenerator<'a> {
    kind: OperationKind,
    path: &'a [Point2D],
    closed: bool,
    strategy: PocketStrategy,
    plan: PassPlan,
    entry: Option<EntryStrategy>,
    tool: &'a Tool,
    profile: &'a MachineProfile,
}

impl<'a> PocketGenerator<'a> {
    pub fn closed(
        op: &'a ClosedPocketOperation,
        tool: &'a Tool,
        profile: &'a MachineProfile,
    ) -> Self {
        Self {
            kind: OperationKind::ClosedPocket,
            path: &op.path,
            closed: true,
            strategy: op.strategy,
            plan: PassPlan::for_operation(op.multi_pass, op.depth, op.per_pass_depth, tool),
            entry: op.entry,
            tool,
            profile,
        }
    }

    pub fn open(op: &'a OpenPocketOperation, tool: &'a Tool, profile: &'a MachineProfile) -> Self {
        Self {
            kind: OperationKind::OpenPocket,
            path: &op.path,
            closed: false,
            strategy: op.strategy,
            plan: PassPlan::for_operation(op.multi_pass, op.depth, op.per_pass_depth, tool),
            entry: None,
            tool,
            profile,
        }
    }

    pub fn strategy(&self) -> PocketStrategy {
        self.strategy
    }

    pub fn pass_plan(&self) -> &PassPlan {
        &self.plan
    }

    /// Emit all passes of the pocket
    pub fn generate(&self, out: &mut GcodeWriter) -> ModelResult<()> {
        let start = *self.path.first().ok_or(ModelError::EmptyPath {
            operation: self.kind.name(),
        })?;

        if let Some(entry) = self.entry.filter(|e| *e != EntryStrategy::Vertical) {
            tracing::debug!(
                "{} entry '{}' is plunged vertically",
                self.kind,
                entry.name()
            );
        }

        let params = CuttingParams::resolve(self.tool, self.profile);
        let safe_z = self.profile.safe_height;

        for pass in self.plan.passes() {
            if pass.count > 1 {
                out.comment(format!(
                    "Pass {} of {} at Z{}",
                    pass.index + 1,
                    pass.count,
                    format_mm(pass.z)
                ));
            }

            out.rapid_xy(start.x, start.y);
            out.rapid_z(safe_z);
            out.linear_z(pass.z, params.plunge_rate);

            for point in self.path {
                out.linear_xy(point.x, point.y, params.feed_rate);
            }
            if self.closed {
                out.linear_xy(start.x, start.y, params.feed_rate);
            }

            out.rapid_z(safe_z);
        }

        Ok(())
    }
}
