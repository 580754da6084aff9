//! Program assembly.
//!
//! A program is a header, one block per input operation (in input order)
//! and a footer. The assembler validates the whole input model before
//! emitting anything, so a returned [`Program`] is always complete.
//!
//! An operation whose tool cannot be found is replaced by a single
//! diagnostic comment and the remaining operations are still generated.

use crate::contour::ContourGenerator;
use crate::cutting::CuttingParams;
use crate::dialect::DialectSyntax;
use crate::drill::DrillGenerator;
use crate::error::{CamError, CamResult};
use crate::multipass::PassPlan;
use crate::pocket::PocketGenerator;
use crate::writer::GcodeWriter;
use panelcam_core::units::format_mm;
use panelcam_core::{
    resolve, Operation, OperationKind, Panel, Tool, ToolCatalog, ToolId, ToolKind,
};
use panelcam_settings::MachineProfile;
use std::fmt;

/// Format of the generated timestamp comment
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Outcome of a single operation
#[derive(Debug, Clone, PartialEq)]
pub enum BlockStatus {
    Generated,
    /// The operation was replaced by a diagnostic comment
    Skipped { reason: String },
}

/// Program lines belonging to one input operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationBlock {
    /// Zero-based position in the input list
    pub index: usize,
    pub kind: OperationKind,
    pub tool_id: ToolId,
    pub status: BlockStatus,
    pub lines: Vec<String>,
}

impl OperationBlock {
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, BlockStatus::Skipped { .. })
    }
}

/// A complete, immutable G-code program
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub header: Vec<String>,
    pub blocks: Vec<OperationBlock>,
    pub footer: Vec<String>,
}

impl Program {
    /// All lines in emission order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .chain(self.blocks.iter().flat_map(|b| b.lines.iter()))
            .chain(self.footer.iter())
            .map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Blocks that were replaced by a diagnostic
    pub fn skipped_operations(&self) -> impl Iterator<Item = &OperationBlock> {
        self.blocks.iter().filter(|b| b.is_skipped())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Builds programs for one machine profile and tool catalog.
///
/// Holds no state between calls and can be shared across threads.
#[derive(Debug, Clone)]
pub struct ProgramAssembler<'a> {
    profile: &'a MachineProfile,
    tools: &'a ToolCatalog,
    syntax: DialectSyntax,
    timestamp: Option<String>,
}

impl<'a> ProgramAssembler<'a> {
    pub fn new(profile: &'a MachineProfile, tools: &'a ToolCatalog) -> Self {
        Self {
            profile,
            tools,
            syntax: DialectSyntax::for_dialect(profile.dialect),
            timestamp: None,
        }
    }

    /// Use a fixed timestamp instead of the current time
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Validate the inputs and assemble the program
    pub fn assemble(&self, panel: &Panel, operations: &[Operation]) -> CamResult<Program> {
        self.validate(panel, operations)?;

        tracing::info!(
            "Generating program for panel '{}' with {} operations ({})",
            panel.name,
            operations.len(),
            self.profile.dialect
        );

        let header = self.header(panel, operations.len());
        let mut current_speed = self.profile.spindle_speed;
        let mut blocks = Vec::with_capacity(operations.len());
        for (index, op) in operations.iter().enumerate() {
            blocks.push(self.block(index, op, &mut current_speed)?);
        }
        let footer = self.footer();

        let program = Program {
            header,
            blocks,
            footer,
        };
        let skipped = program.skipped_operations().count();
        if skipped > 0 {
            tracing::warn!("{} of {} operations skipped", skipped, operations.len());
        }
        tracing::info!("Program complete: {} lines", program.line_count());
        Ok(program)
    }

    fn validate(&self, panel: &Panel, operations: &[Operation]) -> CamResult<()> {
        self.profile.validate()?;
        panel.validate().map_err(CamError::InvalidPanel)?;

        for (index, op) in operations.iter().enumerate() {
            op.validate()
                .map_err(|source| CamError::InvalidOperation {
                    index,
                    kind: op.kind(),
                    source,
                })?;
            if let Ok(tool) = resolve(op.tool_id(), self.tools) {
                tool.validate().map_err(|source| CamError::InvalidTool {
                    id: tool.id.clone(),
                    source,
                })?;
            }
        }
        Ok(())
    }

    fn timestamp(&self) -> String {
        match &self.timestamp {
            Some(ts) => ts.clone(),
            None => chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    fn header(&self, panel: &Panel, operation_count: usize) -> Vec<String> {
        let mut out = GcodeWriter::new(self.syntax);
        out.comment(format!("Panel: {}", panel.name));
        out.comment(format!(
            "Dimensions: {} x {} x {} mm",
            panel.length, panel.width, panel.thickness
        ));
        out.comment(format!("Material: {}", panel.material));
        out.comment(format!("Generated: {}", self.timestamp()));
        out.comment(format!("Machine: {}", self.profile.dialect));
        out.comment(format!("Operations: {}", operation_count));
        out.absolute_positioning();
        out.millimeter_units();
        out.rapid_z_noted(self.profile.safe_height, "Move to safe height");
        out.spindle_on_noted(self.profile.spindle_speed, "Start spindle");
        out.into_lines()
    }

    fn footer(&self) -> Vec<String> {
        let mut out = GcodeWriter::new(self.syntax);
        out.comment("End of program");
        out.rapid_z_noted(self.profile.safe_height, "Retract to safe height");
        out.spindle_off();
        out.program_end();
        out.into_lines()
    }

    fn block(
        &self,
        index: usize,
        op: &Operation,
        current_speed: &mut u32,
    ) -> CamResult<OperationBlock> {
        let kind = op.kind();
        let tool_id = op.tool_id().clone();
        let mut out = GcodeWriter::new(self.syntax);

        let tool = match resolve(&tool_id, self.tools) {
            Ok(tool) => tool,
            Err(err) => {
                tracing::warn!("Operation {} ({}) skipped: {}", index + 1, kind, err);
                out.comment(format!(
                    "ERROR: operation {} ({}) skipped, tool '{}' not found",
                    index + 1,
                    kind,
                    tool_id
                ));
                return Ok(OperationBlock {
                    index,
                    kind,
                    tool_id,
                    status: BlockStatus::Skipped {
                        reason: err.to_string(),
                    },
                    lines: out.into_lines(),
                });
            }
        };

        tracing::debug!(
            "Operation {}: {} with {}",
            index + 1,
            kind,
            tool.description_short()
        );
        check_tool_kind(index, kind, tool);

        let params = CuttingParams::resolve(tool, self.profile);
        if params.spindle_speed != *current_speed {
            out.spindle_on(params.spindle_speed);
            *current_speed = params.spindle_speed;
        }

        let model_err = |source| CamError::InvalidOperation {
            index,
            kind,
            source,
        };

        match op {
            Operation::Drill(drill) => {
                out.comment(format!("Operation {}: {} [{}]", index + 1, kind, tool_id));
                let gen = DrillGenerator::new(drill, tool, self.profile);
                self.check_depth(&mut out, index, tool, -gen.final_depth());
                gen.generate(&mut out);
            }
            Operation::Contour(contour) => {
                out.comment(format!("Operation {}: {} [{}]", index + 1, kind, tool_id));
                let gen = ContourGenerator::new(contour, tool, self.profile);
                self.check_plan(&mut out, index, tool, &gen.pass_plan());
                gen.generate(&mut out).map_err(model_err)?;
            }
            Operation::ClosedPocket(pocket) => {
                let gen = PocketGenerator::closed(pocket, tool, self.profile);
                out.comment(format!(
                    "Operation {}: {} [{}], {} strategy",
                    index + 1,
                    kind,
                    tool_id,
                    gen.strategy()
                ));
                self.check_plan(&mut out, index, tool, gen.pass_plan());
                gen.generate(&mut out).map_err(model_err)?;
            }
            Operation::OpenPocket(pocket) => {
                let gen = PocketGenerator::open(pocket, tool, self.profile);
                out.comment(format!(
                    "Operation {}: {} [{}], {} strategy",
                    index + 1,
                    kind,
                    tool_id,
                    gen.strategy()
                ));
                self.check_plan(&mut out, index, tool, gen.pass_plan());
                gen.generate(&mut out).map_err(model_err)?;
            }
        }

        Ok(OperationBlock {
            index,
            kind,
            tool_id,
            status: BlockStatus::Generated,
            lines: out.into_lines(),
        })
    }

    fn check_plan(&self, out: &mut GcodeWriter, index: usize, tool: &Tool, plan: &PassPlan) {
        self.check_depth(out, index, tool, plan.max_step());
    }

    fn check_depth(&self, out: &mut GcodeWriter, index: usize, tool: &Tool, cut: f64) {
        let Some(max_depth) = tool.max_depth else {
            return;
        };
        if cut > max_depth {
            tracing::warn!(
                "Operation {} cuts {} mm in one pass, tool '{}' is rated for {} mm",
                index + 1,
                format_mm(cut),
                tool.id,
                format_mm(max_depth)
            );
            out.comment(format!(
                "WARNING: cut depth {} exceeds tool maximum {}",
                format_mm(cut),
                format_mm(max_depth)
            ));
        }
    }
}

fn check_tool_kind(index: usize, kind: OperationKind, tool: &Tool) {
    let expected = match kind {
        OperationKind::Drill => ToolKind::DrillBit,
        OperationKind::Contour | OperationKind::ClosedPocket | OperationKind::OpenPocket => {
            ToolKind::MillingBit
        }
    };
    if tool.kind != expected {
        tracing::warn!(
            "Operation {} ({}) uses {} '{}'",
            index + 1,
            kind,
            tool.kind,
            tool.id
        );
    }
}

/// Generate program text with the current time as timestamp
pub fn generate_program(
    panel: &Panel,
    operations: &[Operation],
    tools: &ToolCatalog,
    profile: &MachineProfile,
) -> CamResult<String> {
    ProgramAssembler::new(profile, tools)
        .assemble(panel, operations)
        .map(|program| program.to_string())
}
