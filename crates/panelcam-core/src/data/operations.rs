//! Machining operations on a panel
//!
//! An [`Operation`] is one declarative machining instruction. The set of
//! operation kinds is closed; code generation matches on it exhaustively.

use super::tools::ToolId;
use crate::error::{
    require_finite, require_non_negative, require_positive, ModelError, ModelResult,
};
use serde::{Deserialize, Serialize};

/// A point in the panel's XY plane, in mm
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by the given offsets.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    fn validate(&self) -> ModelResult<()> {
        require_finite("x", self.x)?;
        require_finite("y", self.y)?;
        Ok(())
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// How the tool engages the material at the start of a cut
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryStrategy {
    /// Straight plunge
    Vertical,
    /// Inclined entry; the angle is in degrees from the surface
    Ramp { angle: f64 },
    /// Helical entry around the first path point
    Spiral { radius: f64 },
}

impl EntryStrategy {
    fn validate(&self) -> ModelResult<()> {
        match *self {
            Self::Vertical => Ok(()),
            Self::Ramp { angle } => {
                require_positive("ramp_angle", angle)?;
                if angle > 90.0 {
                    return Err(ModelError::OutOfRange {
                        field: "ramp_angle",
                        value: angle,
                        constraint: "at most 90 degrees",
                    });
                }
                Ok(())
            }
            Self::Spiral { radius } => require_non_negative("spiral_radius", radius).map(|_| ()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Ramp { .. } => "ramp",
            Self::Spiral { .. } => "spiral",
        }
    }
}

/// How the tool leaves the material at the end of the last pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStrategy {
    Vertical,
    Ramp,
    Straight,
}

/// Side of the path the cutter edge should follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationSide {
    /// Cut on the centerline
    #[default]
    None,
    /// Cutter to the left of the path direction
    Left,
    /// Cutter to the right of the path direction
    Right,
}

/// Pocket clearing strategy. Reported in program comments only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PocketStrategy {
    #[default]
    Offset,
    Zigzag,
    Spiral,
}

impl std::fmt::Display for PocketStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Offset => write!(f, "offset"),
            Self::Zigzag => write!(f, "zigzag"),
            Self::Spiral => write!(f, "spiral"),
        }
    }
}

/// Vertical boring at a single position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillOperation {
    pub position: Point2D,
    /// Hole diameter in mm
    pub diameter: f64,
    /// Hole depth in mm, measured down from the panel surface
    pub depth: f64,
    /// Whether the hole goes through the panel
    #[serde(default)]
    pub through: bool,
    pub tool_id: ToolId,
}

impl DrillOperation {
    pub fn new(
        position: impl Into<Point2D>,
        diameter: f64,
        depth: f64,
        through: bool,
        tool_id: impl Into<ToolId>,
    ) -> ModelResult<Self> {
        let op = Self {
            position: position.into(),
            diameter,
            depth,
            through,
            tool_id: tool_id.into(),
        };
        op.validate()?;
        Ok(op)
    }

    pub fn validate(&self) -> ModelResult<()> {
        self.position.validate()?;
        require_positive("diameter", self.diameter)?;
        require_non_negative("depth", self.depth)?;
        validate_tool_id(&self.tool_id)
    }
}

/// Profile cut along a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourOperation {
    pub path: Vec<Point2D>,
    #[serde(default)]
    pub closed: bool,
    pub depth: f64,
    #[serde(default)]
    pub multi_pass: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_pass_depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<ExitStrategy>,
    #[serde(default)]
    pub compensation: CompensationSide,
    pub tool_id: ToolId,
}

impl ContourOperation {
    pub fn new(
        path: Vec<Point2D>,
        closed: bool,
        depth: f64,
        tool_id: impl Into<ToolId>,
    ) -> ModelResult<Self> {
        let op = Self {
            path,
            closed,
            depth,
            multi_pass: false,
            per_pass_depth: None,
            entry: None,
            exit: None,
            compensation: CompensationSide::None,
            tool_id: tool_id.into(),
        };
        op.validate()?;
        Ok(op)
    }

    /// Enable multi-pass cutting. Without a per-pass depth the tool's
    /// maximum depth decides the step.
    pub fn with_multi_pass(mut self, per_pass_depth: Option<f64>) -> ModelResult<Self> {
        if let Some(step) = per_pass_depth {
            require_positive("per_pass_depth", step)?;
        }
        self.multi_pass = true;
        self.per_pass_depth = per_pass_depth;
        Ok(self)
    }

    pub fn with_entry(mut self, entry: EntryStrategy) -> ModelResult<Self> {
        entry.validate()?;
        self.entry = Some(entry);
        Ok(self)
    }

    pub fn with_exit(mut self, exit: ExitStrategy) -> Self {
        self.exit = Some(exit);
        self
    }

    pub fn with_compensation(mut self, side: CompensationSide) -> Self {
        self.compensation = side;
        self
    }

    pub fn validate(&self) -> ModelResult<()> {
        validate_path("Contour", &self.path)?;
        validate_depths(self.depth, self.per_pass_depth)?;
        if let Some(entry) = &self.entry {
            entry.validate()?;
        }
        validate_tool_id(&self.tool_id)
    }
}

/// Pocket bounded by a closed path
///
/// The path is always cut as a closed loop; the stored `closed` flag is
/// kept for round-tripping editor data only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedPocketOperation {
    pub path: Vec<Point2D>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub strategy: PocketStrategy,
    pub depth: f64,
    #[serde(default)]
    pub multi_pass: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_pass_depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryStrategy>,
    pub tool_id: ToolId,
}

impl ClosedPocketOperation {
    pub fn new(path: Vec<Point2D>, depth: f64, tool_id: impl Into<ToolId>) -> ModelResult<Self> {
        let op = Self {
            path,
            closed: true,
            strategy: PocketStrategy::default(),
            depth,
            multi_pass: false,
            per_pass_depth: None,
            entry: None,
            tool_id: tool_id.into(),
        };
        op.validate()?;
        Ok(op)
    }

    pub fn with_strategy(mut self, strategy: PocketStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_multi_pass(mut self, per_pass_depth: Option<f64>) -> ModelResult<Self> {
        if let Some(step) = per_pass_depth {
            require_positive("per_pass_depth", step)?;
        }
        self.multi_pass = true;
        self.per_pass_depth = per_pass_depth;
        Ok(self)
    }

    pub fn with_entry(mut self, entry: EntryStrategy) -> ModelResult<Self> {
        entry.validate()?;
        self.entry = Some(entry);
        Ok(self)
    }

    pub fn validate(&self) -> ModelResult<()> {
        validate_path("Closed pocket", &self.path)?;
        validate_depths(self.depth, self.per_pass_depth)?;
        if let Some(entry) = &self.entry {
            entry.validate()?;
        }
        validate_tool_id(&self.tool_id)
    }
}

/// Open-ended pocket (groove or rebate) along a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPocketOperation {
    pub path: Vec<Point2D>,
    /// Pocket width in mm, informational
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub strategy: PocketStrategy,
    pub depth: f64,
    #[serde(default)]
    pub multi_pass: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_pass_depth: Option<f64>,
    pub tool_id: ToolId,
}

impl OpenPocketOperation {
    pub fn new(
        path: Vec<Point2D>,
        width: f64,
        depth: f64,
        tool_id: impl Into<ToolId>,
    ) -> ModelResult<Self> {
        let op = Self {
            path,
            width,
            strategy: PocketStrategy::default(),
            depth,
            multi_pass: false,
            per_pass_depth: None,
            tool_id: tool_id.into(),
        };
        op.validate()?;
        Ok(op)
    }

    pub fn with_strategy(mut self, strategy: PocketStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_multi_pass(mut self, per_pass_depth: Option<f64>) -> ModelResult<Self> {
        if let Some(step) = per_pass_depth {
            require_positive("per_pass_depth", step)?;
        }
        self.multi_pass = true;
        self.per_pass_depth = per_pass_depth;
        Ok(self)
    }

    pub fn validate(&self) -> ModelResult<()> {
        validate_path("Open pocket", &self.path)?;
        require_non_negative("width", self.width)?;
        validate_depths(self.depth, self.per_pass_depth)?;
        validate_tool_id(&self.tool_id)
    }
}

/// Operation kind, the discriminant of [`Operation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Drill,
    Contour,
    ClosedPocket,
    OpenPocket,
}

impl OperationKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Drill => "Drill",
            Self::Contour => "Contour",
            Self::ClosedPocket => "Closed pocket",
            Self::OpenPocket => "Open pocket",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A machining operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    Drill(DrillOperation),
    Contour(ContourOperation),
    ClosedPocket(ClosedPocketOperation),
    OpenPocket(OpenPocketOperation),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Drill(_) => OperationKind::Drill,
            Self::Contour(_) => OperationKind::Contour,
            Self::ClosedPocket(_) => OperationKind::ClosedPocket,
            Self::OpenPocket(_) => OperationKind::OpenPocket,
        }
    }

    pub fn tool_id(&self) -> &ToolId {
        match self {
            Self::Drill(op) => &op.tool_id,
            Self::Contour(op) => &op.tool_id,
            Self::ClosedPocket(op) => &op.tool_id,
            Self::OpenPocket(op) => &op.tool_id,
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        match self {
            Self::Drill(op) => op.validate(),
            Self::Contour(op) => op.validate(),
            Self::ClosedPocket(op) => op.validate(),
            Self::OpenPocket(op) => op.validate(),
        }
    }
}

impl From<DrillOperation> for Operation {
    fn from(op: DrillOperation) -> Self {
        Self::Drill(op)
    }
}

impl From<ContourOperation> for Operation {
    fn from(op: ContourOperation) -> Self {
        Self::Contour(op)
    }
}

impl From<ClosedPocketOperation> for Operation {
    fn from(op: ClosedPocketOperation) -> Self {
        Self::ClosedPocket(op)
    }
}

impl From<OpenPocketOperation> for Operation {
    fn from(op: OpenPocketOperation) -> Self {
        Self::OpenPocket(op)
    }
}

fn validate_path(operation: &'static str, path: &[Point2D]) -> ModelResult<()> {
    if path.is_empty() {
        return Err(ModelError::EmptyPath { operation });
    }
    path.iter().try_for_each(Point2D::validate)
}

fn validate_depths(depth: f64, per_pass_depth: Option<f64>) -> ModelResult<()> {
    require_non_negative("depth", depth)?;
    if let Some(step) = per_pass_depth {
        require_positive("per_pass_depth", step)?;
    }
    Ok(())
}

fn validate_tool_id(tool_id: &ToolId) -> ModelResult<()> {
    if tool_id.as_str().trim().is_empty() {
        return Err(ModelError::EmptyIdentifier { entity: "tool reference" });
    }
    Ok(())
}
