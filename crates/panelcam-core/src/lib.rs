//! # PanelCAM Core
//!
//! Core types and utilities for PanelCAM.
//! Provides the data model consumed by the program generator: panels,
//! tools, the tool catalog and machining operations, plus the numeric
//! formatting used for command operands.

pub mod data;
pub mod error;
pub mod units;

pub use data::{
    init_standard_catalog, resolve, ClosedPocketOperation, CompensationSide, ContourOperation,
    DrillOperation, EntryStrategy, ExitStrategy, OpenPocketOperation, Operation, OperationKind,
    Panel, PocketStrategy, Point2D, Tool, ToolCatalog, ToolId, ToolKind,
};

pub use error::{ModelError, ModelResult, ToolNotFound};
