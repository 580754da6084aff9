//! Data model: panels, tools and machining operations

pub mod operations;
pub mod panel;
pub mod tools;

pub use operations::{
    ClosedPocketOperation, CompensationSide, ContourOperation, DrillOperation, EntryStrategy,
    ExitStrategy, OpenPocketOperation, Operation, OperationKind, PocketStrategy, Point2D,
};
pub use panel::Panel;
pub use tools::{init_standard_catalog, resolve, Tool, ToolCatalog, ToolId, ToolKind};
