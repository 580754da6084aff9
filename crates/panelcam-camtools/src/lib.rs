//! # PanelCAM CAM Tools
//!
//! Turns a panel, an ordered list of machining operations, a tool catalog
//! and a machine profile into G-code program text.
//!
//! ## Generators
//!
//! - **Drill**: single vertical plunge, with overtravel for through holes
//! - **Contour**: path profiling with entry/exit strategies, multi-pass
//!   depth control and optional tool-radius compensation
//! - **Pocket**: closed and open pockets traced per depth pass
//!
//! ## Supporting Infrastructure
//!
//! - **Dialect**: instruction and comment spelling per controller family
//! - **Writer**: line-oriented emission with fixed operand formatting
//! - **Program**: header, per-operation blocks and footer

pub mod contour;
pub mod cutting;
pub mod dialect;
pub mod drill;
pub mod error;
pub mod multipass;
pub mod pocket;
pub mod program;
pub mod writer;

pub use contour::{ContourGenerator, RAMP_DISTANCE, SPIRAL_MAX_STEP};
pub use cutting::CuttingParams;
pub use dialect::{CommentStyle, DialectSyntax};
pub use drill::{DrillGenerator, THROUGH_OVERTRAVEL};
pub use error::{CamError, CamResult};
pub use multipass::{Pass, PassPlan};
pub use pocket::PocketGenerator;
pub use program::{generate_program, BlockStatus, OperationBlock, Program, ProgramAssembler};
pub use writer::GcodeWriter;
