//! # PanelCAM
//!
//! A machining-operation compiler for CNC panel routers. It turns drilling,
//! contour and pocket operations on a rectangular panel into G-code for a
//! chosen controller dialect.
//!
//! ## Architecture
//!
//! PanelCAM is organized as a workspace with multiple crates:
//!
//! 1. **panelcam-core** - Panels, tools, tool catalog, operations, formatting
//! 2. **panelcam-settings** - Machine profile and dialect selection
//! 3. **panelcam-camtools** - Per-operation generators and program assembly
//! 4. **panelcam** - Job files and the command line binary

pub mod job;

pub use panelcam_camtools as camtools;
pub use panelcam_core::data;

pub use panelcam_camtools::{
    generate_program, BlockStatus, CamError, CamResult, OperationBlock, Program,
    ProgramAssembler,
};
pub use panelcam_core::{
    init_standard_catalog, ModelError, Operation, OperationKind, Panel, Tool, ToolCatalog,
    ToolId, ToolKind,
};
pub use panelcam_settings::{MachineDialect, MachineProfile, SettingsError};

pub use job::{resolve_profile, Job};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support (default level `warn`)
/// - Output on stderr, keeping stdout free for program text
/// - Human readable or JSON lines formatting
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
