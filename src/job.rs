//! Job files.
//!
//! A job bundles everything needed to produce one program: the panel, its
//! operations in machining order, the tool catalog and optionally a
//! machine profile. Jobs are stored as JSON or TOML, chosen by extension.

use anyhow::{bail, Context, Result};
use panelcam_camtools::{CamError, CamResult, Program, ProgramAssembler};
use panelcam_core::{init_standard_catalog, Operation, Panel, ToolCatalog, ToolId};
use panelcam_settings::MachineProfile;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A panel with its operations, tools and optional machine profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub panel: Panel,
    #[serde(default)]
    pub operations: Vec<Operation>,
    /// Tool catalog; the standard catalog is used when empty
    #[serde(default, skip_serializing_if = "ToolCatalog::is_empty")]
    pub tools: ToolCatalog,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<MachineProfile>,
}

impl Job {
    pub fn new(panel: Panel) -> Self {
        Self {
            panel,
            operations: Vec::new(),
            tools: ToolCatalog::new(),
            profile: None,
        }
    }

    pub fn with_operation(mut self, op: impl Into<Operation>) -> Self {
        self.operations.push(op.into());
        self
    }

    /// Load a job from a `.json` or `.toml` file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {}", path.display()))?;

        let job: Self = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse job file {}", path.display()))?,
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse job file {}", path.display()))?,
            other => bail!(
                "Unsupported job file format '{}' for {}",
                other.unwrap_or("<none>"),
                path.display()
            ),
        };

        job.validate()
            .with_context(|| format!("Invalid job file {}", path.display()))?;
        tracing::debug!(
            "Loaded job '{}' with {} operations from {}",
            job.panel.name,
            job.operations.len(),
            path.display()
        );
        Ok(job)
    }

    /// Check the panel, every operation, the catalog and the embedded profile
    pub fn validate(&self) -> CamResult<()> {
        self.panel.validate().map_err(CamError::InvalidPanel)?;

        for (index, op) in self.operations.iter().enumerate() {
            op.validate().map_err(|source| CamError::InvalidOperation {
                index,
                kind: op.kind(),
                source,
            })?;
        }

        self.tools.validate().map_err(CamError::InvalidCatalog)?;

        if let Some(profile) = &self.profile {
            profile.validate()?;
        }
        Ok(())
    }

    /// The catalog operations are resolved against
    pub fn catalog(&self) -> ToolCatalog {
        if self.tools.is_empty() {
            init_standard_catalog()
        } else {
            self.tools.clone()
        }
    }

    /// Operations whose tool is not in the catalog, as (zero-based index, tool id)
    pub fn missing_tools(&self) -> Vec<(usize, ToolId)> {
        let catalog = self.catalog();
        self.operations
            .iter()
            .enumerate()
            .filter(|(_, op)| catalog.get_tool(op.tool_id()).is_none())
            .map(|(index, op)| (index, op.tool_id().clone()))
            .collect()
    }

    /// Assemble the program for this job on the given machine
    pub fn assemble(&self, profile: &MachineProfile, timestamp: Option<&str>) -> CamResult<Program> {
        let catalog = self.catalog();
        let mut assembler = ProgramAssembler::new(profile, &catalog);
        if let Some(ts) = timestamp {
            assembler = assembler.with_timestamp(ts);
        }
        assembler.assemble(&self.panel, &self.operations)
    }
}

/// Pick the machine profile for a job.
///
/// An explicit profile file wins, then the job's embedded profile, then
/// the profile at `default_path` if that file exists, then built-in
/// defaults.
pub fn resolve_profile(
    explicit: Option<&Path>,
    job: &Job,
    default_path: Option<&Path>,
) -> Result<MachineProfile> {
    if let Some(path) = explicit {
        return MachineProfile::load_from_file(path)
            .with_context(|| format!("Failed to load machine profile {}", path.display()));
    }
    if let Some(profile) = &job.profile {
        tracing::debug!("Using machine profile embedded in job");
        return Ok(profile.clone());
    }
    if let Some(path) = default_path.filter(|p| p.exists()) {
        return MachineProfile::load_from_file(path)
            .with_context(|| format!("Failed to load machine profile {}", path.display()));
    }
    tracing::debug!("Using built-in machine profile");
    Ok(MachineProfile::default())
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
