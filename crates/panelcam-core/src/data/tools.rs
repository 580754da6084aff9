//! Tool definitions and catalog lookup
//!
//! This module provides:
//! - Tool kinds (milling bits and drill bits)
//! - Tool geometry and cutting parameters
//! - The tool catalog keyed by tool identifier
//! - Tool resolution for the program assembler
//! - A standard catalog of common panel tools

use crate::error::{require_feed_rate, require_positive, ModelError, ModelResult, ToolNotFound};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tool kinds used on panel routers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Router / milling bit, used for contours and pockets
    MillingBit,
    /// Drill bit, used for vertical boring
    DrillBit,
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MillingBit => write!(f, "Milling Bit"),
            Self::DrillBit => write!(f, "Drill Bit"),
        }
    }
}

/// Tool identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct ToolId(
    /// The unique string identifier for the tool.
    pub String,
);

impl ToolId {
    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ToolId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ToolId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Complete tool definition
///
/// A spindle speed or feed rate of zero means "use the machine profile
/// default".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Unique tool identifier
    pub id: ToolId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Tool kind
    pub kind: ToolKind,
    /// Cutting diameter in mm
    pub diameter: f64,
    /// Spindle speed in RPM
    #[serde(default)]
    pub spindle_speed: u32,
    /// Cutting feed rate in mm/min
    #[serde(default)]
    pub feed_rate: f64,
    /// Plunge rate in mm/min (milling bits only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plunge_rate: Option<f64>,
    /// Maximum cutting depth in mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<f64>,
}

impl Tool {
    /// Create a new tool, rejecting non-physical geometry
    pub fn new(
        id: impl Into<ToolId>,
        kind: ToolKind,
        diameter: f64,
        spindle_speed: u32,
        feed_rate: f64,
    ) -> ModelResult<Self> {
        let tool = Self {
            id: id.into(),
            name: String::new(),
            kind,
            diameter,
            spindle_speed,
            feed_rate,
            plunge_rate: None,
            max_depth: None,
        };
        tool.validate()?;
        Ok(tool)
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the plunge rate in mm/min
    pub fn with_plunge_rate(mut self, plunge_rate: f64) -> ModelResult<Self> {
        require_feed_rate("plunge_rate", plunge_rate)?;
        self.plunge_rate = Some(plunge_rate);
        Ok(self)
    }

    /// Set the maximum cutting depth in mm
    pub fn with_max_depth(mut self, max_depth: f64) -> ModelResult<Self> {
        require_positive("max_depth", max_depth)?;
        self.max_depth = Some(max_depth);
        Ok(self)
    }

    /// Check every field, used for tools that arrive through deserialization
    pub fn validate(&self) -> ModelResult<()> {
        if self.id.0.trim().is_empty() {
            return Err(ModelError::EmptyIdentifier { entity: "tool" });
        }
        require_positive("diameter", self.diameter)?;
        // Zero means the machine profile's feed is used.
        if self.feed_rate != 0.0 {
            require_feed_rate("feed_rate", self.feed_rate)?;
        }
        if let Some(plunge) = self.plunge_rate {
            require_feed_rate("plunge_rate", plunge)?;
        }
        if let Some(max_depth) = self.max_depth {
            require_positive("max_depth", max_depth)?;
        }
        Ok(())
    }

    /// Plunge rate, only meaningful for milling bits
    pub fn plunge_rate(&self) -> Option<f64> {
        match self.kind {
            ToolKind::MillingBit => self.plunge_rate,
            ToolKind::DrillBit => None,
        }
    }

    /// Get a descriptive string for the tool
    pub fn description_short(&self) -> String {
        let name = if self.name.is_empty() {
            self.id.as_str()
        } else {
            self.name.as_str()
        };
        format!("{} - {} dia {}", name, self.diameter, self.kind)
    }
}

/// Resolve a tool by exact identifier equality
pub fn resolve<'a>(tool_id: &ToolId, catalog: &'a ToolCatalog) -> Result<&'a Tool, ToolNotFound> {
    catalog
        .get_tool(tool_id)
        .ok_or_else(|| ToolNotFound(tool_id.clone()))
}

/// Tool catalog - unordered collection of tools keyed by identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Tool>", into = "Vec<Tool>")]
pub struct ToolCatalog {
    tools: HashMap<ToolId, Tool>,
}

impl ToolCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool, replacing any tool with the same identifier
    pub fn add_tool(&mut self, tool: Tool) {
        if let Some(previous) = self.tools.insert(tool.id.clone(), tool) {
            tracing::warn!("Tool '{}' defined more than once, keeping the last definition", previous.id);
        }
    }

    /// Get a tool by ID
    pub fn get_tool(&self, id: &ToolId) -> Option<&Tool> {
        self.tools.get(id)
    }

    /// Resolve a tool, reporting absence as an error
    pub fn resolve(&self, id: &ToolId) -> Result<&Tool, ToolNotFound> {
        resolve(id, self)
    }

    /// Iterate over all tools in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.values()
    }

    /// Validate every tool in the catalog
    pub fn validate(&self) -> ModelResult<()> {
        for tool in self.iter() {
            tool.validate().map_err(|e| ModelError::InvalidTool {
                id: tool.id.clone(),
                source: Box::new(e),
            })?;
        }
        Ok(())
    }

    /// Get the number of tools in the catalog
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl From<Vec<Tool>> for ToolCatalog {
    fn from(tools: Vec<Tool>) -> Self {
        tools.into_iter().collect()
    }
}

impl From<ToolCatalog> for Vec<Tool> {
    fn from(catalog: ToolCatalog) -> Self {
        let mut tools: Vec<Tool> = catalog.tools.into_values().collect();
        tools.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        tools
    }
}

impl FromIterator<Tool> for ToolCatalog {
    fn from_iter<I: IntoIterator<Item = Tool>>(iter: I) -> Self {
        let mut catalog = ToolCatalog::new();
        for tool in iter {
            catalog.add_tool(tool);
        }
        catalog
    }
}

/// Initialize the standard catalog with common panel tools
pub fn init_standard_catalog() -> ToolCatalog {
    let mut catalog = ToolCatalog::new();

    catalog.add_tool(Tool {
        id: ToolId::from("mill_6"),
        name: "6 mm Compression Spiral".to_string(),
        kind: ToolKind::MillingBit,
        diameter: 6.0,
        spindle_speed: 18000,
        feed_rate: 4000.0,
        plunge_rate: Some(1200.0),
        max_depth: Some(22.0),
    });

    catalog.add_tool(Tool {
        id: ToolId::from("mill_12"),
        name: "12 mm Straight Router Bit".to_string(),
        kind: ToolKind::MillingBit,
        diameter: 12.0,
        spindle_speed: 16000,
        feed_rate: 5000.0,
        plunge_rate: Some(1500.0),
        max_depth: Some(30.0),
    });

    catalog.add_tool(Tool {
        id: ToolId::from("drill_5"),
        name: "5 mm Dowel Drill".to_string(),
        kind: ToolKind::DrillBit,
        diameter: 5.0,
        spindle_speed: 6000,
        feed_rate: 2000.0,
        plunge_rate: None,
        max_depth: Some(35.0),
    });

    catalog.add_tool(Tool {
        id: ToolId::from("drill_35"),
        name: "35 mm Hinge Boring Bit".to_string(),
        kind: ToolKind::DrillBit,
        diameter: 35.0,
        spindle_speed: 4000,
        feed_rate: 1500.0,
        plunge_rate: None,
        max_depth: Some(13.0),
    });

    catalog
}
