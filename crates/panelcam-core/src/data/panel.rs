//! Panel metadata carried into program headers

use crate::error::{require_positive, ModelResult};
use serde::{Deserialize, Serialize};

/// The workpiece being machined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub name: String,
    /// Length along X in mm
    pub length: f64,
    /// Width along Y in mm
    pub width: f64,
    /// Thickness along Z in mm
    pub thickness: f64,
    #[serde(default)]
    pub material: String,
}

impl Panel {
    pub fn new(
        name: impl Into<String>,
        length: f64,
        width: f64,
        thickness: f64,
        material: impl Into<String>,
    ) -> ModelResult<Self> {
        let panel = Self {
            name: name.into(),
            length,
            width,
            thickness,
            material: material.into(),
        };
        panel.validate()?;
        Ok(panel)
    }

    pub fn validate(&self) -> ModelResult<()> {
        require_positive("length", self.length)?;
        require_positive("width", self.width)?;
        require_positive("thickness", self.thickness)?;
        Ok(())
    }
}
