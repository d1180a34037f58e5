use serde::{Deserialize, Serialize};

pub use crate::core::Color;
use crate::core::{BandIndex, BandTransform, PathCommand};
use crate::error::{ChartError, ChartResult};

/// Surface kind a chart draws on. Chosen once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Retained shapes, one persistent node per band.
    Vector,
    /// Immediate drawing; the whole surface is cleared and redrawn per frame.
    #[default]
    Raster,
}

/// Draw command for one band: fill `path` with `fill` after applying
/// `transform` (reflect, then translate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandPrimitive {
    pub index: BandIndex,
    pub fill: Color,
    pub transform: BandTransform,
    pub path: Vec<PathCommand>,
}

impl BandPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.transform.scale_y.is_finite() || !self.transform.translate_y.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "band {} transform must be finite",
                self.index.get()
            )));
        }
        if !self.path.iter().all(|command| command.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "band {} path coordinates must be finite",
                self.index.get()
            )));
        }
        self.fill.validate()
    }
}
