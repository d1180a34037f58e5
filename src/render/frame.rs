use crate::error::{ChartError, ChartResult};
use crate::render::{Backend, BandPrimitive};

/// Backend-agnostic scene for one chart draw pass.
///
/// `width`/`height` are the surface size for this frame; they may be
/// fractional while a resize transition is running.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub backend: Backend,
    pub width: f64,
    pub height: f64,
    pub bands: Vec<BandPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(backend: Backend, width: f64, height: f64) -> Self {
        Self {
            backend,
            width,
            height,
            bands: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_band(mut self, band: BandPrimitive) -> Self {
        self.bands.push(band);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "frame size must be finite and >= 0".to_owned(),
            ));
        }

        for band in &self.bands {
            band.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bands.iter().all(|band| band.path.is_empty())
    }

    /// Surface size rounded to whole pixels, as raster targets need.
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.round().max(0.0) as u32,
            self.height.round().max(0.0) as u32,
        )
    }
}
