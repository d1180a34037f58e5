use serde::{Deserialize, Serialize};

use crate::core::color_scale::Polarity;
use crate::error::{ChartError, ChartResult};

/// How negative bands are laid out relative to positive ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizonMode {
    /// Bands stack edge-to-edge; negative values hang from the top.
    #[default]
    Offset,
    /// Negative bands are flipped to grow from the bottom like positive ones.
    Mirror,
}

/// Signed band identifier, never zero.
///
/// `1..=bands` are positive bands, `-bands..=-1` negative ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BandIndex(i32);

impl BandIndex {
    pub fn new(value: i32) -> ChartResult<Self> {
        if value == 0 {
            return Err(ChartError::InvalidData(
                "band index must be non-zero".to_owned(),
            ));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn polarity(self) -> Polarity {
        if self.0 < 0 {
            Polarity::Negative
        } else {
            Polarity::Positive
        }
    }
}

/// Every band index for `bands` stripes per polarity, negatives first.
#[must_use]
pub fn band_indices(bands: u32) -> Vec<BandIndex> {
    let count = i32::try_from(bands).unwrap_or(i32::MAX);
    (1..=count)
        .map(|value| BandIndex(-value))
        .chain((1..=count).map(BandIndex))
        .collect()
}

/// Vertical placement of one band: `y' = scale_y * (y + translate_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandTransform {
    pub scale_y: f64,
    pub translate_y: f64,
}

impl BandTransform {
    pub const IDENTITY: Self = Self {
        scale_y: 1.0,
        translate_y: 0.0,
    };

    /// Places band `index` for a chart of `bands` stripes of `height` pixels.
    #[must_use]
    pub fn for_band(index: BandIndex, bands: u32, height: f64, mode: HorizonMode) -> Self {
        let d = f64::from(index.get());
        let bands = f64::from(bands);
        match mode {
            HorizonMode::Offset => {
                let shift = if index.get() < 0 { 1.0 } else { 0.0 };
                Self {
                    scale_y: 1.0,
                    translate_y: (d + shift - bands) * height,
                }
            }
            HorizonMode::Mirror => Self {
                scale_y: if index.get() < 0 { -1.0 } else { 1.0 },
                translate_y: (d - bands) * height,
            },
        }
    }

    #[must_use]
    pub fn apply(self, y: f64) -> f64 {
        self.scale_y * (y + self.translate_y)
    }

    #[must_use]
    pub fn is_reflected(self) -> bool {
        self.scale_y < 0.0
    }

    /// SVG `transform` attribute value. Any scale other than exactly `1` is
    /// written out, including the partial scales of a running transition.
    #[must_use]
    pub fn to_svg(self) -> String {
        if self.scale_y != 1.0 {
            format!("scale(1,{}) translate(0,{})", self.scale_y, self.translate_y)
        } else {
            format!("translate(0,{})", self.translate_y)
        }
    }
}
