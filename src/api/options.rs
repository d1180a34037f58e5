use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{ColorRamp, CurveKind, HorizonMode, Polarity, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Serializable chart configuration.
///
/// Callbacks and accessors live on the chart itself; everything here can be
/// persisted and restored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonOptions {
    #[serde(default = "default_width")]
    pub width: f64,
    /// Height of one band stripe, which is also the surface height.
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_bands")]
    pub bands: u32,
    #[serde(default)]
    pub mode: HorizonMode,
    #[serde(default)]
    pub x_min: Option<f64>,
    #[serde(default)]
    pub x_max: Option<f64>,
    /// Absolute value mapped to a full stack of bands. `None` or `0` follows
    /// the data.
    #[serde(default)]
    pub y_extent: Option<f64>,
    #[serde(default = "default_y_scale_exp")]
    pub y_scale_exp: f64,
    #[serde(default = "default_positive_colors")]
    pub positive_colors: Vec<Color>,
    #[serde(default = "default_negative_colors")]
    pub negative_colors: Vec<Color>,
    #[serde(default)]
    pub positive_color_stops: Option<Vec<f64>>,
    #[serde(default)]
    pub negative_color_stops: Option<Vec<f64>>,
    #[serde(default)]
    pub curve: CurveKind,
    #[serde(default)]
    pub duration_ms: u64,
}

impl Default for HorizonOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            bands: default_bands(),
            mode: HorizonMode::default(),
            x_min: None,
            x_max: None,
            y_extent: None,
            y_scale_exp: default_y_scale_exp(),
            positive_colors: default_positive_colors(),
            negative_colors: default_negative_colors(),
            positive_color_stops: None,
            negative_color_stops: None,
            curve: CurveKind::default(),
            duration_ms: 0,
        }
    }
}

impl HorizonOptions {
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_bands(mut self, bands: u32) -> Self {
        self.bands = bands;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: HorizonMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_x_range(mut self, x_min: Option<f64>, x_max: Option<f64>) -> Self {
        self.x_min = x_min;
        self.x_max = x_max;
        self
    }

    #[must_use]
    pub fn with_y_extent(mut self, y_extent: Option<f64>) -> Self {
        self.y_extent = y_extent;
        self
    }

    #[must_use]
    pub fn with_y_scale_exp(mut self, exponent: f64) -> Self {
        self.y_scale_exp = exponent;
        self
    }

    #[must_use]
    pub fn with_curve(mut self, curve: CurveKind) -> Self {
        self.curve = curve;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration_to_millis(duration);
        self
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Surface size rounded to whole pixels.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.width.round().max(0.0) as u32,
            self.height.round().max(0.0) as u32,
        )
    }

    /// Total y-range covered by the stacked bands.
    #[must_use]
    pub fn band_span(&self) -> f64 {
        self.height * f64::from(self.bands)
    }

    /// Explicit y extent; zero counts as unset.
    #[must_use]
    pub fn effective_y_extent(&self) -> Option<f64> {
        self.y_extent.filter(|extent| *extent != 0.0)
    }

    /// `|y_scale_exp|`, falling back to linear for zero or non-finite values.
    #[must_use]
    pub fn effective_y_scale_exp(&self) -> f64 {
        let exponent = self.y_scale_exp.abs();
        if exponent.is_finite() && exponent > 0.0 {
            exponent
        } else {
            1.0
        }
    }

    #[must_use]
    pub fn ramp(&self, polarity: Polarity) -> ColorRamp {
        let (colors, stops) = match polarity {
            Polarity::Positive => (&self.positive_colors, &self.positive_color_stops),
            Polarity::Negative => (&self.negative_colors, &self.negative_color_stops),
        };
        ColorRamp {
            colors: colors.clone(),
            stops: stops.clone(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_dimension("width", self.width)?;
        validate_dimension("height", self.height)?;
        if self.bands == 0 {
            return Err(ChartError::invalid_config(
                "bands",
                self.bands.to_string(),
                "must be >= 1",
            ));
        }
        validate_optional_finite("x_min", self.x_min)?;
        validate_optional_finite("x_max", self.x_max)?;
        if let Some(extent) = self.y_extent {
            if !extent.is_finite() || extent < 0.0 {
                return Err(ChartError::invalid_config(
                    "y_extent",
                    extent.to_string(),
                    "must be finite and >= 0",
                ));
            }
        }
        self.ramp(Polarity::Positive).validate(Polarity::Positive)?;
        self.ramp(Polarity::Negative).validate(Polarity::Negative)?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize options json: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse options json: {e}")))
    }
}

pub(super) fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn validate_dimension(property: &'static str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::invalid_config(
            property,
            value.to_string(),
            "must be finite and >= 0",
        ));
    }
    Ok(())
}

fn validate_optional_finite(property: &'static str, value: Option<f64>) -> ChartResult<()> {
    match value {
        Some(value) if !value.is_finite() => Err(ChartError::invalid_config(
            property,
            value.to_string(),
            "must be finite",
        )),
        _ => Ok(()),
    }
}

fn default_width() -> f64 {
    300.0
}

fn default_height() -> f64 {
    40.0
}

fn default_bands() -> u32 {
    4
}

fn default_y_scale_exp() -> f64 {
    1.0
}

fn default_positive_colors() -> Vec<Color> {
    vec![Color::WHITE, Color::from_hex(0x19_19_70)]
}

fn default_negative_colors() -> Vec<Color> {
    vec![Color::WHITE, Color::from_hex(0xdc_14_3c)]
}

#[cfg(test)]
mod tests {
    use super::HorizonOptions;
    use crate::error::ChartError;

    #[test]
    fn missing_json_fields_take_defaults() {
        let options = HorizonOptions::from_json_str(r#"{"bands": 2}"#).expect("parse");
        assert_eq!(options.bands, 2);
        assert_eq!(options.width, 300.0);
        assert_eq!(options.height, 40.0);
        assert_eq!(options.positive_colors.len(), 2);
    }

    #[test]
    fn zero_extent_and_exponent_fall_back() {
        let options = HorizonOptions::default()
            .with_y_extent(Some(0.0))
            .with_y_scale_exp(-0.0);
        assert_eq!(options.effective_y_extent(), None);
        assert_eq!(options.effective_y_scale_exp(), 1.0);
        assert_eq!(
            HorizonOptions::default()
                .with_y_scale_exp(-2.0)
                .effective_y_scale_exp(),
            2.0
        );
    }

    #[test]
    fn validate_names_the_rejected_property() {
        let err = HorizonOptions::default()
            .with_size(f64::NAN, 40.0)
            .validate()
            .expect_err("nan width");
        assert!(matches!(err, ChartError::InvalidConfig { property: "width", .. }));
    }
}
