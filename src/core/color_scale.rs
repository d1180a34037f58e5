use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Color;
use crate::error::{ChartError, ChartResult};

/// Sign of the values a band (or color ramp) represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    #[must_use]
    pub const fn colors_property(self) -> &'static str {
        match self {
            Self::Positive => "positive_colors",
            Self::Negative => "negative_colors",
        }
    }

    #[must_use]
    pub const fn stops_property(self) -> &'static str {
        match self {
            Self::Positive => "positive_color_stops",
            Self::Negative => "negative_color_stops",
        }
    }
}

/// Color ramp for one polarity: at least two colors, plus optional stop
/// fractions placing the inner colors along the band range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    pub colors: Vec<Color>,
    #[serde(default)]
    pub stops: Option<Vec<f64>>,
}

impl ColorRamp {
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        Self {
            colors,
            stops: None,
        }
    }

    #[must_use]
    pub fn with_stops(mut self, stops: Vec<f64>) -> Self {
        self.stops = Some(stops);
        self
    }

    pub fn validate(&self, polarity: Polarity) -> ChartResult<()> {
        validate_colors(polarity, &self.colors)?;
        if let Some(stops) = &self.stops {
            validate_stops(polarity, stops, self.colors.len())?;
        }
        Ok(())
    }
}

pub fn validate_colors(polarity: Polarity, colors: &[Color]) -> ChartResult<()> {
    if colors.len() < 2 {
        return Err(ChartError::invalid_config(
            polarity.colors_property(),
            format_colors(colors),
            "must include at least 2 colors",
        ));
    }
    for color in colors {
        color.validate()?;
    }
    Ok(())
}

pub fn validate_stops(polarity: Polarity, stops: &[f64], color_count: usize) -> ChartResult<()> {
    if stops
        .iter()
        .any(|stop| !stop.is_finite() || *stop <= 0.0 || *stop >= 1.0)
    {
        return Err(ChartError::invalid_config(
            polarity.stops_property(),
            format!("{stops:?}"),
            "must only include values within ]0,1[",
        ));
    }
    let max_stops = color_count.saturating_sub(2);
    if stops.len() > max_stops {
        return Err(ChartError::invalid_config(
            polarity.stops_property(),
            format!("{stops:?}"),
            format!("must include at most {max_stops} values"),
        ));
    }
    Ok(())
}

fn format_colors(colors: &[Color]) -> String {
    let rendered: Vec<String> = colors.iter().map(|color| color.to_css()).collect();
    format!("[{}]", rendered.join(", "))
}

/// Piecewise-linear color interpolation over the signed band-index domain.
///
/// The domain is non-decreasing and may repeat a breakpoint (the shared `0`
/// between polarities). Segment lookup is bisect-right, so a value equal to
/// a repeated breakpoint falls in the segment after the last repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    domain: Vec<f64>,
    range: Vec<Color>,
}

impl ColorScale {
    pub fn new(domain: Vec<f64>, range: Vec<Color>) -> ChartResult<Self> {
        if domain.len() < 2 || domain.len() != range.len() {
            return Err(ChartError::InvalidData(
                "color scale needs matching domain and range of length >= 2".to_owned(),
            ));
        }
        if domain.iter().any(|value| !value.is_finite())
            || domain.windows(2).any(|pair| pair[0] > pair[1])
        {
            return Err(ChartError::InvalidData(
                "color scale domain must be finite and non-decreasing".to_owned(),
            ));
        }
        Ok(Self { domain, range })
    }

    /// Builds the band color scale from both polarity ramps.
    ///
    /// Each ramp contributes `colors.len() - 1` breakpoints: its sorted stops,
    /// then evenly spaced fractions up to 1. Fractions are scaled by `bands`
    /// and rounded to whole band indices; negative breakpoints are mirrored.
    /// Two-color ramps without stops yield `[-bands, 0, 0, bands]`.
    pub fn for_bands(bands: u32, positive: &ColorRamp, negative: &ColorRamp) -> ChartResult<Self> {
        positive.validate(Polarity::Positive)?;
        negative.validate(Polarity::Negative)?;

        let positive_domain = ramp_breakpoints(positive, bands);
        let negative_domain = ramp_breakpoints(negative, bands);

        let mut domain: Vec<f64> = negative_domain.iter().rev().map(|value| -value).collect();
        domain.extend(positive_domain.iter().copied());

        let mut range: Vec<Color> = negative.colors.iter().rev().copied().collect();
        range.extend(positive.colors.iter().copied());

        Self::new(domain, range)
    }

    #[must_use]
    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> &[Color] {
        &self.range
    }

    #[must_use]
    pub fn apply(&self, value: f64) -> Color {
        let last = self.domain.len() - 1;
        let upper = 1 + self.domain[1..last].partition_point(|breakpoint| *breakpoint <= value);
        let segment = upper - 1;
        let (start, end) = (self.domain[segment], self.domain[segment + 1]);
        let span = end - start;
        let t = if span == 0.0 {
            0.5
        } else {
            ((value - start) / span).clamp(0.0, 1.0)
        };
        self.range[segment].lerp(self.range[segment + 1], t)
    }
}

fn ramp_breakpoints(ramp: &ColorRamp, bands: u32) -> SmallVec<[f64; 8]> {
    let mut fractions: SmallVec<[f64; 8]> = ramp
        .stops
        .as_deref()
        .unwrap_or_default()
        .iter()
        .copied()
        .collect();
    fractions.sort_by(f64::total_cmp);

    let remaining = ramp.colors.len() - 1 - fractions.len();
    let start = fractions.last().copied().unwrap_or(0.0);
    for step in 1..=remaining {
        fractions.push(start + (1.0 - start) * step as f64 / remaining as f64);
    }

    let bands = f64::from(bands);
    let mut breakpoints: SmallVec<[f64; 8]> = SmallVec::with_capacity(fractions.len() + 1);
    breakpoints.push(0.0);
    breakpoints.extend(fractions.iter().map(|fraction| (fraction * bands).round()));
    breakpoints
}
