use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Continuous linear mapping from a data domain to a pixel range.
///
/// A degenerate domain (`start == end`) maps every value to the middle of the
/// range, and inverts any pixel to the domain start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        validate_pair(domain, "scale domain")?;
        validate_pair(range, "scale range")?;
        Ok(Self { domain, range })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let t = normalize(self.domain, value, 0.5);
        lerp(self.range, t)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let t = normalize(self.range, pixel, 0.5);
        if self.domain.0 == self.domain.1 {
            return self.domain.0;
        }
        lerp(self.domain, t)
    }
}

/// Power-law mapping used for band heights.
///
/// Values are raised with a sign-preserving power before linear mapping, so
/// negative inputs land below the range start. A degenerate domain maps to
/// the range start, which renders as zero-height bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowScale {
    domain: (f64, f64),
    range: (f64, f64),
    exponent: f64,
}

impl PowScale {
    pub fn new(domain: (f64, f64), range: (f64, f64), exponent: f64) -> ChartResult<Self> {
        validate_pair(domain, "power scale domain")?;
        validate_pair(range, "power scale range")?;
        if !exponent.is_finite() || exponent <= 0.0 {
            return Err(ChartError::InvalidData(
                "power scale exponent must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            domain,
            range,
            exponent,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn exponent(self) -> f64 {
        self.exponent
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let start = raise(self.domain.0, self.exponent);
        let end = raise(self.domain.1, self.exponent);
        let t = normalize((start, end), raise(value, self.exponent), 0.0);
        lerp(self.range, t)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let start = raise(self.domain.0, self.exponent);
        let end = raise(self.domain.1, self.exponent);
        let t = normalize(self.range, pixel, 0.0);
        raise(start + t * (end - start), 1.0 / self.exponent)
    }
}

fn validate_pair(pair: (f64, f64), label: &str) -> ChartResult<()> {
    if !pair.0.is_finite() || !pair.1.is_finite() {
        return Err(ChartError::InvalidData(format!("{label} must be finite")));
    }
    Ok(())
}

fn normalize((start, end): (f64, f64), value: f64, degenerate: f64) -> f64 {
    let span = end - start;
    if span == 0.0 {
        degenerate
    } else {
        (value - start) / span
    }
}

fn lerp((start, end): (f64, f64), t: f64) -> f64 {
    start + t * (end - start)
}

fn raise(value: f64, exponent: f64) -> f64 {
    if value < 0.0 {
        -(-value).powf(exponent)
    } else {
        value.powf(exponent)
    }
}
