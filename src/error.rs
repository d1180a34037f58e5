use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A configuration property was rejected; the previous value stays active.
    #[error("{property} {reason}, got {value}")]
    InvalidConfig {
        property: &'static str,
        value: String,
        reason: String,
    },

    #[error("render backend failure: {0}")]
    Backend(String),
}

impl ChartError {
    pub(crate) fn invalid_config(
        property: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            property,
            value: value.into(),
            reason: reason.into(),
        }
    }
}
