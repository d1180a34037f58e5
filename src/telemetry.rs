//! Telemetry helpers for applications embedding `horizon-rs`.
//!
//! The chart logs recompute cycles, transition frames and hover resolution
//! through `tracing`. Hosts either call one of the initializers below or
//! install their own subscriber and filters.

/// Filter used when `RUST_LOG` is unset: chart updates at `debug`, the rest
/// of the host at `warn`.
pub const DEFAULT_TRACING_DIRECTIVE: &str = "warn,horizon_rs=debug";

/// Initializes a compact fmt subscriber using [`DEFAULT_TRACING_DIRECTIVE`].
///
/// See [`init_tracing`] for the return value.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_TRACING_DIRECTIVE)
}

/// Initializes a compact fmt subscriber. `RUST_LOG` wins over
/// `fallback_directive` when set.
///
/// Returns `false` when the `telemetry` feature is disabled, when
/// `fallback_directive` does not parse, or when the host already installed a
/// global subscriber.
#[must_use]
pub fn init_tracing(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => match EnvFilter::try_new(fallback_directive) {
                Ok(filter) => filter,
                Err(_) => return false,
            },
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
