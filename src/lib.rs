//! horizon-rs: horizon chart component.
//!
//! Raw `(x, y)` samples are aggregated, scaled and folded into colored bands,
//! then drawn through a retained vector backend or an immediate raster
//! backend. A hover layer maps the pointer back to the nearest point.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{HorizonChart, HorizonOptions, HorizonSnapshot};
pub use error::{ChartError, ChartResult};
