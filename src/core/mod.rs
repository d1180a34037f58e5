pub mod aggregation;
pub mod area;
pub mod band;
pub mod color;
pub mod color_scale;
pub mod primitives;
pub mod reconcile;
pub mod scale;
pub mod transition;
pub mod types;

pub use aggregation::{
    AccessorFn, AggregatedPoint, Aggregation, ReducerFn, aggregate, default_reducer, reducers,
};
pub use area::{AreaVertex, CurveKind, PathCommand, area_path, project_area_vertices, svg_path_data};
pub use band::{BandIndex, BandTransform, HorizonMode, band_indices};
pub use color::Color;
pub use color_scale::{ColorRamp, ColorScale, Polarity, validate_colors, validate_stops};
pub use reconcile::{KeyedDiff, diff_keys};
pub use scale::{LinearScale, PowScale};
pub use transition::{Interpolate, Tween};
pub use types::{DataPoint, Viewport};
