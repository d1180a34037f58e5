use indexmap::IndexMap;
use tracing::debug;

use crate::core::{
    AccessorFn, Aggregation, BandIndex, BandTransform, ColorScale, LinearScale, Polarity,
    PowScale, ReducerFn, aggregate, band_indices, project_area_vertices,
};
use crate::error::ChartResult;
use crate::render::{BandTarget, SceneUpdate};

use super::HorizonOptions;

/// Aggregation and scales produced by one recompute.
///
/// Pointer handling reads this until the next successful recompute replaces
/// it.
#[derive(Debug, Clone)]
pub(super) struct ChartLayout<S> {
    pub(super) aggregation: Aggregation<S>,
    pub(super) x_scale: LinearScale,
    pub(super) y_scale: PowScale,
    pub(super) color_scale: ColorScale,
}

impl<S: Clone> ChartLayout<S> {
    /// Runs aggregation and scale computation. Nothing is committed here, so
    /// a rejected configuration leaves the chart untouched.
    pub(super) fn build(
        options: &HorizonOptions,
        data: &[S],
        x: &AccessorFn<S>,
        y: &AccessorFn<S>,
        reducer: &ReducerFn,
    ) -> ChartResult<Self> {
        options.validate()?;

        let aggregation = aggregate(data, x, y, reducer, options.x_min, options.x_max);
        let x_scale = LinearScale::new(aggregation.x_range, (0.0, options.width))?;
        let y_extent = options
            .effective_y_extent()
            .unwrap_or_else(|| aggregation.max_abs_y());
        let y_scale = PowScale::new(
            (0.0, y_extent),
            (0.0, options.band_span()),
            options.effective_y_scale_exp(),
        )?;
        let color_scale = ColorScale::for_bands(
            options.bands,
            &options.ramp(Polarity::Positive),
            &options.ramp(Polarity::Negative),
        )?;

        debug!(
            samples = data.len(),
            points = aggregation.points.len(),
            x_min = aggregation.x_range.0,
            x_max = aggregation.x_range.1,
            y_extent,
            bands = options.bands,
            "horizon layout"
        );

        Ok(Self {
            aggregation,
            x_scale,
            y_scale,
            color_scale,
        })
    }

    /// Target fill and transform of every band in the current layout.
    pub(super) fn band_targets(&self, options: &HorizonOptions) -> Vec<BandTarget> {
        band_indices(options.bands)
            .into_iter()
            .map(|index| BandTarget {
                index,
                fill: self.color_scale.apply(f64::from(index.get())),
                transform: BandTransform::for_band(
                    index,
                    options.bands,
                    options.height,
                    options.mode,
                ),
            })
            .collect()
    }

    pub(super) fn scene_update(
        &self,
        options: &HorizonOptions,
        live: &[BandIndex],
    ) -> SceneUpdate {
        let exit_transforms: IndexMap<BandIndex, BandTransform> = live
            .iter()
            .filter(|index| index.get().unsigned_abs() > options.bands)
            .map(|index| {
                (
                    *index,
                    BandTransform::for_band(*index, options.bands, options.height, options.mode),
                )
            })
            .collect();

        SceneUpdate {
            targets: self.band_targets(options),
            exit_transforms,
            filled: project_area_vertices(
                &self.aggregation.points,
                self.x_scale,
                self.y_scale,
                options.band_span(),
                1.0,
            ),
            width: options.width,
            height: options.height,
            curve: options.curve,
            duration: options.duration(),
        }
    }
}
