use std::sync::Arc;

use tracing::debug;

use crate::core::{
    AccessorFn, AggregatedPoint, ColorScale, DataPoint, LinearScale, PowScale, ReducerFn,
    default_reducer,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionState;
use crate::render::{Backend, BandScene, Renderer};

use super::layout::ChartLayout;
use super::{
    ClickCallbackFn, HorizonOptions, HoverCallbackFn, TooltipContentFn, default_tooltip_content,
};

/// Horizon chart component consumed by host applications.
///
/// `HorizonChart` owns the configuration, the last computed layout, the band
/// scene and the interaction state, and hands each frame to its renderer.
/// Samples are opaque `S` records read through the x/y accessors.
pub struct HorizonChart<R: Renderer, S = [f64; 2]> {
    pub(super) renderer: R,
    pub(super) options: HorizonOptions,
    pub(super) data: Vec<S>,
    pub(super) x_accessor: AccessorFn<S>,
    pub(super) y_accessor: AccessorFn<S>,
    pub(super) y_aggregation: ReducerFn,
    pub(super) tooltip_content: Option<TooltipContentFn<S>>,
    pub(super) on_hover: Option<HoverCallbackFn<S>>,
    pub(super) on_click: Option<ClickCallbackFn<S>>,
    pub(super) layout: ChartLayout<S>,
    pub(super) scene: BandScene,
    pub(super) interaction: InteractionState,
    pub(super) update_count: u64,
}

impl<R: Renderer> HorizonChart<R, [f64; 2]> {
    /// Chart over `[x, y]` pairs.
    pub fn new(renderer: R, backend: Backend) -> ChartResult<Self> {
        Self::with_accessors(
            renderer,
            backend,
            Arc::new(|sample: &[f64; 2]| sample[0]),
            Arc::new(|sample: &[f64; 2]| sample[1]),
        )
    }
}

impl<R: Renderer> HorizonChart<R, DataPoint> {
    pub fn for_data_points(renderer: R, backend: Backend) -> ChartResult<Self> {
        Self::with_accessors(
            renderer,
            backend,
            Arc::new(|point: &DataPoint| point.x),
            Arc::new(|point: &DataPoint| point.y),
        )
    }
}

impl<R: Renderer, S: Clone> HorizonChart<R, S> {
    /// Mounts `renderer`, clearing anything it held, and draws the initial
    /// empty chart with default options.
    ///
    /// Fails when `renderer` only draws for a different backend.
    pub fn with_accessors(
        mut renderer: R,
        backend: Backend,
        x: AccessorFn<S>,
        y: AccessorFn<S>,
    ) -> ChartResult<Self> {
        if let Some(supported) = renderer
            .backend()
            .filter(|supported| *supported != backend)
        {
            return Err(ChartError::InvalidData(format!(
                "renderer draws {supported:?} frames, chart requested {backend:?}"
            )));
        }
        renderer.mount()?;

        let options = HorizonOptions::default();
        let y_aggregation = default_reducer();
        let layout = ChartLayout::build(&options, &[], &x, &y, &y_aggregation)?;

        let mut chart = Self {
            renderer,
            options,
            data: Vec::new(),
            x_accessor: x,
            y_accessor: y,
            y_aggregation,
            tooltip_content: Some(default_tooltip_content()),
            on_hover: None,
            on_click: None,
            layout,
            scene: BandScene::new(backend),
            interaction: InteractionState::default(),
            update_count: 0,
        };
        debug!(?backend, "mount horizon chart");
        chart.commit_layout()?;
        chart.renderer.update_overlay(chart.interaction.tooltip())?;
        Ok(chart)
    }

    /// Re-runs the full pipeline with the current configuration.
    ///
    /// Identical configuration yields an identical frame.
    pub fn update(&mut self) -> ChartResult<()> {
        self.layout = ChartLayout::build(
            &self.options,
            &self.data,
            &self.x_accessor,
            &self.y_accessor,
            &self.y_aggregation,
        )?;
        self.commit_layout()
    }

    /// Pushes the current layout into the scene and renders the first frame
    /// of the resulting transition.
    pub(super) fn commit_layout(&mut self) -> ChartResult<()> {
        let update = self
            .layout
            .scene_update(&self.options, &self.scene.live_indices());
        self.scene.apply(update);
        self.interaction.reset_hover();
        self.update_count += 1;
        debug!(
            update = self.update_count,
            bands = self.options.bands,
            live_bands = self.scene.live_indices().len(),
            animating = self.scene.is_animating(),
            "horizon update"
        );
        self.render()
    }

    #[must_use]
    pub fn options(&self) -> &HorizonOptions {
        &self.options
    }

    #[must_use]
    pub fn backend(&self) -> Backend {
        self.scene.backend()
    }

    #[must_use]
    pub fn data(&self) -> &[S] {
        &self.data
    }

    /// Aggregated points of the last update, ascending by x.
    #[must_use]
    pub fn aggregated_points(&self) -> &[AggregatedPoint<S>] {
        &self.layout.aggregation.points
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.layout.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> PowScale {
        self.layout.y_scale
    }

    #[must_use]
    pub fn color_scale(&self) -> &ColorScale {
        &self.layout.color_scale
    }

    #[must_use]
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
