use std::time::Duration;

use tracing::warn;

use crate::core::{AccessorFn, CurveKind, HorizonMode, ReducerFn};
use crate::error::ChartResult;
use crate::render::{Color, Renderer};

use super::layout::ChartLayout;
use super::options::duration_to_millis;
use super::{ClickCallbackFn, HorizonChart, HorizonOptions, HoverCallbackFn, TooltipContentFn};

impl<R: Renderer, S: Clone> HorizonChart<R, S> {
    /// Replaces every serializable option at once.
    pub fn set_options(&mut self, options: HorizonOptions) -> ChartResult<()> {
        self.try_commit_options(options)
    }

    pub fn set_size(&mut self, width: f64, height: f64) -> ChartResult<()> {
        self.update_options(|options| {
            options.width = width;
            options.height = height;
        })
    }

    pub fn set_width(&mut self, width: f64) -> ChartResult<()> {
        self.update_options(|options| options.width = width)
    }

    /// Band height, which is also the height of the drawing surface.
    pub fn set_height(&mut self, height: f64) -> ChartResult<()> {
        self.update_options(|options| options.height = height)
    }

    pub fn set_bands(&mut self, bands: u32) -> ChartResult<()> {
        self.update_options(|options| options.bands = bands)
    }

    pub fn set_mode(&mut self, mode: HorizonMode) -> ChartResult<()> {
        self.update_options(|options| options.mode = mode)
    }

    pub fn set_x_min(&mut self, x_min: Option<f64>) -> ChartResult<()> {
        self.update_options(|options| options.x_min = x_min)
    }

    pub fn set_x_max(&mut self, x_max: Option<f64>) -> ChartResult<()> {
        self.update_options(|options| options.x_max = x_max)
    }

    pub fn set_y_extent(&mut self, y_extent: Option<f64>) -> ChartResult<()> {
        self.update_options(|options| options.y_extent = y_extent)
    }

    pub fn set_y_scale_exp(&mut self, exponent: f64) -> ChartResult<()> {
        self.update_options(|options| options.y_scale_exp = exponent)
    }

    pub fn set_positive_colors(&mut self, colors: Vec<Color>) -> ChartResult<()> {
        self.update_options(|options| options.positive_colors = colors)
    }

    pub fn set_negative_colors(&mut self, colors: Vec<Color>) -> ChartResult<()> {
        self.update_options(|options| options.negative_colors = colors)
    }

    pub fn set_positive_color_stops(&mut self, stops: Option<Vec<f64>>) -> ChartResult<()> {
        self.update_options(|options| options.positive_color_stops = stops)
    }

    pub fn set_negative_color_stops(&mut self, stops: Option<Vec<f64>>) -> ChartResult<()> {
        self.update_options(|options| options.negative_color_stops = stops)
    }

    pub fn set_curve(&mut self, curve: CurveKind) -> ChartResult<()> {
        self.update_options(|options| options.curve = curve)
    }

    pub fn set_data(&mut self, data: Vec<S>) -> ChartResult<()> {
        self.layout = ChartLayout::build(
            &self.options,
            &data,
            &self.x_accessor,
            &self.y_accessor,
            &self.y_aggregation,
        )?;
        self.data = data;
        self.commit_layout()
    }

    pub fn set_x_accessor(&mut self, accessor: AccessorFn<S>) -> ChartResult<()> {
        self.layout = ChartLayout::build(
            &self.options,
            &self.data,
            &accessor,
            &self.y_accessor,
            &self.y_aggregation,
        )?;
        self.x_accessor = accessor;
        self.commit_layout()
    }

    pub fn set_y_accessor(&mut self, accessor: AccessorFn<S>) -> ChartResult<()> {
        self.layout = ChartLayout::build(
            &self.options,
            &self.data,
            &self.x_accessor,
            &accessor,
            &self.y_aggregation,
        )?;
        self.y_accessor = accessor;
        self.commit_layout()
    }

    /// Reducer combining the y values of samples that share one x.
    pub fn set_y_aggregation(&mut self, reducer: ReducerFn) -> ChartResult<()> {
        self.layout = ChartLayout::build(
            &self.options,
            &self.data,
            &self.x_accessor,
            &self.y_accessor,
            &reducer,
        )?;
        self.y_aggregation = reducer;
        self.commit_layout()
    }

    /// Transition length used from the next update on.
    pub fn set_duration(&mut self, duration: Duration) {
        self.options.duration_ms = duration_to_millis(duration);
    }

    pub fn set_tooltip_content(&mut self, formatter: TooltipContentFn<S>) {
        self.tooltip_content = Some(formatter);
    }

    /// Disables the tooltip. Pointer moves are ignored entirely while no
    /// hover callback is set either.
    pub fn clear_tooltip_content(&mut self) {
        self.tooltip_content = None;
    }

    pub fn set_on_hover(&mut self, callback: HoverCallbackFn<S>) {
        self.on_hover = Some(callback);
    }

    pub fn clear_on_hover(&mut self) {
        self.on_hover = None;
    }

    pub fn set_on_click(&mut self, callback: ClickCallbackFn<S>) {
        self.on_click = Some(callback);
    }

    pub fn clear_on_click(&mut self) {
        self.on_click = None;
    }

    fn update_options(&mut self, mutate: impl FnOnce(&mut HorizonOptions)) -> ChartResult<()> {
        let mut next = self.options.clone();
        mutate(&mut next);
        self.try_commit_options(next)
    }

    fn try_commit_options(&mut self, next: HorizonOptions) -> ChartResult<()> {
        let layout = ChartLayout::build(
            &next,
            &self.data,
            &self.x_accessor,
            &self.y_accessor,
            &self.y_aggregation,
        )
        .inspect_err(|err| warn!(error = %err, "rejected horizon options"))?;
        self.options = next;
        self.layout = layout;
        self.commit_layout()
    }
}
