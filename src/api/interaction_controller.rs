use tracing::trace;

use crate::error::ChartResult;
use crate::interaction::{HoverData, TooltipState, lookup_hover};
use crate::render::Renderer;

use super::HorizonChart;

impl<R: Renderer, S: Clone> HorizonChart<R, S> {
    /// Handles a pointer move at surface pixel `(x, y)`.
    ///
    /// The tooltip follows the pointer whenever a formatter is set. Hover
    /// callbacks and tooltip content only refresh when the resolved point
    /// changes.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        if self.on_hover.is_none() && self.tooltip_content.is_none() {
            return Ok(());
        }

        self.interaction.on_pointer_move(x, y);
        if self.tooltip_content.is_some() {
            self.interaction.show_tooltip_at(x, y);
        }

        let hovered = lookup_hover(&self.layout.aggregation.points, self.layout.x_scale, x);
        if self.interaction.set_hovered(hovered) {
            let hover_data = self.hovered_point();
            trace!(hovered = ?hovered, "hover changed");
            if let Some(on_hover) = &self.on_hover {
                on_hover(hover_data.as_ref());
            }
            if let (Some(data), Some(formatter)) = (&hover_data, &self.tooltip_content) {
                let content = formatter(data);
                self.interaction.set_tooltip_content(content);
            }
        }

        self.renderer.update_overlay(self.interaction.tooltip())
    }

    /// Hides the tooltip and signals hover-out.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        self.interaction.on_pointer_leave();
        if let Some(on_hover) = &self.on_hover {
            on_hover(None);
        }
        self.renderer.update_overlay(self.interaction.tooltip())
    }

    pub fn click(&self) {
        if let Some(on_click) = &self.on_click {
            let hover_data = self.hovered_point();
            on_click(hover_data.as_ref());
        }
    }

    #[must_use]
    pub fn hovered_point(&self) -> Option<HoverData<S>> {
        self.interaction
            .hovered()
            .and_then(|index| self.layout.aggregation.points.get(index))
            .map(HoverData::from_point)
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        self.interaction.tooltip()
    }

    #[must_use]
    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.interaction.pointer()
    }
}
