use std::time::Duration;

use tracing::trace;

use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

use super::HorizonChart;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

impl<R: Renderer, S: Clone> HorizonChart<R, S> {
    /// Steps running transitions by `delta` and renders the resulting frame.
    pub fn advance(&mut self, delta: Duration) -> ChartResult<()> {
        self.scene.advance(delta);
        trace!(
            delta_ms = delta.as_secs_f64() * 1000.0,
            animating = self.scene.is_animating(),
            exiting = self.scene.exiting_count(),
            "advance"
        );
        self.render()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scene.is_animating()
    }

    /// Frame for the current animation state.
    #[must_use]
    pub fn current_frame(&self) -> RenderFrame {
        self.scene.frame()
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.scene.frame();
        self.renderer.render(&frame)
    }

    /// Renders the current frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.scene.frame();
        self.renderer.render_on_cairo_context(context, &frame)
    }
}
