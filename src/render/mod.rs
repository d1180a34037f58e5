mod frame;
mod null_renderer;
mod primitives;
mod scene;
mod svg_backend;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Backend, BandPrimitive, Color};
pub use scene::{BandScene, BandTarget, SceneUpdate};
pub use svg_backend::{SvgPathNode, SvgRenderStats, SvgRenderer};

use crate::error::ChartResult;
use crate::interaction::TooltipState;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from aggregation, scales and interaction.
pub trait Renderer {
    /// Backend this renderer draws for, or `None` when it accepts either.
    fn backend(&self) -> Option<Backend> {
        None
    }

    /// Called once when a chart takes ownership of the target; the backend
    /// must discard anything previously drawn.
    fn mount(&mut self) -> ChartResult<()> {
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    /// Tooltip overlay changed. Retained backends reposition their overlay
    /// node; immediate backends redraw the last frame with the new overlay.
    fn update_overlay(&mut self, tooltip: &TooltipState) -> ChartResult<()> {
        let _ = tooltip;
        Ok(())
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
