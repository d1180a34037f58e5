use crate::error::ChartResult;
use crate::interaction::TooltipState;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless chart usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// without a real drawing surface.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub mount_count: usize,
    pub frame_count: usize,
    pub last_band_count: usize,
    pub last_frame: Option<RenderFrame>,
    pub last_tooltip: Option<TooltipState>,
}

impl Renderer for NullRenderer {
    fn mount(&mut self) -> ChartResult<()> {
        self.mount_count += 1;
        self.last_frame = None;
        self.last_tooltip = None;
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frame_count += 1;
        self.last_band_count = frame.bands.len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn update_overlay(&mut self, tooltip: &TooltipState) -> ChartResult<()> {
        self.last_tooltip = Some(tooltip.clone());
        Ok(())
    }
}
