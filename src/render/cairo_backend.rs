use cairo::{Context, Format, ImageSurface, Operator};

use crate::core::{PathCommand, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipState;
use crate::render::{Backend, BandPrimitive, Color, RenderFrame, Renderer};

/// Bands flattened below this vertical scale cover no pixels and are skipped;
/// Cairo rejects a singular matrix.
const MIN_VISIBLE_SCALE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub bands_drawn: usize,
    pub tooltip_drawn: bool,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango raster backend.
///
/// Every frame clears the whole surface and fills each band with its
/// reflect/translate transform applied. The tooltip overlay is drawn with
/// Pango markup on top of the bands; overlay changes redraw the last frame.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_frame: Option<RenderFrame>,
    tooltip: TooltipState,
    tooltip_background: Color,
    tooltip_text: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_frame: None,
            tooltip: TooltipState::default(),
            tooltip_background: Color::rgba(1.0, 1.0, 1.0, 0.9),
            tooltip_text: Color::BLACK,
            last_stats: CairoRenderStats::default(),
        })
    }

    /// Surface sized for a chart's pixel viewport.
    pub fn for_viewport(viewport: Viewport) -> ChartResult<Self> {
        let invalid = ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        };
        if !viewport.is_valid() {
            return Err(invalid);
        }
        match (i32::try_from(viewport.width), i32::try_from(viewport.height)) {
            (Ok(width), Ok(height)) => Self::new(width, height),
            _ => Err(invalid),
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn set_tooltip_colors(&mut self, background: Color, text: Color) -> ChartResult<()> {
        background.validate()?;
        text.validate()?;
        self.tooltip_background = background;
        self.tooltip_text = text;
        Ok(())
    }

    fn resize_to(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let (width, height) = frame.pixel_size();
        let (Ok(width), Ok(height)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(ChartError::InvalidData(
                "frame size exceeds cairo surface limits".to_owned(),
            ));
        };
        if width == 0 || height == 0 {
            return Ok(());
        }
        if self.surface.width() != width || self.surface.height() != height {
            self.surface = ImageSurface::create(Format::ARgb32, width, height)
                .map_err(|err| map_backend_error("failed to resize cairo surface", err))?;
        }
        Ok(())
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        context.set_operator(Operator::Clear);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context.set_operator(Operator::Over);

        let mut stats = CairoRenderStats::default();
        for band in &frame.bands {
            if fill_band(context, band)? {
                stats.bands_drawn += 1;
            }
        }
        stats.tooltip_drawn = self.draw_tooltip(context)?;

        self.last_stats = stats;
        Ok(())
    }

    fn draw_tooltip(&self, context: &Context) -> ChartResult<bool> {
        if !self.tooltip.visible || self.tooltip.content.is_empty() {
            return Ok(false);
        }

        let layout = pangocairo::functions::create_layout(context);
        let font_description = pango::FontDescription::from_string("Sans 10");
        layout.set_font_description(Some(&font_description));
        layout.set_markup(&self.tooltip.content);
        let (text_width, text_height) = layout.pixel_size();

        let padding = 4.0;
        apply_color(context, self.tooltip_background);
        context.rectangle(
            self.tooltip.left,
            self.tooltip.top,
            f64::from(text_width) + padding * 2.0,
            f64::from(text_height) + padding * 2.0,
        );
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill tooltip box", err))?;

        apply_color(context, self.tooltip_text);
        context.move_to(self.tooltip.left + padding, self.tooltip.top + padding);
        pangocairo::functions::show_layout(context, &layout);
        Ok(true)
    }
}

impl Renderer for CairoRenderer {
    fn backend(&self) -> Option<Backend> {
        Some(Backend::Raster)
    }

    fn mount(&mut self) -> ChartResult<()> {
        self.tooltip = TooltipState::default();
        self.last_frame = None;
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        context.set_operator(Operator::Clear);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        self.resize_to(frame)?;
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)?;
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn update_overlay(&mut self, tooltip: &TooltipState) -> ChartResult<()> {
        if self.tooltip == *tooltip {
            return Ok(());
        }
        self.tooltip = tooltip.clone();
        match self.last_frame.take() {
            Some(frame) => self.render(&frame),
            None => Ok(()),
        }
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Returns `false` when the band has nothing to fill.
fn fill_band(context: &Context, band: &BandPrimitive) -> ChartResult<bool> {
    if band.path.is_empty() || band.transform.scale_y.abs() < MIN_VISIBLE_SCALE {
        return Ok(false);
    }

    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    context.scale(1.0, band.transform.scale_y);
    context.translate(0.0, band.transform.translate_y);
    context.new_path();
    for command in &band.path {
        match *command {
            PathCommand::MoveTo { x, y } => context.move_to(x, y),
            PathCommand::LineTo { x, y } => context.line_to(x, y),
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => context.curve_to(x1, y1, x2, y2, x, y),
            PathCommand::Close => context.close_path(),
        }
    }
    // The path keeps device coordinates, so it can be filled untransformed.
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))?;

    apply_color(context, band.fill);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill band", err))?;
    Ok(true)
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
