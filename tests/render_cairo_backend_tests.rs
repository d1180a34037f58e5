#![cfg(feature = "cairo-backend")]

use std::time::Duration;

use cairo::{Context, Format, ImageSurface};
use horizon_rs::ChartError;
use horizon_rs::api::HorizonChart;
use horizon_rs::core::{HorizonMode, Viewport};
use horizon_rs::render::{Backend, CairoRenderer};

fn raster_chart() -> HorizonChart<CairoRenderer> {
    let renderer = CairoRenderer::new(300, 40).expect("renderer");
    let mut chart = HorizonChart::new(renderer, Backend::Raster).expect("chart init");
    chart
        .set_data(vec![[0.0, 5.0], [0.5, -7.0], [1.0, 10.0]])
        .expect("data");
    chart
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 40).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_rejects_empty_viewport() {
    let err = CairoRenderer::for_viewport(Viewport::new(0, 40)).expect_err("empty viewport");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn cairo_renderer_fills_every_band() {
    let chart = raster_chart();
    let renderer = chart.into_renderer();

    assert_eq!(renderer.backend_name(), "cairo+pango+pangocairo");
    assert_eq!(renderer.last_stats().bands_drawn, 8);
    assert!(!renderer.last_stats().tooltip_drawn);
}

#[test]
fn cairo_renderer_redraws_tooltip_on_hover() {
    let mut chart = raster_chart();
    let stats = chart.renderer().last_stats();
    assert!(!stats.tooltip_drawn);

    chart.pointer_move(150.0, 10.0).expect("pointer move");
    assert!(!chart.is_animating());
    assert!(chart.renderer().last_stats().tooltip_drawn);
    assert_eq!(chart.renderer().last_stats().bands_drawn, 8);

    chart.pointer_move(290.0, 12.0).expect("pointer move");
    assert!(chart.renderer().last_stats().tooltip_drawn);

    chart.pointer_leave().expect("pointer leave");
    assert!(!chart.renderer().last_stats().tooltip_drawn);
}

#[test]
fn cairo_renderer_skips_bands_flattened_by_mode_switch() {
    let mut chart = raster_chart();
    chart.set_mode(HorizonMode::Mirror).expect("mirror");
    chart.set_duration(Duration::from_millis(100));
    chart.set_mode(HorizonMode::Offset).expect("offset");

    chart
        .advance(Duration::from_millis(50))
        .expect("advance through zero scale");
    assert_eq!(chart.renderer().last_stats().bands_drawn, 4);

    chart
        .advance(Duration::from_millis(50))
        .expect("advance to the end");
    assert_eq!(chart.renderer().last_stats().bands_drawn, 8);
}

#[test]
fn cairo_surface_follows_chart_size() {
    let mut chart = raster_chart();
    assert_eq!(chart.renderer().surface().width(), 300);
    assert_eq!(chart.renderer().surface().height(), 40);

    chart.set_width(350.0).expect("width");
    chart.set_height(25.0).expect("height");

    assert_eq!(chart.renderer().surface().width(), 350);
    assert_eq!(chart.renderer().surface().height(), 25);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let mut chart = raster_chart();
    let surface = ImageSurface::create(Format::ARgb32, 300, 40).expect("surface");
    let context = Context::new(&surface).expect("context");

    chart
        .render_on_cairo_context(&context)
        .expect("render on external context");

    assert_eq!(chart.renderer().last_stats().bands_drawn, 8);
}
