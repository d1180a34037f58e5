use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use horizon_rs::ChartError;
use horizon_rs::api::{HorizonChart, HorizonOptions};
use horizon_rs::core::{BandIndex, CurveKind, DataPoint, HorizonMode, reducers};
use horizon_rs::interaction::HoverData;
use horizon_rs::render::{Backend, Color, NullRenderer, SvgRenderer};
use rust_decimal::Decimal;

fn chart() -> HorizonChart<NullRenderer> {
    HorizonChart::new(NullRenderer::default(), Backend::Raster).expect("chart init")
}

#[test]
fn construction_mounts_and_draws_empty_bands() {
    let chart = chart();
    let renderer = chart.renderer();

    assert_eq!(renderer.mount_count, 1);
    assert_eq!(renderer.frame_count, 1);
    assert_eq!(renderer.last_band_count, 8);
    let frame = renderer.last_frame.as_ref().expect("initial frame");
    assert!(frame.is_empty());
    assert_eq!((frame.width, frame.height), (300.0, 40.0));
    assert_eq!(chart.x_scale().domain(), (0.0, 1.0));
    assert_eq!(chart.y_scale().domain(), (0.0, 0.0));
}

#[test]
fn renderer_must_match_requested_backend() {
    let result = HorizonChart::new(SvgRenderer::new(), Backend::Raster);
    assert!(matches!(result, Err(ChartError::InvalidData(_))));

    let chart = HorizonChart::new(NullRenderer::default(), Backend::Vector).expect("chart init");
    assert_eq!(chart.backend(), Backend::Vector);
}

#[test]
fn end_to_end_aggregation_and_extent() {
    let mut chart = chart();
    chart
        .set_data(vec![[0.0, 5.0], [0.0, -3.0], [1.0, 10.0]])
        .expect("data");

    let pairs: Vec<(f64, f64)> = chart
        .aggregated_points()
        .iter()
        .map(|point| (point.x, point.y))
        .collect();
    assert_eq!(pairs, vec![(0.0, 2.0), (1.0, 10.0)]);
    assert_eq!(chart.y_scale().domain(), (0.0, 10.0));
    assert_eq!(chart.y_scale().range(), (0.0, 160.0));
    assert_eq!(chart.x_scale().range(), (0.0, 300.0));
    assert!(!chart.current_frame().is_empty());
}

#[test]
fn update_is_idempotent() {
    let mut chart = chart();
    chart
        .set_data(vec![[0.0, 5.0], [2.0, -7.0], [4.0, 3.0]])
        .expect("data");
    let first_frame = chart.current_frame();
    let first = chart.snapshot();

    chart.update().expect("update");
    chart.update().expect("update");
    let second = chart.snapshot();

    assert_eq!(chart.current_frame(), first_frame);
    assert_eq!(second.x_domain, first.x_domain);
    assert_eq!(second.y_domain, first.y_domain);
    assert_eq!(second.bands, first.bands);
    assert_eq!(second.points, first.points);
    assert_eq!(second.update_count, first.update_count + 2);
}

#[test]
fn short_color_range_is_rejected_without_touching_state() {
    let mut chart = chart();
    chart.set_data(vec![[0.0, 1.0], [1.0, 2.0]]).expect("data");
    let frames_before = chart.renderer().frame_count;
    let frame_before = chart.current_frame();

    let err = chart
        .set_positive_colors(vec![Color::WHITE])
        .expect_err("one color must fail");

    assert!(matches!(
        err,
        ChartError::InvalidConfig {
            property: "positive_colors",
            ..
        }
    ));
    assert!(err.to_string().contains("must include at least 2 colors"));
    assert_eq!(chart.options().positive_colors.len(), 2);
    assert_eq!(chart.renderer().frame_count, frames_before);
    assert_eq!(chart.current_frame(), frame_before);
}

#[test]
fn out_of_range_color_stops_are_rejected() {
    let mut chart = chart();
    chart
        .set_negative_colors(vec![Color::WHITE, Color::BLACK, Color::WHITE, Color::BLACK])
        .expect("colors");

    for stop in [0.0, 1.0, 1.5] {
        let err = chart
            .set_negative_color_stops(Some(vec![stop]))
            .expect_err("stop outside ]0,1[");
        assert!(err.to_string().contains("must only include values within ]0,1["));
    }
    assert_eq!(chart.options().negative_color_stops, None);

    chart
        .set_negative_color_stops(Some(vec![0.5, 0.25]))
        .expect("valid stops");
    assert_eq!(
        chart.color_scale().domain(),
        &[-4.0, -2.0, -1.0, 0.0, 0.0, 4.0]
    );
}

#[test]
fn y_extent_override_and_zero_fallback() {
    let mut chart = chart();
    chart.set_data(vec![[0.0, -6.0], [1.0, 3.0]]).expect("data");
    assert_eq!(chart.y_scale().domain(), (0.0, 6.0));

    chart.set_y_extent(Some(20.0)).expect("extent");
    assert_eq!(chart.y_scale().domain(), (0.0, 20.0));

    chart.set_y_extent(Some(0.0)).expect("zero extent");
    assert_eq!(chart.y_scale().domain(), (0.0, 6.0));

    assert!(chart.set_y_extent(Some(-1.0)).is_err());
    assert_eq!(chart.options().y_extent, Some(0.0));
}

#[test]
fn y_scale_exponent_uses_absolute_value() {
    let mut chart = chart();

    chart.set_y_scale_exp(-2.0).expect("exponent");
    assert_eq!(chart.y_scale().exponent(), 2.0);

    chart.set_y_scale_exp(0.0).expect("exponent");
    assert_eq!(chart.y_scale().exponent(), 1.0);
}

#[test]
fn explicit_x_range_drives_the_x_scale() {
    let mut chart = chart();
    chart
        .set_data((0..10).map(|i| [f64::from(i), 1.0]).collect())
        .expect("data");

    chart.set_x_min(Some(2.5)).expect("x min");
    chart.set_x_max(Some(6.5)).expect("x max");

    assert_eq!(chart.x_scale().domain(), (2.5, 6.5));
    let xs: Vec<f64> = chart.aggregated_points().iter().map(|point| point.x).collect();
    assert_eq!(xs, vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
}

#[test]
fn band_count_changes_are_applied_immediately_without_duration() {
    let mut chart = chart();

    chart.set_bands(2).expect("bands");
    let indices: Vec<i32> = chart
        .current_frame()
        .bands
        .iter()
        .map(|band| band.index.get())
        .collect();
    assert_eq!(indices, vec![-1, -2, 1, 2]);

    assert!(matches!(
        chart.set_bands(0),
        Err(ChartError::InvalidConfig {
            property: "bands",
            ..
        })
    ));
    assert_eq!(chart.options().bands, 2);
}

#[test]
fn mode_switch_retargets_transforms() {
    let mut chart = chart();
    chart.set_bands(3).expect("bands");
    chart.set_mode(HorizonMode::Mirror).expect("mode");

    let frame = chart.current_frame();
    let lowest_negative = frame
        .bands
        .iter()
        .find(|band| band.index.get() == -1)
        .expect("band -1");
    assert_eq!(lowest_negative.transform.scale_y, -1.0);
    assert_eq!(lowest_negative.transform.translate_y, -160.0);
}

#[test]
fn band_fills_follow_the_default_palettes() {
    let chart = chart();
    let frame = chart.current_frame();
    let fill_of = |value: i32| {
        frame
            .bands
            .iter()
            .find(|band| band.index == BandIndex::new(value).expect("index"))
            .map(|band| band.fill)
            .expect("band")
    };

    assert_eq!(fill_of(4).to_css(), "rgb(25, 25, 112)");
    assert_eq!(fill_of(-4).to_css(), "rgb(220, 20, 60)");
    assert_eq!(fill_of(2), Color::WHITE.lerp(Color::from_rgb8(25, 25, 112), 0.5));
}

#[test]
fn callback_and_duration_setters_do_not_recompute() {
    let mut chart = chart();
    let updates = chart.update_count();

    chart.set_duration(Duration::from_millis(250));
    chart.set_on_hover(Arc::new(|_: Option<&HoverData<[f64; 2]>>| {}));
    chart.set_on_click(Arc::new(|_: Option<&HoverData<[f64; 2]>>| {}));
    chart.clear_tooltip_content();

    assert_eq!(chart.update_count(), updates);
    assert_eq!(chart.options().duration_ms, 250);
}

#[test]
fn custom_reducer_and_accessors_recompute() {
    let mut chart = chart();
    chart
        .set_data(vec![[0.0, 4.0], [0.0, 2.0], [1.0, 1.0]])
        .expect("data");

    chart
        .set_y_aggregation(Arc::new(reducers::mean))
        .expect("reducer");
    assert_eq!(chart.aggregated_points()[0].y, 3.0);

    chart
        .set_y_accessor(Arc::new(|sample: &[f64; 2]| -sample[1]))
        .expect("accessor");
    assert_eq!(chart.aggregated_points()[0].y, -3.0);

    chart
        .set_x_accessor(Arc::new(|sample: &[f64; 2]| sample[0] * 10.0))
        .expect("accessor");
    assert_eq!(chart.x_scale().domain(), (0.0, 10.0));
}

#[test]
fn options_can_be_applied_in_one_step() {
    let mut chart = chart();
    let options = HorizonOptions::default()
        .with_size(640.0, 24.0)
        .with_bands(6)
        .with_mode(HorizonMode::Mirror)
        .with_curve(CurveKind::Linear);

    chart.set_options(options.clone()).expect("options");

    assert_eq!(chart.options(), &options);
    assert_eq!(chart.renderer().last_band_count, 12);
    assert_eq!(chart.y_scale().range(), (0.0, 144.0));
}

#[test]
fn data_point_charts_accept_decimal_timestamps() {
    let mut chart = HorizonChart::for_data_points(NullRenderer::default(), Backend::Vector)
        .expect("chart init");
    let time = Utc
        .timestamp_opt(1_700_000_000, 0)
        .single()
        .expect("valid timestamp");
    let point = DataPoint::from_decimal_time(time, Decimal::new(125, 1)).expect("point");

    chart
        .set_data(vec![point, DataPoint::new(1_700_000_060.0, -2.5)])
        .expect("data");

    assert_eq!(chart.backend(), Backend::Vector);
    assert_eq!(chart.x_scale().domain(), (1_700_000_000.0, 1_700_000_060.0));
    assert_eq!(chart.y_scale().domain(), (0.0, 12.5));
}

#[test]
fn invalid_size_is_rejected() {
    let mut chart = chart();

    assert!(chart.set_width(f64::NAN).is_err());
    assert!(chart.set_height(-1.0).is_err());
    assert_eq!(chart.options().width, 300.0);
    assert_eq!(chart.options().height, 40.0);
}
