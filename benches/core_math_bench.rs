use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use horizon_rs::api::HorizonChart;
use horizon_rs::core::{
    AccessorFn, CurveKind, LinearScale, PowScale, aggregate, area_path, default_reducer,
    project_area_vertices,
};
use horizon_rs::render::{Backend, NullRenderer};
use std::hint::black_box;

fn samples(count: usize) -> Vec<[f64; 2]> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            // Two samples per x so grouping does real work.
            [(t / 2.0).floor(), (t * 0.01).sin() * 100.0]
        })
        .collect()
}

fn bench_aggregate_10k(c: &mut Criterion) {
    let data = samples(10_000);
    let x: AccessorFn<[f64; 2]> = Arc::new(|sample: &[f64; 2]| sample[0]);
    let y: AccessorFn<[f64; 2]> = Arc::new(|sample: &[f64; 2]| sample[1]);
    let reducer = default_reducer();

    c.bench_function("aggregate_10k", |b| {
        b.iter(|| {
            let _ = aggregate(black_box(&data), &x, &y, &reducer, None, None);
        })
    });
}

fn bench_band_projection_5k(c: &mut Criterion) {
    let data = samples(10_000);
    let x: AccessorFn<[f64; 2]> = Arc::new(|sample: &[f64; 2]| sample[0]);
    let y: AccessorFn<[f64; 2]> = Arc::new(|sample: &[f64; 2]| sample[1]);
    let aggregation = aggregate(&data, &x, &y, &default_reducer(), None, None);
    let x_scale = LinearScale::new(aggregation.x_range, (0.0, 1920.0)).expect("valid x scale");
    let y_scale =
        PowScale::new((0.0, aggregation.max_abs_y()), (0.0, 160.0), 0.5).expect("valid y scale");

    c.bench_function("band_projection_5k", |b| {
        b.iter(|| {
            let vertices =
                project_area_vertices(black_box(&aggregation.points), x_scale, y_scale, 160.0, 1.0);
            let _ = area_path(&vertices, CurveKind::Basis);
        })
    });
}

fn bench_chart_update_10k(c: &mut Criterion) {
    let mut chart =
        HorizonChart::new(NullRenderer::default(), Backend::Vector).expect("chart init");
    chart.set_data(samples(10_000)).expect("data");

    c.bench_function("chart_update_10k", |b| {
        b.iter(|| {
            chart.update().expect("update");
        })
    });
}

criterion_group!(
    benches,
    bench_aggregate_10k,
    bench_band_projection_5k,
    bench_chart_update_10k
);
criterion_main!(benches);
