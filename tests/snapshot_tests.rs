use horizon_rs::api::{
    HORIZON_SNAPSHOT_JSON_SCHEMA_V1, HorizonChart, HorizonOptions, HorizonSnapshot,
};
use horizon_rs::core::{CurveKind, HorizonMode};
use horizon_rs::render::{Backend, NullRenderer};

fn chart() -> HorizonChart<NullRenderer> {
    let mut chart = HorizonChart::new(NullRenderer::default(), Backend::Raster).expect("chart init");
    chart
        .set_data(vec![[0.0, 5.0], [0.0, -3.0], [1.0, 10.0]])
        .expect("data");
    chart
}

#[test]
fn options_json_roundtrip() {
    let options = HorizonOptions::default()
        .with_size(800.0, 30.0)
        .with_bands(5)
        .with_mode(HorizonMode::Mirror)
        .with_x_range(Some(-1.0), None)
        .with_curve(CurveKind::Linear);

    let json = options.to_json_pretty().expect("options should serialize");
    let restored = HorizonOptions::from_json_str(&json).expect("options should deserialize");

    assert_eq!(restored, options);
    assert!(json.contains("\"mode\": \"mirror\""));
}

#[test]
fn snapshot_describes_layout_and_bands() {
    let snapshot = chart().snapshot();

    assert_eq!(snapshot.backend, Backend::Raster);
    assert_eq!(snapshot.x_domain, (0.0, 1.0));
    assert_eq!(snapshot.y_domain, (0.0, 10.0));
    assert_eq!(snapshot.y_exponent, 1.0);
    assert_eq!(snapshot.color_domain, vec![-4.0, 0.0, 0.0, 4.0]);
    assert_eq!(snapshot.points.len(), 2);
    assert_eq!(snapshot.points[0].sample_count, 2);
    assert_eq!(snapshot.bands.len(), 8);
    assert_eq!(snapshot.bands[0].index, -1);
    assert_eq!(snapshot.bands[0].transform.translate_y, -160.0);
    assert_eq!(snapshot.mode(), HorizonMode::Offset);
    assert_eq!(snapshot.hovered, None);
}

#[test]
fn snapshot_json_contract_roundtrip() {
    let chart = chart();
    let snapshot = chart.snapshot();

    let json = chart
        .snapshot_json_contract_v1_pretty()
        .expect("snapshot should serialize");
    assert!(json.contains(&format!(
        "\"schema_version\": {HORIZON_SNAPSHOT_JSON_SCHEMA_V1}"
    )));

    let restored = HorizonSnapshot::from_json_compat_str(&json).expect("contract should parse");
    assert_eq!(restored, snapshot);
}

#[test]
fn bare_snapshot_json_is_accepted() {
    let snapshot = chart().snapshot();
    let json = snapshot.to_json_pretty().expect("snapshot should serialize");

    let restored = HorizonSnapshot::from_json_compat_str(&json).expect("bare json should parse");

    assert_eq!(restored, snapshot);
}

#[test]
fn unknown_schema_version_is_rejected() {
    let snapshot = chart().snapshot();
    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("snapshot should serialize")
        .replace("\"schema_version\": 1", "\"schema_version\": 7");

    let err = HorizonSnapshot::from_json_compat_str(&json).expect_err("version 7 must fail");

    assert!(err.to_string().contains("unsupported snapshot schema version: 7"));
}
