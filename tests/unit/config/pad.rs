use super::*;

#[test]
fn defaults_match_signature_pad_conventions() {
    let cfg = PadConfig::default();
    assert_eq!(cfg.pen_color.to_rgba8(), [0, 0, 0, 255]);
    assert_eq!(cfg.background_color.to_rgba8(), [255, 255, 255, 255]);
    assert_eq!(cfg.min_width, 0.5);
    assert_eq!(cfg.max_width, 2.5);
    assert_eq!(cfg.velocity_filter_weight, 0.7);
    assert_eq!(cfg.effective_dot_size(), 1.5);
    assert_eq!(cfg.resize_debounce_ms, 50);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = PadConfig::from_json_str(
        r##"{ "pen_color": "#0000ff", "max_width": 4.0, "dot_size": 3.0, "margin": true }"##,
    )
    .unwrap();
    assert_eq!(cfg.pen_color.to_rgba8(), [0, 0, 255, 255]);
    assert_eq!(cfg.max_width, 4.0);
    assert_eq!(cfg.min_width, 0.5);
    assert_eq!(cfg.effective_dot_size(), 3.0);
    assert!(cfg.margin);
}

#[test]
fn unknown_fields_and_bad_colors_are_rejected() {
    let err = PadConfig::from_json_str(r##"{ "pen_colour": "#000000" }"##).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));

    assert!(PadConfig::from_json_str(r#"{ "pen_color": "black" }"#).is_err());
}

#[test]
fn inconsistent_widths_still_load() {
    let cfg = PadConfig::from_json_str(r#"{ "min_width": 3.0, "max_width": 1.0 }"#).unwrap();
    assert_eq!(cfg.min_width, 3.0);
    assert_eq!(cfg.max_width, 1.0);
}

#[test]
fn logical_size_prefers_overrides_and_applies_margin() {
    let mut cfg = PadConfig::default();
    assert_eq!(cfg.logical_size(300.0, 150.0), (300.0, 150.0));

    cfg.width = Some(400.0);
    assert_eq!(cfg.logical_size(300.0, 150.0), (400.0, 150.0));

    cfg.margin = true;
    assert_eq!(cfg.logical_size(300.0, 150.0), (384.0, 134.0));

    assert_eq!(cfg.logical_size(0.0, 10.0).1, 0.0);
}

#[test]
fn from_path_reports_missing_file() {
    let err = PadConfig::from_path("target/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("read pad config"));
}
