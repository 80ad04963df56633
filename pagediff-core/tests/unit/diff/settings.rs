use super::*;

#[test]
fn defaults_are_valid() {
    DiffSettings::default().validate().unwrap();
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let json = r#"{ "threshold": 12.5, "near_size": { "width": 10.0, "height": 10.0 } }"#;
    let s = DiffSettings::from_reader(json.as_bytes()).unwrap();
    assert_eq!(s.threshold, 12.5);
    assert_eq!(s.near_size, Size::new(10.0, 10.0));
    assert_eq!(s.image_width, 600.0);
    assert_eq!(s.cluster_strategy, ClusterStrategy::SinglePass);
}

#[test]
fn cluster_strategy_uses_snake_case_names() {
    let s = DiffSettings::from_reader(r#"{ "cluster_strategy": "fixed_point" }"#.as_bytes())
        .unwrap();
    assert_eq!(s.cluster_strategy, ClusterStrategy::FixedPoint);
}

#[test]
fn json_round_trip_preserves_colors() {
    let s = DiffSettings {
        highlight_color: Rgb8::new(0, 200, 40),
        ..DiffSettings::default()
    };
    let json = serde_json::to_string(&s).unwrap();
    let back = DiffSettings::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, s);
}

#[test]
fn invalid_values_are_rejected() {
    let bad = [
        DiffSettings {
            image_width: 0.0,
            ..DiffSettings::default()
        },
        DiffSettings {
            threshold: f64::NAN,
            ..DiffSettings::default()
        },
        DiffSettings {
            near_size: Size::new(-1.0, 0.0),
            ..DiffSettings::default()
        },
        DiffSettings {
            structuring_element: 0,
            ..DiffSettings::default()
        },
        DiffSettings {
            structuring_element: 300,
            ..DiffSettings::default()
        },
        DiffSettings {
            grid_thickness: 0,
            ..DiffSettings::default()
        },
    ];
    for s in bad {
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("validation error:"), "{err}");
    }
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = DiffSettings::from_reader("{ nope".as_bytes()).unwrap_err();
    assert!(matches!(err, PagediffError::Validation(_)));
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = DiffSettings::from_path("target/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("open settings JSON"));
}

#[test]
fn stroke_widths_are_bounded() {
    for s in [
        DiffSettings {
            thumbnail_border: u32::MAX / 2,
            ..DiffSettings::default()
        },
        DiffSettings {
            grid_thickness: MAX_STROKE + 1,
            ..DiffSettings::default()
        },
    ] {
        assert!(matches!(s.validate(), Err(PagediffError::Validation(_))));
    }
    let widest = DiffSettings {
        thumbnail_border: MAX_STROKE,
        grid_thickness: MAX_STROKE,
        ..DiffSettings::default()
    };
    widest.validate().unwrap();
}

#[test]
fn oversized_border_from_json_is_rejected() {
    let json = format!(r#"{{ "thumbnail_border": {} }}"#, u32::MAX / 2);
    let err = DiffSettings::from_reader(json.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("thumbnail_border"), "{err}");
}
