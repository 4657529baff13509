use super::*;

#[test]
fn builtin_catalog_is_complete_and_valid() {
    let cat = FrameCatalog::builtin();
    assert_eq!(cat.len(), 33);
    for frame in cat.iter() {
        frame.validate().unwrap();
        assert_eq!(cat.get(&frame.id), Some(frame));
    }
    // Rebuilding through the validating path catches duplicate ids.
    FrameCatalog::from_frames(cat.iter().cloned().collect()).unwrap();
}

#[test]
fn builtin_none_is_identity_and_first() {
    let cat = FrameCatalog::builtin();
    let first = cat.iter().next().unwrap();
    assert_eq!(first.id, NO_FRAME_ID);
    assert!(first.is_identity());
    assert!(!cat.require("polaroid-classic").unwrap().is_identity());
    // Padding alone still changes the print.
    assert!(!cat.require("shadow-depth").unwrap().is_identity());
}

#[test]
fn film_strip_is_the_only_holed_frame() {
    let holed: Vec<_> = FrameCatalog::builtin()
        .iter()
        .filter(|f| f.holes)
        .map(|f| f.id.as_str())
        .collect();
    assert_eq!(holed, vec!["film-strip"]);
}

#[test]
fn require_reports_unknown_ids() {
    let err = FrameCatalog::builtin().require("no-such-frame").unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("no-such-frame"));
}

#[test]
fn transparent_or_missing_border_color_fills_white() {
    let cat = FrameCatalog::builtin();
    assert_eq!(cat.require("shadow-depth").unwrap().fill_color(), Color::WHITE);
    assert_eq!(FrameSpec::new("x", "X").fill_color(), Color::WHITE);
    assert_eq!(
        cat.require("classic-black").unwrap().fill_color(),
        Color::rgb(0x1c, 0x1c, 0x1c)
    );
}

#[test]
fn polaroid_extra_bottom_and_canvas() {
    let polaroid = FrameCatalog::builtin().require("polaroid-classic").unwrap();
    assert_eq!(polaroid.extra_bottom_padding(), 55);
    assert_eq!(polaroid.image_inset(), 30);
    let c = polaroid
        .framed_canvas(Canvas {
            width: 100,
            height: 200,
        })
        .unwrap();
    assert_eq!((c.width, c.height), (160, 315));
}

#[test]
fn bottom_override_smaller_than_padding_adds_nothing() {
    let mut f = FrameSpec::new("x", "X");
    f.padding = 20;
    f.bottom_padding = Some(5);
    assert_eq!(f.extra_bottom_padding(), 0);
}

#[test]
fn json_catalog_round_trips_structured_fields() {
    let json = r##"[
      {
        "id": "test-gradient",
        "name": "Test Gradient",
        "border_width": 10,
        "border_color": "#112233",
        "padding": 4,
        "background": {
          "kind": "linear_gradient",
          "angle_deg": 90,
          "stops": [
            { "color": "#000000", "offset": 0.0 },
            { "color": "#ffffff", "offset": 1.0 }
          ]
        },
        "inner_border": { "width": 2, "color": "#fff" }
      },
      { "id": "strip", "name": "Strip", "holes": true }
    ]"##;
    let cat = FrameCatalog::from_json(json).unwrap();
    assert_eq!(cat.len(), 2);
    let g = cat.require("test-gradient").unwrap();
    assert_eq!(g.border_color, Some(Color::rgb(0x11, 0x22, 0x33)));
    assert_eq!(
        g.inner_border,
        Some(InnerBorder {
            width: 2,
            color: Color::WHITE
        })
    );
    assert!(matches!(
        g.background,
        Some(Background::LinearGradient { ref stops, .. }) if stops.len() == 2
    ));
    assert!(cat.require("strip").unwrap().holes);
}

#[test]
fn json_catalog_rejects_duplicates_and_bad_stops() {
    let dup = r#"[{"id":"a","name":"A"},{"id":"a","name":"B"}]"#;
    assert!(FrameCatalog::from_json(dup).unwrap_err().is_validation());

    let unsorted = r##"[{"id":"a","name":"A","background":{"kind":"linear_gradient","angle_deg":0,
        "stops":[{"color":"#000","offset":0.8},{"color":"#fff","offset":0.2}]}}]"##;
    assert!(FrameCatalog::from_json(unsorted).is_err());

    let empty = r#"[{"id":"a","name":"A","background":{"kind":"repeating_pattern","angle_deg":0,"stops":[]}}]"#;
    assert!(FrameCatalog::from_json(empty).is_err());

    let zero_inner = r##"[{"id":"a","name":"A","inner_border":{"width":0,"color":"#000"}}]"##;
    assert!(FrameCatalog::from_json(zero_inner).is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = FrameCatalog::from_json("{not json").unwrap_err();
    assert!(matches!(err, BoothError::Serde(_)));
}

#[test]
fn framed_canvas_is_capped() {
    let mut f = FrameSpec::new("wide", "Wide");
    f.border_width = 100;
    let image = Canvas {
        width: MAX_RASTER_DIM - 200,
        height: 10,
    };
    let c = f.framed_canvas(image).unwrap();
    assert_eq!(c.width, MAX_RASTER_DIM);

    f.border_width = 101;
    assert!(f.framed_canvas(image).unwrap_err().is_validation());

    f.border_width = u32::MAX;
    let err = f.framed_canvas(image).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("'wide'"), "{err}");
}
