use super::*;
use crate::{assets::encode::OutputFormat, catalog::frames::FrameSpec, foundation::color::Color};
use image::RgbaImage;

fn small_opts() -> SessionOpts {
    SessionOpts {
        dpi: 10,
        output: OutputFormat::Png,
        threads: None,
    }
}

fn photo(rgba: [u8; 4]) -> Photo {
    Photo::from_rgba(RgbaImage::from_pixel(2, 3, image::Rgba(rgba))).unwrap()
}

fn png(rgba: [u8; 4]) -> Vec<u8> {
    encode_rgba(&RgbaImage::from_pixel(4, 6, image::Rgba(rgba)), OutputFormat::Png)
        .unwrap()
        .bytes
}

#[test]
fn capture_requires_a_grid_and_respects_capacity() {
    let mut s = BoothSession::new(small_opts()).unwrap();
    assert!(s.capture(photo([1, 2, 3, 255])).unwrap_err().is_validation());

    s.select_grid(GridSpec::new(2, 1)).unwrap();
    s.capture(photo([1, 2, 3, 255])).unwrap();
    s.capture(photo([1, 2, 3, 255])).unwrap();
    let err = s.capture(photo([1, 2, 3, 255])).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(s.captures().len(), 2);

    s.clear_captures();
    assert!(s.captures().is_empty());
}

#[test]
fn selecting_a_grid_discards_captures() {
    let mut s = BoothSession::new(small_opts()).unwrap();
    s.select_grid(GridSpec::new(1, 1)).unwrap();
    s.capture(photo([1, 2, 3, 255])).unwrap();
    s.select_grid(GridSpec::new(2, 2)).unwrap();
    assert!(s.captures().is_empty());
    assert!(s.select_grid(GridSpec::new(0, 2)).unwrap_err().is_validation());
    // The rejected grid leaves the previous one selected.
    assert_eq!(s.grid(), Some(&GridSpec::new(2, 2)));
}

#[test]
fn filter_applies_to_later_captures_only() {
    let mut s = BoothSession::new(small_opts()).unwrap();
    s.select_grid(GridSpec::new(2, 1)).unwrap();
    s.capture(photo([255, 0, 0, 255])).unwrap();
    s.set_filter(CameraFilter::Mono);
    assert_eq!(s.filter(), CameraFilter::Mono);
    s.capture(photo([255, 0, 0, 255])).unwrap();

    assert_eq!(s.captures()[0].pixels().get_pixel(0, 0).0, [255, 0, 0, 255]);
    let gray = s.captures()[1].pixels().get_pixel(0, 0).0;
    assert_eq!(gray[0], gray[1]);
    assert_eq!(gray[1], gray[2]);
}

#[test]
fn compose_stores_composite_at_session_dpi() {
    let mut s = BoothSession::new(small_opts()).unwrap();
    assert!(s.compose().unwrap_err().is_validation());

    s.select_grid(GridSpec::new(2, 1).with_id("2x4-vertical-2")).unwrap();
    s.capture(photo([0, 0, 255, 255])).unwrap();
    // One short of the grid.
    assert!(s.compose().unwrap_err().is_validation());

    s.capture(photo([0, 0, 255, 255])).unwrap();
    let out = s.compose().unwrap();
    assert_eq!((out.width, out.height), (20, 40));
    assert_eq!(out.format, OutputFormat::Png);
    assert!(s.composite().is_some());
    assert_eq!(s.original_composite(), s.composite());
    assert_eq!(s.selected_frame(), None);
}

#[test]
fn reframing_starts_from_the_original() {
    let mut s = BoothSession::new(small_opts()).unwrap();
    s.select_grid(GridSpec::new(1, 1)).unwrap();
    s.capture(photo([0, 128, 0, 255])).unwrap();
    let plain = s.compose().unwrap().clone();
    assert_eq!((plain.width, plain.height), (40, 60));

    // modern-minimal: border 6 + padding 15 on every side.
    let first = s.apply_frame("modern-minimal").unwrap().clone();
    assert_eq!((first.width, first.height), (82, 102));
    assert_eq!(s.selected_frame(), Some("modern-minimal"));
    assert_eq!(s.original_composite(), Some(&plain));

    // film-strip: border 25 + padding 5, applied to the plain composite again.
    let second = s.apply_frame("film-strip").unwrap();
    assert_eq!((second.width, second.height), (100, 120));
    assert_eq!(s.original_composite(), Some(&plain));

    let none = s.apply_frame("none").unwrap();
    assert_eq!(none, &plain);
    assert_eq!(s.selected_frame(), Some("none"));
}

#[test]
fn apply_frame_errors_leave_state_untouched() {
    let mut s = BoothSession::new(small_opts()).unwrap();
    assert!(s.apply_frame("polaroid-classic").unwrap_err().is_validation());

    s.select_grid(GridSpec::new(1, 1)).unwrap();
    s.capture(photo([0, 0, 0, 255])).unwrap();
    let plain = s.compose().unwrap().clone();
    let err = s.apply_frame("does-not-exist").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(s.composite(), Some(&plain));
    assert_eq!(s.selected_frame(), None);
}

#[test]
fn custom_catalog_replaces_builtin() {
    let frame = FrameSpec {
        border_width: 1,
        border_color: Some(Color::rgb(0, 0, 0)),
        ..FrameSpec::new("thin", "Thin")
    };
    let catalog = FrameCatalog::from_frames(vec![frame]).unwrap();
    let builtin = BoothSession::new(small_opts()).unwrap();
    assert_eq!(builtin.catalog().len(), FrameCatalog::builtin().len());

    let mut s = BoothSession::new(small_opts()).unwrap().with_catalog(catalog);
    assert_eq!(s.catalog().len(), 1);

    s.select_grid(GridSpec::new(1, 1)).unwrap();
    s.capture(photo([9, 9, 9, 255])).unwrap();
    s.compose().unwrap();
    let framed = s.apply_frame("thin").unwrap();
    assert_eq!((framed.width, framed.height), (42, 62));
    assert!(s.apply_frame("polaroid-classic").is_err());
}

#[test]
fn capture_all_decodes_in_order_on_dedicated_pool() {
    let opts = SessionOpts {
        threads: Some(2),
        ..small_opts()
    };
    let mut s = BoothSession::new(opts).unwrap();
    s.select_grid(GridSpec::new(2, 1)).unwrap();
    s.capture_all(&[png([255, 0, 0, 255]), png([0, 0, 255, 255])]).unwrap();
    assert_eq!(s.captures()[0].pixels().get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(s.captures()[1].pixels().get_pixel(0, 0).0, [0, 0, 255, 255]);
}

#[test]
fn capture_all_is_all_or_nothing() {
    let mut s = BoothSession::new(small_opts()).unwrap();
    s.select_grid(GridSpec::new(2, 1)).unwrap();

    let err = s
        .capture_all(&[png([1, 1, 1, 255]), b"broken".to_vec()])
        .unwrap_err();
    assert!(err.is_asset_load());
    assert!(s.captures().is_empty());

    let err = s.capture_all(&vec![png([1, 1, 1, 255]); 3]).unwrap_err();
    assert!(err.is_validation());
    assert!(s.captures().is_empty());

    s.capture_encoded(&png([1, 1, 1, 255])).unwrap();
    assert_eq!(s.captures().len(), 1);
}

#[test]
fn invalid_opts_are_rejected() {
    let opts = SessionOpts {
        dpi: 0,
        ..SessionOpts::default()
    };
    assert!(BoothSession::new(opts).is_err());
}

#[test]
fn reset_clears_customer_state() {
    let mut s = BoothSession::new(small_opts()).unwrap();
    s.set_filter(CameraFilter::Sepia);
    s.select_grid(GridSpec::new(1, 1)).unwrap();
    s.capture(photo([0, 0, 0, 255])).unwrap();
    s.compose().unwrap();
    s.apply_frame("museum-white").unwrap();

    s.reset();
    assert_eq!(s.filter(), CameraFilter::None);
    assert!(s.grid().is_none());
    assert!(s.captures().is_empty());
    assert!(s.composite().is_none());
    assert!(s.original_composite().is_none());
    assert!(s.selected_frame().is_none());
    assert_eq!(s.opts().dpi, 10);
}
