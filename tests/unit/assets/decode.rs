use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_dimensions_and_straight_alpha() {
    let photo = decode_photo(&png_bytes(3, 2, [100, 50, 200, 128])).unwrap();
    assert_eq!((photo.width(), photo.height()), (3, 2));
    assert_eq!(photo.pixels().get_pixel(0, 0).0, [100, 50, 200, 128]);
}

#[test]
fn garbage_bytes_are_asset_load_errors() {
    let err = decode_photo(b"definitely not an image").unwrap_err();
    assert!(err.is_asset_load());
}

#[test]
fn zero_sized_photo_is_rejected() {
    assert!(Photo::from_rgba(RgbaImage::new(0, 4)).is_err());
}

#[test]
fn decode_all_preserves_input_order() {
    let sources = vec![
        png_bytes(1, 1, [255, 0, 0, 255]),
        png_bytes(2, 1, [0, 255, 0, 255]),
        png_bytes(3, 1, [0, 0, 255, 255]),
    ];
    let photos = decode_all(&sources, None).unwrap();
    let widths: Vec<_> = photos.iter().map(Photo::width).collect();
    assert_eq!(widths, vec![1, 2, 3]);
}

#[test]
fn decode_all_reports_lowest_failing_index() {
    let sources: Vec<Vec<u8>> = vec![
        png_bytes(1, 1, [0, 0, 0, 255]),
        b"bad one".to_vec(),
        b"bad two".to_vec(),
    ];
    let pool = build_thread_pool(Some(2)).unwrap();
    let err = decode_all(&sources, Some(&pool)).unwrap_err();
    assert!(err.is_asset_load());
    assert!(err.to_string().contains("photo 1:"));
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).unwrap_err().is_validation());
}

#[test]
fn load_photo_missing_file_is_asset_load_error() {
    let err = load_photo(Path::new("/definitely/not/here.jpg")).unwrap_err();
    assert!(err.is_asset_load());
}
