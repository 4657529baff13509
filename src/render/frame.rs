use image::RgbaImage;
use kurbo::Circle;

use crate::{
    assets::encode::{EncodedImage, OutputFormat, encode_rgba},
    catalog::frames::FrameSpec,
    foundation::{
        color::Color,
        core::{Canvas, Point, Rect},
        error::BoothResult,
    },
    render::paint::{draw_image, fill_circle, fill_rect, paint_background},
};

/// Sprocket holes per side edge.
pub const HOLES_PER_SIDE: u32 = 4;
pub const HOLE_RADIUS: f64 = 4.0;
/// Distance from the side and top/bottom edges to the outermost hole centers.
pub const HOLE_MARGIN: f64 = 10.0;
pub const HOLE_COLOR: Color = Color::rgb(0x33, 0x33, 0x33);

/// Bake `frame` around `image`.
///
/// Identity frames return a copy of the input. Otherwise the canvas grows by border and padding
/// on every side (plus any extra bottom padding) and the image is drawn unscaled at the inset.
#[tracing::instrument(
    skip(image, frame),
    fields(frame = %frame.id, width = image.width(), height = image.height())
)]
pub fn apply_frame(image: &RgbaImage, frame: &FrameSpec) -> BoothResult<RgbaImage> {
    if frame.is_identity() {
        return Ok(image.clone());
    }
    frame.validate()?;

    let (img_w, img_h) = image.dimensions();
    let canvas = frame.framed_canvas(Canvas {
        width: img_w,
        height: img_h,
    })?;
    tracing::debug!(width = canvas.width, height = canvas.height, "framed canvas");

    let mut out = RgbaImage::from_pixel(canvas.width, canvas.height, frame.fill_color().to_pixel());
    if let Some(bg) = &frame.background {
        paint_background(&mut out, bg);
    }

    let inset = frame.image_inset();
    if let Some(inner) = frame.inner_border {
        let (x, y, w) = (f64::from(inset), f64::from(inset), f64::from(inner.width));
        fill_rect(
            &mut out,
            Rect::new(
                x - w,
                y - w,
                x + f64::from(img_w) + w,
                y + f64::from(img_h) + w,
            ),
            inner.color,
        );
    }

    draw_image(&mut out, image, i64::from(inset), i64::from(inset));

    if frame.holes {
        for center in hole_centers(canvas) {
            fill_circle(&mut out, Circle::new(center, HOLE_RADIUS), HOLE_COLOR)?;
        }
    }
    Ok(out)
}

/// Film-strip hole centers for a canvas: the left column top to bottom, then the right.
pub fn hole_centers(canvas: Canvas) -> Vec<Point> {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let step = (h - 2.0 * HOLE_MARGIN) / f64::from(HOLES_PER_SIDE - 1);
    [HOLE_MARGIN, w - HOLE_MARGIN]
        .into_iter()
        .flat_map(|x| {
            (0..HOLES_PER_SIDE).map(move |i| Point::new(x, HOLE_MARGIN + f64::from(i) * step))
        })
        .collect()
}

/// Decode, frame and re-encode.
///
/// Identity frames hand back the input unchanged, without a decode/encode cycle.
pub fn apply_frame_encoded(
    image: &EncodedImage,
    frame: &FrameSpec,
    format: OutputFormat,
) -> BoothResult<EncodedImage> {
    if frame.is_identity() {
        return Ok(image.clone());
    }
    let pixels = image.decode()?;
    let framed = apply_frame(&pixels, frame)?;
    encode_rgba(&framed, format)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
