use std::borrow::Cow;

use image::{RgbaImage, imageops::FilterType};
use rayon::prelude::*;

use crate::{
    assets::{
        decode::{Photo, decode_all},
        encode::{EncodedImage, OutputFormat, encode_rgba},
    },
    catalog::grids::print_size_for,
    foundation::{
        color::Color,
        core::PrintSize,
        error::{BoothError, BoothResult},
    },
    layout::grid::{GridGeometry, GridSpec, PixelRect, fit_within},
    render::paint::draw_image,
};

/// A print-sized raster produced by [`compose`].
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeImage {
    pub pixels: RgbaImage,
    pub print: PrintSize,
    pub dpi: u32,
}

impl CompositeImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

fn check_inputs(photo_count: usize, grid: &GridSpec, dpi: u32) -> BoothResult<()> {
    if photo_count == 0 {
        return Err(BoothError::validation("no photos provided"));
    }
    grid.validate()?;
    let expected = grid.cell_count();
    if photo_count != expected {
        return Err(BoothError::validation(format!(
            "expected {expected} photos for a {}x{} grid, got {photo_count}",
            grid.columns, grid.rows
        )));
    }
    if dpi == 0 {
        return Err(BoothError::validation("dpi must be >= 1"));
    }
    Ok(())
}

/// Tile `photos` into one print-sized canvas.
///
/// Photo `i` lands in column `i / rows`, row `i % rows`, scaled to fit its cell and centered on
/// the axis it does not fill. Uncovered canvas stays opaque white.
#[tracing::instrument(skip(photos), fields(photos = photos.len()))]
pub fn compose(photos: &[Photo], grid: &GridSpec, dpi: u32) -> BoothResult<CompositeImage> {
    check_inputs(photos.len(), grid, dpi)?;

    let print = print_size_for(grid);
    let canvas = print.canvas_at(dpi)?;
    let geometry = GridGeometry::new(canvas, grid)?;
    tracing::debug!(
        width = canvas.width,
        height = canvas.height,
        cell_width = geometry.cell_width,
        cell_height = geometry.cell_height,
        "resolved composite canvas"
    );

    let placements: Vec<PixelRect> = (0..photos.len())
        .map(|idx| {
            let (column, row) = grid.cell_of(idx);
            geometry.cell_rect(column, row)
        })
        .zip(photos)
        .map(|(cell, photo)| fit_within(photo.width(), photo.height(), cell))
        .collect();

    // Resampling is independent per photo; drawing below stays in input order.
    let scaled: Vec<Cow<'_, RgbaImage>> = photos
        .par_iter()
        .zip(placements.par_iter())
        .map(|(photo, dst)| scale_to(photo.pixels(), *dst))
        .collect();

    let mut pixels = RgbaImage::from_pixel(canvas.width, canvas.height, Color::WHITE.to_pixel());
    for (img, dst) in scaled.iter().zip(&placements) {
        draw_image(&mut pixels, img, i64::from(dst.x), i64::from(dst.y));
    }

    Ok(CompositeImage { pixels, print, dpi })
}

fn scale_to(src: &RgbaImage, dst: PixelRect) -> Cow<'_, RgbaImage> {
    if src.dimensions() == (dst.width, dst.height) {
        Cow::Borrowed(src)
    } else {
        Cow::Owned(image::imageops::resize(
            src,
            dst.width,
            dst.height,
            FilterType::Triangle,
        ))
    }
}

/// Decode `sources`, compose them, and encode the result.
///
/// Inputs are validated before any source is decoded.
pub fn compose_encoded<S>(
    sources: &[S],
    grid: &GridSpec,
    dpi: u32,
    format: OutputFormat,
    pool: Option<&rayon::ThreadPool>,
) -> BoothResult<EncodedImage>
where
    S: AsRef<[u8]> + Sync,
{
    check_inputs(sources.len(), grid, dpi)?;
    format.validate()?;
    let photos = decode_all(sources, pool)?;
    let composite = compose(&photos, grid, dpi)?;
    encode_rgba(&composite.pixels, format)
}

#[cfg(test)]
#[path = "../../tests/unit/render/grid.rs"]
mod tests;
