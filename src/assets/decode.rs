use std::path::Path;

use image::RgbaImage;
use rayon::prelude::*;

use crate::foundation::error::{BoothError, BoothResult};

/// A decoded capture. Compositors read photos and never mutate them.
#[derive(Clone, Debug, PartialEq)]
pub struct Photo {
    pixels: RgbaImage,
}

impl Photo {
    pub fn from_rgba(pixels: RgbaImage) -> BoothResult<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(BoothError::asset_load("photo has zero width or height"));
        }
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }
}

/// Decode an encoded raster (JPEG, PNG, ...) into a [`Photo`].
pub fn decode_photo(bytes: &[u8]) -> BoothResult<Photo> {
    decode_raw(bytes).map_err(BoothError::asset_load)
}

pub fn load_photo(path: &Path) -> BoothResult<Photo> {
    let bytes = std::fs::read(path)
        .map_err(|e| BoothError::asset_load(format!("read '{}': {e}", path.display())))?;
    decode_raw(&bytes)
        .map_err(|e| BoothError::asset_load(format!("'{}': {e}", path.display())))
}

fn decode_raw(bytes: &[u8]) -> Result<Photo, String> {
    let img = image::load_from_memory(bytes).map_err(|e| format!("decode image: {e}"))?;
    let pixels = img.to_rgba8();
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err("photo has zero width or height".to_owned());
    }
    Ok(Photo { pixels })
}

/// Decode every source in parallel.
///
/// All sources must decode; the reported failure is the one with the lowest input index, so
/// the outcome does not depend on thread scheduling.
pub fn decode_all<S>(sources: &[S], pool: Option<&rayon::ThreadPool>) -> BoothResult<Vec<Photo>>
where
    S: AsRef<[u8]> + Sync,
{
    let decode = || {
        sources
            .par_iter()
            .map(|src| decode_raw(src.as_ref()))
            .collect::<Vec<_>>()
    };
    let decoded = match pool {
        Some(pool) => pool.install(decode),
        None => decode(),
    };

    let mut photos = Vec::with_capacity(decoded.len());
    for (idx, item) in decoded.into_iter().enumerate() {
        match item {
            Ok(photo) => photos.push(photo),
            Err(e) => {
                tracing::debug!(index = idx, error = %e, "photo decode failed");
                return Err(BoothError::asset_load(format!("photo {idx}: {e}")));
            }
        }
    }
    Ok(photos)
}

pub fn build_thread_pool(threads: Option<usize>) -> BoothResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BoothError::validation(
            "decode threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
