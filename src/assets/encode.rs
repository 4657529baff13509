use std::path::Path;

use anyhow::Context as _;
use image::{
    ExtendedColorType, ImageEncoder, RgbImage, RgbaImage,
    buffer::ConvertBuffer,
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
};
use serde::{Deserialize, Serialize};

use crate::foundation::error::{BoothError, BoothResult};

/// JPEG quality used for prints unless configured otherwise.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

fn default_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

/// Encoding of composites handed back to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum OutputFormat {
    Jpeg {
        #[serde(default = "default_quality")]
        quality: u8,
    },
    Png,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl OutputFormat {
    pub fn validate(self) -> BoothResult<()> {
        match self {
            Self::Jpeg { quality } if !(1..=100).contains(&quality) => Err(
                BoothError::validation(format!("jpeg quality must be in 1..=100, got {quality}")),
            ),
            _ => Ok(()),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg { .. } => "jpg",
            Self::Png => "png",
        }
    }

    /// Format matching a file extension (`jpg`, `jpeg`, `png`), case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::default()),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// An encoded raster, the handle passed between kiosk screens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    /// Decode back to RGBA8 pixels.
    pub fn decode(&self) -> BoothResult<RgbaImage> {
        let img = image::load_from_memory(&self.bytes)
            .map_err(|e| BoothError::asset_load(format!("decode encoded image: {e}")))?;
        Ok(img.to_rgba8())
    }

    pub fn write_to(&self, path: &Path) -> BoothResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("write image '{}'", path.display()))?;
        Ok(())
    }
}

/// Encode an RGBA8 raster. JPEG drops the alpha channel, so callers pass opaque canvases.
pub fn encode_rgba(img: &RgbaImage, format: OutputFormat) -> BoothResult<EncodedImage> {
    format.validate()?;
    let (width, height) = img.dimensions();
    let mut bytes = Vec::new();
    match format {
        OutputFormat::Jpeg { quality } => {
            let rgb: RgbImage = img.convert();
            JpegEncoder::new_with_quality(&mut bytes, quality)
                .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(|e| BoothError::encode(format!("jpeg: {e}")))?;
        }
        OutputFormat::Png => {
            PngEncoder::new(&mut bytes)
                .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(|e| BoothError::encode(format!("png: {e}")))?;
        }
    }
    tracing::debug!(width, height, ?format, len = bytes.len(), "encoded image");
    Ok(EncodedImage {
        format,
        width,
        height,
        bytes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
