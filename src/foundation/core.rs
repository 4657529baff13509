use crate::foundation::error::{BoothError, BoothResult};

pub use kurbo::{Point, Rect};

/// Default print resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 300;

/// Largest width or height, in pixels, of any raster this crate allocates.
pub const MAX_RASTER_DIM: u32 = 16_384;

/// Physical print dimensions in inches.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrintSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl PrintSize {
    pub const fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
        }
    }

    /// Pixel size of this print at `dpi`, each dimension rounded to the nearest pixel.
    pub fn canvas_at(self, dpi: u32) -> BoothResult<Canvas> {
        if dpi == 0 {
            return Err(BoothError::validation("dpi must be >= 1"));
        }
        let width = (self.width_in * f64::from(dpi)).round();
        let height = (self.height_in * f64::from(dpi)).round();
        let max = f64::from(MAX_RASTER_DIM);
        if !width.is_finite() || !height.is_finite() || width < 1.0 || height < 1.0 {
            return Err(BoothError::validation(format!(
                "print size {}x{} in at {dpi} dpi does not produce a usable canvas",
                self.width_in, self.height_in
            )));
        }
        if width > max || height > max {
            return Err(BoothError::validation(format!(
                "print size {}x{} in at {dpi} dpi is {width}x{height} px, above the {MAX_RASTER_DIM} px limit",
                self.width_in, self.height_in
            )));
        }
        Ok(Canvas {
            width: width as u32,
            height: height as u32,
        })
    }
}

/// Pixel dimensions of a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
