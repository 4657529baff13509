use image::RgbaImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{BoothError, BoothResult};

/// Color effect applied to captures before they are composited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraFilter {
    #[default]
    None,
    Sepia,
    Vintage,
    Cool,
    Mono,
}

impl CameraFilter {
    pub const ALL: [CameraFilter; 5] = [
        CameraFilter::None,
        CameraFilter::Sepia,
        CameraFilter::Vintage,
        CameraFilter::Cool,
        CameraFilter::Mono,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sepia => "sepia",
            Self::Vintage => "vintage",
            Self::Cool => "cool",
            Self::Mono => "mono",
        }
    }

    pub fn parse(s: &str) -> BoothResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BoothError::validation(format!("unknown camera filter '{s}'")))
    }

    /// Filter primitives in application order.
    pub fn ops(self) -> Vec<ColorOp> {
        match self {
            Self::None => Vec::new(),
            Self::Sepia => vec![ColorOp::Sepia(0.6)],
            Self::Vintage => vec![
                ColorOp::Sepia(0.4),
                ColorOp::Contrast(0.9),
                ColorOp::Saturate(0.8),
            ],
            Self::Cool => vec![ColorOp::HueRotate(200.0), ColorOp::Saturate(1.1)],
            Self::Mono => vec![ColorOp::Grayscale(1.0)],
        }
    }

    /// Apply in place. Alpha is left untouched.
    pub fn apply(self, img: &mut RgbaImage) {
        let ops: Vec<ColorMatrix> = self.ops().into_iter().map(ColorOp::matrix).collect();
        if ops.is_empty() {
            return;
        }
        let buf: &mut [u8] = &mut **img;
        buf.par_chunks_mut(4).for_each(|px| {
            let mut rgb = [
                f32::from(px[0]) / 255.0,
                f32::from(px[1]) / 255.0,
                f32::from(px[2]) / 255.0,
            ];
            for m in &ops {
                rgb = m.apply(rgb);
            }
            for (dst, v) in px.iter_mut().zip(rgb) {
                *dst = (v * 255.0).round().clamp(0.0, 255.0) as u8;
            }
        });
    }
}

/// A single filter primitive with its amount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorOp {
    Sepia(f32),
    Grayscale(f32),
    Saturate(f32),
    Contrast(f32),
    /// Degrees.
    HueRotate(f32),
}

impl ColorOp {
    pub fn matrix(self) -> ColorMatrix {
        match self {
            Self::Sepia(amount) => {
                let a = 1.0 - amount.clamp(0.0, 1.0);
                ColorMatrix::linear([
                    [0.393 + 0.607 * a, 0.769 - 0.769 * a, 0.189 - 0.189 * a],
                    [0.349 - 0.349 * a, 0.686 + 0.314 * a, 0.168 - 0.168 * a],
                    [0.272 - 0.272 * a, 0.534 - 0.534 * a, 0.131 + 0.869 * a],
                ])
            }
            Self::Grayscale(amount) => {
                let a = 1.0 - amount.clamp(0.0, 1.0);
                ColorMatrix::linear([
                    [0.2126 + 0.7874 * a, 0.7152 - 0.7152 * a, 0.0722 - 0.0722 * a],
                    [0.2126 - 0.2126 * a, 0.7152 + 0.2848 * a, 0.0722 - 0.0722 * a],
                    [0.2126 - 0.2126 * a, 0.7152 - 0.7152 * a, 0.0722 + 0.9278 * a],
                ])
            }
            Self::Saturate(s) => {
                let s = s.max(0.0);
                ColorMatrix::linear([
                    [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
                ])
            }
            Self::Contrast(c) => {
                let c = c.max(0.0);
                let o = 0.5 - 0.5 * c;
                ColorMatrix {
                    m: [[c, 0.0, 0.0], [0.0, c, 0.0], [0.0, 0.0, c]],
                    offset: [o, o, o],
                }
            }
            Self::HueRotate(deg) => {
                let (sin, cos) = deg.to_radians().sin_cos();
                ColorMatrix::linear([
                    [
                        0.213 + cos * 0.787 - sin * 0.213,
                        0.715 - cos * 0.715 - sin * 0.715,
                        0.072 - cos * 0.072 + sin * 0.928,
                    ],
                    [
                        0.213 - cos * 0.213 + sin * 0.143,
                        0.715 + cos * 0.285 + sin * 0.140,
                        0.072 - cos * 0.072 - sin * 0.283,
                    ],
                    [
                        0.213 - cos * 0.213 - sin * 0.787,
                        0.715 - cos * 0.715 + sin * 0.715,
                        0.072 + cos * 0.928 + sin * 0.072,
                    ],
                ])
            }
        }
    }
}

/// Affine transform over normalized RGB, clamped to `[0, 1]` after each application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix {
    pub m: [[f32; 3]; 3],
    pub offset: [f32; 3],
}

impl ColorMatrix {
    fn linear(m: [[f32; 3]; 3]) -> Self {
        Self {
            m,
            offset: [0.0; 3],
        }
    }

    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let mut out = [0.0f32; 3];
        for (i, row) in self.m.iter().enumerate() {
            let v = row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2] + self.offset[i];
            out[i] = v.clamp(0.0, 1.0);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/filter.rs"]
mod tests;
