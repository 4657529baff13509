//! Image pipeline of a self-service photobooth kiosk.
//!
//! Captured photos flow through three stages:
//!
//! - camera filters ([`CameraFilter`]) applied as each photo is captured
//! - the grid compositor ([`compose`]) tiling the captures into one print-sized canvas
//! - the frame compositor ([`apply_frame`]) baking a decorative border around that canvas
//!
//! [`BoothSession`] carries the state the kiosk screens share between those stages.
#![forbid(unsafe_code)]

mod assets;
mod catalog;
mod foundation;
mod layout;
mod render;
mod session;

pub use crate::assets::decode::{Photo, build_thread_pool, decode_all, decode_photo, load_photo};
pub use crate::assets::encode::{DEFAULT_JPEG_QUALITY, EncodedImage, OutputFormat, encode_rgba};
pub use crate::catalog::frames::{
    Background, ColorStop, FrameCatalog, FrameSpec, InnerBorder, NO_FRAME_ID, RadialLayer,
};
pub use crate::catalog::grids::{FALLBACK_PRINT, GRID_LAYOUTS, GridLayout, grid_layout, print_size_for};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Canvas, DEFAULT_DPI, MAX_RASTER_DIM, Point, PrintSize, Rect};
pub use crate::foundation::error::{BoothError, BoothResult};
pub use crate::layout::grid::{GridGeometry, GridSpec, PixelRect, fit_within};
pub use crate::render::filter::{CameraFilter, ColorMatrix, ColorOp};
pub use crate::render::frame::{apply_frame, apply_frame_encoded, hole_centers};
pub use crate::render::grid::{CompositeImage, compose, compose_encoded};
pub use crate::session::booth_session::BoothSession;
pub use crate::session::opts::SessionOpts;
