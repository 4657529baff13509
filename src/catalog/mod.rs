//! Static lookup tables: print layouts and decorative frames.

pub(crate) mod frames;
pub(crate) mod grids;
