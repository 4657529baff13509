pub(crate) mod filter;
pub(crate) mod frame;
pub(crate) mod grid;
pub(crate) mod paint;
