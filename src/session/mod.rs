pub(crate) mod booth_session;
pub(crate) mod opts;
