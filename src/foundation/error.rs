/// Convenience result type used across the crate.
pub type BoothResult<T> = Result<T, BoothError>;

/// Top-level error taxonomy used by compositor and session APIs.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// Malformed or missing grid/photo input. Callers must fix the input before retrying.
    #[error("validation error: {0}")]
    Validation(String),

    /// A source image could not be read or decoded.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// A raster could not be encoded to the requested output format.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration and catalogs.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build a [`BoothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoothError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`BoothError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BoothError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors the caller can only resolve by changing its input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// `true` when a source image failed to load or decode.
    pub fn is_asset_load(&self) -> bool {
        matches!(self, Self::AssetLoad(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
