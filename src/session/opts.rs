use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    assets::encode::OutputFormat,
    foundation::{
        core::DEFAULT_DPI,
        error::{BoothError, BoothResult},
    },
};

/// Options shared by every operation of a [`crate::BoothSession`].
///
/// Every field has a default, so `{}` is a valid configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionOpts {
    /// Print resolution of composites.
    pub dpi: u32,
    /// Encoding of composites and framed images.
    pub output: OutputFormat,
    /// Worker threads for decoding captures. `None` uses the global rayon pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            output: OutputFormat::default(),
            threads: None,
        }
    }
}

impl SessionOpts {
    pub fn validate(&self) -> BoothResult<()> {
        if self.dpi == 0 {
            return Err(BoothError::validation("session 'dpi' must be >= 1"));
        }
        self.output.validate()?;
        if self.threads == Some(0) {
            return Err(BoothError::validation(
                "session 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    pub fn from_json(s: &str) -> BoothResult<Self> {
        let opts: Self = serde_json::from_str(s).map_err(|e| BoothError::serde(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_path(path: &Path) -> BoothResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read session config '{}'", path.display()))?;
        Self::from_json(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
