use std::path::PathBuf;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::ParseError;

const ENV_PREFIX: &str = "QUOTE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub chunk_size: usize,
}

impl Settings {
    /// Defaults, overridden by `QUOTE_*` environment variables.
    pub fn load() -> Result<Self, ParseError> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self, ParseError> {
        let settings = Config::builder()
            .set_default("input_dir", "output/extraction_output")?
            .set_default("output_dir", "output/parsed_items")?
            .set_default("chunk_size", 500)?
            .add_source(env.try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

// ── Tests ──
