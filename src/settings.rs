use std::ops::RangeInclusive;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::pipeline::tokenize::TokenizerKind;
use crate::render::ChartKind;

pub const MIN_FREQ_RANGE: RangeInclusive<u64> = 1..=100;
const CONFIG_FILE: &str = "wordfreq";
const ENV_PREFIX: &str = "WORDFREQ";

/// Defaults for a run. CLI flags override whatever is loaded here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub min_freq: u64,
    pub chart: ChartKind,
    pub tokenizer: TokenizerKind,
    pub output: PathBuf,
    pub strip_markup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_freq: 10,
            chart: ChartKind::default(),
            tokenizer: TokenizerKind::default(),
            output: PathBuf::from("wordfreq.html"),
            strip_markup: false,
        }
    }
}

impl Settings {
    /// Optional `wordfreq.toml` in the working directory, then `WORDFREQ_*`
    /// environment variables.
    pub fn load() -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let settings: Settings = builder
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !MIN_FREQ_RANGE.contains(&self.min_freq) {
            bail!(
                "min_freq must be within {}..={}, got {}",
                MIN_FREQ_RANGE.start(),
                MIN_FREQ_RANGE.end(),
                self.min_freq
            );
        }
        Ok(())
    }
}
