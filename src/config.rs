use anyhow::{Context, Result};
use beodata_align_core::parse::ParseMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub inputs: InputsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
    #[serde(default)]
    pub alignment: AlignmentConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputsConfig {
    /// Pipe-delimited tokenized stream.
    pub tokens: PathBuf,
    /// Space-separated N-way aligned corpus.
    pub aligned: PathBuf,
    #[serde(default = "default_editions")]
    pub editions: usize,
}

fn default_editions() -> usize {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("assets/aligned_with_brunetti.txt")
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ParsingConfig {
    #[serde(default)]
    pub mode: ParseMode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlignmentConfig {
    #[serde(default = "default_validate_order")]
    pub validate_order: bool,
    #[serde(default)]
    pub fail_on_unclaimed: bool,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            validate_order: default_validate_order(),
            fail_on_unclaimed: false,
        }
    }
}

fn default_validate_order() -> bool {
    true
}

impl Config {
    /// Defaults used when no config file exists; inputs come from flags.
    pub fn minimal() -> Self {
        Self {
            inputs: InputsConfig {
                tokens: PathBuf::from("assets/brunetti-length.txt"),
                aligned: PathBuf::from("assets/aligned.txt"),
                editions: default_editions(),
            },
            output: OutputConfig::default(),
            parsing: ParsingConfig::default(),
            alignment: AlignmentConfig::default(),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub tokens: Option<PathBuf>,
    pub aligned: Option<PathBuf>,
    pub editions: Option<usize>,
    pub output: Option<PathBuf>,
    pub strict: bool,
}

impl Config {
    pub fn apply(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(tokens) = overrides.tokens {
            self.inputs.tokens = tokens;
        }
        if let Some(aligned) = overrides.aligned {
            self.inputs.aligned = aligned;
        }
        if let Some(editions) = overrides.editions {
            self.inputs.editions = editions;
        }
        if let Some(output) = overrides.output {
            self.output.path = output;
        }
        if overrides.strict {
            self.parsing.mode = ParseMode::Strict;
        }
        validate(&self)?;
        Ok(self)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
pub fn load_or_minimal(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        log::debug!("no config at {}, using defaults", path.display());
        Ok(Config::minimal())
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.inputs.editions == 0 {
        anyhow::bail!("inputs.editions must be >= 1");
    }
    Ok(())
}
