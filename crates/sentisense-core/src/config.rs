use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file discovered from the working directory upwards.
pub const CONFIG_FILE_NAME: &str = ".sentisense.toml";

/// Top-level configuration from `.sentisense.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scorer: ScorerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Scorer settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Extra lexicon entries merged over the built-in lexicon.
    #[serde(default)]
    pub lexicon: Option<PathBuf>,
}

/// Terminal rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_precision")]
    pub precision: usize,
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_precision() -> usize {
    2
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            color: true,
        }
    }
}

/// Interactive session behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_true")]
    pub clear_input_after_analyze: bool,
    /// Where `:export` writes when no path is given. Defaults to the
    /// standard export file name in the working directory.
    #[serde(default)]
    pub export_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            clear_input_after_analyze: true,
            export_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a `.sentisense.toml` file.
    ///
    /// Relative paths inside the file resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let mut config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "failed to parse '{}'. Run `sentisense init` to create a valid config file",
                path.display()
            )
        })?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Load from `.sentisense.toml` in the given directory or any ancestor, or return defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        let start = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let mut current = start.as_path();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded config");
                        config
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %config_path.display(),
                            "failed to load config: {e:#}. Using defaults."
                        );
                        Self::default()
                    }
                };
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Self::default()
    }

    fn resolve_paths(&mut self, base: &Path) {
        if let Some(ref lexicon) = self.scorer.lexicon {
            if lexicon.is_relative() {
                self.scorer.lexicon = Some(base.join(lexicon));
            }
        }
        if let Some(ref export) = self.session.export_path {
            if export.is_relative() {
                self.session.export_path = Some(base.join(export));
            }
        }
    }

    /// Generate default TOML content for `sentisense init`.
    pub fn default_toml() -> String {
        r#"# SentiSense - Sentiment Viewer Configuration

[scorer]
# Extra lexicon entries, one "word<TAB>valence" per line (valence in [-4, 4]).
# Entries override the built-in lexicon.
# lexicon = "lexicon.txt"

[display]
# Decimal places for displayed scores
precision = 2
color = true

[session]
# Start each analysis with an empty input buffer
clear_input_after_analyze = true
# export_path = "sentiment_analysis_results.csv"
"#
        .to_string()
    }
}
