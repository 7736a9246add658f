use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::data::loader::{encoding_for_label, LoadOptions};

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV: &str = "RUSTY_CSV_CONFIG";

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// User-tunable settings.  Every field has a default, so a config file only
/// needs the keys it changes:
///
/// ```json
/// { "separators": [";", ","], "max_display_rows": 500 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Separator candidates, in the order they are tried.
    pub separators: Vec<String>,
    /// Encoding labels, in the order they are tried.
    pub encodings: Vec<String>,
    pub max_display_rows: usize,
    pub max_chart_points: usize,
    pub window_size: [f32; 2],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            separators: vec![",".into(), ";".into(), "\t".into()],
            encodings: vec!["utf-8".into(), "latin1".into()],
            max_display_rows: 100,
            max_chart_points: 200,
            window_size: [1200.0, 800.0],
        }
    }
}

impl ViewerConfig {
    /// Read the file named by [`CONFIG_ENV`], or fall back to defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: ViewerConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.load_options()?;
        Ok(config)
    }

    /// Loader candidates described by this configuration.
    pub fn load_options(&self) -> Result<LoadOptions> {
        let separators = self
            .separators
            .iter()
            .map(|s| parse_separator(s))
            .collect::<Result<Vec<u8>>>()?;
        let encodings = self
            .encodings
            .iter()
            .map(|label| encoding_for_label(label).context("invalid encoding in config"))
            .collect::<Result<Vec<_>>>()?;
        Ok(LoadOptions {
            separators,
            encodings,
        })
    }
}

/// A separator must be a single ASCII character.
pub fn parse_separator(s: &str) -> Result<u8> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => bail!("separator must be a single ASCII character, got {s:?}"),
    }
}
