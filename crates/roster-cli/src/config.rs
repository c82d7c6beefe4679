//! Run configuration: the form and output layouts plus output naming.
//!
//! Loaded from an optional JSON file; keys left out fall back to the
//! expert registration defaults.

use std::path::Path;

use anyhow::{Context, Result, bail};
use roster_model::{FormConfig, OutputLayout};
use roster_output::DEFAULT_SHEET_NAME;
use serde::{Deserialize, Serialize};

/// File name of the consolidated workbook inside the source folder.
pub const DEFAULT_OUTPUT_FILE: &str = "output.xlsx";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub form: FormConfig,
    pub output: OutputLayout,
    pub sheet_name: String,
    /// Used when no explicit output path is given.
    pub output_file: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            form: FormConfig::expert_form(),
            output: OutputLayout::expert_roster(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

impl RosterConfig {
    /// Reads the configuration at `path`, or the defaults when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("load config {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.form.validate().context("invalid form layout")?;
        self.output.validate().context("invalid output layout")?;
        if self.sheet_name.trim().is_empty() {
            bail!("sheet name must not be empty");
        }
        if self.output_file.trim().is_empty() {
            bail!("output file name must not be empty");
        }
        Ok(())
    }
}
