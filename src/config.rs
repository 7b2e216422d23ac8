use std::path::Path;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};

/// Number of positional columns a recipe row must carry: title, image URL,
/// raw ingredients, raw steps, ingredient labels, cooking method, calories.
pub const RECIPE_FIELD_COUNT: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Table whose `INSERT INTO` statements are extracted.
    pub table: String,
    /// Rows with fewer top-level fields are skipped.
    pub min_fields: usize,
    /// Keyword of the embedded step image marker, `[<marker>: url, ...]`.
    pub image_marker: String,
    /// Separator between steps in the raw steps column.
    pub step_delimiter: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            table: "receipts".to_owned(),
            min_fields: RECIPE_FIELD_COUNT,
            image_marker: "Gambar".to_owned(),
            step_delimiter: " | ".to_owned(),
        }
    }
}

impl ParserConfig {
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let config: ParserConfig =
            toml::from_str(toml_str).map_err(|err| anyhow!("Invalid parser config: {}", err))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&toml_str)
            .with_context(|| format!("Failed to load config file {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.table.trim().is_empty() {
            return Err(anyhow!("`table` must not be empty"));
        }
        if self.min_fields < RECIPE_FIELD_COUNT {
            return Err(anyhow!(
                "`min_fields` must be at least {}, got {}",
                RECIPE_FIELD_COUNT,
                self.min_fields
            ));
        }
        if self.image_marker.trim().is_empty() {
            return Err(anyhow!("`image_marker` must not be empty"));
        }
        if self.step_delimiter.is_empty() {
            return Err(anyhow!("`step_delimiter` must not be empty"));
        }
        Ok(())
    }
}
