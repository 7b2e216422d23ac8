use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::records::{Collection, ParsedRecipes};

/// Records per batch file, matching the insert batch size used downstream.
pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSummary {
    pub receipts: usize,
    pub ingredients: usize,
    pub steps: usize,
    pub step_images: usize,
}

impl From<&ParsedRecipes> for ParseSummary {
    fn from(parsed: &ParsedRecipes) -> Self {
        Self {
            receipts: parsed.len(Collection::Receipts),
            ingredients: parsed.len(Collection::Ingredients),
            steps: parsed.len(Collection::Steps),
            step_images: parsed.len(Collection::StepImages),
        }
    }
}

impl Display for ParseSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} receipts, {} ingredients, {} steps, {} step images",
            self.receipts, self.ingredients, self.steps, self.step_images
        )
    }
}

pub fn to_json_string<T: Serialize + ?Sized>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Writes the parsed records to `path` as pretty-printed JSON.
pub fn save_to_json(parsed: &ParsedRecipes, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_json_string(parsed, true)?)
        .with_context(|| format!("Failed to write JSON output {}", path.display()))?;
    log::info!("Data saved to {}", path.display());
    Ok(())
}

/// Writes every collection to `dir` as `<collection>-<nnnn>.json` files of at
/// most `batch_size` records each. Empty collections produce no files.
pub fn write_batches(
    parsed: &ParsedRecipes,
    dir: impl AsRef<Path>,
    batch_size: usize,
) -> anyhow::Result<Vec<PathBuf>> {
    if batch_size == 0 {
        return Err(anyhow!("Batch size must be greater than zero"));
    }
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create batch directory {}", dir.display()))?;

    let mut written = vec![];
    for collection in Collection::iter() {
        match collection {
            Collection::Receipts => {
                write_chunks(dir, collection, &parsed.recipes, batch_size, &mut written)?
            }
            Collection::Ingredients => {
                write_chunks(dir, collection, &parsed.ingredients, batch_size, &mut written)?
            }
            Collection::Steps => {
                write_chunks(dir, collection, &parsed.steps, batch_size, &mut written)?
            }
            Collection::StepImages => {
                write_chunks(dir, collection, &parsed.step_images, batch_size, &mut written)?
            }
        }
    }
    Ok(written)
}

fn write_chunks<T: Serialize>(
    dir: &Path,
    collection: Collection,
    records: &[T],
    batch_size: usize,
    written: &mut Vec<PathBuf>,
) -> anyhow::Result<()> {
    for (idx, chunk) in records.chunks(batch_size).enumerate() {
        let path = dir.join(format!("{}-{:04}.json", collection, idx + 1));
        std::fs::write(&path, to_json_string(chunk, false)?)
            .with_context(|| format!("Failed to write batch file {}", path.display()))?;
        log::debug!(
            "Wrote {} {} records to {}",
            chunk.len(),
            collection,
            path.display()
        );
        written.push(path);
    }
    Ok(())
}
