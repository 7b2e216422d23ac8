use anyhow::Context;
use regex::Regex;

use crate::{
    config::ParserConfig,
    fields::QUOTE_CHARS,
    records::{Ingredient, Step, StepImage},
};

/// Description and image URLs of a single step fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepContent {
    pub description: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecomposedSteps {
    pub steps: Vec<Step>,
    pub images: Vec<StepImage>,
}

/// Splits the ingredient and step columns of a recipe row into records.
pub struct Decomposer {
    ingredient_prefix: Regex,
    step_prefix: Regex,
    image_marker: Regex,
    marker_open: String,
    step_delimiter: String,
}

impl Decomposer {
    pub fn new(config: &ParserConfig) -> anyhow::Result<Self> {
        // Bullets and ordinals: `- 2 eggs`, `1-2 eggs`, but not `300g sugar`.
        let ingredient_prefix = Regex::new(r"^[\s-]*(?:\d[\d-]*(?:\s+|$)[\s-]*)*")
            .context("failed to compile ingredient prefix pattern")?;
        let step_prefix = Regex::new(r#"^['"`]*\d+[.)]?\s*"#)
            .context("failed to compile step prefix pattern")?;
        let image_marker = Regex::new(&format!(
            r"\s*\[{}:\s*([^\]]*)\]",
            regex::escape(&config.image_marker)
        ))
        .with_context(|| {
            format!(
                "failed to compile image marker pattern for `{}`",
                config.image_marker
            )
        })?;

        Ok(Self {
            ingredient_prefix,
            step_prefix,
            image_marker,
            marker_open: format!("[{}:", config.image_marker),
            step_delimiter: config.step_delimiter.clone(),
        })
    }

    /// Ingredient names in order of appearance, bullet and ordinal prefixes removed.
    pub fn ingredient_names<'t>(&self, text: &'t str) -> Vec<&'t str> {
        text.split([';', '\n'])
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| {
                let prefix_end = self
                    .ingredient_prefix
                    .find(fragment)
                    .map(|prefix| prefix.end())
                    .unwrap_or(0);
                fragment[prefix_end..].trim()
            })
            .filter(|name| !name.is_empty())
            .collect()
    }

    pub fn ingredients(&self, recipe_id: &str, text: &str) -> Vec<Ingredient> {
        self.ingredient_names(text)
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Ingredient {
                id: format!("ingredient-{}-{}", recipe_id, idx + 1),
                recipe_id: recipe_id.to_owned(),
                name: name.to_owned(),
            })
            .collect()
    }

    /// Drops a `[...]` list wrapper around the whole steps column, together
    /// with the quotes right inside it. A column that opens with an image
    /// marker, or whose final `]` closes one, is left alone.
    pub fn unwrap_step_list<'t>(&self, text: &'t str) -> &'t str {
        let text = text.trim();
        if text.starts_with('[')
            && text.ends_with(']')
            && !text.starts_with(&self.marker_open)
            && !self.ends_with_image_marker(text)
        {
            text[1..text.len() - 1]
                .trim_start_matches(['\'', '"'])
                .trim_end_matches(['\'', '"'])
        } else {
            text
        }
    }

    /// Whether the trailing `]` of `text` belongs to the last image marker.
    fn ends_with_image_marker(&self, text: &str) -> bool {
        text.rfind(&self.marker_open)
            .is_some_and(|open| !text[open..text.len() - 1].contains(']'))
    }

    pub fn step_content(&self, fragment: &str) -> StepContent {
        let prefix_end = self
            .step_prefix
            .find(fragment)
            .map(|prefix| prefix.end())
            .unwrap_or(0);
        let text = fragment[prefix_end..].trim();

        let images = self
            .image_marker
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .flat_map(|urls| urls.as_str().split(','))
            .map(str::trim)
            .filter(|url| url.starts_with("http"))
            .map(str::to_owned)
            .collect();

        let description = self
            .image_marker
            .replace_all(text, "")
            .trim()
            .trim_start_matches(QUOTE_CHARS)
            .trim_end_matches(QUOTE_CHARS)
            .trim()
            .to_owned();

        StepContent {
            description,
            images,
        }
    }

    pub fn steps(&self, recipe_id: &str, text: &str) -> DecomposedSteps {
        let mut decomposed = DecomposedSteps::default();
        let fragments = self
            .unwrap_step_list(text)
            .split(self.step_delimiter.as_str())
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty());

        for (idx, fragment) in fragments.enumerate() {
            let step_number = idx + 1;
            let content = self.step_content(fragment);
            if content.description.is_empty() {
                log::debug!(
                    "Dropping step {} of {}: no description left after cleaning",
                    step_number,
                    recipe_id
                );
                continue;
            }

            let step_id = format!("step-{}-{}", recipe_id, step_number);
            decomposed
                .images
                .extend(content.images.into_iter().enumerate().map(|(img_idx, url)| {
                    StepImage {
                        id: format!("stepimg-{}-{}", step_id, img_idx + 1),
                        step_id: step_id.clone(),
                        url,
                        order: img_idx + 1,
                    }
                }));
            decomposed.steps.push(Step {
                id: step_id,
                recipe_id: recipe_id.to_owned(),
                step_number,
                description: content.description,
            });
        }

        decomposed
    }
}
