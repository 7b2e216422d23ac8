use std::path::Path;

use anyhow::{Context, anyhow};

use crate::{
    config::ParserConfig,
    decompose::Decomposer,
    fields::{clean_string, parse_calories, split_fields},
    records::{ParsedRecipes, Recipe},
    scanner::{RawStatement, StatementExtractor},
};

// Positional columns of a recipe row.
const TITLE: usize = 0;
const IMAGE_URL: usize = 1;
const INGREDIENTS: usize = 2;
const STEPS: usize = 3;
const INGREDIENT_LABELS: usize = 4;
const COOKING_METHOD: usize = 5;
const CALORIES: usize = 6;

/// One parsing session.
///
/// Records accumulate across calls to [`RecipeSqlParser::parse_sql`]; recipe
/// ids keep counting from the statements seen by earlier calls, so ids stay
/// unique within a session.
pub struct RecipeSqlParser {
    config: ParserConfig,
    extractor: StatementExtractor,
    decomposer: Decomposer,
    statements_seen: usize,
    parsed: ParsedRecipes,
}

impl RecipeSqlParser {
    pub fn new(config: ParserConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            extractor: StatementExtractor::new(&config.table)?,
            decomposer: Decomposer::new(&config)?,
            config,
            statements_seen: 0,
            parsed: ParsedRecipes::default(),
        })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parsed(&self) -> &ParsedRecipes {
        &self.parsed
    }

    pub fn finish(self) -> ParsedRecipes {
        self.parsed
    }

    pub fn parse_sql(&mut self, sql: &str) -> &ParsedRecipes {
        log::debug!("Parsing {}", sql.chars().take(50).collect::<String>());

        let statements = self.extractor.extract(sql);
        let offset = self.statements_seen;
        self.statements_seen += statements.len();

        for statement in &statements {
            let ordinal = offset + statement.ordinal;
            if let Err(err) = self.parse_statement(ordinal, statement) {
                log::error!("Error parsing statement {}: {}", ordinal, err);
            }
        }

        &self.parsed
    }

    /// Parses one values list into a recipe and its children.
    ///
    /// Nothing is recorded unless the whole row decomposes.
    pub fn parse_statement(&mut self, ordinal: usize, statement: &RawStatement) -> anyhow::Result<()> {
        let values = split_fields(statement.text);
        if values.len() < self.config.min_fields {
            return Err(anyhow!(
                "Expected at least {} fields, found {}",
                self.config.min_fields,
                values.len()
            ));
        }

        let recipe_id = format!("recipe-{}", ordinal + 1);
        let recipe = Recipe {
            id: recipe_id.clone(),
            title: clean_string(values[TITLE]),
            image_url: clean_string(values[IMAGE_URL]),
            ingredient_labels_raw: clean_string(values[INGREDIENT_LABELS]),
            cooking_method_raw: clean_string(values[COOKING_METHOD]),
            calories: parse_calories(values[CALORIES]),
        };
        if recipe.title.is_empty() {
            log::warn!("Recipe {} has an empty title", recipe_id);
        }

        let ingredients = self
            .decomposer
            .ingredients(&recipe_id, &clean_string(values[INGREDIENTS]));
        let steps = self
            .decomposer
            .steps(&recipe_id, &clean_string(values[STEPS]));

        log::debug!(
            "Parsed {}: {} ingredients, {} steps, {} step images",
            recipe_id,
            ingredients.len(),
            steps.steps.len(),
            steps.images.len()
        );

        self.parsed.recipes.push(recipe);
        self.parsed.ingredients.extend(ingredients);
        self.parsed.steps.extend(steps.steps);
        self.parsed.step_images.extend(steps.images);
        Ok(())
    }
}

pub fn parse_sql(sql: &str) -> anyhow::Result<ParsedRecipes> {
    parse_sql_with(sql, ParserConfig::default())
}

pub fn parse_sql_with(sql: &str, config: ParserConfig) -> anyhow::Result<ParsedRecipes> {
    let mut parser = RecipeSqlParser::new(config)?;
    parser.parse_sql(sql);
    Ok(parser.finish())
}

pub fn parse_sql_file(path: impl AsRef<Path>) -> anyhow::Result<ParsedRecipes> {
    parse_sql_file_with(path, ParserConfig::default())
}

pub fn parse_sql_file_with(
    path: impl AsRef<Path>,
    config: ParserConfig,
) -> anyhow::Result<ParsedRecipes> {
    let path = path.as_ref();
    let sql = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sql file {}", path.display()))?;
    parse_sql_with(&sql, config)
}
