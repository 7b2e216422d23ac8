use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub ingredient_labels_raw: String,
    pub cooking_method_raw: String,
    pub calories: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub recipe_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub recipe_id: String,
    pub step_number: usize,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepImage {
    pub id: String,
    pub step_id: String,
    pub url: String,
    pub order: usize,
}

/// Output of one parser session, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRecipes {
    #[serde(rename = "receipts")]
    pub recipes: Vec<Recipe>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub step_images: Vec<StepImage>,
}

impl ParsedRecipes {
    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::Receipts => self.recipes.len(),
            Collection::Ingredients => self.ingredients.len(),
            Collection::Steps => self.steps.len(),
            Collection::StepImages => self.step_images.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
            && self.ingredients.is_empty()
            && self.steps.is_empty()
            && self.step_images.is_empty()
    }

    pub fn ingredients_of<'a>(&'a self, recipe_id: &'a str) -> impl Iterator<Item = &'a Ingredient> {
        self.ingredients
            .iter()
            .filter(move |ingredient| ingredient.recipe_id == recipe_id)
    }

    pub fn steps_of<'a>(&'a self, recipe_id: &'a str) -> impl Iterator<Item = &'a Step> {
        self.steps
            .iter()
            .filter(move |step| step.recipe_id == recipe_id)
    }

    pub fn images_of<'a>(&'a self, step_id: &'a str) -> impl Iterator<Item = &'a StepImage> {
        self.step_images
            .iter()
            .filter(move |image| image.step_id == step_id)
    }
}

/// The four record collections, named as they appear in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Collection {
    #[strum(serialize = "receipts")]
    Receipts,
    #[strum(serialize = "ingredients")]
    Ingredients,
    #[strum(serialize = "steps")]
    Steps,
    #[strum(serialize = "stepImages")]
    StepImages,
}
