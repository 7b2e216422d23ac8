use std::fmt::Display;

use serde::Deserialize;

use crate::export::ParseSummary;

pub const PARSING_TESTS_FILE: &str = "tests/parsing_tests.toml";

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCounts {
    pub receipts: usize,
    pub ingredients: usize,
    pub steps: usize,
    pub step_images: usize,
}

impl PartialEq<ParseSummary> for TestCounts {
    fn eq(&self, other: &ParseSummary) -> bool {
        self.receipts == other.receipts
            && self.ingredients == other.ingredients
            && self.steps == other.steps
            && self.step_images == other.step_images
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct TestParsing {
    pub name: String,
    pub sql: String,
    pub expected: TestCounts,
    #[serde(default)]
    pub titles: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TestParsingData {
    pub tests: Vec<TestParsing>,
}

impl Display for TestParsing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.sql)
    }
}
