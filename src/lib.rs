//! # recipe-sql
//!
//! A library for turning SQL dumps of recipe rows into flat, JSON-serializable records.
//!
//! # Features
//!
//! - Extract every `INSERT INTO receipts ... VALUES (...);` block, honoring quoted text and nested parentheses.
//! - Split values lists on top-level commas only (not inside strings, `[...]` or `(...)`).
//! - Decompose ingredient lists and `" | "`-separated steps into ordered records.
//! - Pull `[Gambar: url, ...]` image markers out of step text into step-image records.
//! - Keep going past malformed rows: each bad statement is logged and skipped.
//!
//! # Example
//!
//! ```rust,no_run
//! use recipe_sql::{config::ParserConfig, export::ParseSummary, parser::RecipeSqlParser};
//!
//! fn main() -> anyhow::Result<()> {
//!     env_logger::init();
//!
//!     let sql = r#"
//!         INSERT INTO receipts VALUES (
//!             'Nasi Goreng',
//!             'https://img.example/nasi.jpg',
//!             '2 piring nasi; 1 butir telur',
//!             '1 Panaskan minyak [Gambar: https://img.example/s1.jpg] | 2 Masukkan nasi',
//!             'nasi, telur',
//!             'goreng',
//!             450
//!         );
//!     "#;
//!     let mut parser = RecipeSqlParser::new(ParserConfig::default())?;
//!     parser.parse_sql(sql);
//!     let parsed = parser.finish();
//!
//!     println!("{}", ParseSummary::from(&parsed));
//!     println!("{}", serde_json::to_string_pretty(&parsed)?);
//!     Ok(())
//! }
//! ```
pub mod config;
pub mod decompose;
pub mod export;
pub mod fields;
pub mod parser;
pub mod records;
pub mod scanner;
pub mod test_utils;
