use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::anyhow;
use clap::Parser as ClapParser;
use clap::Subcommand;
use indexmap::IndexMap;
use recipe_sql::config::ParserConfig;
use recipe_sql::export::{
    DEFAULT_BATCH_SIZE, ParseSummary, save_to_json, to_json_string, write_batches,
};
use recipe_sql::parser::parse_sql_file_with;
use recipe_sql::records::ParsedRecipes;

#[derive(clap::Parser)]
#[command(name = "recipe-sql")]
#[command(about = "Recipe SQL dump parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one or more SQL files into recipe records.
    Parse(ParseCommand),
    /// Parse a SQL file and print a few sample records.
    Sample(SampleCommand),
}

#[derive(clap::Args)]
struct ParseCommand {
    /// Path to a TOML parser config.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Path to the SQL file or directory containing SQL files.
    #[arg(value_name = "SQL_[FILE|DIR]")]
    sql: PathBuf,
    /// Write the JSON output to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
    /// Also write each collection as chunked JSON files into this directory.
    #[arg(long)]
    batch_dir: Option<PathBuf>,
    /// Records per chunked JSON file.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,
}

#[derive(clap::Args)]
struct SampleCommand {
    /// Path to a TOML parser config.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Path to the SQL file.
    #[arg(value_name = "SQL_FILE")]
    sql: PathBuf,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ParserConfig> {
    match path {
        Some(path) => ParserConfig::from_toml_file(path),
        None => Ok(ParserConfig::default()),
    }
}

fn parse_file(config: &ParserConfig, sql_file_path: &Path) -> anyhow::Result<ParsedRecipes> {
    let parsed = parse_sql_file_with(sql_file_path, config.clone())?;
    eprintln!(
        "{}: {}",
        sql_file_path.display(),
        ParseSummary::from(&parsed)
    );
    Ok(parsed)
}

fn write_output(parse_command: &ParseCommand, json: String) -> anyhow::Result<()> {
    match &parse_command.output {
        Some(output) => std::fs::write(output, json)
            .map_err(|err| anyhow!("Failed to write output {}: {}", output.display(), err)),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

fn run_parse(parse_command: &ParseCommand) -> anyhow::Result<()> {
    let config = load_config(parse_command.config.as_ref())?;
    let sql_file_or_dir = &parse_command.sql;

    if sql_file_or_dir.is_dir() {
        let mut file_records: IndexMap<String, ParsedRecipes> = IndexMap::new();
        let mut sql_in_dir: Vec<_> = std::fs::read_dir(sql_file_or_dir)?
            .filter_map(|res| res.ok())
            .map(|entry| entry.path())
            .filter(|file| file.extension().is_some_and(|ext| ext == "sql"))
            .collect();
        sql_in_dir.sort();

        for sql_file in sql_in_dir {
            let parsed = parse_file(&config, &sql_file)?;
            if let Some(batch_dir) = &parse_command.batch_dir {
                let stem = sql_file
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "sql".to_owned());
                write_batches(&parsed, batch_dir.join(stem), parse_command.batch_size)?;
            }
            file_records.insert(
                std::path::absolute(&sql_file)?.display().to_string(),
                parsed,
            );
        }

        write_output(
            parse_command,
            to_json_string(&file_records, parse_command.pretty)?,
        )
    } else {
        let parsed = parse_file(&config, sql_file_or_dir)?;
        if let Some(batch_dir) = &parse_command.batch_dir {
            let written = write_batches(&parsed, batch_dir, parse_command.batch_size)?;
            eprintln!("Wrote {} batch files to {}", written.len(), batch_dir.display());
        }
        match &parse_command.output {
            Some(output) if parse_command.pretty => save_to_json(&parsed, output),
            _ => write_output(parse_command, to_json_string(&parsed, parse_command.pretty)?),
        }
    }
}

fn run_sample(sample_command: &SampleCommand) -> anyhow::Result<()> {
    let config = load_config(sample_command.config.as_ref())?;
    let parsed = parse_file(&config, &sample_command.sql)?;

    println!("Sample receipt:");
    println!("{}", to_json_string(&parsed.recipes.first(), true)?);
    println!("\nSample ingredients:");
    println!(
        "{}",
        to_json_string(&parsed.ingredients.iter().take(3).collect::<Vec<_>>(), true)?
    );
    println!("\nSample steps:");
    println!(
        "{}",
        to_json_string(&parsed.steps.iter().take(2).collect::<Vec<_>>(), true)?
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let now = Instant::now();

    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Parse(parse_command) => run_parse(parse_command)?,
        Commands::Sample(sample_command) => run_sample(sample_command)?,
    }

    let elapsed = now.elapsed();
    log::info!("Elapsed: {:.2?}", elapsed);

    Ok(())
}
