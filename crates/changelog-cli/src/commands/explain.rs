use clap::Args;
use changelog_core::{explain_in_context, Category, Config};
use std::path::PathBuf;

use super::load_records;
use super::timeline::query;

#[derive(Args)]
pub struct ExplainArgs {
    /// Record id
    #[arg(long)]
    pub id: String,
    /// JSON file with change records
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Search term of the run the record is explained in
    #[arg(long)]
    pub search: Option<String>,
    /// Category filter of the run the record is explained in
    #[arg(long, value_parser = super::parse_category)]
    pub category: Option<Category>,
}

pub fn run(args: ExplainArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let records = load_records(args.file, &config)?;

    let breakdown = explain_in_context(&records, &query(args.search, args.category), &args.id)
        .ok_or_else(|| format!("record not found in this view: {}", args.id))?;
    println!("{}", serde_json::to_string_pretty(&breakdown)?);
    Ok(())
}
