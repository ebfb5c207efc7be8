use chrono::{DateTime, FixedOffset, Utc};
use clap::Args;
use changelog_core::{pipeline, render_report, Category, ChangelogQuery, Config};
use std::path::PathBuf;

use super::load_records;

#[derive(Args)]
pub struct TimelineArgs {
    /// JSON file with change records
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Case-insensitive search over title, description and author
    #[arg(long)]
    pub search: Option<String>,
    /// Only include one category (feature, bugfix, ...)
    #[arg(long, value_parser = super::parse_category)]
    pub category: Option<Category>,
    /// Reference time (RFC 3339); defaults to now in the configured offset
    #[arg(long)]
    pub now: Option<String>,
    /// Print JSON instead of a text report
    #[arg(long)]
    pub json: bool,
}

/// Build the query shared by the timeline and explain commands.
pub(crate) fn query(search: Option<String>, category: Option<Category>) -> ChangelogQuery {
    ChangelogQuery { search, category }
}

fn reference_time(
    now: Option<&str>,
    config: &Config,
) -> Result<DateTime<FixedOffset>, Box<dyn std::error::Error>> {
    match now {
        Some(text) => DateTime::parse_from_rfc3339(text)
            .map_err(|e| format!("invalid --now '{text}': {e}").into()),
        None => Ok(Utc::now().with_timezone(&config.utc_offset()?)),
    }
}

pub fn run(args: TimelineArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let records = load_records(args.file, &config)?;
    let now = reference_time(args.now.as_deref(), &config)?;

    let result = pipeline::run(&records, &query(args.search, args.category), &now);

    if args.json || config.display.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(&result, config.display.show_records));
    }
    Ok(())
}
