use chrono::Utc;
use clap::Args;
use changelog_core::{ChangeRecord, CommitInfo};
use std::path::PathBuf;

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file with an array of commits (sha, message, author, date, url)
    #[arg(long)]
    pub commits: PathBuf,
    /// Write records here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: ImportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(&args.commits)?;
    let commits: Vec<CommitInfo> = serde_json::from_str(&content)?;
    let imported_at = Utc::now();

    let records: Vec<ChangeRecord> = commits
        .into_iter()
        .map(|c| c.into_change_record(imported_at))
        .collect();
    tracing::debug!(count = records.len(), "classified commits");

    let json = serde_json::to_string_pretty(&records)?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, json)?;
            eprintln!("Imported {} records to {}", records.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
