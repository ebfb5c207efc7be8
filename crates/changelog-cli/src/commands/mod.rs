pub mod config;
pub mod explain;
pub mod import;
pub mod timeline;

use changelog_core::{Category, ChangeRecord, Config, JsonRecordFile, RecordSource};
use std::path::PathBuf;

/// Load records from `--file`, falling back to `records.path` in the config.
pub(crate) fn load_records(
    file: Option<PathBuf>,
    config: &Config,
) -> Result<Vec<ChangeRecord>, Box<dyn std::error::Error>> {
    let path = file
        .or_else(|| config.records.path.as_ref().map(PathBuf::from))
        .ok_or("no record file given (use --file or set records.path)")?;
    Ok(JsonRecordFile::new(path).fetch()?)
}

/// Parse a `--category` value, rejecting anything that is not a known tag.
///
/// `unknown` is accepted so records with unrecognized categories can still
/// be selected on purpose.
pub(crate) fn parse_category(value: &str) -> Result<Category, String> {
    let category = Category::KNOWN
        .into_iter()
        .chain([Category::Unknown])
        .find(|c| c.as_str().eq_ignore_ascii_case(value.trim()));
    category.ok_or_else(|| {
        let valid: Vec<&str> = Category::KNOWN.iter().map(Category::as_str).collect();
        format!("expected one of {}, or unknown", valid.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_category_accepts_known_tags() {
        assert_eq!(parse_category("Feature"), Ok(Category::Feature));
        assert_eq!(parse_category("unknown"), Ok(Category::Unknown));
    }

    #[test]
    fn parse_category_rejects_typos() {
        let err = parse_category("featur").unwrap_err();
        assert!(err.contains("feature, bugfix"));
    }
}
