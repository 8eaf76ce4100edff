//! CSV job dataset loading and column normalization.

use std::io::Read;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::models::job::JobPosting;

fn non_alphanumeric_pattern() -> &'static Regex {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    NON_ALNUM.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("pattern compiles"))
}

fn whitespace_pattern() -> &'static Regex {
    static WS: OnceLock<Regex> = OnceLock::new();
    WS.get_or_init(|| Regex::new(r"\s+").expect("pattern compiles"))
}

/// Non-alphanumerics become spaces, whitespace runs collapse, then trim and lowercase.
pub fn clean_description(text: &str) -> String {
    let stripped = non_alphanumeric_pattern().replace_all(text, " ");
    whitespace_pattern()
        .replace_all(&stripped, " ")
        .trim()
        .to_lowercase()
}

/// Trims and lowercases a header, then maps dataset aliases to canonical names.
pub fn normalize_header(header: &str) -> String {
    let lower = header.trim().to_lowercase();
    match lower.as_str() {
        "title" => "job_title".to_string(),
        "skills_desc" => "cleaned_description".to_string(),
        "application_url" => "application_link".to_string(),
        _ => lower,
    }
}

struct Columns {
    title: Option<usize>,
    cleaned: Option<usize>,
    description: Option<usize>,
    link: Option<usize>,
}

impl Columns {
    fn locate(headers: &[String]) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            title: find("job_title"),
            cleaned: find("cleaned_description"),
            description: find("description"),
            link: find("application_link"),
        }
    }
}

fn cell(record: &csv::StringRecord, column: Option<usize>) -> &str {
    column.and_then(|i| record.get(i)).unwrap_or("")
}

/// Reads postings in file order. Falls back to `description` when the
/// `cleaned_description` column is missing or entirely empty.
pub fn read_postings<R: Read>(reader: R) -> Result<Vec<JobPosting>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("Failed to read dataset header row")?
        .iter()
        .map(normalize_header)
        .collect();
    let columns = Columns::locate(&headers);

    let records = csv_reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to read dataset rows")?;

    let cleaned_usable = columns.cleaned.is_some()
        && records
            .iter()
            .any(|r| !cell(r, columns.cleaned).trim().is_empty());
    let description_column = if cleaned_usable {
        columns.cleaned
    } else {
        columns.description
    };

    Ok(records
        .iter()
        .map(|record| {
            let link = cell(record, columns.link).trim();
            JobPosting {
                job_title: cell(record, columns.title).to_string(),
                cleaned_description: clean_description(cell(record, description_column)),
                application_link: (!link.is_empty()).then(|| link.to_string()),
            }
        })
        .collect())
}
