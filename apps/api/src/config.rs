use anyhow::{Context, Result};

use crate::matching::recommender::{
    DEFAULT_BOOST, DEFAULT_PRIORITY_ROLES, DEFAULT_TOP_N,
};
use crate::matching::stop_words::StopWords;

const DEFAULT_SKILLS: &[&str] = &[
    "Python",
    "Java",
    "Machine Learning",
    "NLP",
    "Data Analysis",
    "SQL",
    "Deep Learning",
];

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Stop-word choice for the vector index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopWordsSetting {
    English,
    Disabled,
    Custom(Vec<String>),
}

impl StopWordsSetting {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "english" | "" => StopWordsSetting::English,
            "none" => StopWordsSetting::Disabled,
            _ => StopWordsSetting::Custom(split_list(raw)),
        }
    }

    pub fn build(&self) -> StopWords {
        match self {
            StopWordsSetting::English => StopWords::english(),
            StopWordsSetting::Disabled => StopWords::none(),
            StopWordsSetting::Custom(words) => StopWords::custom(words),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub jobs_dataset_path: String,
    pub skills_vocabulary: Vec<String>,
    pub priority_roles: Vec<String>,
    pub recommendation_boost: f64,
    pub recommendation_top_n: usize,
    pub stop_words: StopWordsSetting,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let list_or = |key: &str, default: &[&str]| {
            lookup(key)
                .map(|v| split_list(&v))
                .unwrap_or_else(|| default.iter().map(|s| s.to_string()).collect())
        };

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            jobs_dataset_path: lookup("JOBS_DATASET_PATH")
                .unwrap_or_else(|| "reduced_postings.csv".to_string()),
            skills_vocabulary: list_or("SKILLS_VOCABULARY", DEFAULT_SKILLS),
            priority_roles: list_or("PRIORITY_ROLES", DEFAULT_PRIORITY_ROLES),
            recommendation_boost: parse_or(&lookup, "RECOMMENDATION_BOOST", DEFAULT_BOOST)
                .context("RECOMMENDATION_BOOST must be a number")?,
            recommendation_top_n: parse_or(&lookup, "RECOMMENDATION_TOP_N", DEFAULT_TOP_N)
                .context("RECOMMENDATION_TOP_N must be a non-negative integer")?,
            stop_words: lookup("STOP_WORDS")
                .map(|v| StopWordsSetting::parse(&v))
                .unwrap_or(StopWordsSetting::English),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)
                .context("MAX_UPLOAD_BYTES must be a non-negative integer")?,
        })
    }
}

/// Comma-separated list; entries trimmed, empty entries dropped.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        None => Ok(default),
    }
}
