//! Contact fields — name, email and phone pulled from raw resume text by pattern.
//!
//! Every field is best-effort: a miss is `None`, never an error.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::resume::RawDocument;

/// Contact details found in a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("email pattern compiles"))
}

/// Loose on purpose: also catches dates, zip codes and other numeric runs.
fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| {
        Regex::new(r"(\+?\d{1,3}[-.\s]?)?(\(?\d{2,4}\)?[-.\s]?)?[\d\s.-]{6,}")
            .expect("phone pattern compiles")
    })
}

pub fn extract_contact_fields(doc: &RawDocument) -> ContactFields {
    let text = doc.full_text();
    ContactFields {
        name: extract_name(doc.lines()),
        email: extract_email(&text),
        phone: extract_phone(&text),
    }
}

/// First trimmed line made only of ASCII letters and whitespace, longer than two chars.
pub fn extract_name(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .find(|line| {
            !line.is_empty()
                && line
                    .chars()
                    .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
                && line.chars().count() > 2
        })
        .map(String::from)
}

pub fn extract_email(text: &str) -> Option<String> {
    email_pattern().find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    phone_pattern()
        .find(text)
        .map(|m| m.as_str().trim().to_string())
}
