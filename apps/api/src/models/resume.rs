use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Text extracted from a resume, kept as the ordered line stream the parser walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    lines: Vec<String>,
}

impl RawDocument {
    /// Splits extracted text on `\n`. Carriage returns stay attached to their line;
    /// every consumer trims before it looks at content.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(String::from).collect(),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The full document text, identical to the text the lines were split from.
    pub fn full_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }
}

/// Structured fields pulled out of a resume. Built once per parse, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Vocabulary matches plus derived keywords; a relevance vocabulary, not a taxonomy.
    pub skills: BTreeSet<String>,
    pub education: Vec<String>,
    pub work_experience: Vec<String>,
    pub projects_certifications: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_text_round_trips_source_text() {
        let text = "Jane Doe\r\njane@example.com\n\nSkills";
        let doc = RawDocument::from_text(text);
        assert_eq!(doc.lines().len(), 4);
        assert_eq!(doc.full_text(), text);
    }

    #[test]
    fn test_blank_document_detected() {
        assert!(RawDocument::from_text("  \n\t\n").is_blank());
        assert!(!RawDocument::from_lines(["", "x"]).is_blank());
    }

    #[test]
    fn test_parsed_resume_serializes_absent_fields_as_null() {
        let parsed = ParsedResume {
            name: Some("Jane Doe".to_string()),
            skills: ["SQL".to_string(), "Python".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["name"], "Jane Doe");
        assert!(json["email"].is_null());
        assert_eq!(json["skills"], serde_json::json!(["Python", "SQL"]));
    }
}
