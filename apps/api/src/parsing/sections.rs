#![allow(dead_code)]

//! Section classification and segmentation of resume lines.
//!
//! The classifier is a pure function over an ordered rule list. The segmenter is a
//! small state machine advanced one line at a time; each step consumes the state
//! and returns the next one.

use serde::{Deserialize, Serialize};

use crate::models::resume::RawDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Education,
    WorkExperience,
    ProjectsCertifications,
    Skills,
    Other,
}

/// Keyword rules, tested in order; the first rule with a matching keyword wins.
const DEFAULT_RULES: &[(SectionLabel, &[&str])] = &[
    (
        SectionLabel::Education,
        &[
            "education",
            "bachelor",
            "master",
            "phd",
            "university",
            "college",
            "school",
        ],
    ),
    (
        SectionLabel::WorkExperience,
        &[
            "experience",
            "work experience",
            "employment",
            "professional experience",
            "career",
        ],
    ),
    (
        SectionLabel::ProjectsCertifications,
        &["project", "certification", "training", "course"],
    ),
    (
        SectionLabel::Skills,
        &["skill", "technical skills", "skills"],
    ),
];

/// Ordered (label, keywords) rules. Keywords are stored lowercase.
#[derive(Debug, Clone)]
pub struct SectionClassifier {
    rules: Vec<(SectionLabel, Vec<String>)>,
}

impl Default for SectionClassifier {
    fn default() -> Self {
        Self::new(
            DEFAULT_RULES
                .iter()
                .map(|(label, kws)| (*label, kws.iter().map(|k| k.to_string()).collect())),
        )
    }
}

impl SectionClassifier {
    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = (SectionLabel, Vec<String>)>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(|(label, kws)| (label, kws.iter().map(|k| k.to_lowercase()).collect()))
                .collect(),
        }
    }

    /// Case-insensitive substring match; `Other` when no rule fires.
    pub fn classify(&self, line: &str) -> SectionLabel {
        let lower = line.to_lowercase();
        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|(label, _)| *label)
            .unwrap_or(SectionLabel::Other)
    }
}

/// Non-blank lines grouped per section, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionBuffers {
    pub education: Vec<String>,
    pub work_experience: Vec<String>,
    pub projects_certifications: Vec<String>,
    pub skills: Vec<String>,
    /// Non-blank lines seen before the first recognized header.
    pub discarded: usize,
}

impl SectionBuffers {
    fn absorb(&mut self, label: SectionLabel, lines: Vec<String>) {
        let kept = lines.into_iter().filter(|l| !l.trim().is_empty());
        match label {
            SectionLabel::Education => self.education.extend(kept),
            SectionLabel::WorkExperience => self.work_experience.extend(kept),
            SectionLabel::ProjectsCertifications => self.projects_certifications.extend(kept),
            SectionLabel::Skills => self.skills.extend(kept),
            SectionLabel::Other => self.discarded += kept.count(),
        }
    }
}

/// Segmenter state: the section being filled and the lines not yet flushed.
#[derive(Debug, Clone)]
pub struct Segmenter {
    current: SectionLabel,
    buffer: Vec<String>,
    sections: SectionBuffers,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            current: SectionLabel::Other,
            buffer: Vec::new(),
            sections: SectionBuffers::default(),
        }
    }
}

impl Segmenter {
    pub fn current(&self) -> SectionLabel {
        self.current
    }

    pub fn pending(&self) -> &[String] {
        &self.buffer
    }

    /// Advances by one line already labelled by the classifier.
    pub fn step(mut self, line: &str, label: SectionLabel) -> Self {
        let trimmed = line.trim().to_string();
        if label == SectionLabel::Other || label == self.current {
            self.buffer.push(trimmed);
            return self;
        }
        let flushed = std::mem::replace(&mut self.buffer, vec![trimmed]);
        self.sections.absorb(self.current, flushed);
        self.current = label;
        self
    }

    pub fn finish(mut self) -> SectionBuffers {
        let flushed = std::mem::take(&mut self.buffer);
        self.sections.absorb(self.current, flushed);
        self.sections
    }
}

pub fn segment(doc: &RawDocument, classifier: &SectionClassifier) -> SectionBuffers {
    doc.lines()
        .iter()
        .fold(Segmenter::default(), |state, line| {
            let label = classifier.classify(line);
            state.step(line, label)
        })
        .finish()
}
