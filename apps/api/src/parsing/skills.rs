//! Skill vocabulary matching and keyword derivation from section buffers.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::sections::SectionBuffers;

/// A skills vocabulary compiled to whole-word, case-insensitive patterns.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    skills: Vec<(String, Regex)>,
}

impl SkillMatcher {
    pub fn new<I, S>(vocabulary: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let skills = vocabulary
            .into_iter()
            .map(|skill| {
                let skill = skill.into();
                let pattern = format!(r"\b{}\b", regex::escape(&skill.to_lowercase()));
                Regex::new(&pattern).map(|re| (skill, re))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { skills })
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|(s, _)| s.as_str())
    }

    /// Vocabulary skills occurring as whole words in `text`, in vocabulary order.
    pub fn find_in(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.skills
            .iter()
            .filter(|(_, re)| re.is_match(&lower))
            .map(|(skill, _)| skill.clone())
            .collect()
    }

    /// Full-text pass first, then each skills-section line for anything still missing.
    pub fn match_skills(&self, full_text: &str, skills_section: &[String]) -> Vec<String> {
        let mut found = self.find_in(full_text);
        for line in skills_section {
            for skill in self.find_in(line) {
                if !found.contains(&skill) {
                    found.push(skill);
                }
            }
        }
        found
    }
}

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\b\w{3,}\b").expect("word pattern compiles"))
}

fn non_alpha_pattern() -> &'static Regex {
    static NON_ALPHA: OnceLock<Regex> = OnceLock::new();
    NON_ALPHA.get_or_init(|| Regex::new(r"[^a-zA-Z\s]").expect("non-alpha pattern compiles"))
}

/// Lowercase word tokens of three or more word characters.
pub fn extract_keywords(lines: &[String]) -> BTreeSet<String> {
    lines
        .iter()
        .flat_map(|line| {
            let lower = line.to_lowercase();
            word_pattern()
                .find_iter(&lower)
                .map(|m| m.as_str().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Letters-only tokens longer than two characters; digits and punctuation split words.
pub fn extract_alpha_terms(lines: &[String]) -> BTreeSet<String> {
    lines
        .iter()
        .flat_map(|line| {
            non_alpha_pattern()
                .replace_all(line, " ")
                .to_lowercase()
                .split_whitespace()
                .filter(|w| w.chars().count() > 2)
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Everything the extractor derived, kept apart until merged into one skill set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillExtraction {
    pub matched_skills: Vec<String>,
    pub work_keywords: BTreeSet<String>,
    pub project_keywords: BTreeSet<String>,
    pub education_terms: BTreeSet<String>,
    pub work_terms: BTreeSet<String>,
}

impl SkillExtraction {
    pub fn combined(&self) -> BTreeSet<String> {
        self.matched_skills
            .iter()
            .cloned()
            .chain(self.work_keywords.iter().cloned())
            .chain(self.project_keywords.iter().cloned())
            .chain(self.education_terms.iter().cloned())
            .chain(self.work_terms.iter().cloned())
            .collect()
    }
}

pub fn extract_skills(
    matcher: &SkillMatcher,
    full_text: &str,
    sections: &SectionBuffers,
) -> SkillExtraction {
    SkillExtraction {
        matched_skills: matcher.match_skills(full_text, &sections.skills),
        work_keywords: extract_keywords(&sections.work_experience),
        project_keywords: extract_keywords(&sections.projects_certifications),
        education_terms: extract_alpha_terms(&sections.education),
        work_terms: extract_alpha_terms(&sections.work_experience),
    }
}
