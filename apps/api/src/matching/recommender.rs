//! Recommender — ranks the job catalog against a parsed resume.
//!
//! Score = cosine(query, job) + boost when the job title names a priority role.
//! Ranking is by boosted score descending; among equal scores the lower job index
//! ranks first.

use serde::{Deserialize, Serialize};

use crate::jobs::catalog::JobCatalog;
use crate::models::job::{JobPosting, Recommendation};
use crate::models::resume::ParsedResume;

pub const DEFAULT_BOOST: f64 = 0.2;
pub const DEFAULT_TOP_N: usize = 5;

pub const DEFAULT_PRIORITY_ROLES: &[&str] = &[
    "data scientist",
    "data analyst",
    "machine learning engineer",
    "ml engineer",
    "data engineer",
    "ai engineer",
    "developer",
    "engineer",
    "analyst",
    "manager",
    "consultant",
    "business analyst",
    "salesforce developer",
    "principal salesforce developer",
    "engineering manager",
    "software design quality",
];

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Stored lowercase; matched as substrings of the lowercased title.
    pub priority_roles: Vec<String>,
    /// Additive and unclamped, so boosted scores can pass 1.0.
    pub boost: f64,
    pub top_n: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_PRIORITY_ROLES.iter().map(|r| r.to_string()).collect(),
            DEFAULT_BOOST,
            DEFAULT_TOP_N,
        )
    }
}

impl RecommenderConfig {
    pub fn new(priority_roles: Vec<String>, boost: f64, top_n: usize) -> Self {
        Self {
            priority_roles: priority_roles
                .into_iter()
                .map(|r| r.trim().to_lowercase())
                .filter(|r| !r.is_empty())
                .collect(),
            boost,
            top_n,
        }
    }

    pub fn is_priority_title(&self, title: &str) -> bool {
        let lower = title.to_lowercase();
        self.priority_roles.iter().any(|r| lower.contains(r.as_str()))
    }

    pub fn boosted(&self, base: f64, title: &str) -> f64 {
        if self.is_priority_title(title) {
            base + self.boost
        } else {
            base
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline steps
// ────────────────────────────────────────────────────────────────────────────

/// Non-empty fields joined in the order skills, education, work experience,
/// projects; lowercased.
pub fn build_query(resume: &ParsedResume) -> String {
    let skills: Vec<&str> = resume.skills.iter().map(String::as_str).collect();
    [
        skills.join(" "),
        resume.education.join(" "),
        resume.work_experience.join(" "),
        resume.projects_certifications.join(" "),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

/// Boosted score per posting, aligned with `postings`.
pub fn boost_scores(config: &RecommenderConfig, postings: &[JobPosting], base: &[f64]) -> Vec<f64> {
    postings
        .iter()
        .zip(base)
        .map(|(job, score)| config.boosted(*score, &job.job_title))
        .collect()
}

/// Indices of the `n` best scores: score descending, then index ascending.
pub fn select_top(scores: &[f64], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
    order.truncate(n);
    order
}

pub fn recommend(
    resume: &ParsedResume,
    catalog: &JobCatalog,
    config: &RecommenderConfig,
    top_n: usize,
) -> Vec<Recommendation> {
    if catalog.is_empty() || top_n == 0 {
        return Vec::new();
    }

    let query = catalog.index().transform(&build_query(resume));
    let base = catalog.index().similarities(&query);
    let scores = boost_scores(config, catalog.postings(), &base);

    select_top(&scores, top_n)
        .into_iter()
        .map(|i| {
            let job = &catalog.postings()[i];
            Recommendation {
                job_title: job.job_title.clone(),
                application_link: job.usable_link().map(String::from),
                similarity_score: scores[i],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::stop_words::StopWords;

    fn catalog(jobs: Vec<JobPosting>) -> JobCatalog {
        JobCatalog::build(jobs, StopWords::english())
    }

    fn resume_with_skills(skills: &[&str]) -> ParsedResume {
        ParsedResume {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_query_field_order_and_lowercase() {
        let resume = ParsedResume {
            skills: ["SQL".to_string()].into_iter().collect(),
            education: vec!["MSc Statistics".to_string()],
            work_experience: vec![],
            projects_certifications: vec!["Kaggle Winner".to_string()],
            ..Default::default()
        };
        assert_eq!(build_query(&resume), "sql msc statistics kaggle winner");
        assert_eq!(build_query(&ParsedResume::default()), "");
    }

    #[test]
    fn test_boost_adds_constant_to_priority_titles() {
        let config = RecommenderConfig::default();
        let boosted = config.boosted(0.50, "Senior Data Scientist");
        assert!((boosted - 0.70).abs() < 1e-12);
        assert_eq!(config.boosted(0.50, "Barista"), 0.50);
    }

    #[test]
    fn test_boost_is_not_clamped() {
        let config = RecommenderConfig::default();
        assert!(config.boosted(1.0, "Software Engineer") > 1.0);
    }

    #[test]
    fn test_select_top_breaks_ties_by_lower_index() {
        let scores = [0.2, 0.5, 0.5, 0.1, 0.5];
        assert_eq!(select_top(&scores, 3), vec![1, 2, 4]);
        assert_eq!(select_top(&scores, 10), vec![1, 2, 4, 0, 3]);
        assert!(select_top(&scores, 0).is_empty());
    }

    #[test]
    fn test_top_n_larger_than_corpus_returns_all_ranked() {
        let cat = catalog(vec![
            JobPosting::new("Barista", "coffee brewing customer service"),
            JobPosting::new("Cook", "kitchen food preparation"),
            JobPosting::new("Clerk", "python sql reporting"),
        ]);
        let recs = recommend(
            &resume_with_skills(&["Python", "SQL"]),
            &cat,
            &RecommenderConfig::default(),
            5,
        );
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].job_title, "Clerk");
        assert!(recs
            .windows(2)
            .all(|w| w[0].similarity_score >= w[1].similarity_score));
    }

    #[test]
    fn test_priority_title_outranks_equal_similarity() {
        let cat = catalog(vec![
            JobPosting::new("Barista", "python sql"),
            JobPosting::new("Data Analyst", "python sql"),
        ]);
        let recs = recommend(
            &resume_with_skills(&["Python"]),
            &cat,
            &RecommenderConfig::default(),
            2,
        );
        assert_eq!(recs[0].job_title, "Data Analyst");
        assert!((recs[0].similarity_score - recs[1].similarity_score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_links_only_when_non_blank() {
        let cat = catalog(vec![
            JobPosting::new("Cook", "python").with_link("https://jobs.example.com/cook"),
            JobPosting::new("Clerk", "python").with_link("  "),
        ]);
        let recs = recommend(
            &resume_with_skills(&["Python"]),
            &cat,
            &RecommenderConfig::default(),
            2,
        );
        assert_eq!(
            recs[0].application_link.as_deref(),
            Some("https://jobs.example.com/cook")
        );
        assert_eq!(recs[1].application_link, None);
    }

    #[test]
    fn test_empty_corpus_and_zero_n_yield_nothing() {
        let config = RecommenderConfig::default();
        let resume = resume_with_skills(&["Python"]);
        assert!(recommend(&resume, &catalog(vec![]), &config, 5).is_empty());
        let cat = catalog(vec![JobPosting::new("Cook", "python")]);
        assert!(recommend(&resume, &cat, &config, 0).is_empty());
    }

    #[test]
    fn test_empty_query_scores_boost_only() {
        let cat = catalog(vec![
            JobPosting::new("Barista", "coffee"),
            JobPosting::new("Consultant", "strategy"),
        ]);
        let recs = recommend(
            &ParsedResume::default(),
            &cat,
            &RecommenderConfig::default(),
            5,
        );
        assert_eq!(recs[0].job_title, "Consultant");
        assert!((recs[0].similarity_score - 0.2).abs() < 1e-12);
        assert_eq!(recs[1].similarity_score, 0.0);
    }
}
