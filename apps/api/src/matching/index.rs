#![allow(dead_code)]

//! TF-IDF vector index over the job corpus.
//!
//! Fitted once per corpus. Row `i` always belongs to the posting at index `i`;
//! queries are projected with the fitted vocabulary and IDF weights, never refitted.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;

use crate::matching::stop_words::StopWords;

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern compiles"))
}

/// Lowercased tokens of two or more word characters, stop words removed.
pub fn tokenize<'a>(text: &str, stop_words: &'a StopWords) -> impl Iterator<Item = String> + 'a {
    let lower = text.to_lowercase();
    token_pattern()
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect::<Vec<_>>()
        .into_iter()
        .filter(move |t| !stop_words.contains(t))
}

/// Sparse vector with entries sorted by dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(counts: BTreeMap<usize, f64>) -> Self {
        Self {
            entries: counts.into_iter().collect(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    fn normalize(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
        self
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0);
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity; 0.0 when either side is the zero vector.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        self.dot(other) / denom
    }
}

/// Fitted term-weighting model plus one L2-normalized row per document.
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
    stop_words: StopWords,
}

impl VectorIndex {
    /// Vocabulary dimensions follow sorted term order; idf = ln((1 + n) / (1 + df)) + 1.
    pub fn fit<S: AsRef<str>>(documents: &[S], stop_words: StopWords) -> Self {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|d| tokenize(d.as_ref(), &stop_words).collect())
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term).or_default() += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (dim, (term, df)) in document_frequency.iter().enumerate() {
            vocabulary.insert(term.to_string(), dim);
            idf.push(((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0);
        }

        let mut index = Self {
            vocabulary,
            idf,
            rows: Vec::new(),
            stop_words,
        };
        index.rows = tokenized.iter().map(|t| index.weigh(t)).collect();
        index
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&dim) = self.vocabulary.get(token) {
                *counts.entry(dim).or_default() += 1.0;
            }
        }
        for (dim, weight) in counts.iter_mut() {
            *weight *= self.idf[*dim];
        }
        SparseVector::from_counts(counts).normalize()
    }

    /// Projects new text into the fitted space. Unknown terms are dropped.
    pub fn transform(&self, text: &str) -> SparseVector {
        let tokens: Vec<String> = tokenize(text, &self.stop_words).collect();
        self.weigh(&tokens)
    }

    /// One cosine score per row, aligned with the document order used to fit.
    pub fn similarities(&self, query: &SparseVector) -> Vec<f64> {
        self.rows.iter().map(|row| query.cosine(row)).collect()
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn dimension_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf_of(&self, term: &str) -> Option<f64> {
        self.dimension_of(term).map(|d| self.idf[d])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<&'static str> {
        vec![
            "python data analysis sql reporting",
            "java spring backend services",
            "machine learning python deep learning research",
            "sales account management",
        ]
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_single_chars() {
        let sw = StopWords::english();
        let tokens: Vec<String> = tokenize("The C and R of a Python API", &sw).collect();
        assert_eq!(tokens, vec!["python", "api"]);
    }

    #[test]
    fn test_vocabulary_is_sorted_term_order() {
        let index = VectorIndex::fit(&["zeta alpha", "mid alpha"], StopWords::english());
        assert_eq!(index.dimension_of("alpha"), Some(0));
        assert_eq!(index.dimension_of("mid"), Some(1));
        assert_eq!(index.dimension_of("zeta"), Some(2));
    }

    #[test]
    fn test_smoothed_idf_weights() {
        let index = VectorIndex::fit(&["common rare", "common"], StopWords::none());
        // n = 2: common df = 2 -> ln(3/3) + 1; rare df = 1 -> ln(3/2) + 1
        assert!((index.idf_of("common").unwrap() - 1.0).abs() < 1e-12);
        assert!((index.idf_of("rare").unwrap() - ((1.5f64).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let index = VectorIndex::fit(&corpus(), StopWords::english());
        for row in index.rows() {
            assert!((row.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let a = VectorIndex::fit(&corpus(), StopWords::english());
        let b = VectorIndex::fit(&corpus(), StopWords::english());
        assert_eq!(a.rows(), b.rows());
        assert_eq!(a.vocabulary_size(), b.vocabulary_size());
    }

    #[test]
    fn test_own_description_scores_highest() {
        let docs = corpus();
        let index = VectorIndex::fit(&docs, StopWords::english());
        for (i, doc) in docs.iter().enumerate() {
            let scores = index.similarities(&index.transform(doc));
            let best = scores
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(j, _)| j)
                .unwrap();
            assert_eq!(best, i);
            assert!((scores[i] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_out_of_vocabulary_query_is_zero() {
        let index = VectorIndex::fit(&corpus(), StopWords::english());
        let q = index.transform("kubernetes terraform");
        assert!(q.is_zero());
        assert!(index.similarities(&q).iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_empty_corpus_yields_empty_index() {
        let index = VectorIndex::fit::<&str>(&[], StopWords::english());
        assert!(index.is_empty());
        assert_eq!(index.vocabulary_size(), 0);
        assert!(index.similarities(&index.transform("python")).is_empty());
    }
}
