//! TF-IDF vectorization over a small document corpus.
//!
//! Term weights are raw counts times a smoothed inverse document frequency,
//! `ln((1 + n) / (1 + df)) + 1`, and every row is L2-normalised so that a dot
//! product between two rows is their cosine similarity.
//!
//! The vocabulary is kept in lexicographic order. Rows are therefore sparse
//! vectors sorted by term index, and sums always run in the same order.

use crate::text::tokenize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorizeError {
    /// Every document was blank or made only of stop words
    #[error("empty vocabulary; documents contain only stop words or no words at all")]
    EmptyVocabulary,
}

/// A sparse row of the TF-IDF matrix: `(term index, weight)` sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_sorted(entries: Vec<(usize, f64)>) -> Self {
        Self { entries }
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|&(_, w)| w == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Cosine of the angle between two vectors, clamped to [0, 1].
///
/// A zero vector has no direction; its similarity to anything is 0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Vocabulary and IDF weights learned from a corpus.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and IDF weights from `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self, VectorizeError> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();
        Self::fit_tokenized(&tokenized)
    }

    /// Fit on `documents` and return one normalised row per document.
    pub fn fit_transform<S: AsRef<str>>(
        documents: &[S],
    ) -> Result<(Self, Vec<SparseVector>), VectorizeError> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();
        let vectorizer = Self::fit_tokenized(&tokenized)?;
        let rows = tokenized
            .iter()
            .map(|tokens| vectorizer.transform_tokens(tokens))
            .collect();
        Ok((vectorizer, rows))
    }

    /// Vectorize a document against the fitted vocabulary; unseen terms are ignored.
    pub fn transform(&self, document: &str) -> SparseVector {
        self.transform_tokens(&tokenize(document))
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }

    fn fit_tokenized(tokenized: &[Vec<String>]) -> Result<Self, VectorizeError> {
        // Document frequency per term; BTreeMap gives lexicographic indices
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in tokenized {
            let mut unique: Vec<&str> = tokens.iter().map(String::as_str).collect();
            unique.sort_unstable();
            unique.dedup();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let n = tokenized.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (idx, (term, df)) in doc_freq.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), idx);
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        Ok(Self { vocabulary, idf })
    }

    fn transform_tokens(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row = SparseVector::from_sorted(
            counts
                .into_iter()
                .map(|(idx, tf)| (idx, tf * self.idf[idx]))
                .collect(),
        );
        row.normalize();
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_vocabulary() {
        assert_eq!(
            TfidfVectorizer::fit(&["", "the and of", "   "]).unwrap_err(),
            VectorizeError::EmptyVocabulary
        );
        let no_docs: [&str; 0] = [];
        assert!(TfidfVectorizer::fit(&no_docs).is_err());
    }

    #[test]
    fn test_smoothed_idf() {
        let vectorizer = TfidfVectorizer::fit(&["space war", "space love"]).unwrap();
        assert_eq!(vectorizer.vocabulary_len(), 3);
        // in both documents: ln(3/3) + 1
        assert!((vectorizer.idf("space").unwrap() - 1.0).abs() < 1e-12);
        // in one document: ln(3/2) + 1
        assert!((vectorizer.idf("war").unwrap() - (1.5f64.ln() + 1.0)).abs() < 1e-12);
        assert!(vectorizer.idf("the").is_none());
    }

    #[test]
    fn test_rows_are_unit_length() {
        let (_, rows) = TfidfVectorizer::fit_transform(&["alien alien invasion", "funny love story"]).unwrap();
        for row in &rows {
            assert!((row.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cosine_bounds() {
        let (_, rows) = TfidfVectorizer::fit_transform(&[
            "space battles aliens",
            "space battles aliens",
            "funny love story",
        ])
        .unwrap();
        assert!((cosine_similarity(&rows[0], &rows[1]) - 1.0).abs() < 1e-12);
        assert_eq!(cosine_similarity(&rows[0], &rows[2]), 0.0);
    }

    #[test]
    fn test_zero_vector_similarity() {
        let vectorizer = TfidfVectorizer::fit(&["space battles"]).unwrap();
        let unknown = vectorizer.transform("romance comedy");
        assert!(unknown.is_zero());
        assert_eq!(cosine_similarity(&unknown, &vectorizer.transform("space")), 0.0);
    }
}
