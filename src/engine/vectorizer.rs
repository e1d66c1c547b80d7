//! Term-count vectorization over a fixed vocabulary.
//!
//! `fit` learns the vocabulary from the catalog and produces one sparse
//! count row per movie. Queries are projected with [`Vocabulary::transform`];
//! terms the catalog never contained are dropped.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::stop_words::is_stop_word;

/// Splits text into lowercase word tokens.
///
/// A token is a run of alphanumeric characters or underscores at least two
/// characters long. Stop words are removed.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().nth(1).is_some())
        .map(str::to_lowercase)
        .filter(|word| !is_stop_word(word))
}

/// Sparse vector of (column, count) pairs sorted by column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseVector {
    entries: Vec<(usize, u32)>,
}

impl SparseVector {
    fn from_counts(counts: BTreeMap<usize, u32>) -> Self {
        Self {
            entries: counts.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[(usize, u32)] {
        &self.entries
    }

    /// Count stored for a column, zero when absent
    pub fn get(&self, column: usize) -> u32 {
        self.entries
            .binary_search_by_key(&column, |&(col, _)| col)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// True when every component is zero
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0u64;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_col, a_val) = self.entries[i];
            let (b_col, b_val) = other.entries[j];
            match a_col.cmp(&b_col) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += u64::from(a_val) * u64::from(b_val);
                    i += 1;
                    j += 1;
                }
            }
        }
        sum as f64
    }

    /// Euclidean length
    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, count)| f64::from(count) * f64::from(count))
            .sum::<f64>()
            .sqrt()
    }
}

/// Term → column mapping learned from the catalog.
///
/// Columns follow lexicographic term order, so fitting the same corpus twice
/// yields the same assignment.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    columns: HashMap<String, usize>,
    terms: Vec<String>,
}

impl Vocabulary {
    fn from_terms(terms: BTreeSet<String>) -> Self {
        let terms: Vec<String> = terms.into_iter().collect();
        let columns = terms
            .iter()
            .enumerate()
            .map(|(column, term)| (term.clone(), column))
            .collect();
        Self { columns, terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.columns.get(term).copied()
    }

    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    /// Projects text onto this vocabulary; unknown terms contribute nothing
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(column) = self.column(&token) {
                *counts.entry(column).or_insert(0) += 1;
            }
        }
        SparseVector::from_counts(counts)
    }
}

/// One count row per document, in input order
#[derive(Debug, Clone, Default)]
pub struct TermMatrix {
    rows: Vec<SparseVector>,
    norms: Vec<f64>,
    columns: usize,
}

impl TermMatrix {
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    /// Precomputed Euclidean length of a row
    pub fn row_norm(&self, index: usize) -> f64 {
        self.norms.get(index).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &SparseVector, f64)> + '_ {
        self.rows
            .iter()
            .zip(self.norms.iter().copied())
            .enumerate()
            .map(|(index, (row, norm))| (index, row, norm))
    }
}

/// Learns the vocabulary from `documents` and counts terms per document
pub fn fit<'a, I>(documents: I) -> (Vocabulary, TermMatrix)
where
    I: IntoIterator<Item = &'a str>,
{
    let tokenized: Vec<Vec<String>> = documents
        .into_iter()
        .map(|doc| tokenize(doc).collect())
        .collect();

    let terms: BTreeSet<String> = tokenized.iter().flatten().cloned().collect();
    let vocabulary = Vocabulary::from_terms(terms);

    let rows: Vec<SparseVector> = tokenized
        .iter()
        .map(|tokens| {
            let mut counts = BTreeMap::new();
            for token in tokens {
                if let Some(column) = vocabulary.column(token) {
                    *counts.entry(column).or_insert(0) += 1;
                }
            }
            SparseVector::from_counts(counts)
        })
        .collect();
    let norms = rows.iter().map(SparseVector::norm).collect();

    let matrix = TermMatrix {
        rows,
        norms,
        columns: vocabulary.len(),
    };

    (vocabulary, matrix)
}
