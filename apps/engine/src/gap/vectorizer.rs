//! TF-IDF vectorisation of short skill strings.
//!
//! Every distinct skill string is its own document. Terms are lowercase word
//! unigrams and bigrams; IDF is smoothed as `ln((1 + n) / (1 + df)) + 1` and
//! each document vector is L2-normalised, so cosine similarity is a plain dot
//! product and always lies in [0, 1].
//!
//! Known limitation: abbreviations share no terms with their expansion, so
//! "ML" and "Machine Learning" score 0.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

/// A token starts with an ASCII letter followed by letters or digits.
/// Symbols are dropped, so "C++" tokenises to "c" and "3D" to nothing.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z][a-zA-Z0-9]*\b").expect("token pattern is valid"));

/// Sparse L2-normalised vector as `(term index, weight)` pairs sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Cosine similarity of two normalised vectors, clamped to [0, 1].
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ti, wi) = self.entries[i];
            let (tj, wj) = other.entries[j];
            match ti.cmp(&tj) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += wi * wj;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot.clamp(0.0, 1.0)
    }
}

/// Splits a skill string into lowercase unigram and bigram terms with their counts.
pub fn extract_terms(text: &str) -> BTreeMap<String, usize> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .collect();

    let mut counts = BTreeMap::new();
    for token in &tokens {
        *counts.entry((*token).to_string()).or_insert(0) += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}

/// A fitted TF-IDF model over a small corpus of skill strings.
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    doc_index: HashMap<String, usize>,
    vectors: Vec<SparseVector>,
}

impl TfIdfModel {
    /// Fits the model. Repeated strings collapse into one document at their first position.
    pub fn fit<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut doc_index = HashMap::new();
        let mut doc_terms: Vec<BTreeMap<String, usize>> = Vec::new();
        for doc in documents {
            if doc_index.contains_key(doc) {
                continue;
            }
            doc_index.insert(doc.to_string(), doc_terms.len());
            doc_terms.push(extract_terms(doc));
        }

        // Term ids follow lexical order, which keeps the model independent of input order.
        let terms: BTreeSet<&String> = doc_terms.iter().flat_map(|t| t.keys()).collect();
        let vocabulary: BTreeMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(id, term)| (term.clone(), id))
            .collect();

        let mut df = vec![0usize; vocabulary.len()];
        for terms in &doc_terms {
            for term in terms.keys() {
                df[vocabulary[term]] += 1;
            }
        }

        let n = doc_terms.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let vectors = doc_terms
            .iter()
            .map(|terms| weigh(terms, &vocabulary, &idf))
            .collect();

        Self {
            vocabulary,
            idf,
            doc_index,
            vectors,
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn document_count(&self) -> usize {
        self.vectors.len()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&id| self.idf[id])
    }

    /// Document id of a fitted string.
    pub fn document_id(&self, text: &str) -> Option<usize> {
        self.doc_index.get(text).copied()
    }

    pub fn vector(&self, document_id: usize) -> Option<&SparseVector> {
        self.vectors.get(document_id)
    }

    /// Similarity between two fitted strings. Unknown strings score 0.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        match (self.document_id(a), self.document_id(b)) {
            (Some(da), Some(db)) => self.document_similarity(da, db),
            _ => 0.0,
        }
    }

    /// Similarity between two documents. A non-empty document is exactly 1.0 with itself.
    pub fn document_similarity(&self, a: usize, b: usize) -> f64 {
        let (Some(va), Some(vb)) = (self.vectors.get(a), self.vectors.get(b)) else {
            return 0.0;
        };
        if a == b {
            return if va.is_zero() { 0.0 } else { 1.0 };
        }
        va.cosine(vb)
    }
}

fn weigh(
    terms: &BTreeMap<String, usize>,
    vocabulary: &BTreeMap<String, usize>,
    idf: &[f64],
) -> SparseVector {
    let mut entries: Vec<(usize, f64)> = terms
        .iter()
        .map(|(term, &count)| {
            let id = vocabulary[term];
            (id, count as f64 * idf[id])
        })
        .collect();
    entries.sort_by_key(|(id, _)| *id);

    let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm == 0.0 {
        return SparseVector::default();
    }
    for (_, w) in &mut entries {
        *w /= norm;
    }
    SparseVector { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_include_unigrams_and_bigrams() {
        let terms = extract_terms("Machine Learning Ops");
        let keys: Vec<&str> = terms.keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["learning", "learning ops", "machine", "machine learning", "ops"]
        );
    }

    #[test]
    fn test_symbols_and_leading_digits_are_dropped() {
        assert_eq!(extract_terms("C++").keys().collect::<Vec<_>>(), vec!["c"]);
        assert!(extract_terms("3D").is_empty());
        assert!(extract_terms("").is_empty());
        assert_eq!(extract_terms("Python3").keys().collect::<Vec<_>>(), vec!["python3"]);
    }

    #[test]
    fn test_case_insensitive_similarity() {
        let model = TfIdfModel::fit(["PYTHON", "python"]);
        assert!((model.similarity("PYTHON", "python") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_identical_strings_are_exactly_one() {
        let model = TfIdfModel::fit(["Data Science", "Science"]);
        assert_eq!(model.similarity("Data Science", "Data Science"), 1.0);
    }

    #[test]
    fn test_partial_overlap_is_between_zero_and_one() {
        let model = TfIdfModel::fit(["Machine Learning", "Deep Learning", "SQL"]);
        let sim = model.similarity("Machine Learning", "Deep Learning");
        assert!(sim > 0.0 && sim < 1.0, "sim was {sim}");
        assert_eq!(model.similarity("Machine Learning", "SQL"), 0.0);
    }

    #[test]
    fn test_abbreviation_does_not_match_expansion() {
        let model = TfIdfModel::fit(["ML", "Machine Learning"]);
        assert_eq!(model.similarity("ML", "Machine Learning"), 0.0);
    }

    #[test]
    fn test_empty_document_has_zero_vector() {
        let model = TfIdfModel::fit(["", "Rust"]);
        let empty = model.document_id("").unwrap();
        assert!(model.vector(empty).unwrap().is_zero());
        assert_eq!(model.document_similarity(empty, empty), 0.0);
        assert_eq!(model.similarity("", "Rust"), 0.0);
    }

    #[test]
    fn test_repeated_documents_collapse() {
        let model = TfIdfModel::fit(["Rust", "Go", "Rust"]);
        assert_eq!(model.document_count(), 2);
        assert_eq!(model.vocabulary_size(), 2);
    }

    #[test]
    fn test_smoothed_idf() {
        // 2 documents: "rust" appears in one, "systems" in both.
        let model = TfIdfModel::fit(["Rust Systems", "Systems"]);
        // rust, systems, "rust systems"
        assert_eq!(model.vocabulary_size(), 3);
        let rare = model.idf("rust").unwrap();
        let common = model.idf("systems").unwrap();
        assert!((rare - ((3.0_f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
        assert!((common - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let model = TfIdfModel::fit(["Natural Language Processing", "Language"]);
        let id = model.document_id("Natural Language Processing").unwrap();
        let v = model.vector(id).unwrap();
        assert_eq!(v.nnz(), 5);
        assert!((v.cosine(v) - 1.0).abs() < 1e-9);
    }
}
