//! # Vector Index
//!
//! Brute-force cosine retrieval over unit-normalized embedding vectors.
//! The index is populated once from precomputed `(id, vector)` pairs and
//! never mutates afterward; queries rank by dot product, which equals
//! cosine similarity because every stored vector is normalized at build
//! time.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

use crate::error::{Result, VecdbError};

/// A retrieval hit: catalog identifier plus raw similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredId {
    /// Catalog identifier of the matched vector.
    pub id: i64,
    /// Dot product against the query (cosine similarity for unit vectors).
    pub score: f32,
}

/// Immutable dense vector index queried by dot product.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    ids: Vec<i64>,
    /// Row-major slab, `len * dimension` components.
    vectors: Vec<f32>,
    dimension: usize,
}

impl VectorIndex {
    /// Build an index from `(id, vector)` pairs.
    ///
    /// Every vector must have the given dimensionality and every id must
    /// be unique. Vectors are L2-normalized as they are stored; all-zero
    /// vectors are kept as-is.
    ///
    /// # Errors
    /// Returns [`VecdbError::ZeroDimension`], [`VecdbError::DimensionMismatch`],
    /// or [`VecdbError::DuplicateId`] when the input violates the contract.
    pub fn build<I>(entries: I, dimension: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (i64, Vec<f32>)>,
    {
        if dimension == 0 {
            return Err(VecdbError::ZeroDimension);
        }

        let mut ids = Vec::new();
        let mut vectors = Vec::new();
        let mut seen = HashSet::new();

        for (id, mut vector) in entries {
            if vector.len() != dimension {
                return Err(VecdbError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
            if !seen.insert(id) {
                return Err(VecdbError::DuplicateId(id));
            }
            l2_normalize(&mut vector);
            ids.push(id);
            vectors.extend_from_slice(&vector);
        }

        Ok(Self {
            ids,
            vectors,
            dimension,
        })
    }

    /// Number of vectors held by the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the index holds no vectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Dimensionality shared by every stored vector and every query.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Iterate `(id, vector)` rows in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (i64, &[f32])> + '_ {
        self.ids
            .iter()
            .enumerate()
            .map(|(row, &id)| (id, self.row(row)))
    }

    /// Retrieve the `top_k` most similar vectors, ordered by descending
    /// score with ties broken by ascending id.
    ///
    /// `top_k` is clamped to the index size; zero yields an empty result.
    /// The query is assumed to already be unit-normalized.
    ///
    /// # Errors
    /// Returns [`VecdbError::DimensionMismatch`] if the query length does
    /// not match the index dimensionality.
    pub fn query(&self, query: &[f32], top_k: usize) -> Result<Vec<ScoredId>> {
        if query.len() != self.dimension {
            return Err(VecdbError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let k = top_k.min(self.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        // Bounded min-heap: the entry ranked worst is evicted first.
        let mut heap = BinaryHeap::with_capacity(k + 1);
        for (row, &id) in self.ids.iter().enumerate() {
            let score = dot_product(self.row(row), query);
            heap.push(Reverse(RankEntry { score, id }));
            if heap.len() > k {
                heap.pop();
            }
        }

        let mut results: Vec<ScoredId> = heap
            .into_iter()
            .map(|entry| ScoredId {
                id: entry.0.id,
                score: entry.0.score,
            })
            .collect();
        results.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        Ok(results)
    }

    fn row(&self, row: usize) -> &[f32] {
        let start = row * self.dimension;
        &self.vectors[start..start + self.dimension]
    }
}

/// Scale a vector to unit L2 norm in place.
///
/// An all-zero vector has no direction and is left untouched instead of
/// dividing by zero.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

#[inline]
fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Heap ordering for top-k selection. Lower score ranks first; for equal
/// scores the higher id ranks first, so the bounded heap evicts it and
/// keeps the ascending-id winner.
#[derive(Debug, Clone, Copy)]
struct RankEntry {
    score: f32,
    id: i64,
}

impl PartialEq for RankEntry {
    fn eq(&self, other: &Self) -> bool {
        self.score.total_cmp(&other.score) == Ordering::Equal && self.id == other.id
    }
}

impl Eq for RankEntry {}

impl PartialOrd for RankEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.id.cmp(&self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(components: &[f32]) -> Vec<f32> {
        let mut v = components.to_vec();
        l2_normalize(&mut v);
        v
    }

    #[test]
    fn build_rejects_zero_dimension() {
        let result = VectorIndex::build(vec![], 0);
        assert!(matches!(result, Err(VecdbError::ZeroDimension)));
    }

    #[test]
    fn build_rejects_dimension_mismatch() {
        let entries = vec![(1, vec![1.0, 0.0]), (2, vec![1.0, 0.0, 0.0])];
        let result = VectorIndex::build(entries, 2);
        assert!(matches!(
            result,
            Err(VecdbError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn build_rejects_duplicate_ids() {
        let entries = vec![(7, vec![1.0, 0.0]), (7, vec![0.0, 1.0])];
        let result = VectorIndex::build(entries, 2);
        assert!(matches!(result, Err(VecdbError::DuplicateId(7))));
    }

    #[test]
    fn build_normalizes_stored_vectors() {
        let index = VectorIndex::build(vec![(1, vec![3.0, 4.0])], 2).unwrap();
        let (_, row) = index.entries().next().unwrap();
        assert!((row[0] - 0.6).abs() < 1e-6);
        assert!((row[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn build_keeps_zero_vectors() {
        let index = VectorIndex::build(vec![(1, vec![0.0, 0.0])], 2).unwrap();
        let (_, row) = index.entries().next().unwrap();
        assert_eq!(row, &[0.0, 0.0]);
    }

    #[test]
    fn query_rejects_dimension_mismatch() {
        let index = VectorIndex::build(vec![(1, vec![1.0, 0.0])], 2).unwrap();
        let result = index.query(&[1.0, 0.0, 0.0], 5);
        assert!(matches!(
            result,
            Err(VecdbError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn query_orders_by_descending_score() {
        let entries = vec![
            (1, unit(&[1.0, 0.0, 0.0])),
            (2, unit(&[0.0, 1.0, 0.0])),
            (3, unit(&[1.0, 1.0, 0.0])),
        ];
        let index = VectorIndex::build(entries, 3).unwrap();

        let results = index.query(&unit(&[1.0, 0.0, 0.0]), 3).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].id, 1);
        assert!((results[0].score - 1.0).abs() < 1e-6);
        assert_eq!(results[1].id, 3);
        assert_eq!(results[2].id, 2);
        assert!(results[1].score > results[2].score);
    }

    #[test]
    fn query_breaks_ties_by_ascending_id() {
        // Identical vectors, identical scores: ids decide the order.
        let shared = unit(&[1.0, 2.0]);
        let entries = vec![
            (30, shared.clone()),
            (10, shared.clone()),
            (20, shared.clone()),
        ];
        let index = VectorIndex::build(entries, 2).unwrap();

        let results = index.query(&shared, 3).unwrap();
        let ids: Vec<i64> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn query_keeps_lowest_id_on_tie_at_cutoff() {
        let shared = unit(&[1.0, 2.0]);
        let entries = vec![(2, shared.clone()), (1, shared.clone())];
        let index = VectorIndex::build(entries, 2).unwrap();

        let results = index.query(&shared, 1).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn query_clamps_top_k_to_index_size() {
        let entries = vec![(1, unit(&[1.0, 0.0])), (2, unit(&[0.0, 1.0]))];
        let index = VectorIndex::build(entries, 2).unwrap();

        let results = index.query(&unit(&[1.0, 1.0]), 100).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn query_with_zero_top_k_is_empty() {
        let index = VectorIndex::build(vec![(1, unit(&[1.0, 0.0]))], 2).unwrap();
        let results = index.query(&unit(&[1.0, 0.0]), 0).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn query_on_empty_index_is_empty() {
        let index = VectorIndex::build(vec![], 3).unwrap();
        let results = index.query(&[1.0, 0.0, 0.0], 10).unwrap();
        assert!(results.is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn query_is_deterministic() {
        let entries = vec![
            (5, unit(&[0.2, 0.9, 0.1])),
            (6, unit(&[0.8, 0.1, 0.4])),
            (7, unit(&[0.3, 0.3, 0.9])),
        ];
        let index = VectorIndex::build(entries, 3).unwrap();
        let query = unit(&[0.5, 0.5, 0.5]);

        let first = index.query(&query, 3).unwrap();
        let second = index.query(&query, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn score_matches_direct_cosine() {
        let a = vec![0.6, 0.8];
        let b = vec![1.0, 0.0];
        let index = VectorIndex::build(vec![(1, a.clone())], 2).unwrap();

        let results = index.query(&unit(&b), 1).unwrap();
        // Both sides unit-normalized, so the score is the plain cosine.
        let expected = 0.6;
        assert!((results[0].score - expected).abs() < 1e-6);
    }

    #[test]
    fn l2_normalize_produces_unit_norm() {
        let mut v = vec![3.0, 4.0, 12.0];
        l2_normalize(&mut v);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn l2_normalize_leaves_zero_vector_untouched() {
        let mut v = vec![0.0, 0.0, 0.0];
        l2_normalize(&mut v);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }
}
