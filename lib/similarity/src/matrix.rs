//! Dense all-pairs cosine similarity
//!
//! Every score lies in [0.0, 1.0]. The diagonal is exactly 1.0 and
//! `get(i, j) == get(j, i)` holds bit-for-bit.

use rayon::prelude::*;
use toonrec_core::SparseVector;

/// N×N similarity matrix in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute the full matrix, one row per rayon task
    pub fn compute(vectors: &[SparseVector]) -> Self {
        let n = vectors.len();
        let norms: Vec<f32> = vectors.iter().map(SparseVector::norm).collect();

        let rows: Vec<Vec<f32>> = (0..n)
            .into_par_iter()
            .map(|i| row_with_norms(vectors, &norms, i))
            .collect();
        let data = rows.concat();

        tracing::debug!("Similarity matrix computed: {}x{}", n, n);
        Self { n, data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity between rows `i` and `j`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Upper-left `size`×`size` block, for inspection
    pub fn block(&self, size: usize) -> Vec<Vec<f32>> {
        let size = size.min(self.n);
        (0..size).map(|i| self.row(i)[..size].to_vec()).collect()
    }
}

/// Similarity of row `i` against every row, without building the matrix.
///
/// Produces exactly the values of [`SimilarityMatrix::row`].
pub fn cosine_row(vectors: &[SparseVector], i: usize) -> Vec<f32> {
    let norms: Vec<f32> = vectors.iter().map(SparseVector::norm).collect();
    row_with_norms(vectors, &norms, i)
}

fn row_with_norms(vectors: &[SparseVector], norms: &[f32], i: usize) -> Vec<f32> {
    (0..vectors.len())
        .map(|j| {
            if i == j {
                1.0
            } else {
                // fixed operand order keeps (i, j) and (j, i) identical
                let (a, b) = if i < j { (i, j) } else { (j, i) };
                pair_cosine(&vectors[a], &vectors[b], norms[a], norms[b])
            }
        })
        .collect()
}

#[inline]
fn pair_cosine(a: &SparseVector, b: &SparseVector, norm_a: f32, norm_b: f32) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (a.dot(b) / (norm_a * norm_b)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectors() -> Vec<SparseVector> {
        vec![
            SparseVector::from_pairs(vec![(0, 0.3), (1, 0.7), (4, 0.2)]),
            SparseVector::from_pairs(vec![(1, 0.5), (2, 0.9)]),
            SparseVector::from_pairs(vec![(3, 1.0)]),
            SparseVector::default(),
        ]
    }

    #[test]
    fn test_symmetry_and_diagonal() {
        let m = SimilarityMatrix::compute(&vectors());
        assert_eq!(m.len(), 4);
        for i in 0..m.len() {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..m.len() {
                assert_eq!(m.get(i, j), m.get(j, i));
                assert!(m.get(i, j) >= 0.0 && m.get(i, j) <= 1.0);
            }
        }
    }

    #[test]
    fn test_zero_vector_row() {
        let m = SimilarityMatrix::compute(&vectors());
        assert_eq!(m.row(3), &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_orthogonal_vectors() {
        let m = SimilarityMatrix::compute(&vectors());
        assert_eq!(m.get(0, 2), 0.0);
        assert!(m.get(0, 1) > 0.0);
    }

    #[test]
    fn test_single_row_matches_matrix() {
        let vs = vectors();
        let m = SimilarityMatrix::compute(&vs);
        for i in 0..vs.len() {
            assert_eq!(cosine_row(&vs, i).as_slice(), m.row(i));
        }
    }

    #[test]
    fn test_block() {
        let m = SimilarityMatrix::compute(&vectors());
        let block = m.block(2);
        assert_eq!(block.len(), 2);
        assert_eq!(block[0].len(), 2);
        assert_eq!(m.block(10).len(), 4);
    }
}
