use serde::{Deserialize, Serialize};

use crate::error::{FieldcheckError, Result};

/// A sparse feature row: `(column, value)` pairs sorted by column, no
/// duplicate columns, inside a fixed dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// An all-zero vector of the given dimension.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Builds a vector from unordered entries, summing duplicate columns
    /// and dropping exact zeros.
    ///
    /// # Errors
    ///
    /// Returns `FieldcheckError::DimensionMismatch` if a column is out of range.
    pub fn from_entries(dim: usize, mut entries: Vec<(usize, f32)>) -> Result<Self> {
        if let Some(&(col, _)) = entries.iter().find(|(col, _)| *col >= dim) {
            return Err(FieldcheckError::DimensionMismatch {
                expected: dim,
                actual: col + 1,
            });
        }
        entries.sort_by_key(|(col, _)| *col);

        let mut merged: Vec<(usize, f32)> = Vec::with_capacity(entries.len());
        for (col, value) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == col => *acc += value,
                _ => merged.push((col, value)),
            }
        }
        merged.retain(|(_, v)| *v != 0.0);

        Ok(Self {
            dim,
            entries: merged,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f32>().sqrt()
    }

    /// Scales the vector to unit L2 norm. Zero vectors stay zero.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, v) in &mut self.entries {
                *v /= norm;
            }
        }
    }

    /// Dot product with a dense row of the same dimension.
    pub fn dot(&self, dense: &[f32]) -> f32 {
        self.entries
            .iter()
            .filter_map(|&(col, v)| dense.get(col).map(|w| w * v))
            .sum()
    }

    /// Concatenates vectors side by side, offsetting each part's columns by
    /// the dimensions of the parts before it.
    pub fn hstack(parts: &[&SparseVector]) -> Self {
        let dim = parts.iter().map(|p| p.dim).sum();
        let mut entries = Vec::with_capacity(parts.iter().map(|p| p.nnz()).sum());
        let mut offset = 0;
        for part in parts {
            entries.extend(part.entries.iter().map(|&(col, v)| (col + offset, v)));
            offset += part.dim;
        }
        Self { dim, entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_entries_sorts_and_merges() {
        let v = SparseVector::from_entries(5, vec![(3, 1.0), (0, 2.0), (3, 1.5), (1, 0.0)]).unwrap();
        assert_eq!(v.entries(), &[(0, 2.0), (3, 2.5)]);
        assert_eq!(v.nnz(), 2);
    }

    #[test]
    fn out_of_range_column_is_rejected() {
        let err = SparseVector::from_entries(2, vec![(2, 1.0)]).unwrap_err();
        assert!(matches!(err, FieldcheckError::DimensionMismatch { .. }));
    }

    #[test]
    fn normalize_to_unit_length() {
        let mut v = SparseVector::from_entries(4, vec![(0, 3.0), (2, 4.0)]).unwrap();
        v.l2_normalize();
        assert!((v.norm() - 1.0).abs() < 1e-6);

        let mut zero = SparseVector::zeros(4);
        zero.l2_normalize();
        assert!(zero.is_zero());
    }

    #[test]
    fn hstack_offsets_columns() {
        let a = SparseVector::from_entries(3, vec![(2, 1.0)]).unwrap();
        let b = SparseVector::from_entries(4, vec![(0, 5.0), (3, 6.0)]).unwrap();
        let joined = SparseVector::hstack(&[&a, &b]);
        assert_eq!(joined.dim(), 7);
        assert_eq!(joined.entries(), &[(2, 1.0), (3, 5.0), (6, 6.0)]);
    }

    #[test]
    fn dot_with_dense_row() {
        let v = SparseVector::from_entries(3, vec![(0, 1.0), (2, 2.0)]).unwrap();
        assert_eq!(v.dot(&[0.5, 10.0, 0.25]), 1.0);
    }
}
