//! Linear multi-class classifier over sparse feature rows.

use serde::{Deserialize, Serialize};

use crate::error::{FieldcheckError, Result};
use crate::text::SparseVector;

/// One weight row plus intercept per class; the highest score wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    /// Class names, in row order.
    pub classes: Vec<String>,
    /// Input feature dimension.
    pub dim: usize,
    /// `classes.len() * dim` weights, row major by class.
    pub coefficients: Vec<f32>,
    pub intercepts: Vec<f32>,
}

impl LinearClassifier {
    /// A zero-weight classifier; every input scores equally.
    pub fn zeros(classes: Vec<String>, dim: usize) -> Self {
        let n = classes.len();
        Self {
            classes,
            dim,
            coefficients: vec![0.0; n * dim],
            intercepts: vec![0.0; n],
        }
    }

    /// Validate the parameter shapes.
    pub fn validate(&self) -> Result<()> {
        let n = self.classes.len();
        if n == 0 {
            return Err(FieldcheckError::InvalidModel("no classes defined".into()));
        }
        if self.coefficients.len() != n * self.dim {
            return Err(FieldcheckError::InvalidModel(format!(
                "coefficients length {} does not match {} classes x {} features",
                self.coefficients.len(),
                n,
                self.dim
            )));
        }
        if self.intercepts.len() != n {
            return Err(FieldcheckError::InvalidModel(format!(
                "intercepts length {} does not match {} classes",
                self.intercepts.len(),
                n
            )));
        }
        if self
            .coefficients
            .iter()
            .chain(&self.intercepts)
            .any(|w| !w.is_finite())
        {
            return Err(FieldcheckError::InvalidModel(
                "non-finite parameter".into(),
            ));
        }
        Ok(())
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Weight row for class `c`.
    pub fn row(&self, c: usize) -> &[f32] {
        &self.coefficients[c * self.dim..(c + 1) * self.dim]
    }

    /// Raw per-class scores for a feature row.
    pub fn decision_function(&self, x: &SparseVector) -> Result<Vec<f32>> {
        if x.dim() != self.dim {
            return Err(FieldcheckError::DimensionMismatch {
                expected: self.dim,
                actual: x.dim(),
            });
        }
        Ok((0..self.num_classes())
            .map(|c| self.intercepts[c] + x.dot(self.row(c)))
            .collect())
    }

    /// Index of the best scoring class. Ties go to the lower index.
    pub fn predict_index(&self, x: &SparseVector) -> Result<usize> {
        let scores = self.decision_function(x)?;
        let mut best = 0usize;
        let mut best_val = f32::NEG_INFINITY;
        for (idx, &s) in scores.iter().enumerate() {
            if s > best_val {
                best_val = s;
                best = idx;
            }
        }
        Ok(best)
    }

    /// Name of the best scoring class.
    pub fn predict(&self, x: &SparseVector) -> Result<&str> {
        let idx = self.predict_index(x)?;
        Ok(&self.classes[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> LinearClassifier {
        LinearClassifier {
            classes: vec!["ok".into(), "missing".into()],
            dim: 3,
            coefficients: vec![1.0, 0.0, 0.0, 0.0, 0.0, 2.0],
            intercepts: vec![0.0, 0.1],
        }
    }

    #[test]
    fn predicts_highest_score() {
        let clf = toy();
        clf.validate().unwrap();
        let x = SparseVector::from_entries(3, vec![(0, 1.0)]).unwrap();
        assert_eq!(clf.predict(&x).unwrap(), "ok");
        let x = SparseVector::from_entries(3, vec![(2, 1.0)]).unwrap();
        assert_eq!(clf.predict(&x).unwrap(), "missing");
    }

    #[test]
    fn zero_input_uses_intercepts() {
        let clf = toy();
        assert_eq!(clf.predict(&SparseVector::zeros(3)).unwrap(), "missing");
    }

    #[test]
    fn ties_go_to_first_class() {
        let clf = LinearClassifier::zeros(vec!["a".into(), "b".into()], 2);
        assert_eq!(clf.predict_index(&SparseVector::zeros(2)).unwrap(), 0);
    }

    #[test]
    fn wrong_dimension_is_rejected() {
        let clf = toy();
        let err = clf.decision_function(&SparseVector::zeros(4)).unwrap_err();
        assert!(matches!(
            err,
            FieldcheckError::DimensionMismatch {
                expected: 3,
                actual: 4
            }
        ));
    }

    #[test]
    fn validate_catches_shape_errors() {
        let mut clf = toy();
        clf.intercepts.push(0.0);
        assert!(clf.validate().is_err());

        let mut clf = toy();
        clf.coefficients[0] = f32::NAN;
        assert!(clf.validate().is_err());
    }
}
