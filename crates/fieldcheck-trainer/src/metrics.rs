//! Held-out evaluation: per-class precision, recall and F1.

use std::fmt;

use anyhow::bail;

/// Scores for one class, or an average across classes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Classification report over a fixed list of class names.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<String>,
    pub per_class: Vec<ClassScores>,
    pub accuracy: f64,
    pub macro_avg: ClassScores,
    pub weighted_avg: ClassScores,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

impl ClassificationReport {
    /// Builds the report from class indices. Undefined ratios are 0.
    ///
    /// Fails if the slices differ in length or an index is out of range for
    /// `classes`.
    pub fn compute(
        classes: &[String],
        y_true: &[usize],
        y_pred: &[usize],
    ) -> anyhow::Result<Self> {
        if y_true.len() != y_pred.len() {
            bail!(
                "label slices differ in length ({} true, {} predicted)",
                y_true.len(),
                y_pred.len()
            );
        }
        let k = classes.len();
        if let Some(&bad) = y_true.iter().chain(y_pred).find(|&&c| c >= k) {
            bail!("class index {} out of range for {} classes", bad, k);
        }
        let mut tp = vec![0usize; k];
        let mut predicted = vec![0usize; k];
        let mut support = vec![0usize; k];

        for (&t, &p) in y_true.iter().zip(y_pred) {
            support[t] += 1;
            predicted[p] += 1;
            if t == p {
                tp[t] += 1;
            }
        }

        let per_class: Vec<ClassScores> = (0..k)
            .map(|c| {
                let precision = ratio(tp[c], predicted[c]);
                let recall = ratio(tp[c], support[c]);
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassScores {
                    precision,
                    recall,
                    f1,
                    support: support[c],
                }
            })
            .collect();

        let total = y_true.len();
        let correct: usize = tp.iter().sum();

        let mut macro_avg = ClassScores {
            support: total,
            ..ClassScores::default()
        };
        let mut weighted_avg = macro_avg;
        for scores in &per_class {
            macro_avg.precision += scores.precision;
            macro_avg.recall += scores.recall;
            macro_avg.f1 += scores.f1;
            let w = ratio(scores.support, total);
            weighted_avg.precision += w * scores.precision;
            weighted_avg.recall += w * scores.recall;
            weighted_avg.f1 += w * scores.f1;
        }
        if k > 0 {
            macro_avg.precision /= k as f64;
            macro_avg.recall /= k as f64;
            macro_avg.f1 /= k as f64;
        }

        Ok(Self {
            classes: classes.to_vec(),
            per_class,
            accuracy: ratio(correct, total),
            macro_avg,
            weighted_avg,
        })
    }

    pub fn class(&self, name: &str) -> Option<&ClassScores> {
        self.classes
            .iter()
            .position(|c| c == name)
            .map(|i| &self.per_class[i])
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(String::len)
            .chain(["weighted avg".len()])
            .max()
            .unwrap_or(0);
        let total = self.macro_avg.support;

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (name, s) in self.classes.iter().zip(&self.per_class) {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, s.precision, s.recall, s.f1, s.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, total
        )?;
        for (name, s) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, s.precision, s.recall, s.f1, s.support
            )?;
        }
        Ok(())
    }
}
