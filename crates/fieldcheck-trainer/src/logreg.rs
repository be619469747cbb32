//! Multinomial logistic regression over sparse rows.
//!
//! Mini-batch SGD on the softmax cross-entropy with an L2 penalty and
//! optional class-balanced sample weights. Batch order comes from a seeded
//! shuffle and the epoch count is fixed, so a given dataset and seed always
//! produce the same weights.

use anyhow::bail;
use fieldcheck_core::{LinearClassifier, SparseVector};
use tracing::debug;

use crate::rng::SeededRng;

/// Optimizer settings.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub epochs: usize,
    pub learning_rate: f32,
    pub l2: f32,
    pub batch_size: usize,
    pub seed: u64,
    pub balance_classes: bool,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 30,
            learning_rate: 0.5,
            l2: 1e-4,
            batch_size: 64,
            seed: 42,
            balance_classes: true,
        }
    }
}

/// Feature rows with class indices into `classes`.
#[derive(Debug, Clone)]
pub struct TrainDataset {
    pub classes: Vec<String>,
    pub dim: usize,
    pub x: Vec<SparseVector>,
    pub y: Vec<usize>,
}

/// `n / (k * count_c)` per class; classes with no samples get weight 0.
pub fn balanced_class_weights(y: &[usize], classes: usize) -> Vec<f32> {
    let mut counts = vec![0f32; classes];
    for &label in y {
        if label < classes {
            counts[label] += 1.0;
        }
    }
    let total: f32 = counts.iter().sum();
    counts
        .into_iter()
        .map(|count| {
            if count == 0.0 {
                0.0
            } else {
                total / (classes as f32 * count)
            }
        })
        .collect()
}

pub fn train_logreg(
    dataset: &TrainDataset,
    options: &TrainOptions,
) -> anyhow::Result<LinearClassifier> {
    if dataset.x.is_empty() {
        bail!("empty training set");
    }
    if dataset.x.len() != dataset.y.len() {
        bail!(
            "mismatched training inputs/labels ({} rows, {} labels)",
            dataset.x.len(),
            dataset.y.len()
        );
    }
    let classes = dataset.classes.len();
    if classes < 2 {
        bail!("need at least two classes, got {}", classes);
    }
    let dim = dataset.dim;
    if let Some(row) = dataset.x.iter().find(|row| row.dim() != dim) {
        bail!("row dimension {} does not match {}", row.dim(), dim);
    }
    if let Some(&label) = dataset.y.iter().find(|&&label| label >= classes) {
        bail!("label index {} out of range for {} classes", label, classes);
    }

    let mut model = LinearClassifier::zeros(dataset.classes.clone(), dim);
    let mut rng = SeededRng::new(options.seed);
    let mut indices: Vec<usize> = (0..dataset.x.len()).collect();
    let batch_size = options.batch_size.max(1);
    let lr = options.learning_rate;
    let l2 = options.l2.max(0.0);

    let class_weights = if options.balance_classes {
        balanced_class_weights(&dataset.y, classes)
    } else {
        vec![1.0; classes]
    };

    // Gradient buffers are reused across batches; only touched columns are
    // applied and cleared.
    let mut grad_w = vec![0.0f32; classes * dim];
    let mut grad_b = vec![0.0f32; classes];
    let mut touched = vec![false; dim];
    let mut touched_cols: Vec<usize> = Vec::new();

    for epoch in 0..options.epochs {
        rng.shuffle(&mut indices);
        let mut epoch_loss = 0.0f64;
        let mut epoch_weight = 0.0f64;

        for chunk in indices.chunks(batch_size) {
            let mut batch_weight = 0.0f32;
            for &idx in chunk {
                let x = &dataset.x[idx];
                let y = dataset.y[idx];
                let weight = class_weights[y];
                if weight == 0.0 {
                    continue;
                }
                let logits = model.decision_function(x)?;
                let probs = softmax(&logits);
                epoch_loss -= f64::from(weight) * f64::from(probs[y].max(1e-12)).ln();
                epoch_weight += f64::from(weight);

                for c in 0..classes {
                    let diff = (probs[c] - if c == y { 1.0 } else { 0.0 }) * weight;
                    let base = c * dim;
                    for &(i, v) in x.entries() {
                        grad_w[base + i] += diff * v;
                    }
                    grad_b[c] += diff;
                }
                for &(i, _) in x.entries() {
                    if !touched[i] {
                        touched[i] = true;
                        touched_cols.push(i);
                    }
                }
                batch_weight += weight;
            }
            if batch_weight == 0.0 {
                continue;
            }

            let inv = 1.0 / batch_weight;
            if l2 > 0.0 {
                let decay = 1.0 - lr * l2;
                for w in &mut model.coefficients {
                    *w *= decay;
                }
            }
            for c in 0..classes {
                let base = c * dim;
                for &i in &touched_cols {
                    model.coefficients[base + i] -= lr * grad_w[base + i] * inv;
                    grad_w[base + i] = 0.0;
                }
                model.intercepts[c] -= lr * grad_b[c] * inv;
                grad_b[c] = 0.0;
            }
            for &i in &touched_cols {
                touched[i] = false;
            }
            touched_cols.clear();
        }

        if epoch_weight > 0.0 {
            debug!(
                epoch = epoch + 1,
                loss = epoch_loss / epoch_weight,
                "logreg epoch"
            );
        }
    }

    model.validate()?;
    Ok(model)
}

/// Numerically stable softmax.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum > 0.0 {
        for v in &mut exps {
            *v /= sum;
        }
    }
    exps
}
