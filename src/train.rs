//! Full-batch transductive training for [`TextGcn`](crate::model::TextGcn).
//!
//! The whole graph is evaluated every epoch; train/validation splits are
//! index sets over the node axis. Parameters live in a
//! [`candle_nn::VarMap`], so checkpointing is the caller's one-liner
//! (`varmap.save` / `varmap.load` with safetensors) and the optimizer simply
//! steps `varmap.all_vars()`.
//!
//! # Example
//!
//! ```rust,ignore
//! use textgcn::{TextGcn, TrainConfig, Trainer};
//!
//! let config = TrainConfig::default()
//!     .with_epochs(200)
//!     .with_learning_rate(0.005);
//!
//! let report = Trainer::new(config).fit(&model, &varmap, &x, &labels, &train_idx, &val_idx)?;
//! varmap.save("model.safetensors")?;
//! eprintln!("best epoch: {}", report.best_epoch);
//! ```

use std::fs::File;
use std::path::Path;

use candle_core::{DType, Tensor, D};
use candle_nn::{loss, AdamW, Optimizer, ParamsAdamW, VarMap};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::TextGcn;

/// Training configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Number of training epochs (default: 100).
    pub epochs: usize,
    /// AdamW learning rate (default: 0.005).
    pub learning_rate: f64,
    /// Decoupled weight decay (default: 0.0).
    pub weight_decay: f64,
    /// Stop after this many epochs without a new best validation accuracy
    /// (None = run all epochs).
    pub early_stopping: Option<usize>,
    /// Progress line to stderr every this many epochs (default: 10).
    pub log_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            learning_rate: 0.005,
            weight_decay: 0.0,
            early_stopping: Some(10),
            log_every: 10,
        }
    }
}

impl TrainConfig {
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    pub fn with_weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    pub fn with_early_stopping(mut self, patience: Option<usize>) -> Self {
        self.early_stopping = patience;
        self
    }
}

/// Per-epoch history of a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitReport {
    /// Training loss per epoch.
    pub loss_history: Vec<f32>,
    /// Training-set accuracy per epoch, measured with dropout disabled.
    pub train_accuracy: Vec<f32>,
    /// Validation accuracy per epoch; empty when no validation set was given.
    pub val_accuracy: Vec<f32>,
    /// Epoch with the best validation accuracy (training accuracy when no
    /// validation set was given).
    pub best_epoch: usize,
}

impl FitReport {
    /// Write the report as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Full-batch trainer.
pub struct Trainer {
    config: TrainConfig,
}

impl Trainer {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Train `model` in place.
    ///
    /// # Arguments
    /// - `varmap`: the map the model's parameters were built from; the
    ///   optimizer steps every var in it
    /// - `x`: placeholder/feature matrix forwarded to the model each epoch
    /// - `labels`: `(N,)` class indices (`u32`) for every node; only the
    ///   indexed subsets contribute to loss and metrics
    /// - `train_idx` / `val_idx`: node index sets; `val_idx` may be empty
    pub fn fit(
        &self,
        model: &TextGcn,
        varmap: &VarMap,
        x: &Tensor,
        labels: &Tensor,
        train_idx: &[u32],
        val_idx: &[u32],
    ) -> Result<FitReport> {
        if train_idx.is_empty() {
            return Err(Error::InvalidConfig(
                "training index set must not be empty".to_string(),
            ));
        }
        let device = x.device();
        let train_ids = Tensor::from_vec(train_idx.to_vec(), train_idx.len(), device)?;
        let val_ids = if val_idx.is_empty() {
            None
        } else {
            Some(Tensor::from_vec(val_idx.to_vec(), val_idx.len(), device)?)
        };
        let train_labels = labels.index_select(&train_ids, 0)?;

        let params = ParamsAdamW {
            lr: self.config.learning_rate,
            weight_decay: self.config.weight_decay,
            ..Default::default()
        };
        let mut optimizer = AdamW::new(varmap.all_vars(), params)?;

        let mut report = FitReport {
            loss_history: Vec::with_capacity(self.config.epochs),
            train_accuracy: Vec::with_capacity(self.config.epochs),
            val_accuracy: Vec::new(),
            best_epoch: 0,
        };
        let mut best_metric = f32::NEG_INFINITY;

        for epoch in 0..self.config.epochs {
            let logits = model.forward(x, true)?;
            let loss = loss::cross_entropy(&logits.index_select(&train_ids, 0)?, &train_labels)?;
            optimizer.backward_step(&loss)?;
            report.loss_history.push(loss.to_scalar::<f32>()?);

            // Metrics on a clean evaluation pass.
            let eval_logits = model.forward(x, false)?;
            let train_acc = accuracy(&eval_logits.index_select(&train_ids, 0)?, &train_labels)?;
            report.train_accuracy.push(train_acc);

            let monitored = match &val_ids {
                Some(ids) => {
                    let val_acc = accuracy(
                        &eval_logits.index_select(ids, 0)?,
                        &labels.index_select(ids, 0)?,
                    )?;
                    report.val_accuracy.push(val_acc);
                    val_acc
                }
                None => train_acc,
            };
            if monitored > best_metric {
                best_metric = monitored;
                report.best_epoch = epoch;
            }

            if self.config.log_every > 0 && epoch % self.config.log_every == 0 {
                match report.val_accuracy.last() {
                    Some(val_acc) => eprintln!(
                        "epoch {epoch}: loss = {:.4}, train acc = {:.3}, val acc = {:.3}",
                        report.loss_history[epoch], train_acc, val_acc
                    ),
                    None => eprintln!(
                        "epoch {epoch}: loss = {:.4}, train acc = {:.3}",
                        report.loss_history[epoch], train_acc
                    ),
                }
            }

            if let Some(patience) = self.config.early_stopping {
                if epoch > report.best_epoch + patience {
                    eprintln!(
                        "early stopping at epoch {epoch} (best was {})",
                        report.best_epoch
                    );
                    break;
                }
            }
        }

        Ok(report)
    }
}

/// Fraction of rows whose argmax matches the label.
pub fn accuracy(logits: &Tensor, labels: &Tensor) -> Result<f32> {
    let hits = logits.argmax(D::Minus1)?.eq(labels)?.to_dtype(DType::F32)?;
    Ok(hits.mean_all()?.to_scalar::<f32>()?)
}
