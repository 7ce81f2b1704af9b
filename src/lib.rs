//! Graph neural networks for short-text message classification.
//!
//! `textgcn` classifies short messages (e.g. spam vs. ham) represented as
//! message-passing graphs. Its centerpiece is a from-first-principles
//! spectral graph convolution: one trainable weight matrix per propagation
//! operator ("support"), combined by positional pairing and composed into a
//! two-layer classifier whose first layer runs featureless, in the manner of
//! TextGCN ([Yao et al. 2019](https://arxiv.org/abs/1809.05679)).
//!
//! # Modules
//!
//! - [`conv`]: Convolution layers — spectral [`GraphConv`] and
//!   mean-aggregation [`SageConv`]
//! - [`model`]: Two-layer classifier stacks ([`TextGcn`], [`GraphSage`])
//! - [`support`]: Propagation-operator construction (identity, normalized
//!   adjacency, token co-occurrence)
//! - [`train`]: Full-batch transductive training loop
//! - [`mapping`]: Static technology-relation tables for the repository
//!   crawler
//!
//! # Example: classify a small text graph
//!
//! ```rust,ignore
//! use candle_core::{DType, Device, Tensor};
//! use candle_nn::{VarBuilder, VarMap};
//! use textgcn::{support, TextGcn, TrainConfig, Trainer};
//!
//! let device = Device::Cpu;
//! let varmap = VarMap::new();
//! let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
//!
//! let adj = /* (N x N) word/document adjacency */;
//! let supports = vec![
//!     support::identity(n, &device)?,
//!     support::normalized_adjacency(&adj)?,
//! ];
//!
//! let model = TextGcn::new(n, 64, 2, &supports, 0.5, vb)?;
//! let report = Trainer::new(TrainConfig::default())
//!     .fit(&model, &varmap, &x, &labels, &train_idx, &val_idx)?;
//! varmap.save("model.safetensors")?;
//! ```

pub mod conv;
pub mod error;
pub mod mapping;
pub mod model;
pub mod support;
pub mod train;

pub use conv::{GraphConv, SageConv};
pub use error::{Error, Result};
pub use model::{GraphSage, TextGcn};
pub use train::{FitReport, TrainConfig, Trainer};
