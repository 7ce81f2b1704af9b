//! Classifier stacks over the convolution layers.

use candle_core::Tensor;
use candle_nn::{Activation, Dropout, VarBuilder};

use crate::conv::{GraphConv, SageConv};
use crate::error::{Error, Result};

/// Two-layer spectral classifier for text graphs.
///
/// Layer 1 runs featureless with ReLU: the nodes of a text graph (words and
/// documents) carry no informative input features, so the first weight
/// matrices double as the learned node embeddings. Layer 2 maps the hidden
/// embeddings to per-node class scores with no activation; scores are
/// unnormalized and the caller owns any probability transform and the loss.
///
/// Both layers aggregate over the same shared support set.
pub struct TextGcn {
    layer1: GraphConv,
    layer2: GraphConv,
}

impl TextGcn {
    /// Build the stack.
    ///
    /// # Arguments
    /// - `input_dim`: node count of the graph (featureless contract)
    /// - `hidden_dim`: embedding width between the two layers
    /// - `num_classes`: output classes, ≥ 1
    /// - `supports`: shared propagation operators, each `(N × N)`
    /// - `dropout_rate`: applied to layer 2's input embeddings during
    ///   training (layer 1 has no feature input to drop)
    /// - `vb`: variable builder; parameters live under `layer1.*` and
    ///   `layer2.*`
    pub fn new(
        input_dim: usize,
        hidden_dim: usize,
        num_classes: usize,
        supports: &[Tensor],
        dropout_rate: f32,
        vb: VarBuilder,
    ) -> Result<Self> {
        if num_classes == 0 {
            return Err(Error::InvalidConfig(
                "num_classes must be positive".to_string(),
            ));
        }
        let layer1 = GraphConv::featureless(
            input_dim,
            hidden_dim,
            supports,
            Some(Activation::Relu),
            dropout_rate,
            false,
            vb.pp("layer1"),
        )?;
        let layer2 = GraphConv::new(
            hidden_dim,
            num_classes,
            supports,
            None,
            dropout_rate,
            false,
            vb.pp("layer2"),
        )?;
        Ok(Self { layer1, layer2 })
    }

    /// Forward pass: `x` is a shape-conforming placeholder (layer 1 is
    /// featureless), the result is `(N × num_classes)` raw class scores.
    pub fn forward(&self, x: &Tensor, train: bool) -> Result<Tensor> {
        let hidden = self.layer1.forward(x, train)?;
        self.layer2.forward(&hidden, train)
    }

    pub fn layer1(&self) -> &GraphConv {
        &self.layer1
    }

    pub fn layer2(&self) -> &GraphConv {
        &self.layer2
    }
}

/// Two-stage mean-aggregation classifier.
///
/// The sampling-based counterpart to [`TextGcn`]: feature-driven, works off a
/// raw adjacency instead of a support set, ReLU and dropout between the two
/// stages.
pub struct GraphSage {
    conv1: SageConv,
    conv2: SageConv,
    dropout: Dropout,
}

impl GraphSage {
    pub fn new(
        input_dim: usize,
        hidden_dim: usize,
        num_classes: usize,
        dropout_rate: f32,
        vb: VarBuilder,
    ) -> Result<Self> {
        if num_classes == 0 {
            return Err(Error::InvalidConfig(
                "num_classes must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&dropout_rate) {
            return Err(Error::InvalidConfig(format!(
                "dropout rate must be in [0, 1), got {dropout_rate}"
            )));
        }
        Ok(Self {
            conv1: SageConv::new(input_dim, hidden_dim, true, vb.pp("conv1"))?,
            conv2: SageConv::new(hidden_dim, num_classes, false, vb.pp("conv2"))?,
            dropout: Dropout::new(dropout_rate),
        })
    }

    /// Forward pass over `(N × input_dim)` features and an `(N × N)`
    /// adjacency; returns `(N × num_classes)` raw class scores.
    pub fn forward(&self, x: &Tensor, adj: &Tensor, train: bool) -> Result<Tensor> {
        let hidden = self.conv1.forward(x, adj)?.relu()?;
        let hidden = self.dropout.forward(&hidden, train)?;
        self.conv2.forward(&hidden, adj)
    }
}
