//! Graph convolution layers.
//!
//! [`GraphConv`] is the spectral workhorse of this crate: a single trainable
//! transformation combining several graph propagation operators ("supports"),
//! each paired with its own weight matrix. Stacking a first-order support
//! (normalized adjacency) with higher-order or identity supports recovers the
//! Chebyshev-style filters of Defferrard et al. 2016; a single normalized
//! adjacency recovers plain GCN (Kipf & Welling, 2017).
//!
//! [`SageConv`] is the sampling-style alternative (Hamilton et al., 2017):
//! mean neighborhood aggregation with separate self/neighbor transforms, no
//! multi-support machinery.

use candle_core::Tensor;
use candle_nn::init::Init;
use candle_nn::{linear, Activation, Dropout, Linear, Module, VarBuilder};

use crate::error::{Error, Result};

/// How a [`GraphConv`] sources its per-node signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    /// Pre-support term is `X · Wᵢ` over the caller's feature matrix.
    Features,
    /// The weight matrices themselves are the per-node signal. Used as the
    /// first layer of a network whose nodes carry no informative features;
    /// requires `input_dim` to equal the node count.
    Featureless,
}

/// Spectral graph convolution with one weight matrix per support.
///
/// Computes `act(Σᵢ Sᵢ · pre(Wᵢ) + b)` where `pre(Wᵢ)` is `X · Wᵢ` in feature
/// mode and `Wᵢ` itself in featureless mode. Supports are supplied at
/// construction and paired positionally with the weights; the pairing count
/// is fixed for the lifetime of the layer. Rebuild the layer to change the
/// support set.
///
/// Summation runs in ascending support order with the first term initializing
/// the accumulator, so results are bit-reproducible for fixed parameters and
/// disabled dropout.
///
/// # Reference
///
/// Yao, Mao & Luo, "Graph Convolutional Networks for Text Classification",
/// AAAI 2019.
pub struct GraphConv {
    weights: Vec<Tensor>,
    bias: Option<Tensor>,
    supports: Vec<Tensor>,
    activation: Option<Activation>,
    dropout: Dropout,
    signal: Signal,
    input_dim: usize,
    output_dim: usize,
    /// Node count shared by every support; `None` for an empty support set.
    num_nodes: Option<usize>,
}

impl GraphConv {
    /// Create a feature-driven layer: the forward pass transforms the
    /// caller's `(N × input_dim)` feature matrix.
    ///
    /// # Arguments
    /// - `input_dim` / `output_dim`: feature dimensions, both ≥ 1
    /// - `supports`: ordered propagation operators, each `(N × N)`; may be
    ///   empty (the layer then degenerates to an all-zero output)
    /// - `activation`: optional elementwise non-linearity applied last
    /// - `dropout_rate`: input dropout probability in `[0, 1)`
    /// - `bias`: allocate a zero-initialized `(1 × output_dim)` bias,
    ///   broadcast-added after aggregation and before the activation
    /// - `vb`: variable builder; weights are registered as `w0 … w{k−1}`
    pub fn new(
        input_dim: usize,
        output_dim: usize,
        supports: &[Tensor],
        activation: Option<Activation>,
        dropout_rate: f32,
        bias: bool,
        vb: VarBuilder,
    ) -> Result<Self> {
        Self::build(
            input_dim,
            output_dim,
            supports,
            activation,
            dropout_rate,
            bias,
            Signal::Features,
            vb,
        )
    }

    /// Create a featureless layer: the weight matrices are injected directly
    /// as the per-node signal and the forward input is ignored structurally.
    ///
    /// `input_dim` must equal the supports' node count (each `Sᵢ · Wᵢ`
    /// product must be well-formed); violating this is a configuration
    /// error, caught here rather than at forward time.
    pub fn featureless(
        input_dim: usize,
        output_dim: usize,
        supports: &[Tensor],
        activation: Option<Activation>,
        dropout_rate: f32,
        bias: bool,
        vb: VarBuilder,
    ) -> Result<Self> {
        Self::build(
            input_dim,
            output_dim,
            supports,
            activation,
            dropout_rate,
            bias,
            Signal::Featureless,
            vb,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        input_dim: usize,
        output_dim: usize,
        supports: &[Tensor],
        activation: Option<Activation>,
        dropout_rate: f32,
        bias: bool,
        signal: Signal,
        vb: VarBuilder,
    ) -> Result<Self> {
        if input_dim == 0 || output_dim == 0 {
            return Err(Error::InvalidConfig(format!(
                "layer dimensions must be positive, got {input_dim}x{output_dim}"
            )));
        }
        if !(0.0..1.0).contains(&dropout_rate) {
            return Err(Error::InvalidConfig(format!(
                "dropout rate must be in [0, 1), got {dropout_rate}"
            )));
        }
        let num_nodes = check_supports(supports)?;
        if signal == Signal::Featureless {
            if let Some(n) = num_nodes {
                if n != input_dim {
                    return Err(Error::InvalidConfig(format!(
                        "featureless layer needs input_dim == node count {n}, got {input_dim}"
                    )));
                }
            }
        }

        let mut weights = Vec::with_capacity(supports.len());
        for i in 0..supports.len() {
            let w = vb.get_with_hints(
                (input_dim, output_dim),
                &format!("w{i}"),
                Init::Randn {
                    mean: 0.0,
                    stdev: 1.0,
                },
            )?;
            weights.push(w);
        }
        let bias = if bias {
            Some(vb.get_with_hints((1, output_dim), "bias", candle_nn::init::ZERO)?)
        } else {
            None
        };

        Ok(Self {
            weights,
            bias,
            supports: supports.to_vec(),
            activation,
            dropout: Dropout::new(dropout_rate),
            signal,
            input_dim,
            output_dim,
            num_nodes,
        })
    }

    /// Forward pass.
    ///
    /// # Arguments
    /// - `x`: node features `(N × input_dim)`; structurally ignored in
    ///   featureless mode but still required for interface uniformity
    /// - `train`: enables input dropout; pass `false` for evaluation
    ///
    /// # Returns
    /// - Node embeddings `(N × output_dim)`
    ///
    /// An empty support set yields the all-zero matrix (the accumulation is
    /// vacuous), with `N` taken from `x`'s row count.
    pub fn forward(&self, x: &Tensor, train: bool) -> Result<Tensor> {
        let (x_rows, x_cols) = x.dims2()?;

        let n = match self.num_nodes {
            Some(n) => n,
            None => {
                return Ok(Tensor::zeros(
                    (x_rows, self.output_dim),
                    x.dtype(),
                    x.device(),
                )?)
            }
        };

        let features = match self.signal {
            Signal::Featureless => None,
            Signal::Features => {
                if x_cols != self.input_dim {
                    return Err(Error::DimensionMismatch {
                        left: "feature matrix columns".to_string(),
                        right: "weight matrix rows".to_string(),
                        expected: self.input_dim,
                        got: x_cols,
                    });
                }
                if x_rows != n {
                    return Err(Error::DimensionMismatch {
                        left: "feature matrix rows".to_string(),
                        right: "support".to_string(),
                        expected: n,
                        got: x_rows,
                    });
                }
                Some(self.dropout.forward(x, train)?)
            }
        };

        // First support initializes the accumulator, the rest add in
        // ascending index order.
        let mut out = self.supports[0].matmul(&self.pre_support(features.as_ref(), 0)?)?;
        for i in 1..self.supports.len() {
            let term = self.supports[i].matmul(&self.pre_support(features.as_ref(), i)?)?;
            out = (out + term)?;
        }

        if let Some(bias) = &self.bias {
            out = out.broadcast_add(bias)?;
        }
        match self.activation {
            Some(act) => Ok(act.forward(&out)?),
            None => Ok(out),
        }
    }

    fn pre_support(&self, features: Option<&Tensor>, i: usize) -> Result<Tensor> {
        match features {
            Some(x) => Ok(x.matmul(&self.weights[i])?),
            None => Ok(self.weights[i].clone()),
        }
    }

    /// Number of (support, weight) pairs.
    pub fn num_supports(&self) -> usize {
        self.supports.len()
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    /// The per-support weight matrices, in pairing order. Count and shapes
    /// are stable for the lifetime of the layer, so external checkpointing
    /// can rely on this enumeration.
    pub fn weights(&self) -> &[Tensor] {
        &self.weights
    }

    /// The bias row vector, if one was requested at construction.
    pub fn bias(&self) -> Option<&Tensor> {
        self.bias.as_ref()
    }
}

/// Validate that every support is square and all share one node count.
fn check_supports(supports: &[Tensor]) -> Result<Option<usize>> {
    let mut num_nodes = None;
    for (i, s) in supports.iter().enumerate() {
        let (rows, cols) = s.dims2()?;
        if rows != cols {
            return Err(Error::InvalidConfig(format!(
                "support {i} must be square, got {rows}x{cols}"
            )));
        }
        match num_nodes {
            None => num_nodes = Some(rows),
            Some(n) if n != rows => {
                return Err(Error::InvalidConfig(format!(
                    "support {i} is {rows}x{rows}, earlier supports are {n}x{n}"
                )))
            }
            Some(_) => {}
        }
    }
    Ok(num_nodes)
}

/// GraphSAGE-style mean-aggregation layer.
///
/// Combines a self transform with a neighbor transform over the mean of
/// adjacent node features: `h' = W_s·x + W_n·mean(A·x)`. The adjacency need
/// not be normalized; row degrees are divided out here.
///
/// # Reference
///
/// Hamilton et al., "Inductive Representation Learning on Large Graphs",
/// NeurIPS 2017.
pub struct SageConv {
    lin_self: Linear,
    lin_neighbor: Linear,
    normalize: bool,
}

impl SageConv {
    /// Create a new layer. `normalize` enables L2 row normalization of the
    /// output embeddings.
    pub fn new(
        input_dim: usize,
        output_dim: usize,
        normalize: bool,
        vb: VarBuilder,
    ) -> Result<Self> {
        if input_dim == 0 || output_dim == 0 {
            return Err(Error::InvalidConfig(format!(
                "layer dimensions must be positive, got {input_dim}x{output_dim}"
            )));
        }
        let lin_self = linear(input_dim, output_dim, vb.pp("lin_self"))?;
        let lin_neighbor = linear(input_dim, output_dim, vb.pp("lin_neighbor"))?;
        Ok(Self {
            lin_self,
            lin_neighbor,
            normalize,
        })
    }

    /// Forward pass over node features `(N × input_dim)` and an adjacency
    /// matrix `(N × N)`.
    pub fn forward(&self, x: &Tensor, adj: &Tensor) -> Result<Tensor> {
        let n = x.dim(0)?;

        // Mean over neighbors: A·x / degree, guarding empty neighborhoods.
        let summed = adj.matmul(x)?;
        let degree = (adj.sum(1)?.reshape((n, 1))? + 1e-6)?;
        let mean = summed.broadcast_div(&degree)?;

        let out = (self.lin_self.forward(x)? + self.lin_neighbor.forward(&mean)?)?;
        if !self.normalize {
            return Ok(out);
        }
        let norm = (out.sqr()?.sum(1)?.sqrt()?.reshape((n, 1))? + 1e-6)?;
        Ok(out.broadcast_div(&norm)?)
    }
}
