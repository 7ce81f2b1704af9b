//! Support-matrix construction.
//!
//! A support is one graph propagation operator: a square matrix telling a
//! convolution layer how signal spreads across nodes for one hop or
//! diffusion order. Layers consume an ordered set of these; typical sets mix
//! the identity (self-loops only) with a symmetrically normalized adjacency.

use candle_core::{DType, Device, Tensor};

use crate::error::{Error, Result};

/// Identity support: each node keeps its own signal.
pub fn identity(num_nodes: usize, device: &Device) -> Result<Tensor> {
    Ok(Tensor::eye(num_nodes, DType::F32, device)?)
}

/// Symmetrically normalized adjacency with self-loops:
/// `D̂^{-1/2} (A + I) D̂^{-1/2}`.
///
/// The self-loops guarantee every row degree is ≥ 1 for a non-negative `A`,
/// so the inverse square root is always finite. Normalization keeps
/// high-degree nodes from dominating the aggregation.
pub fn normalized_adjacency(adj: &Tensor) -> Result<Tensor> {
    let (rows, cols) = adj.dims2()?;
    if rows != cols {
        return Err(Error::InvalidConfig(format!(
            "adjacency must be square, got {rows}x{cols}"
        )));
    }

    let eye = Tensor::eye(rows, adj.dtype(), adj.device())?;
    let a_hat = (adj + &eye)?;

    let inv_sqrt_degree = a_hat.sum(1)?.powf(-0.5)?;
    let d_rows = inv_sqrt_degree.reshape((rows, 1))?;
    let d_cols = inv_sqrt_degree.reshape((1, rows))?;
    Ok(a_hat.broadcast_mul(&d_rows)?.broadcast_mul(&d_cols)?)
}

/// Symmetric co-occurrence adjacency for a short message.
///
/// Counts, for every token position, the tokens appearing within `window`
/// positions after it; counts accumulate over repeats. Self edges are not
/// recorded (use [`identity`] or [`normalized_adjacency`]'s self-loops for
/// that). Token ids index nodes, so they must all be below `num_nodes`.
pub fn cooccurrence_adjacency(
    tokens: &[usize],
    num_nodes: usize,
    window: usize,
    device: &Device,
) -> Result<Tensor> {
    if window == 0 {
        return Err(Error::InvalidConfig(
            "co-occurrence window must be >= 1".to_string(),
        ));
    }
    if let Some(&bad) = tokens.iter().find(|&&t| t >= num_nodes) {
        return Err(Error::InvalidConfig(format!(
            "token id {bad} out of range for {num_nodes} nodes"
        )));
    }

    let mut counts = vec![0f32; num_nodes * num_nodes];
    for (i, &a) in tokens.iter().enumerate() {
        let end = (i + window + 1).min(tokens.len());
        for &b in &tokens[i + 1..end] {
            if a != b {
                counts[a * num_nodes + b] += 1.0;
                counts[b * num_nodes + a] += 1.0;
            }
        }
    }
    Ok(Tensor::from_vec(counts, (num_nodes, num_nodes), device)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_of_a_single_edge() {
        let device = Device::Cpu;
        // Two nodes, one edge. A + I is all ones, every degree is 2, so
        // every entry of the normalized operator is 1/2.
        let adj = Tensor::from_vec(vec![0f32, 1.0, 1.0, 0.0], (2, 2), &device).unwrap();
        let norm = normalized_adjacency(&adj).unwrap();
        let values = norm.to_vec2::<f32>().unwrap();
        for row in values {
            for v in row {
                assert!((v - 0.5).abs() < 1e-6, "entry {v}");
            }
        }
    }

    #[test]
    fn normalization_rejects_rectangular_input() {
        let device = Device::Cpu;
        let adj = Tensor::zeros((2, 3), DType::F32, &device).unwrap();
        assert!(normalized_adjacency(&adj).is_err());
    }

    #[test]
    fn cooccurrence_is_symmetric() {
        let device = Device::Cpu;
        let adj = cooccurrence_adjacency(&[0, 1, 2, 1], 3, 2, &device).unwrap();
        let values = adj.to_vec2::<f32>().unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(values[i][j], values[j][i]);
            }
            assert_eq!(values[i][i], 0.0);
        }
        // Tokens 0 and 1 are adjacent once; 1 and 2 co-occur twice within
        // the window (positions 1-2 and 2-3).
        assert_eq!(values[0][1], 1.0);
        assert_eq!(values[1][2], 2.0);
    }

    #[test]
    fn cooccurrence_validates_inputs() {
        let device = Device::Cpu;
        assert!(cooccurrence_adjacency(&[0, 1], 2, 0, &device).is_err());
        assert!(cooccurrence_adjacency(&[0, 5], 2, 2, &device).is_err());
    }
}
