//! End-to-end tests for the spectral classifier stack.

use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};
use textgcn::{support, GraphConv, TextGcn};

/// Symmetrically normalized adjacency of a 4-cycle.
fn cycle_support(n: usize, device: &Device) -> Tensor {
    let mut adj = vec![0f32; n * n];
    for i in 0..n {
        let j = (i + 1) % n;
        adj[i * n + j] = 1.0;
        adj[j * n + i] = 1.0;
    }
    let adj = Tensor::from_vec(adj, (n, n), device).unwrap();
    support::normalized_adjacency(&adj).unwrap()
}

fn total_abs_diff(a: &Tensor, b: &Tensor) -> f32 {
    (a - b)
        .unwrap()
        .abs()
        .unwrap()
        .sum_all()
        .unwrap()
        .to_scalar::<f32>()
        .unwrap()
}

#[test]
fn end_to_end_scores_are_finite() {
    let device = Device::Cpu;
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);

    // Five nodes, two supports: identity plus a symmetric normalized
    // adjacency; featureless first layer, hidden width 3, two classes.
    let n = 5;
    let supports = vec![
        support::identity(n, &device).unwrap(),
        cycle_support(n, &device),
    ];
    let model = TextGcn::new(n, 3, 2, &supports, 0.0, vb).unwrap();

    let x = Tensor::zeros((n, n), DType::F32, &device).unwrap();
    let scores = model.forward(&x, false).unwrap();
    assert_eq!(scores.dims(), &[5, 2]);
    for row in scores.to_vec2::<f32>().unwrap() {
        for v in row {
            assert!(v.is_finite(), "non-finite score {v}");
        }
    }
}

#[test]
fn forward_is_deterministic_without_dropout() {
    let device = Device::Cpu;
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);

    let n = 6;
    let supports = vec![
        support::identity(n, &device).unwrap(),
        cycle_support(n, &device),
    ];
    // Nonzero dropout rate, but evaluation mode makes it the identity.
    let model = TextGcn::new(n, 4, 3, &supports, 0.5, vb).unwrap();
    let x = Tensor::zeros((n, n), DType::F32, &device).unwrap();

    let first = model.forward(&x, false).unwrap().to_vec2::<f32>().unwrap();
    let second = model.forward(&x, false).unwrap().to_vec2::<f32>().unwrap();
    assert_eq!(first, second);
}

#[test]
fn support_order_does_not_change_the_sum() {
    let device = Device::Cpu;
    let n = 4;
    let s0 = support::identity(n, &device).unwrap();
    let s1 = cycle_support(n, &device);

    let varmap_fwd = VarMap::new();
    let vb_fwd = VarBuilder::from_varmap(&varmap_fwd, DType::F32, &device);
    let forward_order =
        GraphConv::new(3, 2, &[s0.clone(), s1.clone()], None, 0.0, false, vb_fwd).unwrap();

    let varmap_rev = VarMap::new();
    let vb_rev = VarBuilder::from_varmap(&varmap_rev, DType::F32, &device);
    let reverse_order = GraphConv::new(3, 2, &[s1, s0], None, 0.0, false, vb_rev).unwrap();

    // Swap the reversed layer's weights so both hold the same (Sᵢ, Wᵢ)
    // multiset, just visited in opposite order.
    {
        let fwd = varmap_fwd.data().lock().unwrap();
        let rev = varmap_rev.data().lock().unwrap();
        rev.get("w0").unwrap().set(fwd.get("w1").unwrap()).unwrap();
        rev.get("w1").unwrap().set(fwd.get("w0").unwrap()).unwrap();
    }

    let x = Tensor::randn(0f32, 1f32, (n, 3), &device).unwrap();
    let a = forward_order.forward(&x, false).unwrap();
    let b = reverse_order.forward(&x, false).unwrap();
    assert!(total_abs_diff(&a, &b) < 1e-4);
}

#[test]
fn bias_is_applied_post_aggregation() {
    let device = Device::Cpu;
    let n = 4;
    let supports = vec![support::identity(n, &device).unwrap(), cycle_support(n, &device)];

    let varmap_plain = VarMap::new();
    let vb_plain = VarBuilder::from_varmap(&varmap_plain, DType::F32, &device);
    let plain = GraphConv::new(3, 2, &supports, None, 0.0, false, vb_plain).unwrap();

    let varmap_biased = VarMap::new();
    let vb_biased = VarBuilder::from_varmap(&varmap_biased, DType::F32, &device);
    let biased = GraphConv::new(3, 2, &supports, None, 0.0, true, vb_biased).unwrap();

    let bias_row = Tensor::from_vec(vec![0.5f32, -0.25], (1, 2), &device).unwrap();
    {
        let plain_vars = varmap_plain.data().lock().unwrap();
        let biased_vars = varmap_biased.data().lock().unwrap();
        biased_vars
            .get("w0")
            .unwrap()
            .set(plain_vars.get("w0").unwrap())
            .unwrap();
        biased_vars
            .get("w1")
            .unwrap()
            .set(plain_vars.get("w1").unwrap())
            .unwrap();
        biased_vars.get("bias").unwrap().set(&bias_row).unwrap();
    }

    let x = Tensor::randn(0f32, 1f32, (n, 3), &device).unwrap();
    let without = plain.forward(&x, false).unwrap();
    let with = biased.forward(&x, false).unwrap();

    // The bias participates: broadcast-added to the aggregated output.
    let expected = without.broadcast_add(&bias_row).unwrap();
    assert!(total_abs_diff(&with, &expected) < 1e-6);
}

#[test]
fn bias_is_added_before_the_activation() {
    let device = Device::Cpu;
    let n = 4;
    let supports = vec![cycle_support(n, &device)];

    let varmap_linear = VarMap::new();
    let vb_linear = VarBuilder::from_varmap(&varmap_linear, DType::F32, &device);
    let linear = GraphConv::new(3, 2, &supports, None, 0.0, false, vb_linear).unwrap();

    let varmap_relu = VarMap::new();
    let vb_relu = VarBuilder::from_varmap(&varmap_relu, DType::F32, &device);
    let relu = GraphConv::new(
        3,
        2,
        &supports,
        Some(candle_nn::Activation::Relu),
        0.0,
        true,
        vb_relu,
    )
    .unwrap();

    let bias_row = Tensor::from_vec(vec![1.5f32, -3.0], (1, 2), &device).unwrap();
    {
        let linear_vars = varmap_linear.data().lock().unwrap();
        let relu_vars = varmap_relu.data().lock().unwrap();
        relu_vars
            .get("w0")
            .unwrap()
            .set(linear_vars.get("w0").unwrap())
            .unwrap();
        relu_vars.get("bias").unwrap().set(&bias_row).unwrap();
    }

    let x = Tensor::randn(0f32, 1f32, (n, 3), &device).unwrap();
    let aggregated = linear.forward(&x, false).unwrap();
    let activated = relu.forward(&x, false).unwrap();

    let expected = aggregated.broadcast_add(&bias_row).unwrap().relu().unwrap();
    assert!(total_abs_diff(&activated, &expected) < 1e-6);
}

#[test]
fn every_weight_matrix_receives_gradient() {
    let device = Device::Cpu;
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);

    let n = 5;
    let supports = vec![
        support::identity(n, &device).unwrap(),
        cycle_support(n, &device),
    ];
    let model = TextGcn::new(n, 3, 2, &supports, 0.0, vb).unwrap();

    // Positive weights keep the hidden ReLU active, so no gradient path is
    // accidentally dead.
    for var in varmap.all_vars() {
        let positive = (Tensor::ones(var.dims(), DType::F32, &device).unwrap() * 0.1).unwrap();
        var.set(&positive).unwrap();
    }

    let x = Tensor::zeros((n, n), DType::F32, &device).unwrap();
    let scores = model.forward(&x, false).unwrap();
    let loss = scores.sqr().unwrap().sum_all().unwrap();
    let grads = loss.backward().unwrap();

    let vars = varmap.all_vars();
    assert_eq!(vars.len(), 4, "two weight matrices per layer");
    for var in vars {
        let grad = grads.get(&var).expect("missing gradient");
        let magnitude = grad
            .abs()
            .unwrap()
            .sum_all()
            .unwrap()
            .to_scalar::<f32>()
            .unwrap();
        assert!(magnitude > 0.0, "zero gradient for a weight matrix");
    }
}

#[test]
fn checkpoint_round_trip_restores_parameters() {
    let device = Device::Cpu;
    let n = 4;
    let supports = vec![
        support::identity(n, &device).unwrap(),
        cycle_support(n, &device),
    ];
    let x = Tensor::zeros((n, n), DType::F32, &device).unwrap();

    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
    let model = TextGcn::new(n, 3, 2, &supports, 0.0, vb).unwrap();
    let before = model.forward(&x, false).unwrap();

    let path = std::env::temp_dir().join("textgcn_roundtrip.safetensors");
    varmap.save(&path).unwrap();

    let mut restored_map = VarMap::new();
    let restored = {
        let vb = VarBuilder::from_varmap(&restored_map, DType::F32, &device);
        TextGcn::new(n, 3, 2, &supports, 0.0, vb).unwrap()
    };
    restored_map.load(&path).unwrap();
    let after = restored.forward(&x, false).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(
        before.to_vec2::<f32>().unwrap(),
        after.to_vec2::<f32>().unwrap()
    );
}
