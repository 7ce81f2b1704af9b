//! Train the spectral text classifier on a tiny spam/ham corpus.
//!
//! Nodes `0..VOCAB` are word nodes, the rest are message nodes. Word-word
//! edges come from co-occurrence within a sliding window, word-message edges
//! from term occurrence. Only message nodes carry labels; word nodes ride
//! along, transductive style.

use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};
use textgcn::{support, Result, TextGcn, TrainConfig, Trainer};

const VOCAB: [&str; 8] = [
    "win", "free", "prize", "claim", "meeting", "lunch", "tomorrow", "thanks",
];

fn main() -> Result<()> {
    let device = Device::Cpu;

    // Token-id sequences over VOCAB, with a spam flag per message.
    let messages: [(&[usize], u32); 6] = [
        (&[0, 1, 2], 1),    // win free prize
        (&[3, 2, 0], 1),    // claim prize win
        (&[1, 2, 3], 1),    // free prize claim
        (&[4, 6], 0),       // meeting tomorrow
        (&[5, 6, 7], 0),    // lunch tomorrow thanks
        (&[4, 5, 7], 0),    // meeting lunch thanks
    ];

    let num_nodes = VOCAB.len() + messages.len();
    let mut adj = vec![0f32; num_nodes * num_nodes];
    for (m, (tokens, _)) in messages.iter().enumerate() {
        let msg_node = VOCAB.len() + m;

        let cooc = support::cooccurrence_adjacency(tokens, VOCAB.len(), 2, &device)?;
        for (i, row) in cooc.to_vec2::<f32>()?.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                adj[i * num_nodes + j] += v;
            }
        }
        for &t in *tokens {
            adj[t * num_nodes + msg_node] += 1.0;
            adj[msg_node * num_nodes + t] += 1.0;
        }
    }
    let adj = Tensor::from_vec(adj, (num_nodes, num_nodes), &device)?;

    let supports = vec![
        support::identity(num_nodes, &device)?,
        support::normalized_adjacency(&adj)?,
    ];

    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
    let model = TextGcn::new(num_nodes, 16, 2, &supports, 0.2, vb)?;

    // Word nodes keep a placeholder label and never enter the index sets.
    let mut labels = vec![0u32; num_nodes];
    let mut train_idx = Vec::new();
    let mut val_idx = Vec::new();
    for (m, (_, is_spam)) in messages.iter().enumerate() {
        let node = VOCAB.len() + m;
        labels[node] = *is_spam;
        if m % 3 == 2 {
            val_idx.push(node as u32);
        } else {
            train_idx.push(node as u32);
        }
    }
    let labels = Tensor::from_vec(labels, num_nodes, &device)?;
    let x = Tensor::zeros((num_nodes, num_nodes), DType::F32, &device)?;

    let config = TrainConfig::default()
        .with_epochs(200)
        .with_learning_rate(0.02)
        .with_early_stopping(Some(50));
    let report = Trainer::new(config).fit(&model, &varmap, &x, &labels, &train_idx, &val_idx)?;

    let checkpoint = std::env::temp_dir().join("textgcn_demo.safetensors");
    varmap.save(&checkpoint)?;

    println!("best epoch: {}", report.best_epoch);
    if let Some(acc) = report.val_accuracy.last() {
        println!("final val accuracy: {acc:.3}");
    }
    println!("checkpoint: {}", checkpoint.display());
    Ok(())
}
