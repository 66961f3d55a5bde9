//! # RustyMLP: Feed-Forward Neural Network Engine in Rust
//!
//! **RustyMLP** is a small, eager multilayer-perceptron engine. A network is
//! an ordered chain of layers, each owning one weight matrix (one row per
//! neuron, the last column is the bias weight) and the transient state of
//! its most recent pass. Training is classic backpropagation with gradient
//! descent: a backward walk computes per-neuron error gradients, a forward
//! walk applies learning-rate-scaled weight deltas with momentum.
//!
//! There is no computation graph and no automatic differentiation: every
//! pass executes immediately with `ndarray` arithmetic.
//!
//! ## Usage Example
//!
//! ```no_run
//! use ndarray::arr2;
//! use rustymlp::data::SupervisedLearningData;
//! use rustymlp::losses::Loss;
//! use rustymlp::nn::{Activation, Layer, Network};
//! use rustymlp::training::{FlatLearningRate, GradientDescent, Trainer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // 1. Build a 2 -> 3 -> 1 network.
//! let mut network = Network::new();
//! network
//!     .add_layer(Layer::random(3, 2, -0.5, 0.5, Activation::Sigmoid)?)
//!     .add_layer(Layer::random(1, 3, -0.5, 0.5, Activation::Sigmoid)?);
//! network.build()?;
//!
//! // 2. Describe the training examples, one column per example.
//! let data = SupervisedLearningData::new(
//!     arr2(&[[0.0, 0.0, 1.0, 1.0], [0.0, 1.0, 0.0, 1.0]]),
//!     arr2(&[[0.0, 1.0, 1.0, 0.0]]),
//! )?
//! .with_max_epochs(5_000)
//! .with_min_error(0.01);
//!
//! // 3. Train and read the result back.
//! let trainer = GradientDescent::new(
//!     FlatLearningRate::new(0.5),
//!     Loss::MeanSquaredError,
//!     data,
//!     4,
//! )?;
//! let outcome = trainer.train(&mut network)?;
//! println!("epochs: {}, converged: {}", outcome.epochs, outcome.converged);
//! # Ok(())
//! # }
//! ```

// Declare public modules that constitute the core library API.
pub mod data;
pub mod losses;
pub mod nn;
pub mod training;
