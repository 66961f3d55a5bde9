//! # Neural Network Module
//!
//! This module contains the building blocks of the feed-forward engine.
//!
//! A network is an ordered chain of layers. Each [`Layer`] owns one weight
//! matrix (one row per neuron, the last column is the bias weight) and the
//! transient state of its most recent forward pass. The [`Network`] owns the
//! layer sequence, wires the neighbor links on `build` and drives the
//! forward pass on `run`.
//!
//! ## Available Pieces
//!
//! - [`Activation`]: the closed set of per-neuron activation strategies
//! - [`Layer`]: one stage of neurons sharing a weight matrix
//! - [`Network`]: the layer chain with its build/run lifecycle

pub mod activations;
pub mod layer;
pub mod network;

pub use activations::Activation;
pub use layer::Layer;
pub use network::Network;

use thiserror::Error;

pub type NnResult<T> = std::result::Result<T, NetworkError>;

/// Ошибки построения и выполнения сети.
///
/// Ошибки конструирования возникают сразу в нарушающем вызове; ошибки
/// состояния оставляют объект без изменений.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("layer must be created with weights")]
    EmptyWeights,
    #[error("layer must be created with neurons")]
    NoNeurons,
    #[error("layer must be created with inputs")]
    NoInputs,
    #[error("minimum weight {min} must be less than maximum weight {max}")]
    InvalidWeightRange { min: f32, max: f32 },
    #[error("activation parameter {name} must be non-negative, got {value}")]
    InvalidActivationParameter { name: &'static str, value: f32 },
    #[error("network must have layers to build")]
    NoLayers,
    #[error("network must be built before being run")]
    NotBuilt,
    #[error("network must be run before outputs can be read")]
    NotRun,
    #[error("network must have more than 0 inputs")]
    EmptyInputs,
    #[error("layer expected {expected} inputs, got {got}")]
    InputLengthMismatch { expected: usize, got: usize },
    #[error("previous layer has no outputs to activate from")]
    NoPreviousOutputs,
    #[error("layer has not been activated")]
    NotActivated,
}
