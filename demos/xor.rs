//! XOR Example - Training a small network to learn the XOR function.
//!
//! This example demonstrates:
//! - Building a 2 -> 4 -> 1 network from randomly initialized layers
//! - Describing the truth table as column-wise supervised data
//! - Training with backpropagation + gradient descent
//! - Reading the trained network's predictions back
//!
//! Run with: `cargo run --example xor`

use ndarray::{arr1, arr2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustymlp::data::SupervisedLearningData;
use rustymlp::losses::Loss;
use rustymlp::nn::{Activation, Layer, Network};
use rustymlp::training::{FlatLearningRate, GradientDescent, Trainer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== RustyMLP XOR Example ===\n");

    // XOR truth table
    // Input: [0,0] -> Output: 0
    // Input: [0,1] -> Output: 1
    // Input: [1,0] -> Output: 1
    // Input: [1,1] -> Output: 0
    let inputs = arr2(&[[0.0, 0.0, 1.0, 1.0], [0.0, 1.0, 0.0, 1.0]]);
    let expected = arr2(&[[0.0, 1.0, 1.0, 0.0]]);

    let mut rng = StdRng::seed_from_u64(42);
    let mut network = Network::new();
    network
        .add_layer(Layer::random_using(
            4,
            2,
            -0.5,
            0.5,
            Activation::Sigmoid,
            &mut rng,
        )?)
        .add_layer(Layer::random_using(
            1,
            4,
            -0.5,
            0.5,
            Activation::Sigmoid,
            &mut rng,
        )?);
    network.build()?;

    let data = SupervisedLearningData::new(inputs, expected)?
        .with_max_epochs(20_000)
        .with_min_error(0.01);

    let trainer = GradientDescent::new(
        FlatLearningRate::new(0.5),
        Loss::MeanSquaredError,
        data,
        4,
    )?;

    println!("Starting training...\n");
    let outcome = trainer.train(&mut network)?;
    println!(
        "Finished after {} epochs (converged: {}, batch loss: {:?})\n",
        outcome.epochs, outcome.converged, outcome.batch_loss
    );

    println!("Input      | Target | Prediction | Rounded");
    println!("-----------|--------|------------|--------");
    let cases = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
    let targets = [0.0, 1.0, 1.0, 0.0];
    for (case, target) in cases.iter().zip(targets) {
        network.run(&arr1(case))?;
        let prediction = network.outputs()?[0];
        let rounded = if prediction > 0.5 { 1.0 } else { 0.0 };
        let correct = if rounded == target { "ok" } else { "x" };
        println!(
            "[{:.0}, {:.0}]     |   {:.0}    |   {:.4}    |   {:.0}  {}",
            case[0], case[1], target, prediction, rounded, correct
        );
    }

    println!("\nTrained weights:\n{network}");
    println!("=== Training Complete ===");
    Ok(())
}
