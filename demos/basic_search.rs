//! Basic template search demo.
//!
//! Demonstrates library construction, quantization, noisy observation
//! synthesis, best-match recovery, and a high-statistics run.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sqwave_core::{
    simulation::{HistogramSink, RecoverySimulator, SimulatorConfig},
    Hypothesis, Matcher, ModelLibrary, NoiseModel,
};

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Square-Wave Template Search Demo ===\n");

    // 1. Build the exhaustive template library
    let library = ModelLibrary::build();
    println!("Library size: {} templates", library.len());
    println!();

    let matcher = Matcher::new(library);

    // 2. Quantize a ground-truth hypothesis
    let truth = Hypothesis::new(8.0 / 36.0, 2.0 / 36.0, 3.0 / 36.0);
    let model = truth.quantize().expect("valid hypothesis");
    println!("Ground truth pattern: {model}");

    // 3. Match the clean pattern
    let exact = matcher.best_overlap(model).expect("non-empty library");
    println!(
        "Clean match: template {} at distance {}",
        exact.index, exact.distance
    );
    println!();

    // 4. Synthesize a noisy observation
    let noise = NoiseModel::new(0.9, 0.95);
    let mut rng = ChaCha8Rng::seed_from_u64(1_238_123);
    let observed = noise.perturb(model, &mut rng);
    println!("Noisy observation:    {observed}");

    let noisy = matcher.best_overlap(observed).expect("non-empty library");
    let winner = matcher
        .library()
        .template(noisy.index)
        .expect("index in range");
    println!(
        "Noisy match: template {} at distance {} -> lambda={:.4}, phase={:.4}, width={:.4}",
        noisy.index,
        noisy.distance,
        winner.hypothesis.lambda,
        winner.hypothesis.phase,
        winner.hypothesis.width
    );
    println!();

    // 5. High-statistics recovery run
    let config = SimulatorConfig {
        trials: 10_000,
        noise,
        seed: Some(1_238_123),
    };
    let simulator = RecoverySimulator::with_matcher(matcher, config);
    let mut sink = HistogramSink::new(simulator.matcher().library().len());
    let summary = simulator
        .run_with_sink(truth, &mut sink)
        .expect("valid truth");

    println!("=== Run Summary ===");
    println!("{}", serde_json::to_string_pretty(&summary).unwrap());
    println!();
    println!(
        "Recovery rate: {:.1}%",
        100.0 * summary.pattern_recoveries as f64 / summary.trials as f64
    );
    println!(
        "Distance histogram: {} entries, mean {:.3}",
        sink.distance.entries(),
        sink.distance.mean()
    );
    println!(
        "Search latency: mean {:.1} us",
        summary.mean_elapsed_us
    );
}
