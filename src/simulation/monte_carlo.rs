//! Monte Carlo recovery harness.
//!
//! Runs high-statistics trials against a known ground truth: each trial
//! corrupts the truth pattern, times the best-match search, and hands the
//! per-trial record to a metrics sink for aggregation.

use std::io::Write;
use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::Histogram;
use crate::{Hypothesis, Matcher, ModelLibrary, NoiseModel, Result, NBITS};

/// One trial's metrics tuple.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// Trial number, from zero.
    pub trial: u64,
    /// Winning template index.
    pub best_index: usize,
    /// Winning Hamming distance.
    pub best_distance: usize,
    /// Hypothesis stored with the winning template.
    pub recovered: Hypothesis,
    /// Search latency in microseconds.
    pub elapsed_us: u64,
}

/// Consumer of per-trial records.
pub trait MetricsSink {
    /// Record one trial.
    fn record(&mut self, outcome: &TrialOutcome);
}

/// Histogram bank over the standard per-trial observables.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistogramSink {
    /// Winning template index.
    pub index: Histogram,
    /// Winning Hamming distance.
    pub distance: Histogram,
    /// Recovered wavelength.
    pub lambda: Histogram,
    /// Recovered phase.
    pub phase: Histogram,
    /// Recovered width.
    pub width: Histogram,
    /// Search latency in microseconds.
    pub elapsed_us: Histogram,
}

impl HistogramSink {
    /// Binning sized to a library of `library_size` templates.
    pub fn new(library_size: usize) -> Self {
        Self {
            index: Histogram::new(library_size + 1, -0.5, library_size as f64 + 0.5),
            distance: Histogram::new(NBITS + 1, -0.5, NBITS as f64 + 0.5),
            lambda: Histogram::new(100, 0.0, 0.6),
            phase: Histogram::new(100, 0.0, 1.0),
            width: Histogram::new(100, 0.0, 1.0),
            elapsed_us: Histogram::new(51, -0.5, 50.5),
        }
    }

    /// Drop all recorded entries, keeping the binning.
    pub fn reset(&mut self) {
        self.index.reset();
        self.distance.reset();
        self.lambda.reset();
        self.phase.reset();
        self.width.reset();
        self.elapsed_us.reset();
    }
}

impl MetricsSink for HistogramSink {
    fn record(&mut self, outcome: &TrialOutcome) {
        self.index.fill(outcome.best_index as f64);
        self.distance.fill(outcome.best_distance as f64);
        self.lambda.fill(outcome.recovered.lambda);
        self.phase.fill(outcome.recovered.phase);
        self.width.fill(outcome.recovered.width);
        self.elapsed_us.fill(outcome.elapsed_us as f64);
    }
}

/// Streams one JSON object per trial to a writer.
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Finish and hand the writer back.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MetricsSink for JsonlSink<W> {
    fn record(&mut self, outcome: &TrialOutcome) {
        match serde_json::to_string(outcome) {
            Ok(line) => {
                if let Err(err) = writeln!(self.writer, "{line}") {
                    warn!(%err, "failed to write trial record");
                }
            }
            Err(err) => warn!(%err, "failed to serialize trial record"),
        }
    }
}

/// Monte Carlo run configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Trials per run.
    pub trials: u64,
    /// Corruption applied to each synthesized observation.
    pub noise: NoiseModel,
    /// Random seed (None for entropy).
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            trials: 10_000,
            noise: NoiseModel::low_noise(),
            seed: Some(42),
        }
    }
}

impl SimulatorConfig {
    /// Quick smoke-level run.
    pub fn fast() -> Self {
        Self {
            trials: 500,
            ..Default::default()
        }
    }
}

/// Aggregate result of one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Ground truth the observations were synthesized from.
    pub truth: Hypothesis,
    /// Configuration of the run.
    pub config: SimulatorConfig,
    /// Wall-clock start of the run.
    pub started_at: DateTime<Utc>,
    /// Trials executed.
    pub trials: u64,
    /// Trials whose best match sat at distance zero.
    pub exact_matches: u64,
    /// Trials whose winning template reproduced the truth pattern bit for bit.
    pub pattern_recoveries: u64,
    /// Mean winning distance.
    pub mean_distance: f64,
    /// Largest winning distance seen.
    pub max_distance: usize,
    /// Mean search latency in microseconds.
    pub mean_elapsed_us: f64,
}

/// Ground-truth recovery harness: perturb, match, aggregate.
pub struct RecoverySimulator {
    matcher: Matcher,
    config: SimulatorConfig,
}

impl RecoverySimulator {
    /// Build a fresh library and matcher for this configuration.
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            matcher: Matcher::new(ModelLibrary::build()),
            config,
        }
    }

    /// Reuse an existing matcher.
    pub fn with_matcher(matcher: Matcher, config: SimulatorConfig) -> Self {
        Self { matcher, config }
    }

    /// The wrapped matcher.
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// The run configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run without an external sink.
    pub fn run(&self, truth: Hypothesis) -> Result<RunSummary> {
        struct NullSink;
        impl MetricsSink for NullSink {
            fn record(&mut self, _: &TrialOutcome) {}
        }
        self.run_with_sink(truth, &mut NullSink)
    }

    /// Synthesize and match `trials` observations of `truth`.
    pub fn run_with_sink(
        &self,
        truth: Hypothesis,
        sink: &mut dyn MetricsSink,
    ) -> Result<RunSummary> {
        let model = truth.quantize()?;
        let started_at = Utc::now();

        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        info!(trials = self.config.trials, "recovery run started");

        let mut exact_matches = 0u64;
        let mut pattern_recoveries = 0u64;
        let mut distance_sum = 0u64;
        let mut max_distance = 0usize;
        let mut elapsed_sum_us = 0u64;

        for trial in 0..self.config.trials {
            let observation = self.config.noise.perturb(model, &mut rng);

            let start = Instant::now();
            let result = self.matcher.best_overlap(observation)?;
            let elapsed_us = start.elapsed().as_micros() as u64;

            let winner = &self.matcher.library().templates()[result.index];

            if result.distance == 0 {
                exact_matches += 1;
            }
            if winner.bits == model {
                pattern_recoveries += 1;
            }
            distance_sum += result.distance as u64;
            max_distance = max_distance.max(result.distance);
            elapsed_sum_us += elapsed_us;

            sink.record(&TrialOutcome {
                trial,
                best_index: result.index,
                best_distance: result.distance,
                recovered: winner.hypothesis,
                elapsed_us,
            });
        }

        let denominator = self.config.trials.max(1) as f64;
        let summary = RunSummary {
            truth,
            config: self.config,
            started_at,
            trials: self.config.trials,
            exact_matches,
            pattern_recoveries,
            mean_distance: distance_sum as f64 / denominator,
            max_distance,
            mean_elapsed_us: elapsed_sum_us as f64 / denominator,
        };

        info!(
            pattern_recoveries = summary.pattern_recoveries,
            mean_distance = summary.mean_distance,
            "recovery run finished"
        );

        Ok(summary)
    }
}
