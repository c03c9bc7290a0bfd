//! Monte Carlo instrumentation around the matching core.
//!
//! Synthesizes noisy observations from a known ground truth, times each
//! best-match search, and aggregates recovery statistics. Nothing in the
//! core modules depends on this; it consumes match results the way an
//! external analysis harness would.

pub mod histogram;
pub mod monte_carlo;

pub use histogram::Histogram;
pub use monte_carlo::{
    HistogramSink, JsonlSink, MetricsSink, RecoverySimulator, RunSummary, SimulatorConfig,
    TrialOutcome,
};
