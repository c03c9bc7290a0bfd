//! Bernoulli corruption of model patterns into synthetic observations.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{BitPattern, NBITS};

/// Injected uniform sampler over [0, 1).
///
/// Any rand generator qualifies through the blanket implementation; tests
/// may substitute a scripted sequence to pin observations exactly.
pub trait UniformSource {
    /// Next uniform value in [0, 1).
    fn next_uniform(&mut self) -> f64;
}

impl<R: Rng> UniformSource for R {
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Per-bin independent corruption model.
///
/// A signal bin survives with probability `efficiency`; a background bin
/// stays off with probability `purity`. Unit efficiency and purity
/// reproduce the model exactly; zero on either side is maximally
/// adversarial.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseModel {
    /// Probability that a true signal bin is observed on.
    pub efficiency: f64,
    /// Probability that a true background bin is observed off.
    pub purity: f64,
}

impl NoiseModel {
    /// Create a new noise model. Both parameters live in [0, 1].
    pub const fn new(efficiency: f64, purity: f64) -> Self {
        Self { efficiency, purity }
    }

    /// No corruption at all.
    pub const fn noiseless() -> Self {
        Self::new(1.0, 1.0)
    }

    /// Mild detector losses and contamination.
    pub const fn low_noise() -> Self {
        Self::new(0.95, 0.98)
    }

    /// Heavily degraded detector.
    pub const fn high_noise() -> Self {
        Self::new(0.7, 0.8)
    }

    /// Corrupt `model` bin by bin.
    ///
    /// Exactly one uniform draw is consumed per bin regardless of outcome,
    /// so a fixed source stream pins the whole observation.
    pub fn perturb(&self, model: BitPattern, source: &mut impl UniformSource) -> BitPattern {
        let mut observed = BitPattern::empty();
        for ibit in 0..NBITS {
            let r = source.next_uniform();
            let on = if model.get(ibit) {
                r < self.efficiency
            } else {
                r > self.purity
            };
            observed.set(ibit, on);
        }
        observed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Hypothesis;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Replays a fixed value sequence, cycling when exhausted.
    struct ScriptedSource {
        values: Vec<f64>,
        cursor: usize,
    }

    impl ScriptedSource {
        fn new(values: Vec<f64>) -> Self {
            Self { values, cursor: 0 }
        }
    }

    impl UniformSource for ScriptedSource {
        fn next_uniform(&mut self) -> f64 {
            let value = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            value
        }
    }

    fn truth_pattern() -> BitPattern {
        Hypothesis::from_levels(8, 2, 3).quantize().unwrap()
    }

    #[test]
    fn test_noiseless_is_identity() {
        let noise = NoiseModel::noiseless();
        let model = truth_pattern();

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..32 {
            assert_eq!(noise.perturb(model, &mut rng), model);
        }

        let mut scripted = ScriptedSource::new(vec![0.0, 0.5, 0.999_999]);
        assert_eq!(noise.perturb(model, &mut scripted), model);
    }

    #[test]
    fn test_zero_efficiency_clears_signal_bins() {
        let noise = NoiseModel::new(0.0, 1.0);
        let model = truth_pattern();

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let observed = noise.perturb(model, &mut rng);
        assert!(observed.is_empty());
    }

    #[test]
    fn test_zero_purity_floods_background_bins() {
        let noise = NoiseModel::new(1.0, 0.0);
        let model = truth_pattern();

        let mut scripted = ScriptedSource::new(vec![0.5]);
        let observed = noise.perturb(model, &mut scripted);
        assert_eq!(observed.count_ones(), NBITS);
    }

    #[test]
    fn test_one_draw_per_bin() {
        let noise = NoiseModel::low_noise();
        let model = truth_pattern();

        let mut scripted = ScriptedSource::new(vec![0.5]);
        noise.perturb(model, &mut scripted);
        assert_eq!(scripted.cursor, NBITS);
    }

    #[test]
    fn test_scripted_golden_observation() {
        // Alternating draws 0.25 / 0.75 at efficiency = purity = 0.5: a
        // signal bin survives iff its draw is 0.25 (even bins), a background
        // bin floods iff its draw is 0.75 (odd bins).
        let noise = NoiseModel::new(0.5, 0.5);
        let model = truth_pattern();

        let draws: Vec<f64> = (0..NBITS)
            .map(|i| if i % 2 == 0 { 0.25 } else { 0.75 })
            .collect();
        let mut scripted = ScriptedSource::new(draws);
        let observed = noise.perturb(model, &mut scripted);

        let mut expected = BitPattern::empty();
        for surviving_signal in [2, 4, 10, 12, 18, 20, 26, 28, 34] {
            expected.set(surviving_signal, true);
        }
        for flooded_background in [1, 5, 7, 9, 13, 15, 17, 21, 23, 25, 29, 31, 33] {
            expected.set(flooded_background, true);
        }

        assert_eq!(observed, expected);
        assert_eq!(observed.hamming_distance(model), 18);
    }
}
