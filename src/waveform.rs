//! Continuous square-wave hypotheses and their discretization.
//!
//! A hypothesis is a periodic indicator function on the measurement domain
//! [0, 1): a sample at position x is on iff `(x - phase) mod lambda` falls
//! in `[0, width)`. Quantization samples the indicator at bin centers, which
//! keeps every sample well away from the half-open interval edges.

use serde::{Deserialize, Serialize};

use crate::{BitPattern, Result, SqwaveError, NBITS};

/// Width of one measurement bin.
const BIN: f64 = 1.0 / NBITS as f64;

/// Binary square wave on the unit measurement domain.
///
/// The raw modulo is normalized into `[0, lambda)`, so the indicator is
/// exact for any real x, including x < phase. The on-interval is half-open:
/// a value landing exactly on `width` is off.
pub fn squarewave(lambda: f64, phase: f64, width: f64, x: f64) -> bool {
    let mut val = (x - phase) % lambda;
    if val < 0.0 {
        val += lambda;
    }
    val >= 0.0 && val < width
}

/// A continuous square-wave parameterization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    /// Wavelength of the square wave.
    pub lambda: f64,
    /// Position of the leading edge of the first wave.
    pub phase: f64,
    /// Width of the on-interval within one period.
    pub width: f64,
}

impl Hypothesis {
    /// Create a new hypothesis.
    pub const fn new(lambda: f64, phase: f64, width: f64) -> Self {
        Self {
            lambda,
            phase,
            width,
        }
    }

    /// Hypothesis at integer quantization levels, in units of one bin.
    pub fn from_levels(ilambda: usize, iphase: usize, iwidth: usize) -> Self {
        Self::new(
            ilambda as f64 * BIN,
            iphase as f64 * BIN,
            iwidth as f64 * BIN,
        )
    }

    /// Check the degeneracy constraints: at least two bins per cycle, a
    /// wavelength no longer than half the domain, a phase within one period,
    /// and a width between one bin and one bin short of the period.
    pub fn is_valid(&self) -> bool {
        self.lambda >= 2.0 * BIN
            && self.lambda <= 0.5
            && self.phase >= 0.0
            && self.phase <= self.lambda
            && self.width >= BIN
            && self.width <= self.lambda - BIN
    }

    /// Reject degenerate parameter triples.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(SqwaveError::InvalidHypothesis {
                lambda: self.lambda,
                phase: self.phase,
                width: self.width,
            })
        }
    }

    /// Quantize to a fixed-width pattern by sampling at bin centers.
    pub fn quantize(&self) -> Result<BitPattern> {
        self.validate()?;
        Ok(self.sample())
    }

    /// Bin-center sampling without the validity check. Library construction
    /// enumerates only triples its loop bounds already keep valid.
    pub(crate) fn sample(&self) -> BitPattern {
        let mut bits = BitPattern::empty();
        for ibit in 0..NBITS {
            let x = (ibit as f64 + 0.5) * BIN;
            bits.set(ibit, squarewave(self.lambda, self.phase, self.width, x));
        }
        bits
    }
}
