//! Simulation data types.

use crate::stats::AccumulatorReport;
use std::fmt;

/// Percentage of trials per heads count.
///
/// Covers every heads count `k` in `[0, flips]`, including counts that
/// never occurred (stored as `0.0`).
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pcts: Vec<f64>,
}

impl Distribution {
    /// Create a distribution from one percentage per heads count, starting at `k = 0`.
    pub fn new(pcts: Vec<f64>) -> Self {
        Self { pcts }
    }

    /// Number of heads counts covered (`flips + 1`).
    pub fn len(&self) -> usize {
        self.pcts.len()
    }

    /// Number of flips per trial this distribution was built for.
    pub fn flips(&self) -> usize {
        self.pcts.len().saturating_sub(1)
    }

    /// Percentage for heads count `k`, if `k` is in the domain.
    pub fn get(&self, k: usize) -> Option<f64> {
        self.pcts.get(k).copied()
    }

    /// Iterate over `(k, percentage)` pairs in increasing `k`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.pcts.iter().copied().enumerate()
    }

    pub fn sum(&self) -> f64 {
        self.pcts.iter().sum()
    }

    pub fn max(&self) -> f64 {
        self.pcts.iter().copied().fold(0.0, f64::max)
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (k, pct) in self.iter() {
            if k > 0 {
                write!(f, ", ")?;
            }
            if pct.fract() == 0.0 {
                write!(f, "{k}: {pct:.1}")?;
            } else {
                write!(f, "{k}: {pct}")?;
            }
        }
        write!(f, "}}")
    }
}

/// Outcome of one simulator run.
#[derive(Debug)]
pub struct Experiment {
    /// Percentage of trials per heads count.
    pub distribution: Distribution,

    /// Sample mean and standard deviation of the heads count per trial.
    pub heads: AccumulatorReport,
}
