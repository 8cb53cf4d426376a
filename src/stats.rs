use crate::model::Distribution;
use crate::utils::check_num;
use anyhow::{Context, Result, bail};
use std::f64::consts::LN_2;

/// Online mean and sample variance (Welford).
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct AccumulatorReport {
    pub mean: f64,
    pub std_dev: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            n_vals: 0,
            mean: 0.0,
            diff_2_sum: 0.0,
        }
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;
    }

    pub fn report(&self) -> AccumulatorReport {
        AccumulatorReport {
            mean: if self.n_vals > 0 { self.mean } else { f64::NAN },
            std_dev: if self.n_vals > 1 {
                (self.diff_2_sum / (self.n_vals as f64 - 1.0)).sqrt()
            } else {
                f64::NAN
            },
        }
    }
}

/// Largest number of flips accepted by the simulator and the exact calculator.
pub const MAX_FLIPS: usize = 1_000_000;

/// Largest number of flips for which the binomial coefficient is computed exactly.
const MAX_EXACT_FLIPS: u64 = 64;

/// Probability, in percent, of exactly `k_heads` heads in `n_flips` fair coin flips.
///
/// Computed as `C(n_flips, k_heads) / 2^n_flips * 100`, in time linear in
/// `min(k_heads, n_flips - k_heads)`.
///
/// # Errors
/// Returns an error if `n_flips` is outside `[0, MAX_FLIPS]` or `k_heads` is
/// outside `[0, n_flips]`.
pub fn exact_probability_percent(n_flips: i64, k_heads: i64) -> Result<f64> {
    check_num(n_flips, 0..=MAX_FLIPS as i64).context("invalid number of flips")?;
    check_num(k_heads, 0..=n_flips).context("invalid number of heads")?;

    let n = n_flips as u64;
    // C(n, k) == C(n, n - k); walking the shorter side keeps both exactly equal.
    let k = k_heads.min(n_flips - k_heads) as u64;

    let prob = if n <= MAX_EXACT_FLIPS {
        let mut coef: u128 = 1;
        for i in 0..k {
            coef = coef * (n - i) as u128 / (i + 1) as u128;
        }
        coef as f64 / 2.0_f64.powi(n as i32)
    } else {
        let ln_coef: f64 = (0..k)
            .map(|i| ((n - i) as f64).ln() - ((i + 1) as f64).ln())
            .sum();
        (ln_coef - n as f64 * LN_2).exp()
    };

    Ok(100.0 * prob)
}

/// Exact binomial percentages for every heads count in `[0, n_flips]`.
pub fn exact_distribution(n_flips: usize) -> Result<Distribution> {
    let n = i64::try_from(n_flips).context("number of flips does not fit in i64")?;
    let pcts = (0..=n)
        .map(|k| exact_probability_percent(n, k))
        .collect::<Result<Vec<_>>>()?;
    Ok(Distribution::new(pcts))
}

/// Gap between an empirical and an exact distribution, in percentage points.
#[derive(Debug, Clone, Copy)]
pub struct Comparison {
    pub max_abs_diff: f64,
    pub total_variation: f64,
}

pub fn compare(empirical: &Distribution, exact: &Distribution) -> Result<Comparison> {
    let (len_a, len_b) = (empirical.len(), exact.len());
    if len_a != len_b {
        bail!("distributions must cover the same heads counts, but have {len_a} and {len_b}");
    }

    let diffs: Vec<f64> = empirical
        .iter()
        .zip(exact.iter())
        .map(|((_, emp), (_, exa))| (emp - exa).abs())
        .collect();

    Ok(Comparison {
        max_abs_diff: diffs.iter().copied().fold(0.0, f64::max),
        total_variation: diffs.iter().sum::<f64>() / 2.0,
    })
}
