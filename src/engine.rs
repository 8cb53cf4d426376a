use crate::model::{Distribution, Experiment};
use crate::stats::{Accumulator, MAX_FLIPS};
use crate::utils::check_num;
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rand_distr::{Bernoulli, Distribution as _};

/// Coin flip simulation engine.
///
/// Owns the random number generator consumed by every run.
pub struct Engine {
    rng: ChaCha12Rng,
}

impl Engine {
    /// Create a new `Engine`, seeded with `seed` or from the OS when `None`.
    pub fn new(seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::try_from_os_rng().context("failed to seed rng from os")?,
        };
        Ok(Self { rng })
    }

    /// Flip a fair coin `flips_per_case` times in each of `n_cases` trials.
    ///
    /// Returns the percentage of trials with exactly `k` heads for every
    /// `k` in `[0, flips_per_case]`, rounded to 2 decimal places.
    ///
    /// # Errors
    /// Returns an error if `n_cases` is zero or `flips_per_case` exceeds [`MAX_FLIPS`].
    pub fn flip_coin(&mut self, n_cases: usize, flips_per_case: usize) -> Result<Distribution> {
        Ok(self.run_trials(n_cases, flips_per_case)?.distribution)
    }

    /// Same as [`Engine::flip_coin`], also reporting heads count statistics.
    pub fn run_trials(&mut self, n_cases: usize, flips_per_case: usize) -> Result<Experiment> {
        check_num(n_cases, 1..).context("invalid number of cases")?;
        check_num(flips_per_case, 0..=MAX_FLIPS).context("invalid number of flips per case")?;

        let coin = Bernoulli::new(0.5).context("failed to construct coin distribution")?;

        let mut tally = vec![0_usize; flips_per_case + 1];
        let mut heads_acc = Accumulator::new();

        let progress_step = (n_cases / 10).max(1);
        for i_case in 0..n_cases {
            let heads = (0..flips_per_case)
                .filter(|_| coin.sample(&mut self.rng))
                .count();
            tally[heads] += 1;
            heads_acc.add(heads as f64);

            if (i_case + 1) % progress_step == 0 {
                let progress = 100.0 * (i_case + 1) as f64 / n_cases as f64;
                log::info!("completed {progress:06.2}%");
            }
        }

        let pcts = tally
            .iter()
            .map(|&count| round_2(100.0 * count as f64 / n_cases as f64))
            .collect();

        Ok(Experiment {
            distribution: Distribution::new(pcts),
            heads: heads_acc.report(),
        })
    }
}

fn round_2(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}
