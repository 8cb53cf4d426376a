use crate::config::Config;
use crate::engine::Engine;
use crate::plot::draw_distribution_graph;
use crate::stats::{compare, exact_distribution, exact_probability_percent};
use anyhow::{Context, Result};

pub struct Manager {
    cfg: Config,
}

impl Manager {
    pub fn new(cfg: Config) -> Result<Self> {
        cfg.validate().context("failed to validate config")?;
        log::info!("{cfg:#?}");

        Ok(Self { cfg })
    }

    /// Simulate, print and draw the distribution, then print the exact probabilities.
    pub fn run(&self) -> Result<()> {
        let sim = &self.cfg.sim;

        let mut engine = Engine::new(sim.seed).context("failed to construct engine")?;
        let experiment = engine
            .run_trials(sim.n_cases, sim.flips_per_case)
            .context("failed to run trials")?;
        let dist = &experiment.distribution;

        println!("{dist}");

        let n_flips = sim.flips_per_case as f64;
        log::info!(
            "heads mean {:.4} (expected {:.4}), std dev {:.4} (expected {:.4})",
            experiment.heads.mean,
            n_flips / 2.0,
            experiment.heads.std_dev,
            n_flips.sqrt() / 2.0,
        );

        let exact = exact_distribution(sim.flips_per_case)
            .context("failed to compute exact distribution")?;
        let cmp = compare(dist, &exact).context("failed to compare distributions")?;
        log::info!(
            "max deviation from exact {:.4} pp, total variation {:.4} pp",
            cmp.max_abs_diff,
            cmp.total_variation,
        );

        draw_distribution_graph(dist, self.cfg.output.plot_file())
            .context("failed to draw distribution graph")?;

        for &(n_flips, k_heads) in &self.cfg.report.exact {
            let prob = exact_probability_percent(n_flips, k_heads)
                .with_context(|| format!("failed to compute P({k_heads} heads in {n_flips} flips)"))?;
            // Space in place of the sign, as the value is never negative.
            println!("Exact P({k_heads} heads in {n_flips} flips):  {prob:.5}%");
        }

        Ok(())
    }
}
