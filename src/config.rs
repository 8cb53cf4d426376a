use crate::utils::check_num;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

/// Program configuration.
///
/// Every section and field falls back to the default program run when
/// omitted. See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sim: SimConfig,
    pub output: OutputConfig,
    pub report: ReportConfig,
}

/// Simulation parameters.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Number of independent trials.
    pub n_cases: usize,
    /// Number of coin flips per trial.
    pub flips_per_case: usize,
    /// Random number generator seed (seeded from the OS when absent).
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            n_cases: 200_000,
            flips_per_case: 10,
            seed: None,
        }
    }
}

/// Output parameters.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Chart image file; an empty path disables saving.
    pub plot_file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plot_file: Some(PathBuf::from("gaussian_distribution.png")),
        }
    }
}

impl OutputConfig {
    /// Chart image file, if saving is enabled.
    pub fn plot_file(&self) -> Option<&Path> {
        self.plot_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// Report parameters.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// `(n_flips, k_heads)` pairs whose exact probability is printed.
    pub exact: Vec<(i64, i64)>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            exact: vec![(10, 5), (10, 2)],
        }
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_num(self.sim.n_cases, 1..=100_000_000).context("invalid number of cases")?;
        check_num(self.sim.flips_per_case, 0..=10_000)
            .context("invalid number of flips per case")?;

        for (i_query, &(n_flips, k_heads)) in self.report.exact.iter().enumerate() {
            check_num(n_flips, 0..=10_000)
                .and_then(|_| check_num(k_heads, 0..=n_flips))
                .with_context(|| format!("invalid exact query {i_query}"))?;
        }

        Ok(())
    }
}
