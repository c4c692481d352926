//! Campaign runner for seeded oracle campaigns.
//!
//! Runs the outcome or trace oracle once per seed, collecting pass/fail
//! results and identifying the first failing seed for replay. Unlike a
//! single oracle run, a campaign keeps going after a failing seed.

use std::ops::Range;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::OracleConfig;
use crate::matcher::{StableMatcher, StableMatcherWithTrace};
use crate::outcome::verify_outcome;
use crate::trace::verify_trace;
use crate::violation::{OracleFailure, OracleSummary};

/// Campaign-level configuration: which seeds to run and what each oracle
/// run looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Range of seeds to execute, e.g., `0..100`.
    pub seed_range: Range<u64>,
    /// Trials and market size for every seed.
    #[serde(default)]
    pub oracle: OracleConfig,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            seed_range: 0..100,
            oracle: OracleConfig::default(),
        }
    }
}

impl CampaignConfig {
    /// Validate configuration before running.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed range is empty or the oracle config is
    /// invalid.
    pub fn validate(&self) -> Result<()> {
        if self.seed_range.is_empty() {
            bail!("seed_range must not be empty");
        }
        self.oracle.validate()
    }
}

/// Failure details for a single seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFailure {
    /// The seed that failed.
    pub seed: u64,
    /// Trial within the seed's run that failed.
    pub trial: usize,
    /// Human-readable violation.
    pub violation: String,
}

/// Aggregate report produced by a campaign run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignReport {
    /// Total seeds executed.
    pub seeds_run: usize,
    /// Seeds whose every trial passed.
    pub seeds_passed: usize,
    /// First seed that failed (for prioritized replay).
    pub first_failure: Option<u64>,
    /// All seed failures with violation details.
    pub failures: Vec<SeedFailure>,
}

impl CampaignReport {
    /// True if every seed passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Render the report as pretty-printed JSON for harness output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize campaign report")
    }
}

/// Run the outcome oracle against `matcher` for every seed in the config.
///
/// # Errors
///
/// Returns an error if config validation fails.
pub fn run_outcome_campaign<M>(matcher: &M, config: &CampaignConfig) -> Result<CampaignReport>
where
    M: StableMatcher + ?Sized,
{
    run_campaign(config, |seed| replay_outcome_seed(matcher, seed, &config.oracle))
}

/// Run the trace oracle against `matcher` for every seed in the config.
///
/// # Errors
///
/// Returns an error if config validation fails.
pub fn run_trace_campaign<M>(matcher: &M, config: &CampaignConfig) -> Result<CampaignReport>
where
    M: StableMatcherWithTrace + ?Sized,
{
    run_campaign(config, |seed| replay_trace_seed(matcher, seed, &config.oracle))
}

/// Rerun the outcome oracle for one seed, returning the full result.
///
/// # Errors
///
/// Returns the [`OracleFailure`] of the first failing trial, including that
/// trial's generated preferences.
pub fn replay_outcome_seed<M>(
    matcher: &M,
    seed: u64,
    oracle: &OracleConfig,
) -> std::result::Result<OracleSummary, OracleFailure>
where
    M: StableMatcher + ?Sized,
{
    verify_outcome(matcher, oracle, &mut ChaCha8Rng::seed_from_u64(seed))
}

/// Rerun the trace oracle for one seed, returning the full result.
///
/// # Errors
///
/// Returns the [`OracleFailure`] of the first failing trial, including that
/// trial's generated preferences.
pub fn replay_trace_seed<M>(
    matcher: &M,
    seed: u64,
    oracle: &OracleConfig,
) -> std::result::Result<OracleSummary, OracleFailure>
where
    M: StableMatcherWithTrace + ?Sized,
{
    verify_trace(matcher, oracle, &mut ChaCha8Rng::seed_from_u64(seed))
}

fn run_campaign<F>(config: &CampaignConfig, mut run_seed: F) -> Result<CampaignReport>
where
    F: FnMut(u64) -> std::result::Result<OracleSummary, OracleFailure>,
{
    config.validate()?;

    let mut seeds_run = 0_usize;
    let mut seeds_passed = 0_usize;
    let mut first_failure: Option<u64> = None;
    let mut failures = Vec::new();

    for seed in config.seed_range.clone() {
        seeds_run += 1;

        match run_seed(seed) {
            Ok(_) => {
                seeds_passed += 1;
            }
            Err(failure) => {
                if first_failure.is_none() {
                    first_failure = Some(seed);
                }
                failures.push(SeedFailure {
                    seed,
                    trial: failure.trial,
                    violation: failure.violation.to_string(),
                });
            }
        }
    }

    info!(
        seeds_run,
        seeds_passed,
        first_failure = ?first_failure,
        "campaign complete"
    );

    Ok(CampaignReport {
        seeds_run,
        seeds_passed,
        first_failure,
        failures,
    })
}
