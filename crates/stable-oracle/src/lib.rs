//! stable-oracle library.
//!
//! Correctness oracles for stable-matching implementations. A caller hands
//! in an opaque matcher; the oracles generate random company and candidate
//! preferences, run the matcher, and check either its final matching
//! ([`verify_outcome`]) or its full proposal trace ([`verify_trace`]).
//!
//! # Conventions
//!
//! - **Errors**: Oracle verdicts are typed ([`Violation`], [`OracleFailure`]);
//!   configuration and campaign setup use `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use stable_oracle::{Hire, Matching, OracleConfig, PreferenceMatrix, verify_outcome};
//!
//! // The only matching of a one-company market.
//! let matcher = |_: &PreferenceMatrix, _: &PreferenceMatrix| -> Matching { vec![Hire::new(0, 0)] };
//! let config = OracleConfig { trials: 10, size: 1 };
//! assert!(verify_outcome(&matcher, &config, &mut ChaCha8Rng::seed_from_u64(0)).is_ok());
//! ```

pub mod campaign;
pub mod config;
pub mod matcher;
pub mod matching;
pub mod outcome;
pub mod prefs;
pub mod rank;
pub mod trace;
mod trials;
pub mod violation;

pub use campaign::{
    CampaignConfig, CampaignReport, SeedFailure, replay_outcome_seed, replay_trace_seed,
    run_outcome_campaign, run_trace_campaign,
};
pub use config::{DEFAULT_SIZE, DEFAULT_TRIALS, OracleConfig};
pub use matcher::{StableMatcher, StableMatcherWithTrace};
pub use matching::{Assignment, Hire, Matching, Offer, Side, TraceRun};
pub use outcome::{check_outcome, verify_outcome};
pub use prefs::{PreferenceError, PreferenceMatrix, generate_preferences};
pub use rank::RankTable;
pub use trace::{SimulationState, check_trace, verify_trace};
pub use violation::{OracleFailure, OracleKind, OracleSummary, Violation};
