use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::OracleConfig;
use crate::prefs::{PreferenceMatrix, generate_preferences};
use crate::violation::{OracleFailure, OracleKind, OracleSummary, Violation};

/// Drive `check` over `config.trials` freshly generated markets, stopping at
/// the first violation.
///
/// `check` returns the number of trace events it replayed on success.
pub(crate) fn run_trials<R, F>(
    kind: OracleKind,
    config: &OracleConfig,
    rng: &mut R,
    mut check: F,
) -> Result<OracleSummary, OracleFailure>
where
    R: Rng + ?Sized,
    F: FnMut(&PreferenceMatrix, &PreferenceMatrix) -> Result<usize, Violation>,
{
    let mut offers_replayed = 0_usize;

    for trial in 0..config.trials {
        let company_prefs = generate_preferences(config.size, rng);
        let candidate_prefs = generate_preferences(config.size, rng);
        debug!(?kind, trial, size = config.size, "running trial");

        match check(&company_prefs, &candidate_prefs) {
            Ok(offers) => offers_replayed += offers,
            Err(violation) => {
                warn!(?kind, trial, %violation, "oracle violation");
                return Err(OracleFailure {
                    kind,
                    trial,
                    trials: config.trials,
                    company_prefs,
                    candidate_prefs,
                    violation,
                });
            }
        }
    }

    info!(
        ?kind,
        trials = config.trials,
        size = config.size,
        offers_replayed,
        "oracle passed"
    );
    Ok(OracleSummary {
        kind,
        trials: config.trials,
        size: config.size,
        offers_replayed,
    })
}
