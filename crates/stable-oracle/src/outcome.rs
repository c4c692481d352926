//! Outcome oracle: judges a matcher by its final matching alone.
//!
//! A matching passes when it is a complete bijection between companies and
//! candidates and no company/candidate pair prefers each other to the
//! partners they were given.

use rand::Rng;

use crate::config::OracleConfig;
use crate::matcher::StableMatcher;
use crate::matching::{Assignment, Hire};
use crate::prefs::{PreferenceMatrix, check_same_size};
use crate::rank::RankTable;
use crate::trials::run_trials;
use crate::violation::{OracleFailure, OracleKind, OracleSummary, Violation};

/// Check one matching against fixed preferences.
///
/// # Errors
///
/// Returns the first [`Violation`] found: a precondition failure if the
/// matrices differ in size, a structural failure if `hires` is not a complete
/// bijection, or a blocking pair.
pub fn check_outcome(
    company_prefs: &PreferenceMatrix,
    candidate_prefs: &PreferenceMatrix,
    hires: &[Hire],
) -> Result<(), Violation> {
    let size = check_same_size(company_prefs, candidate_prefs)?;
    let assignment = Assignment::from_hires(hires, size)?;

    let company_ranks = RankTable::from_preferences(company_prefs);
    let candidate_ranks = RankTable::from_preferences(candidate_prefs);

    for company in 0..size {
        let Some(company_partner) = assignment.company_partner(company) else {
            return Err(Violation::UnmatchedCompany { company });
        };
        for candidate in 0..size {
            if candidate == company_partner
                || !company_ranks.prefers(company, candidate, company_partner)
            {
                continue;
            }
            let Some(candidate_partner) = assignment.candidate_partner(candidate) else {
                return Err(Violation::UnmatchedCandidate { candidate });
            };
            if candidate_ranks.prefers(candidate, company, candidate_partner) {
                return Err(Violation::BlockingPair {
                    company,
                    candidate,
                    company_partner,
                    candidate_partner,
                });
            }
        }
    }

    Ok(())
}

/// Run `matcher` on `config.trials` random markets and check every result
/// with [`check_outcome`].
///
/// # Errors
///
/// Returns an [`OracleFailure`] describing the first failing trial.
pub fn verify_outcome<M, R>(
    matcher: &M,
    config: &OracleConfig,
    rng: &mut R,
) -> Result<OracleSummary, OracleFailure>
where
    M: StableMatcher + ?Sized,
    R: Rng + ?Sized,
{
    run_trials(
        OracleKind::Outcome,
        config,
        rng,
        |company_prefs, candidate_prefs| {
            let hires = matcher.find_matching(company_prefs, candidate_prefs);
            check_outcome(company_prefs, candidate_prefs, &hires).map(|()| 0)
        },
    )
}
