//! Trace oracle: replays a matcher's declared proposals through an
//! independent deferred-acceptance simulation.
//!
//! Every event must be a legal move for the proposer (unmatched, proposing to
//! the next entry of its own list), and the state the replay ends in must be
//! exactly the matching the run declared. Either side may propose, so the
//! same replay checks company-proposing and candidate-proposing runs.

use rand::Rng;
use tracing::trace;

use crate::config::OracleConfig;
use crate::matcher::StableMatcherWithTrace;
use crate::matching::{Assignment, Offer, Side, TraceRun};
use crate::prefs::{PreferenceMatrix, check_same_size};
use crate::rank::RankTable;
use crate::trials::run_trials;
use crate::violation::{OracleFailure, OracleKind, OracleSummary, Violation};

/// Preferences of one side, with their rank index.
#[derive(Debug)]
struct SideBook<'a> {
    prefs: &'a PreferenceMatrix,
    ranks: RankTable,
}

impl<'a> SideBook<'a> {
    fn new(prefs: &'a PreferenceMatrix) -> Self {
        Self {
            prefs,
            ranks: RankTable::from_preferences(prefs),
        }
    }
}

/// Mutable state of a trace replay: who is matched to whom, and how far
/// down its list each agent has proposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    matches: Assignment,
    next_company: Vec<usize>,
    next_candidate: Vec<usize>,
}

impl SimulationState {
    /// Everyone unmatched, every cursor at the top of its list.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            matches: Assignment::unmatched(size),
            next_company: vec![0; size],
            next_candidate: vec![0; size],
        }
    }

    /// Current matches.
    #[must_use]
    pub const fn matches(&self) -> &Assignment {
        &self.matches
    }

    /// Index into `agent`'s list of the next counterpart it may propose to.
    #[must_use]
    pub fn cursor(&self, side: Side, agent: usize) -> Option<usize> {
        self.cursors(side).get(agent).copied()
    }

    fn cursors(&self, side: Side) -> &[usize] {
        match side {
            Side::Company => &self.next_company,
            Side::Candidate => &self.next_candidate,
        }
    }

    fn advance(&mut self, side: Side, agent: usize) {
        match side {
            Side::Company => self.next_company[agent] += 1,
            Side::Candidate => self.next_candidate[agent] += 1,
        }
    }

    /// Pair `proposer` on `side` with `recipient` on the other side.
    fn pair(&mut self, side: Side, proposer: usize, recipient: usize) {
        match side {
            Side::Company => self.matches.pair(proposer, recipient),
            Side::Candidate => self.matches.pair(recipient, proposer),
        }
    }

    /// Apply trace event `index`.
    fn apply(
        &mut self,
        index: usize,
        offer: &Offer,
        proposers: &SideBook<'_>,
        recipients: &SideBook<'_>,
    ) -> Result<(), Violation> {
        let Offer { from, to, side } = *offer;
        let size = self.matches.size();

        if from >= size {
            return Err(Violation::ProposerOutOfRange {
                index,
                side,
                from,
                size,
            });
        }
        if to >= size {
            return Err(Violation::RecipientOutOfRange {
                index,
                side,
                from,
                to,
                size,
            });
        }
        if let Some(partner) = self.matches.partner(side, from) {
            return Err(Violation::ProposerAlreadyMatched {
                index,
                side,
                from,
                partner,
            });
        }

        let cursor = self.cursors(side)[from];
        let Some(expected) = proposers.prefs.choice(from, cursor) else {
            return Err(Violation::PreferencesExhausted { index, side, from });
        };
        if to != expected {
            return Err(Violation::OutOfOrderProposal {
                index,
                side,
                from,
                expected,
                actual: to,
            });
        }
        self.advance(side, from);

        match self.matches.partner(side.other(), to) {
            None => {
                trace!(index, %side, from, to, "accepted by unmatched recipient");
                self.pair(side, from, to);
            }
            Some(current) if recipients.ranks.prefers(to, from, current) => {
                trace!(index, %side, from, to, jilted = current, "recipient switches");
                self.matches.clear(side, current);
                self.pair(side, from, to);
            }
            Some(_) => {
                trace!(index, %side, from, to, "rejected");
            }
        }
        Ok(())
    }
}

/// Replay `run.trace` against fixed preferences and compare the result with
/// `run.out`.
///
/// Returns the number of trace events replayed.
///
/// # Errors
///
/// Returns the first [`Violation`]: a precondition failure if the matrices
/// differ in size, an illegal trace event, a malformed declared matching, or
/// a disagreement between the replay and the declared matching.
pub fn check_trace(
    company_prefs: &PreferenceMatrix,
    candidate_prefs: &PreferenceMatrix,
    run: &TraceRun,
) -> Result<usize, Violation> {
    let size = check_same_size(company_prefs, candidate_prefs)?;
    let companies = SideBook::new(company_prefs);
    let candidates = SideBook::new(candidate_prefs);

    let mut state = SimulationState::new(size);
    for (index, offer) in run.trace.iter().enumerate() {
        let (proposers, recipients) = match offer.side {
            Side::Company => (&companies, &candidates),
            Side::Candidate => (&candidates, &companies),
        };
        state.apply(index, offer, proposers, recipients)?;
    }

    let declared = Assignment::from_hires(&run.out, size)?;
    for side in [Side::Company, Side::Candidate] {
        for agent in 0..size {
            let simulated = state.matches.partner(side, agent);
            let Some(declared) = declared.partner(side, agent) else {
                continue;
            };
            if simulated != Some(declared) {
                return Err(Violation::PartnerMismatch {
                    side,
                    agent,
                    simulated,
                    declared,
                });
            }
        }
    }

    Ok(run.trace.len())
}

/// Run `matcher` on `config.trials` random markets and check every trace with
/// [`check_trace`].
///
/// # Errors
///
/// Returns an [`OracleFailure`] describing the first failing trial.
pub fn verify_trace<M, R>(
    matcher: &M,
    config: &OracleConfig,
    rng: &mut R,
) -> Result<OracleSummary, OracleFailure>
where
    M: StableMatcherWithTrace + ?Sized,
    R: Rng + ?Sized,
{
    run_trials(
        OracleKind::Trace,
        config,
        rng,
        |company_prefs, candidate_prefs| {
            let run = matcher.find_matching_with_trace(company_prefs, candidate_prefs);
            check_trace(company_prefs, candidate_prefs, &run)
        },
    )
}
