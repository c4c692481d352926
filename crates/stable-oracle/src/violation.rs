use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::Side;
use crate::prefs::{PreferenceError, PreferenceMatrix};

// ── Invariant violation diagnostics ──────────────────────────────────────────

/// The first invariant a matching or trace was found to break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum Violation {
    /// The inputs themselves were malformed.
    #[error("precondition: {0}")]
    Precondition(#[from] PreferenceError),

    /// The matching does not have one hire per company.
    ///
    /// Emitted by `Assignment::from_hires`.
    #[error("expected {expected} hires, got {actual}")]
    WrongHireCount {
        /// Market size.
        expected: usize,
        /// Hires returned.
        actual: usize,
    },

    /// A hire names a company id outside the market.
    #[error("hire {index} names company {company}, outside 0..{size}")]
    CompanyOutOfRange {
        /// Position of the hire in the matching.
        index: usize,
        /// The offending id.
        company: usize,
        /// Market size.
        size: usize,
    },

    /// A hire names a candidate id outside the market.
    #[error("hire {index} names candidate {candidate}, outside 0..{size}")]
    CandidateOutOfRange {
        /// Position of the hire in the matching.
        index: usize,
        /// The offending id.
        candidate: usize,
        /// Market size.
        size: usize,
    },

    /// A company appears in more than one hire.
    #[error("hire {index} matches company {company}, which is already matched")]
    DuplicateCompany {
        /// Position of the second hire naming the company.
        index: usize,
        /// The repeated company.
        company: usize,
    },

    /// A candidate appears in more than one hire.
    #[error("hire {index} matches candidate {candidate}, who is already matched")]
    DuplicateCandidate {
        /// Position of the second hire naming the candidate.
        index: usize,
        /// The repeated candidate.
        candidate: usize,
    },

    /// A company is missing from the matching.
    #[error("company {company} is left unmatched")]
    UnmatchedCompany {
        /// Lowest unmatched company.
        company: usize,
    },

    /// A candidate is missing from the matching.
    #[error("candidate {candidate} is left unmatched")]
    UnmatchedCandidate {
        /// Lowest unmatched candidate.
        candidate: usize,
    },

    /// A company and a candidate both prefer each other to their partners.
    ///
    /// Emitted by `check_outcome`.
    #[error(
        "blocking pair: company {company} (matched to candidate {company_partner}) and \
         candidate {candidate} (matched to company {candidate_partner}) prefer each other"
    )]
    BlockingPair {
        company: usize,
        candidate: usize,
        /// Candidate the company was matched to.
        company_partner: usize,
        /// Company the candidate was matched to.
        candidate_partner: usize,
    },

    /// A trace event names a proposer outside the market.
    #[error("trace[{index}]: proposing {side} {from} is outside 0..{size}")]
    ProposerOutOfRange {
        /// Position in the trace.
        index: usize,
        side: Side,
        from: usize,
        size: usize,
    },

    /// A trace event names a recipient outside the market.
    #[error("trace[{index}]: {side} {from} proposes to {to}, outside 0..{size}")]
    RecipientOutOfRange {
        /// Position in the trace.
        index: usize,
        /// Proposer's side.
        side: Side,
        from: usize,
        to: usize,
        size: usize,
    },

    /// A matched agent made a proposal.
    #[error("trace[{index}]: {side} {from} proposes while matched to {partner}")]
    ProposerAlreadyMatched {
        /// Position in the trace.
        index: usize,
        side: Side,
        from: usize,
        /// The partner it already had.
        partner: usize,
    },

    /// An agent proposed again after working through its whole list.
    #[error("trace[{index}]: {side} {from} proposes after exhausting its preferences")]
    PreferencesExhausted {
        /// Position in the trace.
        index: usize,
        side: Side,
        from: usize,
    },

    /// An agent skipped or repeated an entry of its preference list.
    #[error("trace[{index}]: {side} {from} proposes to {actual}, expected {expected}")]
    OutOfOrderProposal {
        /// Position in the trace.
        index: usize,
        side: Side,
        from: usize,
        /// Next entry of the proposer's list.
        expected: usize,
        /// Recipient named in the trace.
        actual: usize,
    },

    /// Replaying the trace disagrees with the declared matching.
    ///
    /// Emitted by `check_trace`.
    #[error("{side} {agent}: replay gives partner {simulated:?}, declared partner is {declared}")]
    PartnerMismatch {
        side: Side,
        agent: usize,
        /// Partner after replay, `None` if the replay left it unmatched.
        simulated: Option<usize>,
        /// Partner in the declared matching.
        declared: usize,
    },
}

// ── Run results ───────────────────────────────────────────────────────────────

/// Which oracle produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleKind {
    Outcome,
    Trace,
}

/// Returned when every trial of a run passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleSummary {
    pub kind: OracleKind,
    /// Trials executed.
    pub trials: usize,
    /// Market size of every trial.
    pub size: usize,
    /// Trace events replayed across all trials (zero for the outcome oracle).
    pub offers_replayed: usize,
}

/// The first failed trial of a run, with the inputs needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{kind:?} oracle: trial {trial} of {trials} failed: {violation}")]
pub struct OracleFailure {
    pub kind: OracleKind,
    /// Zero-based index of the failing trial.
    pub trial: usize,
    /// Trials configured for the run.
    pub trials: usize,
    /// Company preferences generated for the failing trial.
    pub company_prefs: PreferenceMatrix,
    /// Candidate preferences generated for the failing trial.
    pub candidate_prefs: PreferenceMatrix,
    #[source]
    pub violation: Violation,
}
