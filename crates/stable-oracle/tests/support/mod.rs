#![allow(dead_code)]

//! Reference and deliberately broken matchers used as implementations under
//! test.

use std::collections::VecDeque;

use stable_oracle::{Hire, Matching, Offer, PreferenceMatrix, RankTable, Side, TraceRun};

/// Textbook deferred acceptance with `side` proposing.
///
/// Free proposers are served from a queue; a rejected proposer goes back to
/// the front so it keeps proposing until it holds a partner.
pub fn deferred_acceptance(
    company_prefs: &PreferenceMatrix,
    candidate_prefs: &PreferenceMatrix,
    side: Side,
) -> TraceRun {
    let (proposers, recipients) = match side {
        Side::Company => (company_prefs, candidate_prefs),
        Side::Candidate => (candidate_prefs, company_prefs),
    };
    let size = proposers.len();
    let recipient_ranks = RankTable::from_preferences(recipients);

    let mut next = vec![0_usize; size];
    let mut held_by: Vec<Option<usize>> = vec![None; size];
    let mut free: VecDeque<usize> = (0..size).collect();
    let mut trace = Vec::new();

    while let Some(proposer) = free.pop_front() {
        let recipient = proposers.row(proposer)[next[proposer]];
        next[proposer] += 1;
        trace.push(match side {
            Side::Company => Offer::from_company(proposer, recipient),
            Side::Candidate => Offer::from_candidate(proposer, recipient),
        });

        match held_by[recipient] {
            None => held_by[recipient] = Some(proposer),
            Some(current) if recipient_ranks.prefers(recipient, proposer, current) => {
                held_by[recipient] = Some(proposer);
                free.push_back(current);
            }
            Some(_) => free.push_front(proposer),
        }
    }

    let out = held_by
        .iter()
        .enumerate()
        .filter_map(|(recipient, proposer)| {
            proposer.map(|proposer| match side {
                Side::Company => Hire::new(proposer, recipient),
                Side::Candidate => Hire::new(recipient, proposer),
            })
        })
        .collect();

    TraceRun { trace, out }
}

pub fn company_proposing(companies: &PreferenceMatrix, candidates: &PreferenceMatrix) -> TraceRun {
    deferred_acceptance(companies, candidates, Side::Company)
}

pub fn candidate_proposing(
    companies: &PreferenceMatrix,
    candidates: &PreferenceMatrix,
) -> TraceRun {
    deferred_acceptance(companies, candidates, Side::Candidate)
}

pub fn company_optimal(companies: &PreferenceMatrix, candidates: &PreferenceMatrix) -> Matching {
    company_proposing(companies, candidates).out
}

pub fn candidate_optimal(companies: &PreferenceMatrix, candidates: &PreferenceMatrix) -> Matching {
    candidate_proposing(companies, candidates).out
}

// ── Broken matchers ───────────────────────────────────────────────────────────

/// Company `i` hires candidate `i`, ignoring every preference.
pub fn identity(companies: &PreferenceMatrix, _: &PreferenceMatrix) -> Matching {
    (0..companies.len()).map(|i| Hire::new(i, i)).collect()
}

/// A stable matching with its last hire dropped.
pub fn drops_last_hire(companies: &PreferenceMatrix, candidates: &PreferenceMatrix) -> Matching {
    let mut hires = company_optimal(companies, candidates);
    hires.pop();
    hires
}

/// A stable matching whose last hire repeats the first company.
pub fn duplicates_company(companies: &PreferenceMatrix, candidates: &PreferenceMatrix) -> Matching {
    let mut hires = company_optimal(companies, candidates);
    if let (Some(first), Some(last)) = (hires.first().copied(), hires.last_mut()) {
        last.company = first.company;
    }
    hires
}

/// Correct run whose final proposal is missing from the trace.
pub fn truncated_trace(companies: &PreferenceMatrix, candidates: &PreferenceMatrix) -> TraceRun {
    let mut run = company_proposing(companies, candidates);
    run.trace.pop();
    run
}

/// Correct trace whose declared matching swaps the partners of the first two
/// hires.
pub fn swapped_out(companies: &PreferenceMatrix, candidates: &PreferenceMatrix) -> TraceRun {
    let mut run = company_proposing(companies, candidates);
    if run.out.len() >= 2 {
        let first = run.out[0].candidate;
        run.out[0].candidate = run.out[1].candidate;
        run.out[1].candidate = first;
    }
    run
}

/// Company-proposing run where every company skips its first choice.
pub fn skips_first_choice(companies: &PreferenceMatrix, candidates: &PreferenceMatrix) -> TraceRun {
    let size = companies.len();
    let shifted = PreferenceMatrix::from_rows(
        companies
            .rows()
            .map(|row| {
                let mut row = row.to_vec();
                row.rotate_left(1.min(size));
                row
            })
            .collect(),
    )
    .expect("rotating a permutation keeps it a permutation");
    company_proposing(&shifted, candidates)
}
