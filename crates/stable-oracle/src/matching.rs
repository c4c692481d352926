//! Matching edges, proposal events, and the two-way partner table both
//! oracles check against.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::violation::Violation;

/// One matching edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hire {
    /// Company id in `[0, N)`.
    pub company: usize,
    /// Candidate id in `[0, N)`.
    pub candidate: usize,
}

impl Hire {
    #[must_use]
    pub const fn new(company: usize, candidate: usize) -> Self {
        Self { company, candidate }
    }
}

/// A matching as returned by an implementation under test. Not trusted to be
/// well-formed.
pub type Matching = Vec<Hire>;

/// The two sides of the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Company,
    Candidate,
}

impl Side {
    /// The opposite side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Company => Self::Candidate,
            Self::Candidate => Self::Company,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Company => f.write_str("company"),
            Self::Candidate => f.write_str("candidate"),
        }
    }
}

/// A single proposal in a deferred-acceptance run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offer {
    /// Proposer id, on `side`.
    pub from: usize,
    /// Recipient id, on the other side.
    pub to: usize,
    /// Side the proposer belongs to.
    pub side: Side,
}

impl Offer {
    /// Company `company` proposes to candidate `candidate`.
    #[must_use]
    pub const fn from_company(company: usize, candidate: usize) -> Self {
        Self {
            from: company,
            to: candidate,
            side: Side::Company,
        }
    }

    /// Candidate `candidate` proposes to company `company`.
    #[must_use]
    pub const fn from_candidate(candidate: usize, company: usize) -> Self {
        Self {
            from: candidate,
            to: company,
            side: Side::Candidate,
        }
    }

    #[must_use]
    pub const fn is_from_company(&self) -> bool {
        matches!(self.side, Side::Company)
    }
}

/// Output of a matcher that also reports the proposals it made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRun {
    /// Proposals in the order they were made.
    pub trace: Vec<Offer>,
    /// The matching the run ended with.
    pub out: Matching,
}

/// Partner of every agent on both sides, or `None` while unmatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    company_partner: Vec<Option<usize>>,
    candidate_partner: Vec<Option<usize>>,
}

impl Assignment {
    /// Everybody unmatched in a market of `size`.
    #[must_use]
    pub fn unmatched(size: usize) -> Self {
        Self {
            company_partner: vec![None; size],
            candidate_partner: vec![None; size],
        }
    }

    /// Validate `hires` as a complete bijection over a market of `size`.
    ///
    /// Checks, in order: the hire count, every id in range and seen once,
    /// every agent on both sides matched.
    ///
    /// # Errors
    ///
    /// Returns the first structural [`Violation`] found.
    pub fn from_hires(hires: &[Hire], size: usize) -> Result<Self, Violation> {
        if hires.len() != size {
            return Err(Violation::WrongHireCount {
                expected: size,
                actual: hires.len(),
            });
        }

        let mut assignment = Self::unmatched(size);
        for (index, hire) in hires.iter().enumerate() {
            let Hire { company, candidate } = *hire;
            if company >= size {
                return Err(Violation::CompanyOutOfRange {
                    index,
                    company,
                    size,
                });
            }
            if assignment.company_partner[company].is_some() {
                return Err(Violation::DuplicateCompany { index, company });
            }
            if candidate >= size {
                return Err(Violation::CandidateOutOfRange {
                    index,
                    candidate,
                    size,
                });
            }
            if assignment.candidate_partner[candidate].is_some() {
                return Err(Violation::DuplicateCandidate { index, candidate });
            }
            assignment.pair(company, candidate);
        }

        if let Some(company) = assignment.first_unmatched(Side::Company) {
            return Err(Violation::UnmatchedCompany { company });
        }
        if let Some(candidate) = assignment.first_unmatched(Side::Candidate) {
            return Err(Violation::UnmatchedCandidate { candidate });
        }
        Ok(assignment)
    }

    /// Market size.
    #[must_use]
    pub fn size(&self) -> usize {
        self.company_partner.len()
    }

    /// Current partner of `agent` on `side`.
    #[must_use]
    pub fn partner(&self, side: Side, agent: usize) -> Option<usize> {
        self.partners(side).get(agent).copied().flatten()
    }

    /// Current partner of company `company`.
    #[must_use]
    pub fn company_partner(&self, company: usize) -> Option<usize> {
        self.partner(Side::Company, company)
    }

    /// Current partner of candidate `candidate`.
    #[must_use]
    pub fn candidate_partner(&self, candidate: usize) -> Option<usize> {
        self.partner(Side::Candidate, candidate)
    }

    /// Lowest-numbered unmatched agent on `side`.
    #[must_use]
    pub fn first_unmatched(&self, side: Side) -> Option<usize> {
        self.partners(side).iter().position(Option::is_none)
    }

    /// Record `company` and `candidate` as partners of each other.
    pub(crate) fn pair(&mut self, company: usize, candidate: usize) {
        self.company_partner[company] = Some(candidate);
        self.candidate_partner[candidate] = Some(company);
    }

    /// Leave `agent` on `side` without a partner. Its former partner's entry
    /// is the caller's to update.
    pub(crate) fn clear(&mut self, side: Side, agent: usize) {
        match side {
            Side::Company => self.company_partner[agent] = None,
            Side::Candidate => self.candidate_partner[agent] = None,
        }
    }

    fn partners(&self, side: Side) -> &[Option<usize>] {
        match side {
            Side::Company => &self.company_partner,
            Side::Candidate => &self.candidate_partner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hires(pairs: &[(usize, usize)]) -> Matching {
        pairs.iter().map(|&(co, ca)| Hire::new(co, ca)).collect()
    }

    #[test]
    fn from_hires_builds_both_directions() {
        let table = Assignment::from_hires(&hires(&[(0, 2), (1, 0), (2, 1)]), 3).expect("bijection");
        assert_eq!(table.company_partner(0), Some(2));
        assert_eq!(table.candidate_partner(2), Some(0));
        assert_eq!(table.candidate_partner(1), Some(2));
        assert_eq!(table.first_unmatched(Side::Company), None);
    }

    #[test]
    fn from_hires_rejects_wrong_count() {
        let err = Assignment::from_hires(&hires(&[(0, 0)]), 2).expect_err("short");
        assert_eq!(
            err,
            Violation::WrongHireCount {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn from_hires_rejects_out_of_range() {
        let err = Assignment::from_hires(&hires(&[(0, 0), (2, 1)]), 2).expect_err("company");
        assert_eq!(
            err,
            Violation::CompanyOutOfRange {
                index: 1,
                company: 2,
                size: 2
            }
        );
        let err = Assignment::from_hires(&hires(&[(0, 5), (1, 1)]), 2).expect_err("candidate");
        assert_eq!(
            err,
            Violation::CandidateOutOfRange {
                index: 0,
                candidate: 5,
                size: 2
            }
        );
    }

    #[test]
    fn from_hires_rejects_duplicates() {
        let err = Assignment::from_hires(&hires(&[(0, 0), (0, 1)]), 2).expect_err("company");
        assert_eq!(err, Violation::DuplicateCompany { index: 1, company: 0 });
        let err = Assignment::from_hires(&hires(&[(0, 1), (1, 1)]), 2).expect_err("candidate");
        assert_eq!(
            err,
            Violation::DuplicateCandidate {
                index: 1,
                candidate: 1
            }
        );
    }

    #[test]
    fn empty_market_accepts_empty_matching() {
        let table = Assignment::from_hires(&[], 0).expect("trivially complete");
        assert_eq!(table.size(), 0);
    }

    #[test]
    fn pair_and_clear() {
        let mut table = Assignment::unmatched(2);
        table.pair(1, 0);
        assert_eq!(table.partner(Side::Company, 1), Some(0));
        assert_eq!(table.partner(Side::Candidate, 0), Some(1));
        table.clear(Side::Company, 1);
        assert_eq!(table.company_partner(1), None);
        assert_eq!(table.first_unmatched(Side::Company), Some(0));
        assert_eq!(table.partner(Side::Company, 9), None);
    }

    #[test]
    fn offer_constructors_set_side() {
        let offer = Offer::from_candidate(3, 1);
        assert!(!offer.is_from_company());
        assert_eq!(offer.side.other(), Side::Company);
        assert_eq!(Offer::from_company(1, 3).to, 3);
        assert_eq!(Side::Candidate.to_string(), "candidate");
    }
}
