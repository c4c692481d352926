use crate::matching::{Matching, TraceRun};
use crate::prefs::PreferenceMatrix;

/// An implementation under test that returns only its final matching.
///
/// Implemented for every `Fn(&PreferenceMatrix, &PreferenceMatrix) -> Matching`,
/// so plain functions and closures can be handed to the oracle directly.
pub trait StableMatcher {
    fn find_matching(
        &self,
        company_prefs: &PreferenceMatrix,
        candidate_prefs: &PreferenceMatrix,
    ) -> Matching;
}

impl<F> StableMatcher for F
where
    F: Fn(&PreferenceMatrix, &PreferenceMatrix) -> Matching,
{
    fn find_matching(
        &self,
        company_prefs: &PreferenceMatrix,
        candidate_prefs: &PreferenceMatrix,
    ) -> Matching {
        self(company_prefs, candidate_prefs)
    }
}

/// An implementation under test that also reports every proposal it made.
pub trait StableMatcherWithTrace {
    fn find_matching_with_trace(
        &self,
        company_prefs: &PreferenceMatrix,
        candidate_prefs: &PreferenceMatrix,
    ) -> TraceRun;
}

impl<F> StableMatcherWithTrace for F
where
    F: Fn(&PreferenceMatrix, &PreferenceMatrix) -> TraceRun,
{
    fn find_matching_with_trace(
        &self,
        company_prefs: &PreferenceMatrix,
        candidate_prefs: &PreferenceMatrix,
    ) -> TraceRun {
        self(company_prefs, candidate_prefs)
    }
}
