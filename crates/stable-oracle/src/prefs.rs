//! Preference matrices and the randomized generator that feeds the oracles.
//!
//! A [`PreferenceMatrix`] of size N holds one row per agent; each row is a
//! permutation of `0..N` listing the counterparts from most to least
//! preferred. The type can only be built from rows that satisfy this
//! invariant, so the oracles never have to re-check it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Precondition failures when building or pairing preference matrices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum PreferenceError {
    /// A row does not rank every counterpart exactly once by length.
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        /// Offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// Number of rows in the matrix.
        expected: usize,
    },
    /// A row names a counterpart outside `0..size`.
    #[error("row {row} ranks counterpart {value}, outside 0..{size}")]
    OutOfRange {
        /// Offending row.
        row: usize,
        /// The out-of-range entry.
        value: usize,
        /// Matrix size.
        size: usize,
    },
    /// A row ranks the same counterpart twice.
    #[error("row {row} ranks counterpart {value} more than once")]
    Repeated {
        /// Offending row.
        row: usize,
        /// The repeated entry.
        value: usize,
    },
    /// Company and candidate matrices describe markets of different sizes.
    #[error("company preferences have {companies} rows but candidate preferences have {candidates}")]
    SizeMismatch {
        /// Rows in the company matrix.
        companies: usize,
        /// Rows in the candidate matrix.
        candidates: usize,
    },
}

/// N×N preference lists, one strict total order per agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<usize>>", into = "Vec<Vec<usize>>")]
pub struct PreferenceMatrix {
    rows: Vec<Vec<usize>>,
}

impl PreferenceMatrix {
    /// The matrix for an empty market.
    #[must_use]
    pub const fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build a matrix from caller-supplied rows.
    ///
    /// # Errors
    ///
    /// Returns a [`PreferenceError`] if the rows are not all permutations of
    /// `0..rows.len()`.
    pub fn from_rows(rows: Vec<Vec<usize>>) -> Result<Self, PreferenceError> {
        let size = rows.len();
        for (row, entries) in rows.iter().enumerate() {
            if entries.len() != size {
                return Err(PreferenceError::NotSquare {
                    row,
                    len: entries.len(),
                    expected: size,
                });
            }
            let mut seen = vec![false; size];
            for &value in entries {
                let slot = seen
                    .get_mut(value)
                    .ok_or(PreferenceError::OutOfRange { row, value, size })?;
                if *slot {
                    return Err(PreferenceError::Repeated { row, value });
                }
                *slot = true;
            }
        }
        Ok(Self { rows })
    }

    /// Number of agents on the ranking side (and of counterparts).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True for the empty market.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The ranked counterparts of `agent`, most preferred first.
    ///
    /// # Panics
    ///
    /// Panics if `agent` is not below [`len`](Self::len).
    #[must_use]
    pub fn row(&self, agent: usize) -> &[usize] {
        &self.rows[agent]
    }

    /// The counterpart `agent` ranks at position `rank`, if both exist.
    #[must_use]
    pub fn choice(&self, agent: usize, rank: usize) -> Option<usize> {
        self.rows.get(agent)?.get(rank).copied()
    }

    /// Iterate rows in agent order.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl TryFrom<Vec<Vec<usize>>> for PreferenceMatrix {
    type Error = PreferenceError;

    fn try_from(rows: Vec<Vec<usize>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<PreferenceMatrix> for Vec<Vec<usize>> {
    fn from(matrix: PreferenceMatrix) -> Self {
        matrix.rows
    }
}

/// Check that two matrices describe the same market size.
///
/// # Errors
///
/// Returns [`PreferenceError::SizeMismatch`] when the row counts differ.
pub fn check_same_size(
    company_prefs: &PreferenceMatrix,
    candidate_prefs: &PreferenceMatrix,
) -> Result<usize, PreferenceError> {
    if company_prefs.len() == candidate_prefs.len() {
        Ok(company_prefs.len())
    } else {
        Err(PreferenceError::SizeMismatch {
            companies: company_prefs.len(),
            candidates: candidate_prefs.len(),
        })
    }
}

/// Generate an `n`×`n` matrix whose rows are independent, uniformly random
/// permutations of `0..n`.
#[must_use]
pub fn generate_preferences<R: Rng + ?Sized>(n: usize, rng: &mut R) -> PreferenceMatrix {
    let rows = (0..n).map(|_| shuffled_identity(n, rng)).collect();
    PreferenceMatrix { rows }
}

/// Fisher-Yates over `[0, n)`.
fn shuffled_identity<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut row: Vec<usize> = (0..n).collect();
    for k in (1..n).rev() {
        let j = rng.gen_range(0..=k);
        row.swap(k, j);
    }
    row
}
