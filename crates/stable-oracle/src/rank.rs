use crate::prefs::PreferenceMatrix;

/// Inverse of a [`PreferenceMatrix`]: `rank(agent, counterpart)` is the
/// position of `counterpart` in `agent`'s list.
///
/// Built once per matrix and read-only afterward, turning every preference
/// comparison into two lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTable {
    size: usize,
    ranks: Vec<usize>,
}

impl RankTable {
    /// Invert `prefs`.
    #[must_use]
    pub fn from_preferences(prefs: &PreferenceMatrix) -> Self {
        let size = prefs.len();
        let mut ranks = vec![0; size * size];
        for (agent, row) in prefs.rows().enumerate() {
            for (rank, &counterpart) in row.iter().enumerate() {
                ranks[agent * size + counterpart] = rank;
            }
        }
        Self { size, ranks }
    }

    /// Market size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Position of `counterpart` in `agent`'s list, 0 being most preferred.
    ///
    /// # Panics
    ///
    /// Panics if either index is not below [`size`](Self::size).
    #[must_use]
    pub fn rank(&self, agent: usize, counterpart: usize) -> usize {
        assert!(
            agent < self.size && counterpart < self.size,
            "rank({agent}, {counterpart}) outside market of size {}",
            self.size
        );
        self.ranks[agent * self.size + counterpart]
    }

    /// True if `agent` strictly prefers `a` to `b`.
    #[must_use]
    pub fn prefers(&self, agent: usize, a: usize, b: usize) -> bool {
        self.rank(agent, a) < self.rank(agent, b)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::prefs::generate_preferences;

    #[test]
    fn rank_inverts_rows() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let prefs = generate_preferences(9, &mut rng);
        let table = RankTable::from_preferences(&prefs);
        for (agent, row) in prefs.rows().enumerate() {
            for (r, &counterpart) in row.iter().enumerate() {
                assert_eq!(table.rank(agent, counterpart), r);
            }
        }
    }

    #[test]
    fn prefers_follows_row_order() {
        let prefs = PreferenceMatrix::from_rows(vec![vec![2, 0, 1], vec![0, 1, 2], vec![1, 2, 0]])
            .expect("valid");
        let table = RankTable::from_preferences(&prefs);
        assert!(table.prefers(0, 2, 0));
        assert!(table.prefers(0, 0, 1));
        assert!(!table.prefers(0, 1, 2));
        assert!(!table.prefers(1, 1, 1));
    }

    #[test]
    fn empty_matrix_gives_empty_table() {
        let table = RankTable::from_preferences(&PreferenceMatrix::empty());
        assert_eq!(table.size(), 0);
    }

    #[test]
    #[should_panic(expected = "outside market")]
    fn rank_out_of_range_panics() {
        let prefs = PreferenceMatrix::from_rows(vec![vec![0]]).expect("valid");
        let _ = RankTable::from_preferences(&prefs).rank(0, 1);
    }
}
