use crate::cards::Rank;

/// Groups ranks by their frequency in a hand, sorted by (count desc, rank desc).
///
/// Counting goes through an array indexed by rank value, so the grouping and
/// every "largest group" lookup is deterministic.
///
/// Example: AAAKQ groups as [(Ace, 3), (King, 1), (Queen, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    /// Create RankGroups from a rank count array indexed by rank value (2-14).
    pub fn from_counts(rank_counts: &[u8; 15]) -> Self {
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .copied()
            .filter_map(|rank| {
                let count = rank_counts[rank.value() as usize];
                (count > 0).then_some((rank, count))
            })
            .collect();

        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        Self { groups }
    }

    pub fn from_ranks(ranks: &[Rank]) -> Self {
        let mut counts = [0u8; 15];
        for rank in ranks {
            counts[rank.value() as usize] += 1;
        }
        Self::from_counts(&counts)
    }

    /// Rank of a four-of-a-kind, if present.
    pub fn quad(&self) -> Option<Rank> {
        self.first_with_count(4)
    }

    /// Rank of the highest three-of-a-kind, if present.
    pub fn trips(&self) -> Option<Rank> {
        self.first_with_count(3)
    }

    /// All pair ranks, in descending order.
    pub fn pairs(&self) -> Vec<Rank> {
        self.with_count(2)
    }

    /// All singleton (kicker) ranks, in descending order.
    pub fn kickers(&self) -> Vec<Rank> {
        self.with_count(1)
    }

    /// Both a three-of-a-kind and a pair are present.
    pub fn has_full_house(&self) -> bool {
        self.trips().is_some() && !self.pairs().is_empty()
    }

    /// Multiplicity of `rank` in the hand.
    pub fn count_of(&self, rank: Rank) -> u8 {
        self.groups.iter().find(|(r, _)| *r == rank).map_or(0, |(_, c)| *c)
    }

    fn first_with_count(&self, n: u8) -> Option<Rank> {
        self.groups.iter().find(|(_, count)| *count == n).map(|(rank, _)| *rank)
    }

    fn with_count(&self, n: u8) -> Vec<Rank> {
        self.groups.iter().filter(|(_, count)| *count == n).map(|(rank, _)| *rank).collect()
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[(Rank, u8)] {
        &self.groups
    }
}
