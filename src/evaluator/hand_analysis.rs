use super::rank_groups::RankGroups;
use super::straight_info::StraightInfo;
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank};
use crate::evaluator::{Category, EvaluatedHand, HandValue};

/// Pre-computed analysis of a hand of at most five cards.
/// Built once and shared by all category detectors.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    /// Cards ordered by (group size desc, rank desc, suit).
    pub sorted_cards: Vec<Card>,
    /// Ranks in descending order.
    pub ranks: Vec<Rank>,
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    pub straight_info: StraightInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card]) -> Self {
        debug_assert!(cards.len() <= 5);

        let mut ranks: Vec<Rank> = cards.iter().map(|c| c.rank()).collect();
        ranks.sort_by(|a, b| b.cmp(a));

        let rank_groups = RankGroups::from_ranks(&ranks);
        let suit_info = SuitInfo::detect(cards);
        let straight_info = StraightInfo::detect(&ranks);

        let mut sorted_cards = cards.to_vec();
        sorted_cards.sort_by(|a, b| {
            rank_groups
                .count_of(b.rank())
                .cmp(&rank_groups.count_of(a.rank()))
                .then(b.rank().cmp(&a.rank()))
                .then(a.suit().cmp(&b.suit()))
        });
        if straight_info.is_wheel() {
            // A-5-4-3-2 reads as 5-4-3-2-A
            sorted_cards.rotate_left(1);
        }

        Self { sorted_cards, ranks, rank_groups, suit_info, straight_info }
    }

    /// Build an evaluation from a category and its tie-break key.
    pub fn build_evaluation(&self, category: Category, key: Vec<Rank>) -> EvaluatedHand {
        let value = HandValue::from_parts(category, &key);
        EvaluatedHand { category, key, best_cards: self.sorted_cards.clone(), value }
    }
}
