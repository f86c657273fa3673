use super::hand_analysis::HandAnalysis;
use crate::cards::Rank;
use crate::evaluator::{Category, EvaluatedHand};

/// Strategy pattern: each category detector knows how to detect and build its evaluation.
pub trait CategoryDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool;
    fn build_evaluation(&self, analysis: &HandAnalysis) -> EvaluatedHand;
}

/// `lead` followed by the kickers, truncated to a five-card hand's worth.
fn with_kickers(lead: &[Rank], analysis: &HandAnalysis) -> Vec<Rank> {
    let kickers = analysis.rank_groups.kickers();
    let room = 5usize.saturating_sub(lead.len() + lead_cards(lead, analysis));
    lead.iter().copied().chain(kickers.into_iter().take(room)).collect()
}

// number of extra cards the lead ranks occupy beyond one slot each
fn lead_cards(lead: &[Rank], analysis: &HandAnalysis) -> usize {
    lead.iter().map(|r| analysis.rank_groups.count_of(*r) as usize - 1).sum()
}

// ============================================================================
// Detector Implementations (in priority order: highest to lowest)
// ============================================================================

/// Royal Flush: Ace-high straight flush
pub struct RoyalFlushDetector;

impl CategoryDetector for RoyalFlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.suit_info.is_flush && analysis.straight_info.top_rank == Some(Rank::Ace)
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> EvaluatedHand {
        analysis.build_evaluation(Category::RoyalFlush, vec![Rank::Ace])
    }
}

/// Straight Flush: Five consecutive ranks, all same suit
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.suit_info.is_flush && analysis.straight_info.is_straight
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> EvaluatedHand {
        let top = analysis.straight_info.top_rank.unwrap_or(Rank::Five);
        analysis.build_evaluation(Category::StraightFlush, vec![top])
    }
}

/// Four of a Kind: Four cards of the same rank
pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.quad().is_some()
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> EvaluatedHand {
        let quad = analysis.rank_groups.quad().unwrap_or(Rank::Two);
        analysis.build_evaluation(Category::FourOfAKind, with_kickers(&[quad], analysis))
    }
}

/// Full House: Three of a kind plus a pair
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.has_full_house()
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> EvaluatedHand {
        let trips = analysis.rank_groups.trips().unwrap_or(Rank::Two);
        let pair = analysis.rank_groups.pairs().first().copied().unwrap_or(Rank::Two);
        analysis.build_evaluation(Category::FullHouse, vec![trips, pair])
    }
}

/// Flush: All five cards of the same suit
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.suit_info.is_flush
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> EvaluatedHand {
        analysis.build_evaluation(Category::Flush, analysis.ranks.clone())
    }
}

/// Straight: Five consecutive ranks (not all same suit)
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.straight_info.is_straight
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> EvaluatedHand {
        let top = analysis.straight_info.top_rank.unwrap_or(Rank::Five);
        analysis.build_evaluation(Category::Straight, vec![top])
    }
}

/// Three of a Kind: Three cards of the same rank, no pair
pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.trips().is_some() && !analysis.rank_groups.has_full_house()
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> EvaluatedHand {
        let trips = analysis.rank_groups.trips().unwrap_or(Rank::Two);
        analysis.build_evaluation(Category::ThreeOfAKind, with_kickers(&[trips], analysis))
    }
}

/// Two Pair: Two pairs of cards
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.pairs().len() >= 2
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> EvaluatedHand {
        let pairs = analysis.rank_groups.pairs();
        analysis.build_evaluation(Category::TwoPair, with_kickers(&pairs[..2], analysis))
    }
}

/// One Pair: Two cards of the same rank
pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.pairs().len() == 1
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> EvaluatedHand {
        let pairs = analysis.rank_groups.pairs();
        analysis.build_evaluation(Category::OnePair, with_kickers(&pairs, analysis))
    }
}

/// High Card: No matching ranks or sequences
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn detect(&self, _analysis: &HandAnalysis) -> bool {
        true // fallback
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> EvaluatedHand {
        analysis.build_evaluation(Category::HighCard, analysis.ranks.clone())
    }
}

// ============================================================================
// Static detector list (in priority order)
// ============================================================================

pub const DETECTORS: [&dyn CategoryDetector; 10] = [
    &RoyalFlushDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];
