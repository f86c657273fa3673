use crate::cards::Rank;

/// The ranks of the wheel, A-2-3-4-5, compared as an explicit ordered sequence.
const WHEEL: [Rank; 5] = [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two];

/// Whether a five-card hand contains a straight and its top rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    const NONE: StraightInfo = StraightInfo { is_straight: false, top_rank: None };

    /// Detect a straight from five ranks in any order, including the wheel
    /// (A-2-3-4-5) whose top rank is Five. Any other rank count is never a straight.
    pub fn detect(ranks: &[Rank]) -> Self {
        if ranks.len() != 5 {
            return Self::NONE;
        }
        let mut sorted = [Rank::Two; 5];
        sorted.copy_from_slice(ranks);
        sorted.sort_by(|a, b| b.cmp(a));

        if sorted.windows(2).all(|w| w[0].value() == w[1].value() + 1) {
            return StraightInfo { is_straight: true, top_rank: Some(sorted[0]) };
        }

        if sorted == WHEEL {
            return StraightInfo { is_straight: true, top_rank: Some(Rank::Five) };
        }

        Self::NONE
    }

    pub fn is_wheel(&self) -> bool {
        self.top_rank == Some(Rank::Five)
    }
}
