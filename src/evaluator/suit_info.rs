use crate::cards::{Card, Suit};

/// Whether a five-card hand is a flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub is_flush: bool,
    pub flush_suit: Option<Suit>,
}

impl SuitInfo {
    /// A flush needs exactly five cards of one suit; shorter hands never qualify.
    pub fn detect(cards: &[Card]) -> Self {
        let mut counts = [0u8; 4];
        for card in cards {
            counts[card.suit() as usize] += 1;
        }
        let flush_suit = if cards.len() == 5 {
            Suit::ALL.iter().copied().find(|s| counts[*s as usize] == 5)
        } else {
            None
        };
        SuitInfo { is_flush: flush_suit.is_some(), flush_suit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;

    #[test]
    fn five_spades_is_a_flush() {
        let cards = [
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::King, Suit::Spade),
            Card::new(Rank::Queen, Suit::Spade),
            Card::new(Rank::Jack, Suit::Spade),
            Card::new(Rank::Nine, Suit::Spade),
        ];
        let info = SuitInfo::detect(&cards);
        assert!(info.is_flush);
        assert_eq!(info.flush_suit, Some(Suit::Spade));
    }

    #[test]
    fn one_off_suit_breaks_the_flush() {
        let cards = [
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::King, Suit::Heart),
            Card::new(Rank::Queen, Suit::Spade),
            Card::new(Rank::Jack, Suit::Spade),
            Card::new(Rank::Nine, Suit::Spade),
        ];
        let info = SuitInfo::detect(&cards);
        assert!(!info.is_flush);
        assert_eq!(info.flush_suit, None);
    }

    #[test]
    fn four_suited_cards_are_not_a_flush() {
        let cards = [
            Card::new(Rank::Two, Suit::Club),
            Card::new(Rank::Three, Suit::Club),
            Card::new(Rank::Four, Suit::Club),
            Card::new(Rank::Seven, Suit::Club),
        ];
        assert!(!SuitInfo::detect(&cards).is_flush);
    }
}
