use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("insufficient cards: requested {requested}, {remaining} remaining")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("card {0} appears twice")]
    DuplicateCard(Card),
}

/// A standard 52-card deck. Cards are dealt from the front.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 suit x rank combinations in suit-major order.
    ///
    /// ```
    /// use headsup_holdem::deck::Deck;
    ///
    /// let deck = Deck::new();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// A deck with `top` dealt first, in order, followed by the remaining
    /// cards in standard order. Used to replay or script a hand.
    ///
    /// ```
    /// use headsup_holdem::cards::parse_cards;
    /// use headsup_holdem::deck::Deck;
    ///
    /// let top = parse_cards("As Kd").unwrap();
    /// let mut deck = Deck::stacked(&top).unwrap();
    /// assert_eq!(deck.deal(2).unwrap(), top);
    /// assert_eq!(deck.len(), 50);
    /// ```
    pub fn stacked(top: &[Card]) -> Result<Self, DeckError> {
        let mut cards = Vec::with_capacity(52);
        for &c in top {
            if cards.contains(&c) {
                return Err(DeckError::DuplicateCard(c));
            }
            cards.push(c);
        }
        cards.extend(Self::new().cards.into_iter().filter(|c| !top.contains(c)));
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards in dealing order.
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle with the provided RNG.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle(&mut rng);
    }

    /// Remove and return the first `n` cards.
    ///
    /// ```
    /// use headsup_holdem::deck::{Deck, DeckError};
    ///
    /// let mut deck = Deck::new();
    /// let hand = deck.deal(50).unwrap();
    /// assert_eq!(hand.len(), 50);
    /// assert_eq!(
    ///     deck.deal(3),
    ///     Err(DeckError::InsufficientCards { requested: 3, remaining: 2 })
    /// );
    /// assert_eq!(deck.len(), 2);
    /// ```
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::InsufficientCards { requested: n, remaining: self.cards.len() });
        }
        Ok(self.cards.drain(..n).collect())
    }

    /// Deal exactly `N` cards into an array.
    pub fn deal_array<const N: usize>(&mut self) -> Result<[Card; N], DeckError> {
        let cards = self.deal(N)?;
        Ok(std::array::from_fn(|i| cards[i]))
    }

    /// Deal a single card.
    pub fn deal_one(&mut self) -> Result<Card, DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::InsufficientCards { requested: 1, remaining: 0 });
        }
        Ok(self.cards.remove(0))
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn new_deck_has_52_unique_cards() {
        let d = Deck::new();
        assert_eq!(d.len(), 52);
        let set: HashSet<Card> = d.as_slice().iter().copied().collect();
        assert_eq!(set.len(), 52);
        for s in Suit::ALL {
            assert_eq!(d.as_slice().iter().filter(|c| c.suit() == s).count(), 13);
        }
        for r in Rank::ALL {
            assert_eq!(d.as_slice().iter().filter(|c| c.rank() == r).count(), 4);
        }
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::new();
        let mut d2 = Deck::new();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1.cards, d2.cards);

        let mut d3 = Deck::new();
        d3.shuffle_seeded(43);
        assert_ne!(d1.cards, d3.cards);
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut d = Deck::new();
        d.shuffle(&mut rng);
        let mut shuffled = d.cards.clone();
        let mut fresh = Deck::new().cards;
        shuffled.sort();
        fresh.sort();
        assert_eq!(shuffled, fresh);
    }

    #[test]
    fn deal_consumes_from_the_front() {
        let mut d = Deck::new();
        d.shuffle_seeded(7);
        let top: Vec<Card> = d.as_slice()[..3].to_vec();
        let dealt = d.deal(3).unwrap();
        assert_eq!(dealt, top);
        assert_eq!(d.len(), 49);
        let c = d.deal_one().unwrap();
        assert!(!dealt.contains(&c));
        assert_eq!(d.len(), 48);
    }

    #[test]
    fn stacked_deck_deals_top_cards_first() {
        let top = [Card::new(Rank::Two, Suit::Club), Card::new(Rank::Ace, Suit::Spade)];
        let mut d = Deck::stacked(&top).unwrap();
        assert_eq!(d.len(), 52);
        assert_eq!(d.deal_array::<2>().unwrap(), top);
        assert!(!d.as_slice().contains(&top[0]));

        let dup = [top[0], top[0]];
        assert_eq!(Deck::stacked(&dup).unwrap_err(), DeckError::DuplicateCard(top[0]));
    }

    #[test]
    fn consecutive_deals_are_disjoint() {
        let mut d = Deck::new();
        d.shuffle_seeded(11);
        let a = d.deal(20).unwrap();
        let b = d.deal(32).unwrap();
        let set_a: HashSet<Card> = a.into_iter().collect();
        assert!(b.iter().all(|c| !set_a.contains(c)));
        assert!(d.is_empty());
    }

    #[test]
    fn deal_beyond_remaining_fails_without_consuming() {
        let mut d = Deck::new();
        let err = d.deal(53).unwrap_err();
        assert_eq!(err, DeckError::InsufficientCards { requested: 53, remaining: 52 });
        assert_eq!(d.len(), 52);

        let mut empty = Deck::new();
        empty.deal(52).unwrap();
        assert!(matches!(empty.deal_one(), Err(DeckError::InsufficientCards { .. })));
        assert_eq!(empty.deal(0).unwrap(), Vec::<Card>::new());
    }
}
