use crate::cards::{parse_cards, Card, CardParseError};
use std::collections::HashSet;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many board cards: {0}")]
    TooManyBoardCards(usize),
    #[error("duplicate cards on board")]
    DuplicateBoardCards,
    #[error("hole cards overlap with board")]
    Overlap,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error(transparent)]
    CardParse(#[from] CardParseError),
}

/// A player's two private hole cards.
///
/// ```
/// use headsup_holdem::cards::{Card, Rank, Suit};
/// use headsup_holdem::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spade),
///     Card::new(Rank::King, Suit::Spade),
/// ).unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        if slice.len() != 2 {
            return Err(HandError::HoleCount(slice.len()));
        }
        Self::try_new(slice[0], slice[1])
    }

    /// Hole cards followed by the board, ready for evaluation.
    pub fn with_board(&self, board: &Board) -> Vec<Card> {
        let mut cards = Vec::with_capacity(2 + board.len());
        cards.extend_from_slice(&self.as_array());
        cards.extend_from_slice(board.as_slice());
        cards
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&parse_cards(s)?)
    }
}

/// Community cards: empty preflop, then 3, 4 and 5 cards.
///
/// ```
/// use headsup_holdem::cards::{Card, Rank, Suit};
/// use headsup_holdem::hand::Board;
///
/// let board = Board::try_new(vec![
///     Card::new(Rank::Two, Suit::Club),
///     Card::new(Rank::Three, Suit::Club),
///     Card::new(Rank::Four, Suit::Club),
/// ]).unwrap();
/// assert_eq!(board.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub const MAX_CARDS: usize = 5;

    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > Self::MAX_CARDS {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateBoardCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == Self::MAX_CARDS
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn extend<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.extend(cards);
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_new(parse_cards(s)?)
    }
}

/// Check that hole cards and a board of up to five cards are all distinct.
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    if board.len() > Board::MAX_CARDS {
        return Err(HandError::TooManyBoardCards(board.len()));
    }
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards);
    }
    let mut seen: HashSet<Card> = HashSet::with_capacity(board.len() + 2);
    if !board.as_slice().iter().all(|&c| seen.insert(c)) {
        return Err(HandError::DuplicateBoardCards);
    }
    if hole.as_array().iter().any(|c| seen.contains(c)) {
        return Err(HandError::Overlap);
    }
    Ok(())
}
