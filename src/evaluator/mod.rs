pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// Fewest cards [`evaluate`] accepts (a bare pair of hole cards).
pub const MIN_CARDS: usize = 2;
/// Most cards [`evaluate`] accepts (hole cards plus a full board).
pub const MAX_CARDS: usize = 7;

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and ranked tiebreakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of evaluating a hand: category, tie-break key and the cards that
/// make the hand. Ordering and equality only look at (category, key); suits
/// and the specific cards never break ties.
#[derive(Debug, Clone)]
pub struct EvaluatedHand {
    pub category: Category,
    /// Ranks that break ties within the category, most significant first.
    pub key: Vec<Rank>,
    /// The best five cards, or every card when fewer than five were evaluated.
    pub best_cards: Vec<Card>,
    value: HandValue,
}

impl Ord for EvaluatedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for EvaluatedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EvaluatedHand {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for EvaluatedHand {}

impl EvaluatedHand {
    /// The packed comparable value.
    pub const fn value(&self) -> HandValue {
        self.value
    }
}

impl fmt::Display for EvaluatedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.category)?;
        for (i, c) in self.best_cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("]")
    }
}

impl HandValue {
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and up to five rank tiebreakers into a comparable value.
    /// Missing tiebreakers pack as zero, below every real rank.
    pub fn from_parts(category: Category, key: &[Rank]) -> Self {
        // [ category (8 bits) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) | 10 zero bits ]
        const CAT_SHIFT: u32 = 48;
        const RANK_STRIDE: u32 = 6;
        let mut v: u64 = (category as u64) << CAT_SHIFT;
        for (i, r) in key.iter().take(5).enumerate() {
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= (*r as u64) << offset;
        }
        HandValue(v)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("cannot evaluate {0} cards: expected {MIN_CARDS} to {MAX_CARDS}")]
    CardCount(usize),
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
}

/// Evaluate the best hand that can be made from 2 to 7 distinct cards.
///
/// Five or fewer cards are classified directly; six or seven cards are
/// searched over every five-card subset and the strongest is kept.
///
/// ```
/// use headsup_holdem::cards::parse_cards;
/// use headsup_holdem::evaluator::{evaluate, Category};
///
/// let seven = parse_cards("As Ks Qs Js Ts 2h 3d").unwrap();
/// assert_eq!(evaluate(&seven).unwrap().category, Category::RoyalFlush);
///
/// let wheel = parse_cards("Ah 2c 3d 4s 5h").unwrap();
/// assert_eq!(evaluate(&wheel).unwrap().category, Category::Straight);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<EvaluatedHand, EvalError> {
    if !(MIN_CARDS..=MAX_CARDS).contains(&cards.len()) {
        return Err(EvalError::CardCount(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    if let Some(dup) = cards.iter().find(|c| !seen.insert(**c)) {
        return Err(EvalError::DuplicateCard(*dup));
    }
    if cards.len() <= 5 {
        return Ok(classify(cards));
    }
    Ok(best_of(cards))
}

/// Evaluate exactly five cards; detects category and encodes tie-breakers.
pub fn evaluate_five(cards: &[Card; 5]) -> EvaluatedHand {
    classify(cards)
}

/// Evaluate seven cards by searching all 21 five-card combinations.
pub fn evaluate_seven(cards: &[Card; 7]) -> EvaluatedHand {
    best_of(cards)
}

fn classify(cards: &[Card]) -> EvaluatedHand {
    use detector::{CategoryDetector, HighCardDetector, DETECTORS};
    use hand_analysis::HandAnalysis;

    let analysis = HandAnalysis::new(cards);
    for detector in DETECTORS.iter() {
        if detector.detect(&analysis) {
            return detector.build_evaluation(&analysis);
        }
    }
    HighCardDetector.build_evaluation(&analysis)
}

fn best_of(cards: &[Card]) -> EvaluatedHand {
    use combinations::FiveCardCombinations;

    let mut best: Option<EvaluatedHand> = None;
    for idx in FiveCardCombinations::new(cards.len()) {
        let hand = [cards[idx[0]], cards[idx[1]], cards[idx[2]], cards[idx[3]], cards[idx[4]]];
        let eval = classify(&hand);
        if best.as_ref().map_or(true, |b| eval > *b) {
            best = Some(eval);
        }
    }
    best.unwrap_or_else(|| classify(cards))
}

/// Evaluate a Hold'em holding: hole cards plus however much of the board is out.
///
/// ```
/// use headsup_holdem::evaluator::{evaluate_holdem, Category};
/// use headsup_holdem::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let eval = evaluate_holdem(&hole, &board).unwrap();
/// assert_eq!(eval.category, Category::OnePair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<EvaluatedHand, EvalError> {
    validate_holdem(hole, board)?;
    evaluate(&hole.with_board(board))
}

/// Compare two Hold'em hands on a shared board.
///
/// ```
/// use headsup_holdem::evaluator::compare_holdem;
/// use headsup_holdem::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let a: HoleCards = "As Ah".parse().unwrap();
/// let b: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare_holdem(&a, &b, &board).unwrap(), Ordering::Greater);
/// ```
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let va = evaluate_holdem(a, board)?;
    let vb = evaluate_holdem(b, board)?;
    Ok(va.cmp(&vb))
}
