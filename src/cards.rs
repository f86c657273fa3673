use std::fmt;
use std::str::FromStr;

/// Card ranks from Two (low) to Ace (high).
///
/// Ace also plays low in the wheel straight (A-2-3-4-5); see
/// [`Rank::straight_low_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Ace-high value, 2..=14.
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Value used when the rank sits at the bottom of a straight: Ace counts as 1.
    pub const fn straight_low_value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            other => other as u8,
        }
    }

    /// Inverse of [`Rank::value`]; accepts 1 as a low Ace.
    pub const fn from_value(v: u8) -> Option<Rank> {
        match v {
            1 | 14 => Some(Rank::Ace),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("invalid rank: '{0}'")]
    Invalid(String),
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::try_from(c).map_err(|_| RankParseError::Invalid(s.to_string())),
            _ if t == "10" => Ok(Rank::Ten),
            _ => Rank::ALL
                .iter()
                .copied()
                .find(|r| r.name().eq_ignore_ascii_case(t))
                .ok_or_else(|| RankParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(RankParseError::Invalid(c.to_string())),
        }
    }
}

/// The four suits. Suits never decide hand strength; the derived order only
/// keeps card sorting deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

    pub const fn to_char(self) -> char {
        match self {
            Suit::Spade => 's',
            Suit::Heart => 'h',
            Suit::Diamond => 'd',
            Suit::Club => 'c',
        }
    }

    /// Unicode suit symbol, for renderers.
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spade => '♠',
            Suit::Heart => '♥',
            Suit::Diamond => '♦',
            Suit::Club => '♣',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("invalid suit: '{0}'")]
    Invalid(String),
}

impl FromStr for Suit {
    type Err = SuitParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Suit::try_from(c);
        }
        match t.to_ascii_lowercase().trim_end_matches('s') {
            "spade" => Ok(Suit::Spade),
            "heart" => Ok(Suit::Heart),
            "diamond" => Ok(Suit::Diamond),
            "club" => Ok(Suit::Club),
            _ => Err(SuitParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            's' | '♠' => Ok(Suit::Spade),
            'h' | '♥' => Ok(Suit::Heart),
            'd' | '♦' => Ok(Suit::Diamond),
            'c' | '♣' => Ok(Suit::Club),
            _ => Err(SuitParseError::Invalid(c.to_string())),
        }
    }
}

/// A playing card: rank + suit.
///
/// ```
/// use headsup_holdem::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ace, Suit::Spade);
/// assert_eq!(card.to_string(), "As");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }
    pub const fn suit(self) -> Suit {
        self.suit
    }

    /// Rank followed by the suit symbol, e.g. `A♠`.
    pub fn pretty(self) -> String {
        format!("{}{}", self.rank, self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        // suit is the last char (possibly a multi-byte symbol), rank is the rest
        let Some((idx, suit_ch)) = t.char_indices().last() else {
            return Err(CardParseError::Invalid(s.to_string()));
        };
        if idx == 0 {
            return Err(CardParseError::Invalid(s.to_string()));
        }
        let rank = Rank::from_str(&t[..idx])?;
        let suit = Suit::try_from(suit_ch)?;
        Ok(Card::new(rank, suit))
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use headsup_holdem::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("As, Kd 10c Q♥").unwrap();
/// assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spade));
/// assert_eq!(cards[1], Card::new(Rank::King, Suit::Diamond));
/// assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Club));
/// assert_eq!(cards[3], Card::new(Rank::Queen, Suit::Heart));
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_display_and_from_str() {
        assert_eq!(Rank::Ace.to_string(), "A");
        assert_eq!(Rank::from_str("T").unwrap(), Rank::Ten);
        assert_eq!(Rank::from_str("10").unwrap(), Rank::Ten);
        assert_eq!(Rank::from_str("queen").unwrap(), Rank::Queen);
        assert!(Rank::from_str("1").is_err());
    }

    #[test]
    fn ace_is_high_except_at_the_bottom_of_a_straight() {
        assert!(Rank::Ace > Rank::King);
        assert_eq!(Rank::Ace.value(), 14);
        assert_eq!(Rank::Ace.straight_low_value(), 1);
        assert_eq!(Rank::Five.straight_low_value(), 5);
        assert_eq!(Rank::from_value(1), Some(Rank::Ace));
        assert_eq!(Rank::from_value(15), None);
    }

    #[test]
    fn suit_display_and_from_str() {
        assert_eq!(Suit::Spade.to_string(), "s");
        assert_eq!(Suit::from_str("s").unwrap(), Suit::Spade);
        assert_eq!(Suit::from_str("Hearts").unwrap(), Suit::Heart);
        assert_eq!(Suit::from_str("club").unwrap(), Suit::Club);
        assert_eq!(Suit::from_str("♦").unwrap(), Suit::Diamond);
        assert!(Suit::from_str("x").is_err());
    }

    #[test]
    fn card_display_and_from_str() {
        let a = Card::new(Rank::Ace, Suit::Spade);
        assert_eq!(a.to_string(), "As");
        assert_eq!(a.pretty(), "A♠");
        assert_eq!(Card::from_str("As").unwrap(), a);
        assert_eq!(Card::from_str("A♠").unwrap(), a);
        assert_eq!(Card::from_str("10d").unwrap(), Card::new(Rank::Ten, Suit::Diamond));
        assert_eq!(Card::from_str("ah").unwrap(), Card::new(Rank::Ace, Suit::Heart));
        assert!(Card::from_str("s").is_err());
        assert!(Card::from_str("").is_err());
    }

    #[test]
    fn equality_is_by_rank_and_suit() {
        let a = Card::new(Rank::Nine, Suit::Club);
        assert_eq!(a, Card::new(Rank::Nine, Suit::Club));
        assert_ne!(a, Card::new(Rank::Nine, Suit::Heart));
        assert_ne!(a, Card::new(Rank::Eight, Suit::Club));
    }

    #[test]
    fn parse_many_cards() {
        let xs = parse_cards("As, Kd 10c").unwrap();
        assert_eq!(xs.len(), 3);
        assert_eq!(xs[2], Card::new(Rank::Ten, Suit::Club));
        assert!(parse_cards("As Zz").is_err());
    }
}
