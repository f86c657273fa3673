//! Read-only view of a game for renderers and agents.

use crate::betting::Phase;
use crate::cards::Card;
use crate::config::Chips;
use crate::game::HandResult;
use crate::hand::HoleCards;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub name: String,
    pub stack: Chips,
    pub street_bet: Chips,
    pub committed: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub hole: Option<HoleCards>,
}

/// Everything needed to draw the table at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub pot: Chips,
    pub players: [PlayerView; 2],
    pub board: Vec<Card>,
    pub phase: Phase,
    /// Seat to act, if betting is open.
    pub active: Option<usize>,
    pub dealer: usize,
    pub current_bet: Chips,
    /// What the active seat needs to call; zero when nobody is to act.
    pub to_call: Chips,
    /// Result of the last hand, once it is complete.
    pub result: Option<HandResult>,
}

impl Snapshot {
    /// The table as `seat` may see it: the opponent's hole cards stay hidden
    /// unless they were shown down.
    pub fn visible_to(mut self, seat: usize) -> Self {
        let shown = self.result.as_ref().is_some_and(|r| r.went_to_showdown());
        if !shown {
            for (i, p) in self.players.iter_mut().enumerate() {
                if i != seat {
                    p.hole = None;
                }
            }
        }
        self
    }

    pub fn player(&self, seat: usize) -> &PlayerView {
        &self.players[seat]
    }

    /// Label of the category a seat showed down, for display.
    pub fn shown_category(&self, seat: usize) -> Option<&'static str> {
        let result = self.result.as_ref()?;
        result.hands[seat].as_ref().map(|h| h.category.name())
    }

    /// Best five cards a seat showed down.
    pub fn shown_cards(&self, seat: usize) -> Option<&[Card]> {
        let result = self.result.as_ref()?;
        result.hands[seat].as_ref().map(|h| h.best_cards.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use crate::betting::Action;
    use crate::cards::parse_cards;
    use crate::config::GameConfig;
    use crate::deck::Deck;
    use crate::game::Game;

    #[test]
    fn opponent_cards_hidden_until_showdown() {
        let mut game = Game::with_seed(GameConfig::default(), 3).unwrap();
        game.start_hand().unwrap();
        let view = game.snapshot().visible_to(0);
        assert!(view.player(0).hole.is_some());
        assert!(view.player(1).hole.is_none());

        game.apply(Action::Fold).unwrap();
        let view = game.snapshot().visible_to(0);
        assert!(view.player(1).hole.is_none());
        assert_eq!(view.shown_category(0), None);
    }

    #[test]
    fn showdown_details_are_published() {
        let cards = parse_cards("Qs Qh 4d 4c Qd 8s 2h Kc 5d").unwrap();
        let mut game = Game::with_seed(GameConfig::default(), 0).unwrap();
        game.start_hand_with_deck(Deck::stacked(&cards).unwrap()).unwrap();
        game.apply(Action::AllIn).unwrap();
        game.apply(Action::Call).unwrap();

        let view = game.snapshot().visible_to(0);
        assert!(view.player(1).hole.is_some());
        assert_eq!(view.shown_category(1), Some("Three of a Kind"));
        assert_eq!(view.shown_category(0), Some("One Pair"));
        assert_eq!(view.shown_cards(1).map(<[_]>::len), Some(5));
        assert_eq!(view.pot, 0);
        assert_eq!(view.active, None);
        assert_eq!(view.to_call, 0);
    }
}
