//! Hand orchestration: shuffling, blinds, dealing streets, showdown and payouts.

use crate::betting::{Action, ActionError, ActionOutcome, BettingEngine, LegalActions, Phase, Player, RoundStatus};
use crate::cards::Card;
use crate::config::{Chips, ConfigError, GameConfig};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate_seven, EvaluatedHand};
use crate::hand::{Board, HandError, HoleCards};
use crate::snapshot::{PlayerView, Snapshot};
use core::cmp::Ordering;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandHistoryVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    RaiseTo,
    AllIn,
    Refund,
    Win,
    Split,
}

impl HandHistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HandHistoryVerb::SmallBlind => "SB",
            HandHistoryVerb::BigBlind => "BB",
            HandHistoryVerb::Fold => "Fold",
            HandHistoryVerb::Check => "Check",
            HandHistoryVerb::Call => "Call",
            HandHistoryVerb::RaiseTo => "Raise to",
            HandHistoryVerb::AllIn => "All-in",
            HandHistoryVerb::Refund => "Refund",
            HandHistoryVerb::Win => "Win",
            HandHistoryVerb::Split => "Split",
        }
    }
}

/// One line of the current hand's history.
///
/// `amount` is the chips posted for blinds and calls, the new street total for
/// raises and all-ins, and the chips received for refunds and awards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HandHistoryEntry {
    pub seat: usize,
    pub verb: HandHistoryVerb,
    pub amount: Option<Chips>,
    pub phase: Phase,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("the current hand is still in progress")]
    HandInProgress,
    #[error("game over: seat {winner} holds every chip")]
    GameOver { winner: usize },
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Hand(#[from] HandError),
}

/// How the last hand ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandResult {
    /// Each seat's best hand; `None` for both when the hand ended on a fold.
    pub hands: [Option<EvaluatedHand>; 2],
    pub winners: Vec<usize>,
    /// Chips each seat took from the pot.
    pub payouts: [Chips; 2],
    /// Uncalled chips returned before the award.
    pub refund: Option<(usize, Chips)>,
}

impl HandResult {
    pub fn is_split(&self) -> bool {
        self.winners.len() > 1
    }

    pub fn went_to_showdown(&self) -> bool {
        self.hands.iter().any(Option::is_some)
    }
}

/// Divide `pot` among `winners`; the odd chip goes to `odd_chip_seat`.
fn split_pot(pot: Chips, winners: &[usize], odd_chip_seat: usize) -> [Chips; 2] {
    let mut payouts = [0; 2];
    match winners {
        [only] => payouts[*only] = pot,
        _ => {
            let share = pot / 2;
            payouts = [share, share];
            payouts[odd_chip_seat] += pot % 2;
        }
    }
    payouts
}

/// A heads-up Hold'em game between two seats.
///
/// ```
/// use headsup_holdem::betting::{Action, Phase};
/// use headsup_holdem::config::GameConfig;
/// use headsup_holdem::game::Game;
///
/// let mut game = Game::with_seed(GameConfig::default(), 7).unwrap();
/// game.start_hand().unwrap();
/// assert_eq!(game.pot(), 300);
/// game.apply(Action::Call).unwrap();
/// game.apply(Action::Check).unwrap();
/// assert_eq!(game.phase(), Phase::Flop);
/// assert_eq!(game.board().len(), 3);
/// ```
#[derive(Debug)]
pub struct Game<R = ChaCha8Rng> {
    config: GameConfig,
    rng: R,
    board: Board,
    /// Five community cards drawn at the start of the hand, revealed street by street.
    runout: Option<[Card; 5]>,
    betting: BettingEngine,
    hands_played: u64,
    history: Vec<HandHistoryEntry>,
    result: Option<HandResult>,
}

impl Game<ChaCha8Rng> {
    /// A game whose shuffles are reproducible from `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let betting = BettingEngine::new(config.player_names.clone(), config.initial_stack);
        Ok(Self {
            config,
            rng,
            board: Board::default(),
            runout: None,
            betting,
            hands_played: 0,
            history: Vec::new(),
            result: None,
        })
    }

    /// Shuffle a fresh deck and start the next hand.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        self.check_can_start()?;
        let mut deck = Deck::new();
        deck.shuffle(&mut self.rng);
        self.begin_hand(deck)
    }

    /// Start the next hand dealing from `deck` as given. Hole cards go to the
    /// small blind first, two at a time, then the five community cards.
    pub fn start_hand_with_deck(&mut self, deck: Deck) -> Result<(), GameError> {
        self.check_can_start()?;
        self.begin_hand(deck)
    }

    fn check_can_start(&self) -> Result<(), GameError> {
        if self.betting.phase() != Phase::HandComplete {
            return Err(GameError::HandInProgress);
        }
        match self.winner() {
            Some(winner) => Err(GameError::GameOver { winner }),
            None => Ok(()),
        }
    }

    fn begin_hand(&mut self, mut deck: Deck) -> Result<(), GameError> {
        let dealer = if self.hands_played == 0 { 0 } else { BettingEngine::other(self.betting.dealer()) };
        let sb = BettingEngine::other(dealer);

        // draw everything first so a short deck leaves the previous hand intact
        let sb_hole = deck.deal_array::<2>()?;
        let bb_hole = deck.deal_array::<2>()?;
        let runout = deck.deal_array::<5>()?;
        let sb_hole = HoleCards::try_new(sb_hole[0], sb_hole[1])?;
        let bb_hole = HoleCards::try_new(bb_hole[0], bb_hole[1])?;

        self.hands_played += 1;
        self.history.clear();
        self.result = None;
        self.board.clear();
        self.runout = Some(runout);
        info!(
            "hand #{}: {} deals, blinds {}/{}",
            self.hands_played,
            self.config.player_names[dealer],
            self.config.small_blind,
            self.config.big_blind
        );

        self.betting.start_hand(dealer);
        let (sb_paid, bb_paid) = self.betting.post_blinds(self.config.small_blind, self.config.big_blind);
        self.record(sb, HandHistoryVerb::SmallBlind, Some(sb_paid), Phase::Blinds);
        self.record(dealer, HandHistoryVerb::BigBlind, Some(bb_paid), Phase::Blinds);
        self.betting.deal_hole(sb, sb_hole);
        self.betting.deal_hole(dealer, bb_hole);

        if self.betting.street_settled() && self.betting.betting_closed() {
            self.advance_streets();
        }
        Ok(())
    }

    /// Apply `action` for the active player and advance the hand as far as it goes.
    ///
    /// Rejected actions leave the game untouched.
    pub fn apply(&mut self, action: Action) -> Result<(), ActionError> {
        let phase = self.betting.phase();
        let outcome = self.betting.apply(action)?;
        self.record_action(&outcome, phase);
        match outcome.status {
            RoundStatus::InProgress { .. } => {}
            RoundStatus::StreetComplete => self.advance_streets(),
            RoundStatus::FoldedOut { winner } => self.award_uncontested(winner),
        }
        Ok(())
    }

    fn record_action(&mut self, outcome: &ActionOutcome, phase: Phase) {
        let (verb, amount) = match outcome.action {
            Action::Fold => (HandHistoryVerb::Fold, None),
            Action::Check => (HandHistoryVerb::Check, None),
            Action::Call => (HandHistoryVerb::Call, Some(outcome.chips)),
            Action::Raise(_) => (HandHistoryVerb::RaiseTo, Some(outcome.street_bet)),
            Action::AllIn => (HandHistoryVerb::AllIn, Some(outcome.street_bet)),
        };
        self.record(outcome.seat, verb, amount, phase);
    }

    /// Move past a settled street: deal the next one, or keep dealing while
    /// nobody can bet, and go to showdown after the river.
    fn advance_streets(&mut self) {
        while let Some(next) = self.betting.phase().next_street() {
            if next == Phase::Showdown {
                self.showdown();
                return;
            }
            self.reveal(next);
            self.betting.begin_street(next);
            debug!("{next}: board {}", self.board_string());
            if !self.betting.betting_closed() {
                return;
            }
        }
    }

    fn reveal(&mut self, phase: Phase) {
        let Some(runout) = self.runout else { return };
        let start = self.board.len();
        let end = (start + phase.cards_dealt()).min(runout.len());
        self.board.extend(runout[start..end].iter().copied());
    }

    fn board_string(&self) -> String {
        self.board.as_slice().iter().map(Card::to_string).collect::<Vec<_>>().join(" ")
    }

    fn showdown(&mut self) {
        self.betting.enter_showdown();
        let refund = self.refund_uncalled();

        let runout = self.runout;
        let hands = self.betting.players().clone().map(|p| {
            p.hole().zip(runout).map(|(hole, board)| {
                let [a, b] = hole.as_array();
                evaluate_seven(&[a, b, board[0], board[1], board[2], board[3], board[4]])
            })
        });
        let winners = match (&hands[0], &hands[1]) {
            (Some(a), Some(b)) => match a.cmp(b) {
                Ordering::Greater => vec![0],
                Ordering::Less => vec![1],
                Ordering::Equal => vec![0, 1],
            },
            (Some(_), None) => vec![0],
            (None, Some(_)) => vec![1],
            (None, None) => vec![0, 1],
        };
        for (seat, hand) in hands.iter().enumerate() {
            if let Some(hand) = hand {
                info!("showdown: {} shows {hand}", self.betting.player(seat).name());
            }
        }

        let pot = self.betting.pot();
        let payouts = split_pot(pot, &winners, self.betting.small_blind_seat());
        let verb = if winners.len() > 1 { HandHistoryVerb::Split } else { HandHistoryVerb::Win };
        for &seat in &winners {
            self.record(seat, verb, Some(payouts[seat]), Phase::Showdown);
        }
        self.finish(HandResult { hands, winners, payouts, refund });
    }

    fn award_uncontested(&mut self, winner: usize) {
        let phase = self.betting.phase();
        let refund = self.refund_uncalled();
        let pot = self.betting.pot();
        let payouts = split_pot(pot, &[winner], winner);
        self.record(winner, HandHistoryVerb::Win, Some(pot), phase);
        self.finish(HandResult { hands: [None, None], winners: vec![winner], payouts, refund });
    }

    fn refund_uncalled(&mut self) -> Option<(usize, Chips)> {
        let phase = self.betting.phase();
        let refund = self.betting.refund_uncalled();
        if let Some((seat, chips)) = refund {
            debug!("returning {chips} uncalled chips to seat {seat}");
            self.record(seat, HandHistoryVerb::Refund, Some(chips), phase);
        }
        refund
    }

    fn finish(&mut self, result: HandResult) {
        for (seat, &paid) in result.payouts.iter().enumerate() {
            if paid > 0 {
                info!("{} wins {paid}", self.betting.player(seat).name());
            }
        }
        self.betting.settle(result.payouts);
        self.result = Some(result);
    }

    fn record(&mut self, seat: usize, verb: HandHistoryVerb, amount: Option<Chips>, phase: Phase) {
        self.history.push(HandHistoryEntry { seat, verb, amount, phase });
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.betting.phase()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        self.betting.players()
    }

    pub fn pot(&self) -> Chips {
        self.betting.pot()
    }

    pub fn dealer(&self) -> usize {
        self.betting.dealer()
    }

    /// Seat whose turn it is, while a betting street is open.
    pub fn active_player(&self) -> Option<usize> {
        self.betting.active()
    }

    pub fn current_bet(&self) -> Chips {
        self.betting.current_bet()
    }

    pub fn to_call(&self, seat: usize) -> Chips {
        self.betting.to_call(seat)
    }

    pub fn legal_actions(&self) -> LegalActions {
        self.betting.legal_actions()
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    /// Outcome of the last completed hand.
    pub fn result(&self) -> Option<&HandResult> {
        self.result.as_ref()
    }

    /// The seat holding every chip once the other seat is broke.
    pub fn winner(&self) -> Option<usize> {
        if self.betting.phase() != Phase::HandComplete {
            return None;
        }
        let players = self.betting.players();
        match (players[0].stack(), players[1].stack()) {
            (0, _) => Some(1),
            (_, 0) => Some(0),
            _ => None,
        }
    }

    pub fn history(&self) -> &[HandHistoryEntry] {
        &self.history
    }

    /// The last `n` history entries.
    pub fn history_recent(&self, n: usize) -> Vec<HandHistoryEntry> {
        let start = self.history.len().saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn snapshot(&self) -> Snapshot {
        let players = self.betting.players().clone().map(|p| PlayerView {
            name: p.name().to_string(),
            stack: p.stack(),
            street_bet: p.street_bet(),
            committed: p.committed(),
            folded: p.is_folded(),
            all_in: p.is_all_in(),
            hole: p.hole(),
        });
        let active = self.betting.active();
        Snapshot {
            pot: self.betting.pot(),
            players,
            board: self.board.as_slice().to_vec(),
            phase: self.betting.phase(),
            active,
            dealer: self.betting.dealer(),
            current_bet: self.betting.current_bet(),
            to_call: active.map_or(0, |seat| self.betting.to_call(seat)),
            result: self.result.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::evaluator::Category;

    /// Deck dealing `sb` and `bb` hole cards and then `board`.
    fn scripted(sb: &str, bb: &str, board: &str) -> Deck {
        let cards = parse_cards(&format!("{sb} {bb} {board}")).unwrap();
        Deck::stacked(&cards).unwrap()
    }

    fn total_chips<R: Rng>(game: &Game<R>) -> Chips {
        game.players().iter().map(|p| p.stack()).sum::<Chips>() + game.pot()
    }

    #[test]
    fn blinds_and_first_action() {
        let mut game = Game::with_seed(GameConfig::default(), 1).unwrap();
        game.start_hand().unwrap();
        assert_eq!(game.phase(), Phase::PreFlop);
        assert_eq!(game.dealer(), 0);
        assert_eq!(game.active_player(), Some(1));
        assert_eq!(game.players()[1].stack(), 2900);
        assert_eq!(game.players()[0].stack(), 2800);
        assert_eq!(game.pot(), 300);
        assert_eq!(game.current_bet(), 200);
        assert!(game.players().iter().all(|p| p.hole().is_some()));
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn raise_call_moves_to_flop_with_reset_bets() {
        let mut game = Game::with_seed(GameConfig::default(), 2).unwrap();
        game.start_hand().unwrap();
        game.apply(Action::Raise(400)).unwrap();
        game.apply(Action::Call).unwrap();
        assert_eq!(game.phase(), Phase::Flop);
        assert_eq!(game.pot(), 800);
        assert_eq!(game.board().len(), 3);
        assert!(game.players().iter().all(|p| p.street_bet() == 0));
        assert_eq!(game.active_player(), Some(0));
    }

    #[test]
    fn cannot_start_while_hand_in_progress() {
        let mut game = Game::with_seed(GameConfig::default(), 3).unwrap();
        game.start_hand().unwrap();
        assert_eq!(game.start_hand(), Err(GameError::HandInProgress));
    }

    #[test]
    fn fold_awards_pot_and_rotates_dealer() {
        let mut game = Game::with_seed(GameConfig::default(), 4).unwrap();
        game.start_hand().unwrap();
        game.apply(Action::Fold).unwrap();
        assert_eq!(game.phase(), Phase::HandComplete);
        assert_eq!(game.players()[0].stack(), 3100);
        assert_eq!(game.players()[1].stack(), 2900);
        let result = game.result().unwrap();
        assert_eq!(result.winners, vec![0]);
        assert!(!result.went_to_showdown());
        assert_eq!(result.refund, Some((0, 100)));

        game.start_hand().unwrap();
        assert_eq!(game.dealer(), 1);
        assert_eq!(game.active_player(), Some(0));
    }

    #[test]
    fn showdown_pays_the_better_hand() {
        let mut game = Game::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(0)).unwrap();
        game.start_hand_with_deck(scripted("As Ah", "Kd Kc", "2c 7d 9h Js 3s")).unwrap();
        game.apply(Action::Call).unwrap();
        game.apply(Action::Check).unwrap();
        for _ in 0..3 {
            game.apply(Action::Check).unwrap();
            game.apply(Action::Check).unwrap();
        }
        assert_eq!(game.phase(), Phase::HandComplete);
        let result = game.result().unwrap();
        // seat 1 posted the small blind and holds the aces
        assert_eq!(result.winners, vec![1]);
        assert_eq!(result.hands[1].as_ref().unwrap().category, Category::OnePair);
        assert_eq!(game.players()[1].stack(), 3200);
        assert_eq!(total_chips(&game), 6000);
    }

    #[test]
    fn board_plays_for_a_split() {
        let mut game = Game::with_seed(GameConfig::default(), 0).unwrap();
        game.start_hand_with_deck(scripted("2c 3d", "2h 3s", "Ts Js Qs Ks As")).unwrap();
        game.apply(Action::AllIn).unwrap();
        game.apply(Action::Call).unwrap();
        assert_eq!(game.board().len(), 5);
        let result = game.result().unwrap();
        assert!(result.is_split());
        assert_eq!(result.payouts, [3000, 3000]);
        assert_eq!(game.players()[0].stack(), 3000);
        assert_eq!(game.players()[1].stack(), 3000);
        assert_eq!(game.history().last().unwrap().verb, HandHistoryVerb::Split);
    }

    #[test]
    fn odd_chip_goes_to_the_designated_seat() {
        assert_eq!(split_pot(301, &[0, 1], 1), [150, 151]);
        assert_eq!(split_pot(301, &[0, 1], 0), [151, 150]);
        assert_eq!(split_pot(301, &[1], 0), [0, 301]);
    }

    #[test]
    fn all_in_runs_out_the_board() {
        let mut game = Game::with_seed(GameConfig::default(), 9).unwrap();
        game.start_hand().unwrap();
        game.apply(Action::AllIn).unwrap();
        game.apply(Action::Call).unwrap();
        assert_eq!(game.phase(), Phase::HandComplete);
        assert_eq!(game.board().len(), 5);
        assert!(game.result().unwrap().went_to_showdown());
        assert_eq!(total_chips(&game), 6000);
    }

    #[test]
    fn rejected_action_leaves_snapshot_unchanged() {
        let mut game = Game::with_seed(GameConfig::default(), 5).unwrap();
        game.start_hand().unwrap();
        let before = game.snapshot();
        assert!(game.apply(Action::Check).is_err());
        assert!(game.apply(Action::Raise(100)).is_err());
        assert!(game.apply(Action::Raise(10_000)).is_err());
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn actions_after_hand_complete_are_rejected() {
        let mut game = Game::with_seed(GameConfig::default(), 6).unwrap();
        game.start_hand().unwrap();
        game.apply(Action::Fold).unwrap();
        assert_eq!(
            game.apply(Action::Check),
            Err(ActionError::NotBetting { phase: Phase::HandComplete })
        );
    }

    #[test]
    fn busted_player_ends_the_game() {
        let mut game = Game::with_seed(GameConfig::default(), 0).unwrap();
        game.start_hand_with_deck(scripted("As Ah", "7d 2c", "Kc 9d 4h Js 3s")).unwrap();
        game.apply(Action::AllIn).unwrap();
        game.apply(Action::Call).unwrap();
        assert_eq!(game.winner(), Some(1));
        assert_eq!(game.start_hand(), Err(GameError::GameOver { winner: 1 }));
    }

    #[test]
    fn short_deck_is_reported() {
        let mut game = Game::with_seed(GameConfig::default(), 0).unwrap();
        let mut deck = Deck::new();
        deck.deal(45).unwrap();
        assert!(matches!(game.start_hand_with_deck(deck), Err(GameError::Deck(_))));
        assert_eq!(game.phase(), Phase::HandComplete);
        assert_eq!(game.hands_played(), 0);
    }

    #[test]
    fn history_recent_returns_tail() {
        let mut game = Game::with_seed(GameConfig::default(), 8).unwrap();
        game.start_hand().unwrap();
        game.apply(Action::Raise(600)).unwrap();
        let recent = game.history_recent(1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].verb, HandHistoryVerb::RaiseTo);
        assert_eq!(recent[0].amount, Some(600));
        assert_eq!(game.history_recent(10).len(), 3);
    }
}
