//! Heads-up betting state machine: phases, player chips and action validation.
//!
//! [`BettingEngine::apply`] is the only way player chips move during a street.
//! Every action is validated against the current state first; a rejected
//! action returns an [`ActionError`] and leaves the engine untouched.

use crate::config::Chips;
use crate::hand::HoleCards;
use log::debug;
use std::fmt;

/// Hand phases in the order a hand moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Blinds,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    HandComplete,
}

impl Phase {
    /// Phases in which players act.
    pub const fn is_betting(self) -> bool {
        matches!(self, Phase::PreFlop | Phase::Flop | Phase::Turn | Phase::River)
    }

    /// The phase that follows a completed betting street.
    pub const fn next_street(self) -> Option<Phase> {
        match self {
            Phase::PreFlop => Some(Phase::Flop),
            Phase::Flop => Some(Phase::Turn),
            Phase::Turn => Some(Phase::River),
            Phase::River => Some(Phase::Showdown),
            _ => None,
        }
    }

    /// Community cards dealt when entering this phase.
    pub const fn cards_dealt(self) -> usize {
        match self {
            Phase::Flop => 3,
            Phase::Turn | Phase::River => 1,
            _ => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Phase::Blinds => "Blinds",
            Phase::PreFlop => "Pre-Flop",
            Phase::Flop => "Flop",
            Phase::Turn => "Turn",
            Phase::River => "River",
            Phase::Showdown => "Showdown",
            Phase::HandComplete => "Hand Complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A player decision. `Raise` carries the new total bet for the street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(Chips),
    AllIn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => f.write_str("Fold"),
            Action::Check => f.write_str("Check"),
            Action::Call => f.write_str("Call"),
            Action::Raise(amount) => write!(f, "Raise to {amount}"),
            Action::AllIn => f.write_str("All-in"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("no betting during {phase}")]
    NotBetting { phase: Phase },
    #[error("cannot check facing a bet of {to_call}")]
    CheckFacingBet { to_call: Chips },
    #[error("nothing to call; check or raise instead")]
    NothingToCall,
    #[error("raise must exceed the current bet: current {current}, target {target}")]
    RaiseTooSmall { current: Chips, target: Chips },
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Chips, available: Chips },
}

impl ActionError {
    /// The action breaks a betting rule; the player should pick another one.
    pub fn is_invalid_action(&self) -> bool {
        matches!(
            self,
            ActionError::CheckFacingBet { .. }
                | ActionError::NothingToCall
                | ActionError::RaiseTooSmall { .. }
        )
    }

    /// The player cannot afford the bet; going all-in is the alternative.
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, ActionError::InsufficientFunds { .. })
    }
}

/// One seat's chips and cards for the current hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) stack: Chips,
    pub(crate) street_bet: Chips,
    pub(crate) committed: Chips,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) folded: bool,
    pub(crate) all_in: bool,
    pub(crate) acted: bool,
}

impl Player {
    pub(crate) fn new(name: impl Into<String>, stack: Chips) -> Self {
        Self {
            name: name.into(),
            stack,
            street_bet: 0,
            committed: 0,
            hole: None,
            folded: false,
            all_in: false,
            acted: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chips behind, not yet committed.
    pub fn stack(&self) -> Chips {
        self.stack
    }

    /// Chips committed on the current street.
    pub fn street_bet(&self) -> Chips {
        self.street_bet
    }

    /// Chips committed over the whole hand, current street included.
    pub fn committed(&self) -> Chips {
        self.committed
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    pub fn is_folded(&self) -> bool {
        self.folded
    }

    pub fn is_all_in(&self) -> bool {
        self.all_in
    }

    /// Whether the player has acted on the current street.
    pub fn has_acted(&self) -> bool {
        self.acted
    }

    /// Still in the hand with chips left to bet.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    fn commit(&mut self, amount: Chips) {
        debug_assert!(amount <= self.stack);
        self.stack -= amount;
        self.street_bet += amount;
        self.committed += amount;
        if self.stack == 0 {
            self.all_in = true;
        }
    }

    fn reset_for_hand(&mut self) {
        self.street_bet = 0;
        self.committed = 0;
        self.hole = None;
        self.folded = false;
        self.all_in = false;
        self.acted = false;
    }

    fn reset_for_street(&mut self) {
        self.street_bet = 0;
        self.acted = false;
    }
}

/// Where the street stands after an accepted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    /// Betting continues with `next` to act.
    InProgress { next: usize },
    /// Bets are settled; the street is over.
    StreetComplete,
    /// The other player folded; `winner` takes the pot.
    FoldedOut { winner: usize },
}

/// What an accepted action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    pub seat: usize,
    /// The action as applied; a call the stack cannot cover becomes `AllIn`.
    pub action: Action,
    /// Chips moved from the stack into the pot.
    pub chips: Chips,
    /// The player's total street bet afterwards.
    pub street_bet: Chips,
    pub status: RoundStatus,
}

/// Actions open to the player whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LegalActions {
    pub check: bool,
    /// Chips needed to call, when facing a bet.
    pub call: Option<Chips>,
    /// Inclusive range of raise targets (total street bet).
    pub raise: Option<(Chips, Chips)>,
    /// Chips an all-in would commit.
    pub all_in: Option<Chips>,
}

impl LegalActions {
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Fold => true,
            Action::Check => self.check,
            Action::Call => self.call.is_some(),
            Action::Raise(target) => self.raise.is_some_and(|(lo, hi)| (lo..=hi).contains(&target)),
            Action::AllIn => self.all_in.is_some(),
        }
    }
}

/// Per-hand betting state for two seats.
#[derive(Debug, Clone)]
pub struct BettingEngine {
    players: [Player; 2],
    phase: Phase,
    current_bet: Chips,
    active: usize,
    dealer: usize,
}

impl BettingEngine {
    pub fn new(names: [String; 2], stack: Chips) -> Self {
        let [a, b] = names;
        Self {
            players: [Player::new(a, stack), Player::new(b, stack)],
            phase: Phase::HandComplete,
            current_bet: 0,
            active: 0,
            dealer: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> &Player {
        &self.players[seat]
    }

    /// The street bet everyone still betting has to match.
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    /// The seat to act, if a betting street is in progress.
    pub fn active(&self) -> Option<usize> {
        self.phase.is_betting().then_some(self.active)
    }

    /// Sum of every player's commitment this hand.
    pub fn pot(&self) -> Chips {
        self.players.iter().map(|p| p.committed).sum()
    }

    pub fn to_call(&self, seat: usize) -> Chips {
        self.current_bet.saturating_sub(self.players[seat].street_bet)
    }

    /// Seat opposite `seat`.
    pub const fn other(seat: usize) -> usize {
        1 - seat
    }

    /// Small blind seat: the seat left of the dealer.
    pub fn small_blind_seat(&self) -> usize {
        Self::other(self.dealer)
    }

    /// Big blind seat: the dealer.
    pub fn big_blind_seat(&self) -> usize {
        self.dealer
    }

    /// Fewer than two players can still bet, so no more betting can happen.
    pub fn betting_closed(&self) -> bool {
        self.players.iter().filter(|p| p.can_act()).count() < 2
    }

    pub fn legal_actions(&self) -> LegalActions {
        if !self.phase.is_betting() {
            return LegalActions::default();
        }
        let p = &self.players[self.active];
        if !p.can_act() {
            return LegalActions::default();
        }
        let to_call = self.to_call(self.active);
        let max_total = p.street_bet + p.stack;
        LegalActions {
            check: to_call == 0,
            call: (to_call > 0).then_some(to_call.min(p.stack)),
            raise: (max_total > self.current_bet).then_some((self.current_bet + 1, max_total)),
            all_in: (p.stack > 0).then_some(p.stack),
        }
    }

    /// Reset per-hand state and enter [`Phase::Blinds`] with `dealer` on the button.
    pub(crate) fn start_hand(&mut self, dealer: usize) {
        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.dealer = dealer;
        self.current_bet = 0;
        self.active = self.small_blind_seat();
        self.phase = Phase::Blinds;
    }

    /// Post both blinds and move to [`Phase::PreFlop`]. A short stack posts
    /// what it has. Returns the amounts posted as (small, big).
    pub(crate) fn post_blinds(&mut self, small_blind: Chips, big_blind: Chips) -> (Chips, Chips) {
        debug_assert_eq!(self.phase, Phase::Blinds);
        let sb = self.small_blind_seat();
        let bb = self.big_blind_seat();
        let sb_paid = self.players[sb].stack.min(small_blind);
        self.players[sb].commit(sb_paid);
        let bb_paid = self.players[bb].stack.min(big_blind);
        self.players[bb].commit(bb_paid);

        self.current_bet = sb_paid.max(bb_paid);
        self.active = sb;
        self.phase = Phase::PreFlop;
        debug!("blinds posted: seat {sb} {sb_paid}, seat {bb} {bb_paid}");
        (sb_paid, bb_paid)
    }

    pub(crate) fn deal_hole(&mut self, seat: usize, hole: HoleCards) {
        self.players[seat].hole = Some(hole);
    }

    /// Whether the street needs no further action: everyone able to bet has
    /// matched the bet, and has acted unless they are the only one left betting.
    pub fn street_settled(&self) -> bool {
        let mut betting = self.players.iter().filter(|p| p.can_act()).peekable();
        if betting.peek().is_none() {
            return true;
        }
        let bettors: Vec<&Player> = betting.collect();
        let matched = bettors.iter().all(|p| p.street_bet >= self.current_bet);
        matched && (bettors.len() == 1 || bettors.iter().all(|p| p.acted))
    }

    /// Validate and apply `action` for the player whose turn it is.
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome, ActionError> {
        if !self.phase.is_betting() {
            return Err(ActionError::NotBetting { phase: self.phase });
        }
        let seat = self.active;
        let (applied, chips) = self.validate(seat, action)?;

        let previous_bet = self.current_bet;
        let player = &mut self.players[seat];
        player.acted = true;
        match applied {
            Action::Fold => player.folded = true,
            Action::Check => {}
            Action::Call | Action::Raise(_) | Action::AllIn => player.commit(chips),
        }
        let street_bet = player.street_bet;
        if street_bet > previous_bet {
            self.current_bet = street_bet;
            // a raise reopens the action
            self.players[Self::other(seat)].acted = false;
        }

        let status = if applied == Action::Fold {
            RoundStatus::FoldedOut { winner: Self::other(seat) }
        } else if self.street_settled() {
            RoundStatus::StreetComplete
        } else {
            let next = Self::other(seat);
            self.active = if self.players[next].can_act() { next } else { seat };
            RoundStatus::InProgress { next: self.active }
        };
        debug!("{}: seat {seat} {applied} ({chips} chips), {status:?}", self.phase);
        Ok(ActionOutcome { seat, action: applied, chips, street_bet, status })
    }

    /// Check `action` against the rules without touching state. Returns the
    /// action as it will be applied and the chips it moves.
    fn validate(&self, seat: usize, action: Action) -> Result<(Action, Chips), ActionError> {
        let p = &self.players[seat];
        let to_call = self.to_call(seat);
        match action {
            Action::Fold => Ok((Action::Fold, 0)),
            Action::Check if to_call > 0 => Err(ActionError::CheckFacingBet { to_call }),
            Action::Check => Ok((Action::Check, 0)),
            Action::Call if to_call == 0 => Err(ActionError::NothingToCall),
            Action::Call if to_call >= p.stack => Ok((Action::AllIn, p.stack)),
            Action::Call => Ok((Action::Call, to_call)),
            Action::Raise(target) if target <= self.current_bet => {
                Err(ActionError::RaiseTooSmall { current: self.current_bet, target })
            }
            Action::Raise(target) => {
                let needed = target - p.street_bet;
                if needed > p.stack {
                    Err(ActionError::InsufficientFunds { needed, available: p.stack })
                } else if needed == p.stack {
                    Ok((Action::AllIn, needed))
                } else {
                    Ok((Action::Raise(target), needed))
                }
            }
            Action::AllIn => Ok((Action::AllIn, p.stack)),
        }
    }

    /// Open a new street: clear street bets and hand the action to the first
    /// player able to bet, starting with the dealer.
    pub(crate) fn begin_street(&mut self, phase: Phase) {
        for p in &mut self.players {
            p.reset_for_street();
        }
        self.current_bet = 0;
        self.phase = phase;
        self.active =
            if self.players[self.dealer].can_act() { self.dealer } else { Self::other(self.dealer) };
    }

    pub(crate) fn enter_showdown(&mut self) {
        for p in &mut self.players {
            p.reset_for_street();
        }
        self.current_bet = 0;
        self.phase = Phase::Showdown;
    }

    /// Return chips one player committed beyond what the other matched.
    /// Returns the seat and amount refunded, if any.
    pub(crate) fn refund_uncalled(&mut self) -> Option<(usize, Chips)> {
        let [a, b] = [self.players[0].committed, self.players[1].committed];
        let (seat, excess) = match a.cmp(&b) {
            std::cmp::Ordering::Greater => (0, a - b),
            std::cmp::Ordering::Less => (1, b - a),
            std::cmp::Ordering::Equal => return None,
        };
        let p = &mut self.players[seat];
        p.committed -= excess;
        p.street_bet = p.street_bet.saturating_sub(excess);
        p.stack += excess;
        Some((seat, excess))
    }

    /// Pay out `amounts` per seat from the pot and close the hand.
    pub(crate) fn settle(&mut self, amounts: [Chips; 2]) {
        debug_assert_eq!(amounts.iter().sum::<Chips>(), self.pot());
        for (p, amount) in self.players.iter_mut().zip(amounts) {
            p.stack += amount;
            p.committed = 0;
            p.street_bet = 0;
        }
        self.current_bet = 0;
        self.phase = Phase::HandComplete;
    }

    /// Seats of players still holding cards.
    pub fn contenders(&self) -> impl Iterator<Item = usize> + '_ {
        (0..2).filter(move |&i| !self.players[i].folded)
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self, seat: usize) -> &mut Player {
        &mut self.players[seat]
    }
}
