//! Agents: pluggable players for the two seats.
//!
//! `PlayerAgent` acts for a seat when it is that seat's turn; `AgentTable`
//! holds one optional agent per seat and drives whichever one is due. A
//! frontend keeps a `HumanAgent` on the player's seat and feeds it actions.

use crate::betting::{Action, ActionError};
use crate::engine::GameEngine;
use crate::game::{GameError, HandResult};
use core::fmt;

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// A seat controller that can act for a player when it is their turn.
pub trait PlayerAgent {
    /// Called when `seat` may be the active seat. Returns whether an action was applied.
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<bool, ActionError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally receive an action to play later; default is to ignore and return false.
    fn receive(&mut self, _action: Action) -> bool {
        false
    }
}

mod bots;
mod random;

pub use bots::{BotAgent, BotProfile, Difficulty};
pub use random::RandomAgent;

/// Plays whatever action it last received once its seat is active.
#[derive(Debug, Default)]
pub struct HumanAgent {
    pending: Option<Action>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn pending(&self) -> Option<Action> {
        self.pending
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn receive(&mut self, action: Action) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(action);
        true
    }
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<bool, ActionError> {
        if !engine.phase().is_betting() {
            self.pending = None;
            return Ok(false);
        }
        if engine.active_player() != Some(seat) {
            return Ok(false);
        }
        match self.pending.take() {
            Some(action) => engine.apply(action).map(|_| true),
            None => Ok(false),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("seat {seat} has no agent ready to act")]
    Stalled { seat: usize },
}

/// One optional agent per seat.
#[derive(Default)]
pub struct AgentTable {
    seats: [Option<Box<dyn PlayerAgent>>; 2],
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(AgentKind::Human) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl AgentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: usize, agent: Option<Box<dyn PlayerAgent>>) {
        if let Some(slot) = self.seats.get_mut(seat) {
            *slot = agent;
        }
    }

    /// Return the kind of agent at a seat, if any.
    pub fn agent_kind(&self, seat: usize) -> Option<AgentKind> {
        self.seats.get(seat).and_then(|a| a.as_deref().map(|ag| ag.kind()))
    }

    pub fn has_agent(&self, seat: usize) -> bool {
        self.agent_kind(seat).is_some()
    }

    /// Send an action to a specific seat agent, if any.
    pub fn receive(&mut self, seat: usize, action: Action) -> bool {
        match self.seats.get_mut(seat) {
            Some(Some(agent)) => agent.receive(action),
            _ => false,
        }
    }

    /// Let the agent on the active seat act, if there is one.
    pub fn drive(&mut self, engine: &mut dyn GameEngine) -> Result<bool, ActionError> {
        let Some(seat) = engine.active_player() else {
            return Ok(false);
        };
        match self.seats.get_mut(seat) {
            Some(Some(agent)) => agent.on_turn(engine, seat),
            _ => Ok(false),
        }
    }

    /// Start a hand and drive agents until it completes.
    ///
    /// Fails with [`TableError::Stalled`] when the active seat has no agent or
    /// its agent declines to act.
    pub fn play_hand(&mut self, engine: &mut dyn GameEngine) -> Result<HandResult, TableError> {
        engine.start_hand()?;
        while let Some(seat) = engine.active_player() {
            if !self.drive(engine)? {
                return Err(TableError::Stalled { seat });
            }
        }
        engine.snapshot().result.ok_or(TableError::Game(GameError::HandInProgress))
    }

    /// Remove all agents.
    pub fn clear(&mut self) {
        self.seats = [None, None];
    }
}
