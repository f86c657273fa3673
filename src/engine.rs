// Game engine API boundary. Agents and frontends drive a game through this
// trait without depending on how it is stored. It is implemented for `Game`.

use crate::betting::{Action, ActionError, LegalActions, Phase};
use crate::game::{Game, GameError};
use crate::snapshot::Snapshot;
use rand::Rng;

pub trait GameEngine {
    // Hand lifecycle
    fn start_hand(&mut self) -> Result<(), GameError>;

    // Player actions
    fn apply(&mut self, action: Action) -> Result<(), ActionError>;

    // Queries
    fn snapshot(&self) -> Snapshot;
    fn legal_actions(&self) -> LegalActions;
    fn active_player(&self) -> Option<usize>;
    fn phase(&self) -> Phase;
}

impl<R: Rng> GameEngine for Game<R> {
    fn start_hand(&mut self) -> Result<(), GameError> {
        Game::start_hand(self)
    }

    fn apply(&mut self, action: Action) -> Result<(), ActionError> {
        Game::apply(self, action)
    }

    fn snapshot(&self) -> Snapshot {
        Game::snapshot(self)
    }
    fn legal_actions(&self) -> LegalActions {
        Game::legal_actions(self)
    }
    fn active_player(&self) -> Option<usize> {
        Game::active_player(self)
    }
    fn phase(&self) -> Phase {
        Game::phase(self)
    }
}
