use crate::betting::{Action, ActionError};
use crate::engine::GameEngine;
use log::debug;
use rand::Rng;

use super::{AgentKind, PlayerAgent};

/// An opponent that picks uniformly among calling, checking and raising to
/// twice the current bet, considering only the options it can afford.
///
/// It only raises when facing a bet. When none of the three options is
/// available it goes all-in if it can and folds otherwise.
#[derive(Debug)]
pub struct RandomAgent<R> {
    rng: R,
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn choose(&mut self, engine: &dyn GameEngine, seat: usize) -> Action {
        let view = engine.snapshot();
        let legal = engine.legal_actions();
        let stack = view.player(seat).stack;

        let mut options = Vec::with_capacity(3);
        if view.to_call > 0 && view.to_call <= stack {
            options.push(Action::Call);
        }
        if legal.check {
            options.push(Action::Check);
        }
        match legal.raise {
            Some((lo, hi)) if view.to_call > 0 => {
                let target = (view.current_bet * 2).max(lo);
                if target <= hi {
                    options.push(Action::Raise(target));
                }
            }
            _ => {}
        }

        if options.is_empty() {
            return if legal.all_in.is_some() { Action::AllIn } else { Action::Fold };
        }
        options[self.rng.random_range(0..options.len())]
    }
}

impl<R: Rng> PlayerAgent for RandomAgent<R> {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<bool, ActionError> {
        if engine.active_player() != Some(seat) {
            return Ok(false);
        }
        let action = self.choose(engine, seat);
        debug!("random agent seat {seat}: {action}");
        engine.apply(action).map(|_| true)
    }
}
