use crate::betting::{Action, ActionError, Phase};
use crate::cards::{Card, Rank};
use crate::config::Chips;
use crate::engine::GameEngine;
use crate::evaluator::evaluate;
use crate::hand::HoleCards;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{AgentKind, PlayerAgent};

/// Difficulty tiers for bot play style and mistake rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

/// Configuration for a bot's play style.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    pub tightness: f64,
    pub aggression: f64,
    pub bluff: f64,
    pub curiosity: f64,
}

impl BotProfile {
    /// Create a profile with tuned defaults for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (tightness, aggression, bluff, curiosity) = match difficulty {
            Difficulty::Easy => (0.3, 0.18, 0.03, 0.4),
            Difficulty::Medium => (0.5, 0.35, 0.05, 0.2),
            Difficulty::Hard => (0.62, 0.48, 0.08, 0.12),
            Difficulty::Expert => (0.72, 0.6, 0.12, 0.1),
        };
        Self { difficulty, tightness, aggression, bluff, curiosity }
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

#[derive(Debug, Clone, Copy)]
struct BotDecision {
    action: Action,
    reason: &'static str,
}

#[derive(Clone, Copy)]
struct DecisionParams {
    adjusted: f64,
    fold_threshold: f64,
    raise_threshold: f64,
    aggression: f64,
    bluff: f64,
    curiosity: f64,
}

struct BotContext<'a> {
    phase: Phase,
    to_call: Chips,
    pot: Chips,
    current_bet: Chips,
    stack: Chips,
    /// Inclusive raise-target range, when raising is possible.
    raise: Option<(Chips, Chips)>,
    hole: &'a HoleCards,
    board: &'a [Card],
}

fn decide(ctx: &BotContext<'_>, profile: &BotProfile, rng: &mut impl Rng) -> BotDecision {
    let strength = estimate_strength(ctx.hole, ctx.board);
    let pot_odds = if ctx.to_call == 0 {
        0.0
    } else {
        ctx.to_call as f64 / (ctx.pot + ctx.to_call) as f64
    };
    let (mistake_rate, diff_bias) = difficulty_modifiers(profile.difficulty);
    let tightness = (profile.tightness + diff_bias).clamp(0.05, 0.95);
    let aggression = (profile.aggression + diff_bias).clamp(0.05, 0.95);
    let bluff = (profile.bluff + diff_bias * 0.5).clamp(0.0, 0.5);
    let curiosity = profile.curiosity.clamp(0.0, 0.6);

    let noise = rng.random_range(-1.0..=1.0) * mistake_rate * 0.18;
    let adjusted = (strength + noise).clamp(0.0, 1.0);

    let mut fold_threshold = 0.35 + tightness * 0.3;
    fold_threshold = (fold_threshold - pot_odds * 0.25).clamp(0.1, 0.9);
    let raise_threshold = (0.68 - aggression * 0.25).clamp(0.15, 0.9);

    let params =
        DecisionParams { adjusted, fold_threshold, raise_threshold, aggression, bluff, curiosity };

    if ctx.to_call > 0 {
        decide_facing_bet(ctx, rng, params)
    } else if ctx.current_bet > 0 {
        // big blind option preflop
        decide_when_checked(ctx, rng, params, choose_raise_target)
    } else {
        decide_when_checked(ctx, rng, params, choose_bet_target)
    }
}

fn decide_facing_bet(ctx: &BotContext<'_>, rng: &mut impl Rng, params: DecisionParams) -> BotDecision {
    if params.adjusted < params.fold_threshold && rng.random::<f64>() > params.curiosity * 0.3 {
        return BotDecision { action: Action::Fold, reason: "fold" };
    }
    if params.adjusted > params.raise_threshold && rng.random::<f64>() < params.aggression {
        if let Some(target) = choose_raise_target(ctx, params.aggression, params.adjusted) {
            return BotDecision { action: Action::Raise(target), reason: "value_raise" };
        }
    }
    BotDecision { action: Action::Call, reason: "call" }
}

fn decide_when_checked(
    ctx: &BotContext<'_>,
    rng: &mut impl Rng,
    params: DecisionParams,
    choose_target: fn(&BotContext<'_>, f64, f64) -> Option<Chips>,
) -> BotDecision {
    if params.adjusted > params.raise_threshold && rng.random::<f64>() < params.aggression {
        if let Some(target) = choose_target(ctx, params.aggression, params.adjusted) {
            return BotDecision { action: Action::Raise(target), reason: "value_bet" };
        }
    }
    if params.adjusted < params.fold_threshold && rng.random::<f64>() < params.bluff {
        if let Some(target) = choose_target(ctx, params.aggression, params.adjusted) {
            return BotDecision { action: Action::Raise(target), reason: "bluff" };
        }
    }
    BotDecision { action: Action::Check, reason: "check" }
}

fn difficulty_modifiers(difficulty: Difficulty) -> (f64, f64) {
    match difficulty {
        Difficulty::Easy => (0.28, -0.1),
        Difficulty::Medium => (0.14, 0.0),
        Difficulty::Hard => (0.08, 0.05),
        Difficulty::Expert => (0.04, 0.09),
    }
}

/// Opening bet size when nobody has bet this street.
fn choose_bet_target(ctx: &BotContext<'_>, aggression: f64, strength: f64) -> Option<Chips> {
    let (lo, hi) = ctx.raise?;
    if strength > 0.85 && ctx.stack <= ctx.pot {
        return Some(hi);
    }
    let base_factor = if strength > 0.8 {
        0.9
    } else if strength > 0.6 {
        0.6
    } else {
        0.33
    };
    let scale = 0.8 + aggression * 0.4;
    let size = ((ctx.pot as f64) * base_factor * scale).round() as Chips;
    Some(size.clamp(lo, hi))
}

/// Raise target when a bet is already out.
fn choose_raise_target(ctx: &BotContext<'_>, aggression: f64, strength: f64) -> Option<Chips> {
    let (lo, hi) = ctx.raise?;
    if strength > 0.88 && ctx.stack <= ctx.pot.saturating_add(ctx.to_call) {
        return Some(hi);
    }
    let base_factor = if strength > 0.85 {
        1.0
    } else if strength > 0.65 {
        0.7
    } else {
        0.5
    };
    let scale = 0.9 + aggression * 0.3;
    let raise = ((ctx.pot.max(ctx.current_bet) as f64) * base_factor * scale).round() as Chips;
    Some((ctx.current_bet + raise).clamp(lo, hi))
}

fn estimate_strength(hole: &HoleCards, board: &[Card]) -> f64 {
    if board.len() < 3 {
        return preflop_strength(hole);
    }
    let mut cards = hole.as_array().to_vec();
    cards.extend_from_slice(board);
    let Ok(eval) = evaluate(&cards) else {
        return preflop_strength(hole);
    };
    let category_weight = eval.category.ordinal() as f64 / 9.0;
    let high = eval.best_cards.first().map_or(0.0, |c| c.rank().value() as f64 / 14.0);
    let mut strength = category_weight * 0.85 + high * 0.15;
    if board.len() < 5 {
        strength = (strength + draw_bonus(hole, board, &cards)).min(1.0);
    }
    let texture_penalty = board_texture(board) * (0.12 * (1.0 - category_weight));
    (strength - texture_penalty).clamp(0.0, 1.0)
}

/// Heads-up starting-hand score; any two cards are playable, so every hand
/// gets the in-range bonus.
fn preflop_strength(hole: &HoleCards) -> f64 {
    let a = hole.first().rank().value() as i32;
    let b = hole.second().rank().value() as i32;
    let high = a.max(b) as f64;
    let low = a.min(b) as f64;
    let pair = a == b;
    let suited = hole.first().suit() == hole.second().suit();
    let gap = (high - low) as i32;

    let mut score = (high / 14.0) * 0.5 + (low / 14.0) * 0.1;
    if pair {
        score += 0.3 + (high / 14.0) * 0.1;
    }
    if suited {
        score += 0.05;
    }
    if gap == 1 {
        score += 0.05;
    } else if gap == 2 {
        score += 0.02;
    } else if gap > 4 {
        score -= 0.05;
    }
    (score + 0.12).clamp(0.0, 1.0)
}

fn suit_counts(cards: &[Card]) -> [u8; 4] {
    let mut suits = [0u8; 4];
    for c in cards {
        suits[c.suit() as usize] += 1;
    }
    suits
}

/// Distinct rank values ascending, with the ace also counted low.
fn straight_ranks(cards: &[Card]) -> Vec<i32> {
    let mut ranks: Vec<i32> = cards.iter().map(|c| c.rank().value() as i32).collect();
    ranks.sort_unstable();
    ranks.dedup();
    if let Some(ace) = cards.iter().map(|c| c.rank()).find(|&r| r == Rank::Ace) {
        ranks.insert(0, ace.straight_low_value() as i32);
    }
    ranks
}

/// How coordinated the board is, from 0 (dry) to 1 (very wet).
fn board_texture(board: &[Card]) -> f64 {
    if board.len() < 3 {
        return 0.0;
    }
    let max_suit = suit_counts(board).into_iter().max().unwrap_or(0);
    let mut texture: f64 = match max_suit {
        4..=5 => 0.5,
        3 => 0.3,
        2 => 0.15,
        _ => 0.0,
    };
    let mut rank_counts = [0u8; 15];
    for c in board {
        rank_counts[c.rank().value() as usize] += 1;
    }
    if rank_counts.iter().any(|&c| c >= 3) {
        texture += 0.25;
    } else if rank_counts.iter().any(|&c| c >= 2) {
        texture += 0.15;
    }

    let ranks = straight_ranks(board);
    if ranks.windows(4).any(|w| w[3] - w[0] <= 4) {
        texture += 0.25;
    }
    if ranks.windows(3).any(|w| w[2] - w[0] <= 4) {
        texture += 0.15;
    }
    texture.clamp(0.0, 1.0)
}

fn draw_bonus(hole: &HoleCards, board: &[Card], cards: &[Card]) -> f64 {
    let mut bonus = 0.0;
    let suits = suit_counts(cards);
    if suits.contains(&4) {
        bonus += 0.07;
    }
    if board.len() == 3 && suits.contains(&3) && hole.first().suit() == hole.second().suit() {
        bonus += 0.04;
    }

    let ranks = straight_ranks(cards);
    if let Some(span) = ranks.windows(4).map(|w| w[3] - w[0]).find(|&s| s <= 4) {
        bonus += if span == 3 { 0.06 } else { 0.03 };
    }

    let max_board = board.iter().map(|c| c.rank()).max();
    let overcards = hole.as_array().iter().filter(|c| Some(c.rank()) > max_board).count();
    bonus += overcards as f64 * 0.01;
    bonus
}

/// A profile-driven bot that estimates hand strength and sizes bets by pot.
///
/// Every random choice draws from the RNG handed to [`BotAgent::new`].
pub struct BotAgent<R = StdRng> {
    profile: BotProfile,
    rng: R,
}

impl BotAgent<StdRng> {
    /// A bot drawing from a `StdRng` seeded with `seed`.
    pub fn seeded(profile: BotProfile, seed: u64) -> Self {
        Self::new(profile, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BotAgent<R> {
    pub fn new(profile: BotProfile, rng: R) -> Self {
        Self { profile, rng }
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }
}

impl<R: Rng> PlayerAgent for BotAgent<R> {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<bool, ActionError> {
        if engine.active_player() != Some(seat) {
            return Ok(false);
        }
        let view = engine.snapshot().visible_to(seat);
        let Some(hole) = view.player(seat).hole else {
            return Ok(false);
        };
        let legal = engine.legal_actions();
        let ctx = BotContext {
            phase: view.phase,
            to_call: view.to_call,
            pot: view.pot,
            current_bet: view.current_bet,
            stack: view.player(seat).stack,
            raise: legal.raise,
            hole: &hole,
            board: &view.board,
        };

        let decision = decide(&ctx, &self.profile, &mut self.rng);
        let action = match decision.action {
            // never fold when checking is free
            Action::Fold if legal.check => Action::Check,
            Action::Check if !legal.check => Action::Call,
            Action::Call if legal.call.is_none() => Action::Check,
            other => other,
        };
        debug!("bot seat {seat} {}: {action} ({})", ctx.phase, decision.reason);
        engine.apply(action).map(|_| true)
    }
}
