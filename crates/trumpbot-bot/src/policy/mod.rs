mod random;
mod simple;

pub use random::RandomPolicy;
pub use simple::SimplePolicy;

use crate::engine::DecisionError;
use serde::{Deserialize, Serialize};
use trumpbot_core::model::card::Card;
use trumpbot_core::model::hand::Hand;
use trumpbot_core::model::player::PlayerPosition;
use trumpbot_core::model::trick::Trick;

/// Read-only view handed to a policy when it is its turn to play.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub seat: PlayerPosition,
    pub hand: &'a Hand,
    pub trick: &'a Trick,
}

/// Anything that can produce the next card for a seat.
pub trait Policy: Send {
    fn name(&self) -> &str;

    /// Choose one card from `ctx.hand` to play into `ctx.trick`.
    fn choose_play(&mut self, ctx: &PolicyContext<'_>) -> Result<Card, DecisionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Simple,
    Random,
}

impl PolicyKind {
    /// `seed` only matters for policies that draw random numbers.
    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            PolicyKind::Simple => Box::new(SimplePolicy::new()),
            PolicyKind::Random => Box::new(RandomPolicy::with_seed(seed)),
        }
    }
}
