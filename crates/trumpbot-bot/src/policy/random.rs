use super::{Policy, PolicyContext};
use crate::engine::DecisionError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use trumpbot_core::model::card::Card;
use trumpbot_core::model::trick::legal_cards;

/// Baseline opponent: a uniformly random legal card from a seeded RNG.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_play(&mut self, ctx: &PolicyContext<'_>) -> Result<Card, DecisionError> {
        legal_cards(ctx.hand, ctx.trick)
            .choose(&mut self.rng)
            .copied()
            .ok_or(DecisionError::InvalidHand)
    }
}
