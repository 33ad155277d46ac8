use super::{Policy, PolicyContext};
use crate::engine::{DecisionEngine, DecisionError};
use trumpbot_core::model::card::Card;

/// Plays the highest card while the trick can still be won and sheds the
/// lowest otherwise. As the last seat it wins with the cheapest card that does.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplePolicy;

impl SimplePolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for SimplePolicy {
    fn name(&self) -> &str {
        "simple"
    }

    fn choose_play(&mut self, ctx: &PolicyContext<'_>) -> Result<Card, DecisionError> {
        DecisionEngine::choose_card(ctx.seat, ctx.hand, ctx.trick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trumpbot_core::model::hand::Hand;
    use trumpbot_core::model::player::PlayerPosition;
    use trumpbot_core::model::suit::Suit;
    use trumpbot_core::model::trick::Trick;

    fn card(text: &str) -> Card {
        text.parse().expect("valid card")
    }

    #[test]
    fn repeated_calls_return_the_same_card() {
        let hand: Hand = ["4D", "QD", "7H"].iter().map(|text| card(text)).collect();
        let trick = Trick::with_plays(PlayerPosition::West, Some(Suit::Hearts), &[card("9D")])
            .expect("valid trick");
        let ctx = PolicyContext {
            seat: PlayerPosition::North,
            hand: &hand,
            trick: &trick,
        };

        let mut policy = SimplePolicy::new();
        let first = policy.choose_play(&ctx).expect("choice");
        let second = policy.choose_play(&ctx).expect("choice");
        assert_eq!(first, card("QD"));
        assert_eq!(first, second);
    }
}
