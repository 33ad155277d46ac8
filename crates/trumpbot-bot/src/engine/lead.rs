use super::{Branch, Decision};
use trumpbot_core::model::hand::Hand;
use trumpbot_core::model::suit::Suit;

pub(super) fn choose(hand: &Hand, trump: Option<Suit>) -> Option<Decision> {
    if let Some(card) = hand.matching(trump).into_iter().max() {
        return Some(Decision::new(card, Branch::LeadTrump));
    }

    // Rank dominates here, unlike the natural order; equal ranks go to the higher suit.
    hand.iter()
        .copied()
        .max_by(|a, b| a.rank.cmp(&b.rank).then(a.suit.cmp(&b.suit)))
        .map(|card| Decision::new(card, Branch::LeadHighest))
}
