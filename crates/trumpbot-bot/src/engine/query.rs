use trumpbot_core::model::card::Card;
use trumpbot_core::model::hand::Hand;
use trumpbot_core::model::suit::Suit;
use trumpbot_core::model::trick::Trick;

/// Lowest card in the whole hand under the natural order.
pub(super) fn lowest_in_hand(hand: &Hand) -> Option<Card> {
    hand.iter().copied().min()
}

// The next two compare rank only; callers pass cards of a single suit.

pub(super) fn highest_by_rank(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().max_by_key(|card| card.rank)
}

pub(super) fn lowest_by_rank(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().min_by_key(|card| card.rank)
}

/// Highest-ranked card of `suit` already played to `trick`.
pub(super) fn highest_played(trick: &Trick, suit: Suit) -> Option<Card> {
    trick
        .plays_in_order()
        .filter(|card| card.suit == suit)
        .max_by_key(|card| card.rank)
}
