use super::query::{highest_by_rank, highest_played, lowest_by_rank, lowest_in_hand};
use super::{Branch, Decision, is_last_to_play};
use trumpbot_core::model::card::Card;
use trumpbot_core::model::hand::Hand;
use trumpbot_core::model::trick::Trick;

pub(super) fn choose(hand: &Hand, trick: &Trick, lead_card: Card) -> Option<Decision> {
    let matches_lead = hand.matching(Some(lead_card.suit));
    if matches_lead.is_empty() {
        cannot_follow(hand, trick)
    } else {
        follow_suit(&matches_lead, trick, lead_card)
    }
}

/// `matches_lead` is non-empty and holds only lead-suit cards.
fn follow_suit(matches_lead: &[Card], trick: &Trick, lead_card: Card) -> Option<Decision> {
    let best_played = highest_played(trick, lead_card.suit).unwrap_or(lead_card);
    let winners: Vec<Card> = matches_lead
        .iter()
        .copied()
        .filter(|card| card.rank > best_played.rank)
        .collect();

    // Last seat only needs to scrape past the best card; earlier seats play their top card.
    let winner = if is_last_to_play(trick) {
        lowest_by_rank(&winners)
    } else {
        highest_by_rank(&winners)
    };

    match winner {
        Some(card) => Some(Decision::new(card, Branch::FollowWin)),
        None => lowest_by_rank(matches_lead).map(|card| Decision::new(card, Branch::FollowDiscard)),
    }
}

fn cannot_follow(hand: &Hand, trick: &Trick) -> Option<Decision> {
    let trump = trick.trump();
    let matches_trump = hand.matching(trump);
    let Some(hand_high) = highest_by_rank(&matches_trump) else {
        return lowest_in_hand(hand).map(|card| Decision::new(card, Branch::DiscardNoTrump));
    };

    let trick_high = trump.and_then(|suit| highest_played(trick, suit));
    if let Some(played) = trick_high {
        if played.rank > hand_high.rank {
            return lowest_in_hand(hand)
                .map(|card| Decision::new(card, Branch::DiscardOutTrumped));
        }
    }

    if !is_last_to_play(trick) {
        return Some(Decision::new(hand_high, Branch::TrumpHighest));
    }

    let cheapest = matches_trump
        .iter()
        .copied()
        .filter(|card| trick_high.is_none_or(|played| card.rank > played.rank))
        .min_by_key(|card| card.rank)
        .unwrap_or(hand_high);
    Some(Decision::new(cheapest, Branch::TrumpCheapestWin))
}
