//! One-ply trick decision engine.
//!
//! The engine looks only at the current trick and the deciding seat's hand.
//! A lead seat plays its strongest card; a follower tries to win the trick
//! (as cheaply as possible when it plays last) and otherwise gives up its
//! least valuable card.

mod follow;
mod lead;
mod query;

use thiserror::Error;
use tracing::{Level, event};
use trumpbot_core::model::card::Card;
use trumpbot_core::model::hand::Hand;
use trumpbot_core::model::player::PlayerPosition;
use trumpbot_core::model::trick::{Trick, TrickError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("cannot choose a card from an empty hand")]
    InvalidHand,
    #[error("inconsistent trick: {0}")]
    InconsistentTrick(#[from] TrickError),
}

/// The rule that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Leading with the highest trump held.
    LeadTrump,
    /// Leading without trumps: highest rank, ties to the higher suit.
    LeadHighest,
    /// Following with a card that beats the best lead-suit card played.
    FollowWin,
    /// Following with the lowest lead-suit card because nothing wins.
    FollowDiscard,
    /// Void in the lead suit and holding no trump.
    DiscardNoTrump,
    /// Void in the lead suit and unable to beat a trump already played.
    DiscardOutTrumped,
    /// Void in the lead suit and committing the highest trump before the last seat.
    TrumpHighest,
    /// Void in the lead suit, last to play, taking the trick with the cheapest trump.
    TrumpCheapestWin,
}

impl Branch {
    pub const fn as_str(self) -> &'static str {
        match self {
            Branch::LeadTrump => "lead_trump",
            Branch::LeadHighest => "lead_highest",
            Branch::FollowWin => "follow_win",
            Branch::FollowDiscard => "follow_discard",
            Branch::DiscardNoTrump => "discard_no_trump",
            Branch::DiscardOutTrumped => "discard_out_trumped",
            Branch::TrumpHighest => "trump_highest",
            Branch::TrumpCheapestWin => "trump_cheapest_win",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub card: Card,
    pub branch: Branch,
}

impl Decision {
    pub(crate) const fn new(card: Card, branch: Branch) -> Self {
        Self { card, branch }
    }
}

/// Stateless chooser; every call is a pure function of its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine;

impl DecisionEngine {
    pub fn choose_card(
        seat: PlayerPosition,
        hand: &Hand,
        trick: &Trick,
    ) -> Result<Card, DecisionError> {
        Self::decide(seat, hand, trick).map(|decision| decision.card)
    }

    pub fn decide(
        seat: PlayerPosition,
        hand: &Hand,
        trick: &Trick,
    ) -> Result<Decision, DecisionError> {
        validate(seat, hand, trick)?;

        let choice = if trick.leader() == seat {
            lead::choose(hand, trick.trump())
        } else {
            let lead_card = trick.card_played_by(trick.leader()).ok_or(TrickError::OutOfTurn {
                expected: trick.leader(),
                actual: seat,
            })?;
            follow::choose(hand, trick, lead_card)
        };
        let decision = choice.ok_or(DecisionError::InvalidHand)?;

        log_decision(seat, trick, decision);
        Ok(decision)
    }
}

fn validate(seat: PlayerPosition, hand: &Hand, trick: &Trick) -> Result<(), DecisionError> {
    if hand.is_empty() {
        return Err(DecisionError::InvalidHand);
    }
    if trick.is_complete() {
        return Err(TrickError::TrickComplete.into());
    }
    if trick.card_played_by(seat).is_some() {
        return Err(TrickError::AlreadyPlayed(seat).into());
    }
    let expected = trick.expected_position();
    if expected != seat {
        return Err(TrickError::OutOfTurn {
            expected,
            actual: seat,
        }
        .into());
    }
    Ok(())
}

/// True when every other seat has already played to `trick`.
pub(crate) fn is_last_to_play(trick: &Trick) -> bool {
    trick.plays().len() == Trick::SEATS - 1
}

fn log_decision(seat: PlayerPosition, trick: &Trick, decision: Decision) {
    if !tracing::enabled!(target: "trumpbot_bot::play", Level::DEBUG) {
        return;
    }

    event!(
        target: "trumpbot_bot::play",
        Level::DEBUG,
        seat = %seat,
        branch = decision.branch.as_str(),
        card = %decision.card,
        trump = ?trick.trump(),
        trick_cards = trick.plays().len(),
    );
}
