use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trick {
    leader: PlayerPosition,
    trump: Option<Suit>,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("{0} has already played this trick")]
    AlreadyPlayed(PlayerPosition),
}

impl Trick {
    pub const SEATS: usize = 4;

    pub fn new(leader: PlayerPosition, trump: Option<Suit>) -> Self {
        Self {
            leader,
            trump,
            plays: Vec::with_capacity(Self::SEATS),
        }
    }

    /// Builds a trick by replaying `cards` in turn order starting at `leader`.
    pub fn with_plays(
        leader: PlayerPosition,
        trump: Option<Suit>,
        cards: &[Card],
    ) -> Result<Self, TrickError> {
        let mut trick = Self::new(leader, trump);
        let mut position = leader;
        for &card in cards {
            trick.play(position, card)?;
            position = position.next();
        }
        Ok(trick)
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn card_played_by(&self, position: PlayerPosition) -> Option<Card> {
        self.plays
            .iter()
            .find(|play| play.position == position)
            .map(|play| play.card)
    }

    pub fn plays_in_order(&self) -> impl Iterator<Item = Card> + '_ {
        self.plays.iter().map(|play| play.card)
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == Self::SEATS
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.card_played_by(self.leader).map(|card| card.suit)
    }

    pub fn play(&mut self, position: PlayerPosition, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.position == position) {
            return Err(TrickError::AlreadyPlayed(position));
        }

        let expected = self.expected_position();
        if expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }

        self.plays.push(Play { position, card });
        Ok(())
    }

    /// Highest trump if one was played, otherwise highest card of the lead suit.
    pub fn winner(&self) -> Option<PlayerPosition> {
        if !self.is_complete() {
            return None;
        }
        let lead_suit = self.lead_suit()?;
        let winning_suit = self
            .trump
            .filter(|trump| self.plays.iter().any(|play| play.card.suit == *trump))
            .unwrap_or(lead_suit);
        self.plays
            .iter()
            .filter(|play| play.card.suit == winning_suit)
            .max_by_key(|play| play.card.rank)
            .map(|play| play.position)
    }

    pub fn expected_position(&self) -> PlayerPosition {
        self.plays
            .last()
            .map(|play| play.position.next())
            .unwrap_or(self.leader)
    }
}

/// Cards `hand` may play into `trick` under the follow-suit rule.
pub fn legal_cards(hand: &Hand, trick: &Trick) -> Vec<Card> {
    let following = trick.lead_suit().map(|suit| hand.matching(Some(suit)));
    match following {
        Some(cards) if !cards.is_empty() => cards,
        _ => hand.cards().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickError, legal_cards};
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::player::PlayerPosition;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn plays_follow_turn_order() {
        let mut trick = Trick::new(PlayerPosition::North, None);
        assert!(
            trick
                .play(PlayerPosition::North, Card::new(Rank::Two, Suit::Clubs))
                .is_ok()
        );
        assert!(matches!(
            trick.play(PlayerPosition::South, Card::new(Rank::Three, Suit::Clubs)),
            Err(TrickError::OutOfTurn { .. })
        ));
        assert_eq!(
            trick.play(PlayerPosition::North, Card::new(Rank::Four, Suit::Clubs)),
            Err(TrickError::AlreadyPlayed(PlayerPosition::North))
        );
    }

    #[test]
    fn fifth_play_is_rejected() {
        let mut trick = Trick::with_plays(
            PlayerPosition::West,
            None,
            &[
                Card::new(Rank::Two, Suit::Clubs),
                Card::new(Rank::Three, Suit::Clubs),
                Card::new(Rank::Four, Suit::Clubs),
                Card::new(Rank::Five, Suit::Clubs),
            ],
        )
        .expect("four plays");
        assert!(trick.is_complete());
        assert_eq!(
            trick.play(PlayerPosition::West, Card::new(Rank::Six, Suit::Clubs)),
            Err(TrickError::TrickComplete)
        );
    }

    #[test]
    fn queries_report_plays_by_seat_and_order() {
        let trick = Trick::with_plays(
            PlayerPosition::South,
            Some(Suit::Hearts),
            &[
                Card::new(Rank::Five, Suit::Clubs),
                Card::new(Rank::Seven, Suit::Clubs),
            ],
        )
        .expect("valid plays");

        assert_eq!(trick.leader(), PlayerPosition::South);
        assert_eq!(trick.trump(), Some(Suit::Hearts));
        assert_eq!(trick.lead_suit(), Some(Suit::Clubs));
        assert_eq!(
            trick.card_played_by(PlayerPosition::West),
            Some(Card::new(Rank::Seven, Suit::Clubs))
        );
        assert_eq!(trick.card_played_by(PlayerPosition::North), None);
        assert_eq!(trick.expected_position(), PlayerPosition::North);
        let order: Vec<_> = trick.plays_in_order().collect();
        assert_eq!(order[0], Card::new(Rank::Five, Suit::Clubs));
    }

    #[test]
    fn winner_is_highest_card_of_lead_suit_without_trump() {
        let trick = Trick::with_plays(
            PlayerPosition::North,
            None,
            &[
                Card::new(Rank::Ten, Suit::Clubs),
                Card::new(Rank::Queen, Suit::Clubs),
                Card::new(Rank::Four, Suit::Clubs),
                Card::new(Rank::Ace, Suit::Spades),
            ],
        )
        .expect("valid plays");

        assert_eq!(trick.winner(), Some(PlayerPosition::East));
    }

    #[test]
    fn any_trump_beats_the_lead_suit() {
        let trick = Trick::with_plays(
            PlayerPosition::North,
            Some(Suit::Hearts),
            &[
                Card::new(Rank::Ace, Suit::Clubs),
                Card::new(Rank::Two, Suit::Hearts),
                Card::new(Rank::Four, Suit::Hearts),
                Card::new(Rank::King, Suit::Clubs),
            ],
        )
        .expect("valid plays");

        assert_eq!(trick.winner(), Some(PlayerPosition::South));
    }

    #[test]
    fn incomplete_trick_has_no_winner() {
        let trick = Trick::with_plays(
            PlayerPosition::North,
            None,
            &[Card::new(Rank::Ace, Suit::Clubs)],
        )
        .expect("valid plays");
        assert_eq!(trick.winner(), None);
    }

    #[test]
    fn legal_cards_enforce_following_suit() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Ace, Suit::Spades),
        ]);
        let clubs_led = Trick::with_plays(
            PlayerPosition::North,
            None,
            &[Card::new(Rank::Nine, Suit::Clubs)],
        )
        .expect("valid plays");
        assert_eq!(
            legal_cards(&hand, &clubs_led),
            vec![Card::new(Rank::Two, Suit::Clubs)]
        );

        let diamonds_led = Trick::with_plays(
            PlayerPosition::North,
            None,
            &[Card::new(Rank::Nine, Suit::Diamonds)],
        )
        .expect("valid plays");
        assert_eq!(legal_cards(&hand, &diamonds_led).len(), 2);

        let fresh = Trick::new(PlayerPosition::East, None);
        assert_eq!(legal_cards(&hand, &fresh).len(), 2);
    }
}
