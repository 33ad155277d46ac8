use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A playing card. Cards order by suit first, then rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Natural-order key; the suit multiplier only has to exceed the rank count.
    pub const fn sort_key(self) -> u8 {
        self.suit.ordinal() * 14 + self.rank.ordinal()
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse card from {input:?}")]
pub struct ParseCardError {
    pub input: String,
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses the `Display` notation, e.g. `"KH"`, `"10S"` or `"TS"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCardError {
            input: s.to_string(),
        };
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let suit_symbol = chars.next_back().ok_or_else(err)?;
        let suit = Suit::from_symbol(suit_symbol).ok_or_else(err)?;
        let rank = Rank::from_symbol(chars.as_str()).ok_or_else(err)?;
        Ok(Card::new(rank, suit))
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit};

    #[test]
    fn suit_dominates_rank_in_natural_order() {
        let two_of_spades = Card::new(Rank::Two, Suit::Spades);
        let ace_of_diamonds = Card::new(Rank::Ace, Suit::Diamonds);
        assert!(two_of_spades > ace_of_diamonds);
        assert!(Card::new(Rank::Ace, Suit::Hearts) < Card::new(Rank::Two, Suit::Clubs));
    }

    #[test]
    fn rank_orders_within_a_suit() {
        assert!(Card::new(Rank::King, Suit::Clubs) > Card::new(Rank::Queen, Suit::Clubs));
    }

    #[test]
    fn sort_key_matches_ordinals() {
        assert_eq!(Card::new(Rank::Two, Suit::Hearts).sort_key(), 0);
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).sort_key(), 3 * 14 + 12);
    }

    #[test]
    fn display_and_parse_agree() {
        let card = Card::new(Rank::Ten, Suit::Diamonds);
        assert_eq!(card.to_string(), "10D");
        assert_eq!("10D".parse::<Card>(), Ok(card));
        assert_eq!("qs".parse::<Card>(), Ok(Card::new(Rank::Queen, Suit::Spades)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Card>().is_err());
        assert!("1H".parse::<Card>().is_err());
        assert!("KX".parse::<Card>().is_err());
    }

    #[test]
    fn serializes_as_named_fields() {
        let card = Card::new(Rank::King, Suit::Hearts);
        let json = serde_json::to_string(&card).expect("serialize");
        assert_eq!(json, r#"{"rank":"king","suit":"hearts"}"#);
    }
}
