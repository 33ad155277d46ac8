use crate::model::card::Card;
use crate::model::suit::Suit;
use std::vec::Vec;

/// The cards held by one seat. Behaves as a set kept in natural order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.normalize();
        hand
    }

    /// Adds `card`, returning `false` if it was already held.
    pub fn add(&mut self, card: Card) -> bool {
        if self.contains(card) {
            return false;
        }
        self.cards.push(card);
        self.normalize();
        true
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards of `suit` in ascending order; empty when no suit is given.
    pub fn matching(&self, suit: Option<Suit>) -> Vec<Card> {
        let Some(suit) = suit else {
            return Vec::new();
        };
        self.cards
            .iter()
            .copied()
            .filter(|card| card.suit == suit)
            .collect()
    }

    fn normalize(&mut self) {
        self.cards.sort();
        self.cards.dedup();
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self::with_cards(iter.into_iter().collect())
    }
}
