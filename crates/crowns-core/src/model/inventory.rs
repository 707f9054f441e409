use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use std::collections::BTreeMap;

/// Remaining copies of each card value. Melds draw from the inventory, so a
/// card can never be placed more often than it was dealt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardInventory {
    counts: BTreeMap<Card, u32>,
}

impl CardInventory {
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    pub fn from_cards<'a, I>(cards: I) -> Self
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let mut inventory = Self::new();
        for &card in cards {
            inventory.put(card);
        }
        inventory
    }

    pub fn from_hand(hand: &Hand) -> Self {
        Self::from_cards(hand.iter())
    }

    pub fn put(&mut self, card: Card) {
        *self.counts.entry(card).or_insert(0) += 1;
    }

    pub fn available(&self, card: Card) -> u32 {
        self.counts.get(&card).copied().unwrap_or(0)
    }

    /// Removes one copy of `card`. Returns `false` and leaves the inventory
    /// untouched when no copy is left.
    pub fn take(&mut self, card: Card) -> bool {
        match self.counts.get_mut(&card) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(&card);
                }
                true
            }
            _ => false,
        }
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn wild_count(&self, round: u8) -> u32 {
        wild_priority(round)
            .map(|card| self.available(card))
            .sum()
    }

    /// Takes the next wildcard: jokers first, then round-rank cards in
    /// `Suit::MELD_ORDER`.
    pub fn take_wild(&mut self, round: u8) -> Option<Card> {
        let card = wild_priority(round).find(|&card| self.available(card) > 0)?;
        self.take(card).then_some(card)
    }

    /// The part of `cards` that is still covered by the inventory, in the
    /// original order. Each card value is capped at the number of times it
    /// appears in `cards`.
    pub fn available_subset(&self, cards: &[Card]) -> Vec<Card> {
        let mut claimed: BTreeMap<Card, u32> = BTreeMap::new();
        let mut subset = Vec::with_capacity(cards.len());
        for &card in cards {
            let used = claimed.entry(card).or_insert(0);
            if *used < self.available(card) {
                *used += 1;
                subset.push(card);
            }
        }
        subset
    }
}

fn wild_priority(round: u8) -> impl Iterator<Item = Card> {
    let round_rank = Rank::from_value(round);
    core::iter::once(Card::Joker).chain(round_rank.into_iter().flat_map(|rank| {
        Suit::MELD_ORDER
            .into_iter()
            .map(move |suit| Card::new(rank, suit))
    }))
}
