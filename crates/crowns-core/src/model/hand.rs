use crate::model::card::Card;
use std::vec::Vec;

/// A player's cards. Duplicates are meaningful since Five Crowns is dealt
/// from two decks. Cards stay sorted so runs sit next to each other.
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
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
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

    pub fn count(&self, card: Card) -> usize {
        self.cards.iter().filter(|&&c| c == card).count()
    }

    pub fn wild_count(&self, round: u8) -> usize {
        self.cards.iter().filter(|card| card.is_wild(round)).count()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn sort(&mut self) {
        self.cards.sort();
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self::with_cards(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let card = Card::new(Rank::Three, Suit::Blue);
        hand.add(card);
        assert!(hand.contains(card));
        assert!(hand.remove(card));
        assert!(!hand.contains(card));
        assert!(!hand.remove(card));
    }

    #[test]
    fn cards_are_sorted_by_suit_then_rank_with_jokers_last() {
        let hand = Hand::with_cards(vec![
            Card::Joker,
            Card::new(Rank::King, Suit::Yellow),
            Card::new(Rank::Three, Suit::Blue),
            Card::new(Rank::Ten, Suit::Blue),
        ]);
        let ordered: Vec<_> = hand.iter().copied().collect();
        assert_eq!(ordered[0], Card::new(Rank::Three, Suit::Blue));
        assert_eq!(ordered[1], Card::new(Rank::Ten, Suit::Blue));
        assert_eq!(ordered[2], Card::new(Rank::King, Suit::Yellow));
        assert_eq!(ordered[3], Card::Joker);
    }

    #[test]
    fn duplicates_are_kept() {
        let five = Card::new(Rank::Five, Suit::Red);
        let hand: Hand = [five, five, Card::Joker].into_iter().collect();
        assert_eq!(hand.len(), 3);
        assert_eq!(hand.count(five), 2);
    }

    #[test]
    fn wild_count_includes_round_rank() {
        let hand = Hand::with_cards(vec![
            Card::Joker,
            Card::new(Rank::Seven, Suit::Green),
            Card::new(Rank::Eight, Suit::Green),
        ]);
        assert_eq!(hand.wild_count(7), 2);
        assert_eq!(hand.wild_count(9), 1);
    }
}
