use crate::model::card::Card;
use crate::model::codec::MELD_SEPARATOR;
use serde::{Serialize, Serializer};

/// Melds of at least this many cards score; shorter groups stay in hand.
pub const MIN_MELD_LEN: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Meld {
    cards: Vec<Card>,
}

impl Meld {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn single(card: Card) -> Self {
        Self { cards: vec![card] }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
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

    pub fn is_complete(&self) -> bool {
        self.cards.len() >= MIN_MELD_LEN
    }

    pub fn score(&self) -> u32 {
        self.cards.iter().map(|card| card.score_value()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn encode(&self) -> String {
        self.encode_cards().join(MELD_SEPARATOR)
    }

    pub fn encode_cards(&self) -> Vec<String> {
        self.cards.iter().map(Card::to_string).collect()
    }
}

impl From<Vec<Card>> for Meld {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}

impl Serialize for Meld {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.cards.iter())
    }
}

/// A hand can go out ("flop") once every group it holds is a scoring meld.
pub fn can_flop(melds: &[Meld]) -> bool {
    melds.iter().all(Meld::is_complete)
}

#[cfg(test)]
mod tests {
    use super::{Meld, can_flop};
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn run() -> Meld {
        Meld::new(vec![
            Card::new(Rank::Four, Suit::Blue),
            Card::new(Rank::Five, Suit::Blue),
            Card::new(Rank::Six, Suit::Blue),
        ])
    }

    #[test]
    fn completeness_tracks_length() {
        let mut meld = Meld::single(Card::new(Rank::Five, Suit::Red));
        assert!(!meld.is_complete());
        meld.push(Card::Joker);
        meld.push(Card::new(Rank::Seven, Suit::Red));
        assert!(meld.is_complete());
        assert_eq!(meld.score(), 5 + 25 + 7);
    }

    #[test]
    fn remove_at_checks_bounds() {
        let mut meld = run();
        assert_eq!(meld.remove_at(3), None);
        assert_eq!(meld.remove_at(0), Some(Card::new(Rank::Four, Suit::Blue)));
        assert_eq!(meld.len(), 2);
    }

    #[test]
    fn flop_requires_every_meld_complete() {
        let full = run();
        let short = Meld::single(Card::new(Rank::Five, Suit::Red));
        assert!(can_flop(&[full.clone()]));
        assert!(!can_flop(&[full, short]));
        assert!(can_flop(&[]));
    }

    #[test]
    fn serializes_as_token_list() {
        let json = serde_json::to_string(&run()).unwrap();
        assert_eq!(json, r#"["4-B","5-B","6-B"]"#);
    }
}
