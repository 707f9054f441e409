use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::cmp::Ordering;
use core::fmt;
use serde::{Serialize, Serializer};

pub const JOKER_SCORE: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Card {
    Standard { rank: Rank, suit: Suit },
    Joker,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card::Standard { rank, suit }
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Card::Joker)
    }

    pub const fn rank(self) -> Option<Rank> {
        match self {
            Card::Standard { rank, .. } => Some(rank),
            Card::Joker => None,
        }
    }

    pub const fn suit(self) -> Option<Suit> {
        match self {
            Card::Standard { suit, .. } => Some(suit),
            Card::Joker => None,
        }
    }

    /// Jokers are always wild; otherwise a card is wild when its rank matches
    /// the number of the round being played.
    pub const fn is_wild(self, round: u8) -> bool {
        match self {
            Card::Joker => true,
            Card::Standard { rank, .. } => rank.value() == round,
        }
    }

    pub const fn score_value(self) -> u32 {
        match self {
            Card::Joker => JOKER_SCORE,
            Card::Standard { rank, .. } => rank.value() as u32,
        }
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Card::Joker, Card::Joker) => Ordering::Equal,
            (Card::Joker, Card::Standard { .. }) => Ordering::Greater,
            (Card::Standard { .. }, Card::Joker) => Ordering::Less,
            (
                Card::Standard { rank, suit },
                Card::Standard {
                    rank: other_rank,
                    suit: other_suit,
                },
            ) => suit.cmp(other_suit).then(rank.cmp(other_rank)),
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Joker => f.write_str(crate::model::codec::WILD_MARKER),
            Card::Standard { rank, suit } => {
                write!(f, "{}{}{}", rank, crate::model::codec::RANK_SUIT_SEPARATOR, suit)
            }
        }
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, JOKER_SCORE, Rank, Suit};

    #[test]
    fn joker_is_always_wild() {
        for round in Rank::MIN..=Rank::MAX {
            assert!(Card::Joker.is_wild(round));
        }
    }

    #[test]
    fn round_rank_is_wild() {
        let seven = Card::new(Rank::Seven, Suit::Green);
        assert!(seven.is_wild(7));
        assert!(!seven.is_wild(8));
    }

    #[test]
    fn score_value_uses_rank_or_joker_bonus() {
        assert_eq!(Card::Joker.score_value(), JOKER_SCORE);
        assert_eq!(Card::new(Rank::King, Suit::Red).score_value(), 13);
        assert_eq!(Card::new(Rank::Three, Suit::Red).score_value(), 3);
    }

    #[test]
    fn jokers_sort_last() {
        let ten = Card::new(Rank::Ten, Suit::Red);
        assert!(Card::Joker > ten);
        assert!(ten < Card::Joker);
        assert_eq!(Card::Joker.cmp(&Card::Joker), core::cmp::Ordering::Equal);
    }

    #[test]
    fn suit_orders_before_rank() {
        let red_ten = Card::new(Rank::Ten, Suit::Red);
        let blue_ten = Card::new(Rank::Ten, Suit::Blue);
        let blue_jack = Card::new(Rank::Jack, Suit::Blue);
        assert!(red_ten > blue_ten);
        assert!(blue_jack > blue_ten);
        assert!(red_ten > blue_jack);
    }

    #[test]
    fn sorting_matches_expected_layout() {
        let mut cards = vec![
            Card::new(Rank::Nine, Suit::Yellow),
            Card::Joker,
            Card::new(Rank::Eight, Suit::Red),
            Card::new(Rank::Nine, Suit::Red),
        ];
        cards.sort();
        let encoded: Vec<String> = cards.iter().map(Card::to_string).collect();
        assert_eq!(encoded, vec!["8-R", "9-R", "9-Y", "*"]);
    }

    #[test]
    fn serializes_as_token() {
        let json = serde_json::to_string(&Card::new(Rank::Ten, Suit::Red)).unwrap();
        assert_eq!(json, "\"10-R\"");
        assert_eq!(serde_json::to_string(&Card::Joker).unwrap(), "\"*\"");
    }
}
