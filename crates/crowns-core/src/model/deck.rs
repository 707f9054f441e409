use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const DECK_COPIES: usize = 2;
pub const JOKER_COUNT: usize = 6;

/// The Five Crowns shoe: two copies of every rank/suit pair plus six jokers.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards =
            Vec::with_capacity(Suit::ALL.len() * Rank::ORDERED.len() * DECK_COPIES + JOKER_COUNT);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                for _ in 0..DECK_COPIES {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        cards.extend(std::iter::repeat_n(Card::Joker, JOKER_COUNT));
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deals `count` cards off the top of the deck.
    pub fn deal(&mut self, count: usize) -> Hand {
        let start = self.cards.len().saturating_sub(count);
        self.cards.drain(start..).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
