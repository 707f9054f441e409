use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::inventory::CardInventory;
use crate::model::meld::MIN_MELD_LEN;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    Run,
    Set,
    Single,
}

/// A tentative meld. Candidates may share cards with each other; the
/// allocator settles who actually gets each copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeldCandidate {
    pub kind: CandidateKind,
    pub cards: Vec<Card>,
    pub score: u32,
}

impl MeldCandidate {
    pub fn new(kind: CandidateKind, cards: Vec<Card>) -> Self {
        let score = cards.iter().map(|card| card.score_value()).sum();
        Self { kind, cards, score }
    }

    /// Same kind of candidate restricted to `cards`.
    pub fn narrowed(&self, cards: Vec<Card>) -> Self {
        Self::new(self.kind, cards)
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
}

/// Lists every run and set of two or more cards in `hand` plus a singleton for
/// each non-wild card. `hand` is already sorted by suit then rank.
pub fn enumerate_candidates(hand: &Hand, round: u8) -> Vec<MeldCandidate> {
    let mut candidates = find_runs(hand.cards(), round);
    candidates.extend(find_sets(&CardInventory::from_hand(hand), round));
    candidates.extend(
        hand.iter()
            .copied()
            .filter(|card| !card.is_wild(round))
            .map(|card| MeldCandidate::new(CandidateKind::Single, vec![card])),
    );
    candidates
}

pub fn find_runs(sorted: &[Card], round: u8) -> Vec<MeldCandidate> {
    let mut runs = Vec::new();
    let mut current: Vec<Card> = Vec::new();

    for &card in sorted {
        // Wildcards are placed later by the allocator; they never break a run.
        if card.is_wild(round) {
            continue;
        }

        match current.last().copied() {
            None => current.push(card),
            // A second copy of the same card belongs to some other meld.
            Some(last) if last == card => {}
            Some(last) if extends_run(last, card, current.len()) => current.push(card),
            Some(_) => {
                flush_run(&mut runs, &mut current);
                current.push(card);
            }
        }
    }
    flush_run(&mut runs, &mut current);

    runs
}

/// `next` continues a run ending in `last` when it is the following rank of
/// the same suit. A run of a single card may also skip one rank, leaving the
/// hole for a wildcard.
fn extends_run(last: Card, next: Card, run_len: usize) -> bool {
    let (
        Card::Standard {
            rank: last_rank,
            suit: last_suit,
        },
        Card::Standard {
            rank: next_rank,
            suit: next_suit,
        },
    ) = (last, next)
    else {
        return false;
    };

    if last_suit != next_suit {
        return false;
    }

    let step = next_rank.value() as i16 - last_rank.value() as i16;
    step == 1 || (step == 2 && run_len == 1)
}

fn flush_run(runs: &mut Vec<MeldCandidate>, current: &mut Vec<Card>) {
    let cards = std::mem::take(current);
    if cards.len() >= 2 {
        runs.push(MeldCandidate::new(CandidateKind::Run, cards));
    }
}

pub fn find_sets(inventory: &CardInventory, round: u8) -> Vec<MeldCandidate> {
    let mut sets = Vec::new();

    for rank in Rank::ORDERED {
        if rank.value() == round {
            continue;
        }

        let mut cards = Vec::new();
        for suit in Suit::MELD_ORDER {
            let card = Card::new(rank, suit);
            for _ in 0..inventory.available(card) {
                cards.push(card);
            }
        }

        if cards.len() >= 2 {
            sets.push(MeldCandidate::new(CandidateKind::Set, cards));
        }
    }

    sets
}
