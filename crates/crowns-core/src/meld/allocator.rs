use super::candidate::{MeldCandidate, enumerate_candidates};
use super::error::EngineError;
use super::ranking::sort_by_preference;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::inventory::CardInventory;
use crate::model::meld::{MIN_MELD_LEN, Meld, can_flop};

pub const DEFAULT_MAX_STEPS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationLimits {
    /// Upper bound on worklist iterations. The loop always settles well below
    /// this for real hands; hitting it means the allocator is broken.
    pub max_steps: usize,
}

impl Default for AllocationLimits {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Final partition of a hand into melds, in commit order (strongest first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arrangement {
    melds: Vec<Meld>,
    steps: usize,
}

impl Arrangement {
    pub fn melds(&self) -> &[Meld] {
        &self.melds
    }

    pub fn into_melds(self) -> Vec<Meld> {
        self.melds
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn flop(&self) -> bool {
        can_flop(&self.melds)
    }

    pub fn card_count(&self) -> usize {
        self.melds.iter().map(Meld::len).sum()
    }
}

/// Splits `hand` into melds for the given round.
pub fn arrange(hand: &Hand, round: u8, limits: AllocationLimits) -> Result<Arrangement, EngineError> {
    let candidates = enumerate_candidates(hand, round);
    allocate(candidates, &CardInventory::from_hand(hand), round, limits)
}

/// Resolves overlapping candidates against the cards actually held.
///
/// Candidates are consumed from the most preferred end of the worklist. One
/// whose cards are partly gone is replaced by what is left of it and ranked
/// again; one that is fully covered is committed, topped up to a full meld
/// with wildcards when enough are left to close the whole gap. Wildcards
/// nobody claimed end up on the first committed meld.
pub fn allocate(
    mut worklist: Vec<MeldCandidate>,
    inventory: &CardInventory,
    round: u8,
    limits: AllocationLimits,
) -> Result<Arrangement, EngineError> {
    let mut inventory = inventory.clone();
    let mut committed: Vec<Meld> = Vec::new();
    sort_by_preference(&mut worklist);

    let mut steps = 0usize;
    while let Some(candidate) = worklist.pop() {
        steps += 1;
        if steps > limits.max_steps {
            return Err(EngineError::AllocationDiverged {
                steps: limits.max_steps,
            });
        }

        // The top-ranked candidate is built from the hand itself.
        let available = if committed.is_empty() {
            candidate.cards.clone()
        } else {
            inventory.available_subset(&candidate.cards)
        };

        if available.is_empty() {
            continue;
        }

        if available.len() < candidate.len() {
            worklist.push(candidate.narrowed(available));
            sort_by_preference(&mut worklist);
            continue;
        }

        committed.push(commit(candidate.cards, &mut inventory, round)?);
    }

    while let Some(wild) = inventory.take_wild(round) {
        match committed.first_mut() {
            Some(meld) => meld.push(wild),
            None => committed.push(Meld::single(wild)),
        }
    }

    Ok(Arrangement {
        melds: committed,
        steps,
    })
}

fn commit(
    cards: Vec<Card>,
    inventory: &mut CardInventory,
    round: u8,
) -> Result<Meld, EngineError> {
    for &card in &cards {
        if !inventory.take(card) {
            return Err(EngineError::InventoryUnderflow { card });
        }
    }

    let mut meld = Meld::new(cards);
    let gap = MIN_MELD_LEN.saturating_sub(meld.len());
    if gap > 0 && inventory.wild_count(round) as usize >= gap {
        for _ in 0..gap {
            let wild = inventory
                .take_wild(round)
                .ok_or(EngineError::WildcardExhausted)?;
            meld.push(wild);
        }
    }

    Ok(meld)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meld::candidate::CandidateKind;
    use crate::model::deck::Deck;
    use std::collections::BTreeMap;

    fn hand(encoded: &str) -> Hand {
        encoded
            .split(':')
            .map(|token| token.parse::<Card>().expect("valid card"))
            .collect()
    }

    fn encoded(arrangement: &Arrangement) -> Vec<String> {
        arrangement.melds().iter().map(Meld::encode).collect()
    }

    fn arrange_default(encoded_hand: &str, round: u8) -> Arrangement {
        arrange(&hand(encoded_hand), round, AllocationLimits::default()).expect("arranges")
    }

    fn tally<'a>(cards: impl Iterator<Item = &'a Card>) -> BTreeMap<Card, usize> {
        let mut counts = BTreeMap::new();
        for &card in cards {
            *counts.entry(card).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn leftover_joker_joins_first_meld() {
        let result = arrange_default("5-B:*:5-R:4-B:6-B", 10);
        assert_eq!(encoded(&result), vec!["4-B:5-B:6-B:*", "5-R"]);
        assert!(!result.flop());
    }

    #[test]
    fn hand_of_only_wildcards_forms_one_meld() {
        let result = arrange_default("3-X:3-Y:3-B", 3);
        assert_eq!(encoded(&result), vec!["3-B:3-X:3-Y"]);
        assert!(result.flop());
    }

    #[test]
    fn wildcards_complete_partial_run() {
        let result = arrange_default("5-B:5-R:4-B:6-B:6-R:7-X:*", 7);
        assert_eq!(encoded(&result), vec!["4-B:5-B:6-B:7-X", "5-R:6-R:*"]);
        assert!(result.flop());
    }

    #[test]
    fn wildcards_complete_a_singleton_when_enough_remain() {
        let result = arrange_default("5-B:5-R:4-B:6-B:7-X:*:3-Y", 7);
        assert_eq!(encoded(&result), vec!["4-B:5-B:6-B", "5-R:*:7-X", "3-Y"]);
        assert!(!result.flop());
    }

    #[test]
    fn round_rank_wildcards_drawn_in_suit_order() {
        let result = arrange_default("3-X:4-Y:4-B:4-R", 4);
        assert_eq!(encoded(&result), vec!["3-X:4-B:4-R:4-Y"]);
    }

    #[test]
    fn black_round_rank_card_fills_the_gap_before_red() {
        let result = arrange_default("8-B:9-B:5-R:5-X", 5);
        assert_eq!(encoded(&result), vec!["8-B:9-B:5-X:5-R"]);

        let result = arrange_default("4-R:4-X:4-G", 4);
        assert_eq!(encoded(&result), vec!["4-G:4-X:4-R"]);
        assert!(result.flop());
    }

    #[test]
    fn partial_set_keeps_meld_suit_order() {
        let result = arrange_default("5-R:5-X", 10);
        assert_eq!(encoded(&result), vec!["5-X:5-R"]);
        assert!(!result.flop());
    }

    #[test]
    fn overlapping_set_degrades_to_what_is_left() {
        let result = arrange_default("3-X:4-X:5-X:3-X:3-B", 6);
        assert_eq!(encoded(&result), vec!["3-X:4-X:5-X", "3-B:3-X"]);
    }

    #[test]
    fn higher_scoring_set_beats_run_for_shared_card() {
        let result = arrange_default("9-R:10-R:5-X:8-R:6-B:8-B:11-R:11-Y:4-Y:11-R", 9);
        assert_eq!(
            encoded(&result),
            vec!["11-R:11-R:11-Y", "8-R:10-R:9-R", "6-B:8-B", "5-X", "4-Y"]
        );
    }

    #[test]
    fn empty_hand_arranges_to_nothing() {
        let result = arrange(&Hand::new(), 5, AllocationLimits::default()).unwrap();
        assert!(result.melds().is_empty());
        assert!(result.flop());
    }

    #[test]
    fn step_bound_is_reported_as_divergence() {
        let limits = AllocationLimits { max_steps: 1 };
        let err = arrange(&hand("5-B:*:5-R:4-B:6-B"), 10, limits).unwrap_err();
        assert_eq!(err, EngineError::AllocationDiverged { steps: 1 });
    }

    #[test]
    fn missing_trusted_card_is_reported() {
        let ghost = "9-G".parse::<Card>().unwrap();
        let candidates = vec![MeldCandidate::new(CandidateKind::Single, vec![ghost])];
        let err = allocate(
            candidates,
            &CardInventory::new(),
            5,
            AllocationLimits::default(),
        )
        .unwrap_err();
        assert_eq!(err, EngineError::InventoryUnderflow { card: ghost });
    }

    #[test]
    fn dealt_hands_conserve_cards_and_stay_deterministic() {
        for seed in 0..200u64 {
            let round = 3 + (seed % 11) as u8;
            let mut deck = Deck::shuffled_with_seed(seed);
            let hand = deck.deal(round as usize + 1);

            let first = arrange(&hand, round, AllocationLimits::default()).expect("arranges");
            let second = arrange(&hand, round, AllocationLimits::default()).expect("arranges");
            assert_eq!(first, second, "seed {seed} is not deterministic");

            let placed = tally(first.melds().iter().flat_map(Meld::iter));
            let held = tally(hand.iter());
            assert_eq!(placed, held, "seed {seed} lost or duplicated cards");
            assert_eq!(first.card_count(), hand.len());

            assert!(first.melds().iter().all(|meld| !meld.is_empty()));
            assert_eq!(
                first.flop(),
                first.melds().iter().all(|meld| meld.len() >= MIN_MELD_LEN),
                "seed {seed} flop flag disagrees with melds"
            );
        }
    }
}
