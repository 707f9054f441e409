use super::{AdviceError, DiscardAdvice, EngineParams, MeldPlanner, TurnState};
use crowns_core::model::card::Card;
use crowns_core::model::meld::{MIN_MELD_LEN, Meld, can_flop};
use tracing::{Level, event};

pub struct DiscardPlanner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pick {
    meld: usize,
    slot: usize,
    card: Card,
}

impl DiscardPlanner {
    pub fn choose(state: &TurnState, params: EngineParams) -> Result<DiscardAdvice, AdviceError> {
        if state.hand.is_empty() {
            return Err(AdviceError::EmptyHand);
        }

        let mut melds = MeldPlanner::arrange(&state.hand, state.round, params)?.into_melds();

        let (pick, reason) = match worst_unmelded(&melds, state.round, state.last_turn)
            .map(|pick| (pick, "highest_loose_card"))
            .or_else(|| trim_long_meld(&melds, state.round).map(|pick| (pick, "trim_long_meld")))
            .or_else(|| break_last_meld(&melds, state.round).map(|pick| (pick, "break_last_meld")))
        {
            Some(found) => found,
            None => {
                tracing::warn!(
                    target: "crowns_bot::discard",
                    round = state.round,
                    hand_size = state.hand.len(),
                    last_turn = state.last_turn,
                    "no discardable card in arrangement"
                );
                return Err(AdviceError::NoDiscardCandidate);
            }
        };

        remove_pick(&mut melds, pick);
        let flop = can_flop(&melds);
        log_discard_decision(state, pick.card, reason, flop);

        Ok(DiscardAdvice {
            melds,
            flop,
            card: pick.card,
        })
    }
}

/// Highest scoring non-wild card among the melds that are still short,
/// weakest meld first. On the last turn complete melds are fair game too.
/// Ties keep the first card seen.
fn worst_unmelded(melds: &[Meld], round: u8, last_turn: bool) -> Option<Pick> {
    let mut worst: Option<Pick> = None;

    for (meld_idx, meld) in melds.iter().enumerate().rev() {
        if !last_turn && meld.len() >= MIN_MELD_LEN {
            continue;
        }

        for (slot, &card) in meld.iter().enumerate() {
            if card.is_wild(round) {
                continue;
            }
            if worst.is_none_or(|best| card.score_value() > best.card.score_value()) {
                worst = Some(Pick {
                    meld: meld_idx,
                    slot,
                    card,
                });
            }
        }
    }

    worst
}

/// A meld longer than the minimum can lose a card and stay complete.
fn trim_long_meld(melds: &[Meld], round: u8) -> Option<Pick> {
    melds
        .iter()
        .enumerate()
        .filter(|(_, meld)| meld.len() > MIN_MELD_LEN)
        .find_map(|(meld_idx, meld)| {
            meld.iter()
                .position(|card| !card.is_wild(round))
                .map(|slot| Pick {
                    meld: meld_idx,
                    slot,
                    card: meld.cards()[slot],
                })
        })
}

/// Every meld is exactly complete, so one has to break. The last committed
/// meld loses its highest non-wild card. A hand holding nothing but wildcards
/// gives up its cheapest one.
fn break_last_meld(melds: &[Meld], round: u8) -> Option<Pick> {
    let natural = melds.iter().enumerate().rev().find_map(|(meld_idx, meld)| {
        let mut best: Option<Pick> = None;
        for (slot, &card) in meld.iter().enumerate() {
            if card.is_wild(round) {
                continue;
            }
            if best.is_none_or(|best| card.score_value() > best.card.score_value()) {
                best = Some(Pick {
                    meld: meld_idx,
                    slot,
                    card,
                });
            }
        }
        best
    });

    natural.or_else(|| {
        let meld_idx = melds.len().checked_sub(1)?;
        melds[meld_idx]
            .iter()
            .enumerate()
            .min_by_key(|&(slot, card)| (card.score_value(), slot))
            .map(|(slot, &card)| Pick {
                meld: meld_idx,
                slot,
                card,
            })
    })
}

fn remove_pick(melds: &mut Vec<Meld>, pick: Pick) {
    if let Some(meld) = melds.get_mut(pick.meld) {
        meld.remove_at(pick.slot);
        if meld.is_empty() {
            melds.remove(pick.meld);
        }
    }
}

fn log_discard_decision(state: &TurnState, card: Card, reason: &str, flop: bool) {
    if !tracing::enabled!(target: "crowns_bot::discard", Level::INFO) {
        return;
    }

    event!(
        target: "crowns_bot::discard",
        Level::INFO,
        round = state.round,
        hand_size = state.hand.len(),
        last_turn = state.last_turn,
        card = %card,
        reason,
        flop,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::test_support::{captured_logs, card, encoded, hand};
    use crowns_core::model::hand::Hand;

    fn discard(tokens: &[&str], round: u8, last_turn: bool) -> Result<DiscardAdvice, AdviceError> {
        let state = TurnState::new(round, hand(tokens)).with_last_turn(last_turn);
        DiscardPlanner::choose(&state, EngineParams::default())
    }

    #[test]
    fn sheds_highest_loose_card() {
        let advice = discard(
            &["*", "12-R", "3-B", "11-B", "5-B", "3-R", "11-R", "4-Y"],
            7,
            false,
        )
        .unwrap();
        assert_eq!(advice.card, card("11-B"));
        assert_eq!(
            encoded(&advice.melds),
            vec!["11-R:12-R:*", "3-B:5-B", "4-Y", "3-R"]
        );
        assert!(!advice.flop);
    }

    #[test]
    fn singleton_meld_disappears_with_its_card() {
        let advice = discard(&["3-B", "4-B", "6-B", "13-G"], 5, false).unwrap();
        assert_eq!(advice.card, card("13-G"));
        assert_eq!(encoded(&advice.melds), vec!["3-B:4-B", "6-B"]);
    }

    #[test]
    fn wildcards_are_never_discarded() {
        let advice = discard(&["*", "7-G"], 5, false).unwrap();
        assert_eq!(advice.card, card("7-G"));
        assert_eq!(encoded(&advice.melds), vec!["*"]);
    }

    #[test]
    fn long_meld_is_trimmed_when_everything_melds() {
        let advice = discard(&["3-B", "4-B", "5-B", "6-B", "9-G", "10-G", "11-G"], 13, false)
            .unwrap();
        assert_eq!(advice.card, card("3-B"));
        assert_eq!(encoded(&advice.melds), vec!["9-G:10-G:11-G", "4-B:5-B:6-B"]);
        assert!(advice.flop);
    }

    #[test]
    fn exact_melds_break_the_last_committed_meld() {
        let advice = discard(&["3-B", "4-B", "5-B", "9-G", "10-G", "11-G"], 13, false).unwrap();
        assert_eq!(advice.card, card("5-B"));
        assert_eq!(encoded(&advice.melds), vec!["9-G:10-G:11-G", "3-B:4-B"]);
        assert!(!advice.flop);
    }

    #[test]
    fn all_wild_hand_sheds_cheapest_wildcard() {
        let advice = discard(&["3-Y", "*", "3-X"], 3, false).unwrap();
        assert_eq!(advice.card, card("3-X"));
        assert_eq!(advice.melds.iter().map(Meld::len).sum::<usize>(), 2);
        assert!(advice.melds.iter().flat_map(Meld::iter).any(|&c| c == Card::Joker));
    }

    #[test]
    fn last_turn_breaks_complete_melds() {
        let advice = discard(&["3-B", "4-B", "5-B", "9-G", "10-G", "11-G"], 13, true).unwrap();
        assert_eq!(advice.card, card("11-G"));
        assert_eq!(encoded(&advice.melds), vec!["9-G:10-G", "3-B:4-B:5-B"]);
        assert!(!advice.flop);
    }

    #[test]
    fn empty_hand_is_a_client_error() {
        let state = TurnState::new(4, Hand::new());
        let err = DiscardPlanner::choose(&state, EngineParams::default()).unwrap_err();
        assert_eq!(err, AdviceError::EmptyHand);
        assert!(err.is_client_error());
    }

    #[test]
    fn decision_log_names_card_and_reason() {
        let tokens = ["3-B", "4-B", "5-B", "9-G", "10-G", "11-G"];
        let (advice, logs) =
            captured_logs("crowns_bot::discard=info", || discard(&tokens, 13, false));
        assert_eq!(advice.unwrap().card, card("5-B"));
        assert!(logs.contains("card=5-B"), "missing decision log: {logs}");
        assert!(logs.contains("break_last_meld"), "missing reason: {logs}");
    }
}
