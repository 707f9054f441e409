use super::{AdviceError, DrawAdvice, EngineParams, MeldPlanner, Stack, TurnState};
use crowns_core::model::card::Card;
use tracing::{Level, event};

pub struct DrawPlanner;

impl DrawPlanner {
    /// Arranges the hand as if the discard top had already been picked up.
    ///
    /// Melds are walked weakest first. Reaching a complete meld means the top
    /// card found a home, so it is worth taking. Finding the top card in an
    /// incomplete meld first means it did not help.
    pub fn choose(state: &TurnState, params: EngineParams) -> Result<DrawAdvice, AdviceError> {
        let top = state.discard_top.ok_or(AdviceError::EmptyDiscardPile)?;

        let mut hypothetical = state.hand.clone();
        hypothetical.add(top);
        let arrangement = MeldPlanner::arrange(&hypothetical, state.round, params)?;

        for meld in arrangement.melds().iter().rev() {
            if meld.is_complete() {
                log_draw_decision(state, top, Stack::Discard, "completes_meld");
                return Ok(DrawAdvice {
                    stack: Stack::Discard,
                });
            }
            if meld.contains(top) {
                log_draw_decision(state, top, Stack::Deck, "left_unmelded");
                return Ok(DrawAdvice { stack: Stack::Deck });
            }
        }

        tracing::warn!(
            target: "crowns_bot::draw",
            round = state.round,
            top = %top,
            "discard top missing from hypothetical arrangement"
        );
        Err(AdviceError::NoCandidateFound { card: top })
    }
}

fn log_draw_decision(state: &TurnState, top: Card, stack: Stack, reason: &str) {
    if !tracing::enabled!(target: "crowns_bot::draw", Level::INFO) {
        return;
    }

    event!(
        target: "crowns_bot::draw",
        Level::INFO,
        round = state.round,
        hand_size = state.hand.len(),
        top = %top,
        stack = %stack,
        reason,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::test_support::{captured_logs, card, hand};

    const HAND: [&str; 9] = [
        "9-R", "10-R", "5-X", "8-R", "6-B", "8-B", "11-R", "11-Y", "4-Y",
    ];

    fn advise(top: &str) -> Result<DrawAdvice, AdviceError> {
        let state = TurnState::new(9, hand(&HAND)).with_discard_top(card(top));
        DrawPlanner::choose(&state, EngineParams::default())
    }

    #[test]
    fn takes_discard_when_it_completes_a_meld() {
        assert_eq!(advise("11-R").unwrap().stack, Stack::Discard);
    }

    #[test]
    fn takes_deck_when_card_does_not_help() {
        assert_eq!(advise("4-G").unwrap().stack, Stack::Deck);
    }

    #[test]
    fn empty_pile_is_rejected() {
        let state = TurnState::new(9, hand(&HAND));
        let err = DrawPlanner::choose(&state, EngineParams::default()).unwrap_err();
        assert_eq!(err, AdviceError::EmptyDiscardPile);
        assert!(err.is_client_error());
    }

    #[test]
    fn lone_card_goes_to_deck() {
        let state = TurnState::new(5, hand(&[])).with_discard_top(card("7-G"));
        let advice = DrawPlanner::choose(&state, EngineParams::default()).unwrap();
        assert_eq!(advice.stack, Stack::Deck);
    }

    #[test]
    fn decision_log_honours_its_own_target_filter() {
        let (advice, logs) = captured_logs("crowns_bot::draw=info", || advise("11-R"));
        assert_eq!(advice.unwrap().stack, Stack::Discard);
        assert!(logs.contains("stack=discard"), "missing decision log: {logs}");

        let (_, logs) = captured_logs("crowns_bot::draw=warn", || advise("11-R"));
        assert!(logs.is_empty(), "info leaked through: {logs}");
    }
}
