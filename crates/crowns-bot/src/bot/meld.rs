use super::{AdviceError, EngineParams, ScoreAdvice, TurnState};
use crowns_core::meld::{Arrangement, arrange, enumerate_candidates};
use crowns_core::model::hand::Hand;
use crowns_core::model::meld::Meld;
use tracing::{Level, event};

pub struct MeldPlanner;

impl MeldPlanner {
    /// Runs the meld engine on `hand`. Every advice kind starts here.
    pub fn arrange(
        hand: &Hand,
        round: u8,
        params: EngineParams,
    ) -> Result<Arrangement, AdviceError> {
        match arrange(hand, round, params.limits()) {
            Ok(arrangement) => {
                log_arrangement(hand, round, &arrangement);
                Ok(arrangement)
            }
            Err(err) => {
                tracing::error!(
                    target: "crowns_bot::meld",
                    round,
                    hand_size = hand.len(),
                    error = %err,
                    "meld engine fault"
                );
                Err(err.into())
            }
        }
    }

    pub fn score(state: &TurnState, params: EngineParams) -> Result<ScoreAdvice, AdviceError> {
        let arrangement = Self::arrange(&state.hand, state.round, params)?;
        let flop = arrangement.flop();
        Ok(ScoreAdvice {
            melds: arrangement.into_melds(),
            flop,
        })
    }
}

fn log_arrangement(hand: &Hand, round: u8, arrangement: &Arrangement) {
    if !tracing::enabled!(target: "crowns_bot::meld", Level::DEBUG) {
        return;
    }

    let candidates: Vec<String> = enumerate_candidates(hand, round)
        .iter()
        .map(|candidate| {
            candidate
                .cards
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(":")
        })
        .collect();
    let melds: Vec<String> = arrangement.melds().iter().map(Meld::encode).collect();

    event!(
        target: "crowns_bot::meld",
        Level::DEBUG,
        round,
        hand_size = hand.len(),
        candidate_count = candidates.len(),
        candidates = ?candidates,
        melds = ?melds,
        steps = arrangement.steps(),
        flop = arrangement.flop(),
    );
}
