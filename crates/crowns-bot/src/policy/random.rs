use super::{Strategy, StrategyKind};
use crate::bot::{AdviceError, DiscardAdvice, DrawAdvice, ScoreAdvice, Stack, TurnState};
use crowns_core::model::meld::Meld;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Baseline advisor that never melds. Draws from a random pile and throws
/// away a random card; every card is reported as its own meld.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: Mutex<StdRng>,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Random
    }

    fn score(&self, state: &TurnState) -> Result<ScoreAdvice, AdviceError> {
        Ok(ScoreAdvice {
            melds: state.hand.iter().copied().map(Meld::single).collect(),
            flop: false,
        })
    }

    fn draw(&self, _state: &TurnState) -> Result<DrawAdvice, AdviceError> {
        let stack = if self.rng.lock().gen_bool(0.5) {
            Stack::Discard
        } else {
            Stack::Deck
        };
        Ok(DrawAdvice { stack })
    }

    fn discard(&self, state: &TurnState) -> Result<DiscardAdvice, AdviceError> {
        if state.hand.is_empty() {
            return Err(AdviceError::EmptyHand);
        }

        let pick = self.rng.lock().gen_range(0..state.hand.len());
        let card = state.hand.cards()[pick];
        let melds = state
            .hand
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != pick)
            .map(|(_, &card)| Meld::single(card))
            .collect();

        Ok(DiscardAdvice {
            melds,
            flop: false,
            card,
        })
    }
}
