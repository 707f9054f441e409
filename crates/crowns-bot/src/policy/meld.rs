use super::{Strategy, StrategyKind};
use crate::bot::{
    AdviceError, DiscardAdvice, DiscardPlanner, DrawAdvice, DrawPlanner, EngineParams,
    MeldPlanner, ScoreAdvice, TurnState,
};

/// Advisor backed by the greedy meld engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeldStrategy {
    params: EngineParams,
}

impl MeldStrategy {
    pub const fn new(params: EngineParams) -> Self {
        Self { params }
    }

    pub const fn params(&self) -> EngineParams {
        self.params
    }
}

impl Strategy for MeldStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Meld
    }

    fn score(&self, state: &TurnState) -> Result<ScoreAdvice, AdviceError> {
        MeldPlanner::score(state, self.params)
    }

    fn draw(&self, state: &TurnState) -> Result<DrawAdvice, AdviceError> {
        DrawPlanner::choose(state, self.params)
    }

    fn discard(&self, state: &TurnState) -> Result<DiscardAdvice, AdviceError> {
        DiscardPlanner::choose(state, self.params)
    }
}
