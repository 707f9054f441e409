pub mod bot;
pub mod policy;

pub use bot::{
    AdviceError, DiscardAdvice, DiscardPlanner, DrawAdvice, DrawPlanner, EngineParams,
    MeldPlanner, ScoreAdvice, Stack, TurnState,
};
pub use policy::{MeldStrategy, RandomStrategy, Strategy, StrategyKind};
