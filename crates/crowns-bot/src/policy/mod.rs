mod meld;
mod random;

pub use meld::MeldStrategy;
pub use random::RandomStrategy;

use crate::bot::{AdviceError, DiscardAdvice, DrawAdvice, ScoreAdvice, TurnState};
use std::fmt;
use std::str::FromStr;

/// Unified interface for advisors served behind one endpoint each.
pub trait Strategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Arrange the hand into melds as it stands.
    fn score(&self, state: &TurnState) -> Result<ScoreAdvice, AdviceError>;

    /// Pick the pile to draw from.
    fn draw(&self, state: &TurnState) -> Result<DrawAdvice, AdviceError>;

    /// Pick the card to throw away and arrange what is left.
    fn discard(&self, state: &TurnState) -> Result<DiscardAdvice, AdviceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Meld,
    Random,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 2] = [StrategyKind::Meld, StrategyKind::Random];

    pub const fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Meld => "meld",
            StrategyKind::Random => "random",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "meld" => Ok(StrategyKind::Meld),
            "random" => Ok(StrategyKind::Random),
            other => Err(format!("unknown strategy kind '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.as_str().parse::<StrategyKind>(), Ok(kind));
        }
        assert_eq!(" Random ".parse::<StrategyKind>(), Ok(StrategyKind::Random));
        assert!("greedy".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn strategies_are_shareable_trait_objects() {
        let strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(MeldStrategy::default()),
            Box::new(RandomStrategy::with_seed(1)),
        ];
        let kinds: Vec<StrategyKind> = strategies.iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, StrategyKind::ALL.to_vec());
    }
}
