mod discard;
mod draw;
mod meld;
mod params;

pub use discard::DiscardPlanner;
pub use draw::DrawPlanner;
pub use meld::MeldPlanner;
pub use params::EngineParams;

use crowns_core::meld::EngineError;
use crowns_core::model::card::Card;
use crowns_core::model::hand::Hand;
use crowns_core::model::meld::Meld;
use std::fmt;
use thiserror::Error;

/// Everything a planner knows about the player's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub round: u8,
    pub hand: Hand,
    /// Top of the discard pile, if the pile has any cards.
    pub discard_top: Option<Card>,
    pub player_count: u32,
    pub last_turn: bool,
}

impl TurnState {
    pub fn new(round: u8, hand: Hand) -> Self {
        Self {
            round,
            hand,
            discard_top: None,
            player_count: 0,
            last_turn: false,
        }
    }

    pub fn with_discard_top(mut self, card: Card) -> Self {
        self.discard_top = Some(card);
        self
    }

    pub fn with_player_count(mut self, player_count: u32) -> Self {
        self.player_count = player_count;
        self
    }

    pub fn with_last_turn(mut self, last_turn: bool) -> Self {
        self.last_turn = last_turn;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdviceError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("card {card} was not found in any meld")]
    NoCandidateFound { card: Card },
    #[error("no card in the arrangement can be discarded")]
    NoDiscardCandidate,
    #[error("hand is empty")]
    EmptyHand,
    #[error("discard pile is empty")]
    EmptyDiscardPile,
}

impl AdviceError {
    /// True when the request itself was unusable. Everything else is an
    /// engine fault.
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyHand | Self::EmptyDiscardPile)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreAdvice {
    pub melds: Vec<Meld>,
    pub flop: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stack {
    Discard,
    Deck,
}

impl Stack {
    pub const fn as_str(self) -> &'static str {
        match self {
            Stack::Discard => "discard",
            Stack::Deck => "deck",
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawAdvice {
    pub stack: Stack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardAdvice {
    pub melds: Vec<Meld>,
    pub flop: bool,
    pub card: Card,
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io;
    use std::sync::Arc;

    use crowns_core::model::card::Card;
    use crowns_core::model::hand::Hand;
    use crowns_core::model::meld::Meld;
    use parking_lot::Mutex;
    use tracing_subscriber::EnvFilter;

    pub fn card(token: &str) -> Card {
        token.parse().expect("valid card")
    }

    pub fn hand(tokens: &[&str]) -> Hand {
        tokens.iter().map(|token| card(token)).collect()
    }

    pub fn encoded(melds: &[Meld]) -> Vec<String> {
        melds.iter().map(Meld::encode).collect()
    }

    /// Runs `f` under a plain-text subscriber limited to `filter`. Returns its
    /// result next to whatever it logged.
    pub fn captured_logs<T>(filter: &str, f: impl FnOnce() -> T) -> (T, String) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = Arc::clone(&buffer);
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_ansi(false)
            .with_writer(move || SharedBuffer(Arc::clone(&writer)))
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.lock().clone();
        (result, String::from_utf8_lossy(&bytes).into_owned())
    }

    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
