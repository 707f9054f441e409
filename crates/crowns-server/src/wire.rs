//! JSON bodies exchanged with game clients.

use crowns_bot::{DiscardAdvice, DrawAdvice, ScoreAdvice, TurnState};
use crowns_core::model::card::Card;
use crowns_core::model::codec::{DecodeError, decode_cards, encode_melds};
use crowns_core::model::hand::Hand;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Score,
    Discard,
    Draw,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Score => "score",
            Action::Discard => "discard",
            Action::Draw => "draw",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A turn as reported by the game client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotRequest {
    /// Discard pile, top card first.
    #[serde(default)]
    pub discard: Vec<String>,
    #[serde(default)]
    pub hand: Vec<String>,
    pub action: Action,
    /// Accepted for compatibility; no advisor reads it.
    #[serde(default)]
    pub newest_card: Option<String>,
    #[serde(default)]
    pub player_count: u32,
    pub round: u8,
    #[serde(default)]
    pub last_turn: bool,
}

impl BotRequest {
    pub fn turn_state(&self) -> Result<TurnState, DecodeError> {
        let hand = Hand::with_cards(decode_cards(&self.hand)?);
        let discard_top = self
            .discard
            .first()
            .map(|token| token.parse::<Card>())
            .transpose()?;

        Ok(TurnState {
            round: self.round,
            hand,
            discard_top,
            player_count: self.player_count,
            last_turn: self.last_turn,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoreResponse {
    pub sequences: Vec<Vec<String>>,
    pub action: Action,
    pub flop: bool,
}

impl From<ScoreAdvice> for ScoreResponse {
    fn from(advice: ScoreAdvice) -> Self {
        Self {
            sequences: encode_melds(&advice.melds),
            action: Action::Score,
            flop: advice.flop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiscardResponse {
    pub sequences: Vec<Vec<String>>,
    pub action: Action,
    pub card: String,
    pub flop: bool,
}

impl From<DiscardAdvice> for DiscardResponse {
    fn from(advice: DiscardAdvice) -> Self {
        Self {
            sequences: encode_melds(&advice.melds),
            action: Action::Discard,
            card: advice.card.to_string(),
            flop: advice.flop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DrawResponse {
    pub action: Action,
    pub stack: String,
}

impl From<DrawAdvice> for DrawResponse {
    fn from(advice: DrawAdvice) -> Self {
        Self {
            action: Action::Draw,
            stack: advice.stack.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
