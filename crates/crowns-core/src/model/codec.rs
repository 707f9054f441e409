//! Text encoding for cards and melds.
//!
//! A standard card is written as `<rank>-<suit>` (`10-R`), a joker as `*`,
//! and a meld as its cards joined by `:` (`4-B:5-B:6-B:*`).

use crate::model::card::Card;
use crate::model::meld::Meld;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::str::FromStr;
use thiserror::Error;

pub const WILD_MARKER: &str = "*";
pub const RANK_SUIT_SEPARATOR: char = '-';
pub const MELD_SEPARATOR: &str = ":";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty card token")]
    Empty,
    #[error("malformed wildcard token: {0}")]
    MalformedWildcard(String),
    #[error("missing rank/suit separator in card token: {0}")]
    MissingSeparator(String),
    #[error("unable to decode rank: {0}")]
    InvalidRank(String),
    #[error("rank out of range in card token: {0}")]
    RankOutOfRange(String),
    #[error("invalid suit in card token: {0}")]
    InvalidSuit(String),
}

impl FromStr for Card {
    type Err = DecodeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.is_empty() {
            return Err(DecodeError::Empty);
        }
        if token.starts_with(WILD_MARKER) {
            return if token == WILD_MARKER {
                Ok(Card::Joker)
            } else {
                Err(DecodeError::MalformedWildcard(token.to_string()))
            };
        }

        let (rank_text, suit_text) = token
            .split_once(RANK_SUIT_SEPARATOR)
            .ok_or_else(|| DecodeError::MissingSeparator(token.to_string()))?;

        // Only canonical digits are accepted so that every decoded card
        // encodes back to the exact token it came from.
        if rank_text.is_empty()
            || !rank_text.bytes().all(|b| b.is_ascii_digit())
            || rank_text.starts_with('0')
        {
            return Err(DecodeError::InvalidRank(token.to_string()));
        }
        let value: u8 = rank_text
            .parse()
            .map_err(|_| DecodeError::RankOutOfRange(token.to_string()))?;
        let rank =
            Rank::from_value(value).ok_or_else(|| DecodeError::RankOutOfRange(token.to_string()))?;

        let mut symbols = suit_text.chars();
        let suit = match (symbols.next(), symbols.next()) {
            (Some(symbol), None) => Suit::from_symbol(symbol),
            _ => None,
        }
        .ok_or_else(|| DecodeError::InvalidSuit(token.to_string()))?;

        Ok(Card::new(rank, suit))
    }
}

impl FromStr for Meld {
    type Err = DecodeError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        encoded
            .split(MELD_SEPARATOR)
            .map(str::parse::<Card>)
            .collect::<Result<Vec<_>, _>>()
            .map(Meld::new)
    }
}

pub fn decode_cards<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Card>, DecodeError> {
    tokens.iter().map(|token| token.as_ref().parse()).collect()
}

pub fn encode_melds(melds: &[Meld]) -> Vec<Vec<String>> {
    melds.iter().map(Meld::encode_cards).collect()
}
