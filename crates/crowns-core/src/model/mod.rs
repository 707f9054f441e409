pub mod card;
pub mod codec;
pub mod deck;
pub mod hand;
pub mod inventory;
pub mod meld;
pub mod rank;
pub mod suit;

pub use card::Card;
pub use codec::{DecodeError, decode_cards, encode_melds};
pub use hand::Hand;
pub use inventory::CardInventory;
pub use meld::{MIN_MELD_LEN, Meld, can_flop};
pub use rank::Rank;
pub use suit::Suit;
