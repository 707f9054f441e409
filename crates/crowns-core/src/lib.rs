pub mod meld;
pub mod model;
