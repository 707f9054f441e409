use crate::model::card::Card;
use thiserror::Error;

/// Internal-consistency faults raised by the allocator. None of these are
/// caused by caller input; each one means the engine broke its own
/// bookkeeping and the partition must not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no wildcard left to complete a meld")]
    WildcardExhausted,
    #[error("card {card} was committed but none remained in the inventory")]
    InventoryUnderflow { card: Card },
    #[error("allocation did not settle within {steps} steps")]
    AllocationDiverged { steps: usize },
}
