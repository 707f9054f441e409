pub mod allocator;
pub mod candidate;
pub mod error;
pub mod ranking;

pub use allocator::{AllocationLimits, Arrangement, DEFAULT_MAX_STEPS, allocate, arrange};
pub use candidate::{CandidateKind, MeldCandidate, enumerate_candidates, find_runs, find_sets};
pub use error::EngineError;
pub use ranking::{compare_preference, sort_by_preference};
