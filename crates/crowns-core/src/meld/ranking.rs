use std::cmp::Ordering;

use super::candidate::{CandidateKind, MeldCandidate};

/// Orders candidates from least to most preferred.
///
/// Complete melds come before partial ones, then the higher score wins, and a
/// set beats a run on an exact score tie since it leaves run material for
/// other melds.
pub fn compare_preference(a: &MeldCandidate, b: &MeldCandidate) -> Ordering {
    a.is_complete()
        .cmp(&b.is_complete())
        .then(a.score.cmp(&b.score))
        .then_with(|| tie_break(a.kind, b.kind))
}

fn tie_break(a: CandidateKind, b: CandidateKind) -> Ordering {
    match (a, b) {
        (CandidateKind::Set, CandidateKind::Run) => Ordering::Greater,
        (CandidateKind::Run, CandidateKind::Set) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// Stable sort, so equally ranked candidates keep their generation order.
pub fn sort_by_preference(candidates: &mut [MeldCandidate]) {
    candidates.sort_by(compare_preference);
}
