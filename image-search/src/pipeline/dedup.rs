//! Candidate deduplication by location.
//!
//! Providers frequently return the same image URL more than once. Only the
//! first occurrence is kept, and discovery order is preserved so that the
//! highest-ranked copy is the one downloaded.

use std::collections::HashSet;

use crate::types::CandidateImage;

/// Keep the first candidate for each distinct location, in input order.
pub fn dedupe(candidates: Vec<CandidateImage>) -> Vec<CandidateImage> {
    let mut seen: HashSet<String> = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.location.clone()))
        .collect()
}
