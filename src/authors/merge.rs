use crate::Author;

/// Pick the canonical survivor out of a duplicate set: sort ascending by id,
/// prefer the first entry whose confirmation flag is not explicitly false,
/// and fall back to the lowest-id entry when none qualifies.
pub fn select_merge_candidate(candidates: &[Author]) -> Option<Author> {
    if candidates.is_empty() {
        return None;
    }

    let mut sorted: Vec<Author> = candidates.to_vec();
    sorted.sort_by_key(|a| a.id.unwrap_or(i64::MAX));

    sorted
        .iter()
        .find(|a| a.is_confirmed != Some(false))
        .or_else(|| sorted.first())
        .cloned()
}
