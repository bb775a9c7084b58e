use indexmap::IndexMap;

/// Returns the entry with the highest count.
///
/// Ties go to the entry inserted first, so the winner among equal counts
/// depends on input order rather than on the values themselves. Repeated
/// runs over the same input always pick the same entry.
pub fn most_common<K>(counts: &IndexMap<K, usize>) -> Option<(&K, usize)> {
    let mut best: Option<(&K, usize)> = None;
    for (key, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((key, count)),
        }
    }
    best
}
