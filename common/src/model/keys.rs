//! Sibling keys for rendered lists.

use std::collections::HashSet;

/// Returns one key per item of `raw`, each unique within the list.
///
/// A key is kept as-is the first time it appears; repeats (duplicate card ids
/// or set titles in a hand-edited document) get a `#n` suffix.
pub fn unique_keys<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|key| {
            let key = key.into();
            let mut candidate = key.clone();
            let mut n = 1;
            while !seen.insert(candidate.clone()) {
                n += 1;
                candidate = format!("{key}#{n}");
            }
            candidate
        })
        .collect()
}
