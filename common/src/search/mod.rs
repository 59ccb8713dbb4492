//! Search over the collection: the text filter applied to the rendered view,
//! and the script conversion applied to the search box as the user types.

mod transliterate;

use std::rc::Rc;

use crate::model::collection::{Collection, CollectionSet};

pub use transliterate::SearchScript;

/// Sets that contain at least one card whose name contains `term`,
/// ignoring case, in collection order.
///
/// A retained set is returned whole: its non-matching cards stay visible.
/// A blank `term` keeps every set.
pub fn filter_by_search(collection: &Collection, term: &str) -> Vec<Rc<CollectionSet>> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return collection.sets.clone();
    }
    collection
        .sets
        .iter()
        .filter(|set| set_matches(set, &needle))
        .cloned()
        .collect()
}

fn set_matches(set: &CollectionSet, needle: &str) -> bool {
    set.cards
        .iter()
        .any(|card| card.name.to_lowercase().contains(needle))
}
