use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Stable identifier of a card, unique across the whole collection.
///
/// Cards are always addressed by this id, never by their position on screen,
/// so filtering or reordering the rendered sets cannot redirect an edit to the
/// wrong card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        CardId(id.into())
    }

    /// Generates a fresh random id (UUID v4).
    pub fn generate() -> Self {
        CardId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        CardId(value.to_string())
    }
}

/// A single collectible item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionCard {
    /// Missing in documents written before ids were introduced; filled in on load.
    #[serde(default)]
    pub id: CardId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
    /// Absent or `null` is read as not collected.
    #[serde(default, deserialize_with = "null_as_false")]
    pub collected: bool,
}

/// A named group of cards. The title is a display label only and is not
/// required to be unique.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionSet {
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Rc<CollectionCard>>,
}

/// Root aggregate: the ordered list of sets, in display order.
///
/// Sets and cards sit behind `Rc` so an edit can copy only the path from the
/// root to the changed card and share everything else with the previous value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub sets: Vec<Rc<CollectionSet>>,
}

/// Aggregate counters shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub collected: usize,
    pub total: usize,
}

impl Collection {
    pub fn new(sets: Vec<CollectionSet>) -> Self {
        Collection {
            sets: sets.into_iter().map(Rc::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = &CollectionCard> {
        self.sets
            .iter()
            .flat_map(|set| set.cards.iter().map(|card| card.as_ref()))
    }

    pub fn totals(&self) -> Totals {
        self.sets.iter().fold(Totals::default(), |acc, set| Totals {
            collected: acc.collected + set.collected_count(),
            total: acc.total + set.cards.len(),
        })
    }

    pub fn find_card(&self, id: &CardId) -> Option<&CollectionCard> {
        self.cards().find(|card| &card.id == id)
    }

    /// Returns a copy of this collection with the card `id` marked as
    /// `collected`, or `None` when no card carries that id.
    ///
    /// Only the set holding the card and the card itself are copied; every
    /// other set and card is shared with `self`. The scan stops at the first
    /// match.
    pub fn with_collected(&self, id: &CardId, collected: bool) -> Option<Collection> {
        let (set_idx, card_idx) = self.sets.iter().enumerate().find_map(|(i, set)| {
            set.cards
                .iter()
                .position(|card| &card.id == id)
                .map(|j| (i, j))
        })?;

        let mut next = self.clone();
        let set = Rc::make_mut(&mut next.sets[set_idx]);
        Rc::make_mut(&mut set.cards[card_idx]).collected = collected;
        Some(next)
    }

    /// Gives every card without an id a freshly generated one.
    /// Returns how many ids were assigned.
    pub fn assign_missing_ids(&mut self) -> usize {
        let mut assigned = 0;
        for set in self.sets.iter_mut() {
            if set.cards.iter().all(|card| !card.id.is_empty()) {
                continue;
            }
            let set = Rc::make_mut(set);
            for card in set.cards.iter_mut().filter(|card| card.id.is_empty()) {
                Rc::make_mut(card).id = CardId::generate();
                assigned += 1;
            }
        }
        assigned
    }

    /// Ids that occur on more than one card, in first-seen order.
    pub fn duplicate_card_ids(&self) -> Vec<CardId> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for card in self.cards() {
            if !seen.insert(&card.id) && reported.insert(&card.id) {
                duplicates.push(card.id.clone());
            }
        }
        duplicates
    }
}

impl CollectionSet {
    pub fn new(title: impl Into<String>, cards: Vec<CollectionCard>) -> Self {
        CollectionSet {
            title: title.into(),
            cards: cards.into_iter().map(Rc::new).collect(),
        }
    }

    pub fn collected_count(&self) -> usize {
        self.cards.iter().filter(|card| card.collected).count()
    }
}

impl CollectionCard {
    pub fn new(id: impl Into<String>, name: impl Into<String>, collected: bool) -> Self {
        CollectionCard {
            id: CardId::new(id),
            name: name.into(),
            collected,
            ..Default::default()
        }
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Collection {
        Collection::new(vec![
            CollectionSet::new(
                "Set A",
                vec![
                    CollectionCard::new("1", "Alpha", false),
                    CollectionCard::new("2", "Beta", true),
                ],
            ),
            CollectionSet::new("Set B", vec![CollectionCard::new("3", "Gamma", false)]),
        ])
    }

    #[test]
    fn totals_count_cards_and_collected_flags() {
        assert_eq!(
            sample().totals(),
            Totals {
                collected: 1,
                total: 3
            }
        );
        assert_eq!(Collection::default().totals(), Totals::default());
    }

    #[test]
    fn with_collected_changes_only_the_target_card() {
        let before = sample();
        let after = before.with_collected(&CardId::from("1"), true).unwrap();

        assert!(after.find_card(&"1".into()).unwrap().collected);
        assert!(after.find_card(&"2".into()).unwrap().collected);
        assert!(!after.find_card(&"3".into()).unwrap().collected);
        // the original value is untouched
        assert!(!before.find_card(&"1".into()).unwrap().collected);
    }

    #[test]
    fn with_collected_shares_untouched_subtrees() {
        let before = sample();
        let after = before.with_collected(&CardId::from("1"), true).unwrap();

        assert!(!Rc::ptr_eq(&before.sets[0], &after.sets[0]));
        assert!(!Rc::ptr_eq(&before.sets[0].cards[0], &after.sets[0].cards[0]));
        assert!(Rc::ptr_eq(&before.sets[0].cards[1], &after.sets[0].cards[1]));
        assert!(Rc::ptr_eq(&before.sets[1], &after.sets[1]));
    }

    #[test]
    fn with_collected_unknown_id_is_none() {
        assert!(sample().with_collected(&"missing".into(), true).is_none());
    }

    #[test]
    fn deserializes_earlier_shape_without_ids() {
        let json = r#"{"sets":[{"title":"Old","cards":[
            {"name":"A","image":"https://img/a.png","link":"https://a"},
            {"name":"B","image":"","link":"","collected":null},
            {"name":"C","image":"","link":"","collected":true}
        ]}]}"#;
        let mut collection: Collection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.totals(), Totals { collected: 1, total: 3 });

        assert_eq!(collection.assign_missing_ids(), 3);
        assert!(collection.cards().all(|card| !card.id.is_empty()));
        assert!(collection.duplicate_card_ids().is_empty());
        assert_eq!(collection.assign_missing_ids(), 0);
    }

    #[test]
    fn reports_each_duplicate_id_once() {
        let collection = Collection::new(vec![
            CollectionSet::new(
                "A",
                vec![
                    CollectionCard::new("x", "One", false),
                    CollectionCard::new("x", "Two", false),
                ],
            ),
            CollectionSet::new("B", vec![CollectionCard::new("x", "Three", false)]),
        ]);
        assert_eq!(collection.duplicate_card_ids(), vec![CardId::from("x")]);
    }

    #[test]
    fn serializes_collected_flag_and_id() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["sets"][0]["cards"][1]["id"], "2");
        assert_eq!(json["sets"][0]["cards"][1]["collected"], true);
        assert_eq!(json["sets"][1]["title"], "Set B");
    }
}
