//! Sparse warning map produced by the detector.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// Map from item id to the ids of the items it conflicts with.
///
/// Only conflicting items have an entry. Entries keep input order, and each
/// conflict list keeps the order of the collection it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlapWarnings<Id: Eq + Hash = String> {
    entries: IndexMap<Id, Vec<Id>>,
}

impl<Id: Eq + Hash> Default for OverlapWarnings<Id> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<Id: Clone + Eq + Hash> OverlapWarnings<Id> {
    /// Record conflicts for `id`. Empty lists are ignored; an existing entry
    /// is replaced in place.
    pub(crate) fn insert(&mut self, id: Id, conflicts: Vec<Id>) {
        if !conflicts.is_empty() {
            self.entries.insert(id, conflicts);
        }
    }

    /// Conflicts recorded for `id`, if any.
    pub fn get(&self, id: &Id) -> Option<&[Id]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of items with at least one conflict.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Id, &[Id])> {
        self.entries.iter().map(|(id, list)| (id, list.as_slice()))
    }

    /// Ids that have at least one conflict, in entry order.
    pub fn conflicting_ids(&self) -> impl Iterator<Item = &Id> {
        self.entries.keys()
    }

    /// Each conflicting pair once, in the order it is first seen.
    pub fn conflict_pairs(&self) -> Vec<(Id, Id)> {
        let mut seen: HashSet<(&Id, &Id)> = HashSet::new();
        let mut pairs = Vec::new();
        for (a, list) in &self.entries {
            for b in list {
                if seen.contains(&(b, a)) || !seen.insert((a, b)) {
                    continue;
                }
                pairs.push((a.clone(), b.clone()));
            }
        }
        pairs
    }

    /// True when every `a -> b` entry is matched by `b -> a`.
    pub fn is_symmetric(&self) -> bool {
        self.entries.iter().all(|(a, list)| {
            list.iter()
                .all(|b| self.entries.get(b).is_some_and(|back| back.contains(a)))
        })
    }
}

impl<'a, Id: Eq + Hash> IntoIterator for &'a OverlapWarnings<Id> {
    type Item = (&'a Id, &'a Vec<Id>);
    type IntoIter = indexmap::map::Iter<'a, Id, Vec<Id>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> OverlapWarnings {
        let mut w = OverlapWarnings::default();
        w.insert("a".into(), ids(&["b", "c"]));
        w.insert("b".into(), ids(&["a"]));
        w.insert("c".into(), ids(&["a"]));
        w
    }

    #[test]
    fn empty_lists_are_not_recorded() {
        let mut w: OverlapWarnings = OverlapWarnings::default();
        w.insert("a".into(), Vec::new());
        assert!(w.is_empty());
    }

    #[test]
    fn pairs_are_reported_once() {
        let pairs = sample().conflict_pairs();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "b".to_string()),
                ("a".to_string(), "c".to_string())
            ]
        );
    }

    #[test]
    fn symmetry_check_detects_one_sided_entries() {
        assert!(sample().is_symmetric());

        let mut lopsided: OverlapWarnings = OverlapWarnings::default();
        lopsided.insert("a".into(), ids(&["b"]));
        assert!(!lopsided.is_symmetric());
    }

    #[test]
    fn serializes_as_plain_object_in_entry_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"a":["b","c"],"b":["a"],"c":["a"]}"#);
    }

    #[test]
    fn replacing_an_entry_keeps_its_position() {
        let mut w = sample();
        w.insert("a".into(), ids(&["c"]));
        let keys: Vec<_> = w.conflicting_ids().cloned().collect();
        assert_eq!(keys, ids(&["a", "b", "c"]));
        assert_eq!(w.get(&"a".to_string()), Some(&ids(&["c"])[..]));
    }
}
