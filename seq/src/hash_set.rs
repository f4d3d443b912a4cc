//! A set whose notion of "same element" is chosen by the caller.
//!
//! Membership in a [`HashSet`] is decided by a key computed from each item by
//! a [`KeySelector`], not by the item itself. Two items with the same key are
//! the same as far as the set is concerned, and the one added first is the
//! one that is kept.
//!
//! ```rust
//! # use mahler_seq::{HashSet, Sequence};
//! // Pitch classes: notes an octave apart collapse onto each other.
//! let mut pitch_classes = HashSet::with_selector(|code: &u8| code % 12);
//! pitch_classes.add(60);
//! pitch_classes.add(72);
//! assert_eq!(pitch_classes.to_vec(), vec![60]);
//! ```

use std::hash::Hash;

use indexmap::{map::Entry, IndexMap};

use crate::{
    cursor::{BoxCursor, Pulled},
    sequence::Sequence,
};

/// Computes the key that decides whether two items are the same set member.
///
/// Implemented by [`Identity`] and by every `Fn(&T) -> K` closure.
pub trait KeySelector<T> {
    type Key: Hash + Eq;

    fn key(&self, item: &T) -> Self::Key;
}

/// Keys every item by (a clone of) itself, so that membership follows the
/// item's own `Hash` and `Eq`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl<T: Hash + Eq + Clone> KeySelector<T> for Identity {
    type Key = T;

    fn key(&self, item: &T) -> T {
        item.clone()
    }
}

impl<T, K, F> KeySelector<T> for F
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    type Key = K;

    fn key(&self, item: &T) -> K {
        self(item)
    }
}

/// A set of items deduplicated by key. See the [module documentation](self).
///
/// Iteration order is unspecified. (Currently it is insertion order until the
/// first removal, which moves the last item into the removed one's place.)
pub struct HashSet<T, H: KeySelector<T> = Identity> {
    entries: IndexMap<H::Key, T>,
    selector: H,
}

impl<T: Hash + Eq + Clone> HashSet<T> {
    /// An empty set keyed by the items themselves.
    pub fn new() -> Self {
        Self::with_selector(Identity)
    }
}

impl<T: Hash + Eq + Clone> Default for HashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, H: KeySelector<T>> HashSet<T, H> {
    /// An empty set keyed by `selector`.
    pub fn with_selector(selector: H) -> Self {
        HashSet {
            entries: IndexMap::new(),
            selector,
        }
    }

    pub fn selector(&self) -> &H {
        &self.selector
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds `item` unless an item with the same key is already present.
    /// Returns `true` if the item was added.
    pub fn add(&mut self, item: T) -> bool {
        match self.entries.entry(self.selector.key(&item)) {
            Entry::Occupied(_) => {
                log::trace!("set already holds an item with this key, dropping the new one");
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(item);
                true
            }
        }
    }

    pub fn add_range<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.add(item);
        }
    }

    /// Removes the item sharing `item`'s key and returns it. Does nothing if
    /// there is none.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        self.entries.swap_remove(&self.selector.key(item))
    }

    pub fn contains(&self, item: &T) -> bool {
        self.entries.contains_key(&self.selector.key(item))
    }

    /// The stored item sharing `item`'s key. This is the first one that was
    /// added, which may differ from `item`.
    pub fn get(&self, item: &T) -> Option<&T> {
        self.entries.get(&self.selector.key(item))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The items of `self` that `other` contains, in a new set keyed like
    /// `self`. Membership in `other` is decided by `other`'s own selector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mahler_seq::{HashSet, Sequence};
    /// let a: HashSet<_> = [1, 2, 3].into_iter().collect();
    /// let b: HashSet<_> = [2, 3, 4].into_iter().collect();
    /// let mut both = a.intersect(&b).to_vec();
    /// both.sort();
    /// assert_eq!(both, vec![2, 3]);
    /// ```
    pub fn intersect<H2>(&self, other: &HashSet<T, H2>) -> Self
    where
        T: Clone,
        H: Clone,
        H2: KeySelector<T>,
    {
        let mut result = Self::with_selector(self.selector.clone());
        result.add_range(self.entries.values().filter(|item| other.contains(item)).cloned());
        result
    }

    /// The items of both sets, in a new set keyed like `self`. Items of `self`
    /// win over items of `other` with the same key.
    pub fn union<H2>(&self, other: &HashSet<T, H2>) -> Self
    where
        T: Clone,
        H: Clone,
        H2: KeySelector<T>,
    {
        let mut result = Self::with_selector(self.selector.clone());
        result.add_range(self.entries.values().cloned());
        result.add_range(other.entries.values().cloned());
        result
    }
}

impl<T: Clone, H: KeySelector<T>> Sequence for HashSet<T, H> {
    type Item = T;

    fn iterator(&self) -> BoxCursor<'_, T> {
        Box::new(Pulled::new(self.entries.values().cloned()))
    }

    fn count(&self) -> usize {
        self.entries.len()
    }
}

impl<T, H> Clone for HashSet<T, H>
where
    T: Clone,
    H: KeySelector<T> + Clone,
    H::Key: Clone,
{
    fn clone(&self) -> Self {
        HashSet {
            entries: self.entries.clone(),
            selector: self.selector.clone(),
        }
    }
}

impl<T: std::fmt::Debug, H: KeySelector<T>> std::fmt::Debug for HashSet<T, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.values()).finish()
    }
}

impl<T, H: KeySelector<T>> Extend<T> for HashSet<T, H> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_range(iter);
    }
}

impl<T: Hash + Eq + Clone> FromIterator<T> for HashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::new();
        set.add_range(iter);
        set
    }
}

impl<T, H: KeySelector<T>> IntoIterator for HashSet<T, H> {
    type Item = T;
    type IntoIter = indexmap::map::IntoValues<H::Key, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl<'a, T, H: KeySelector<T>> IntoIterator for &'a HashSet<T, H> {
    type Item = &'a T;
    type IntoIter = indexmap::map::Values<'a, H::Key, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize, H: KeySelector<T>> serde::Serialize for HashSet<T, H> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.entries.values())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for HashSet<T>
where
    T: serde::Deserialize<'de> + Hash + Eq + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = <Vec<T> as serde::Deserialize<'de>>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted<T: Ord>(mut items: Vec<T>) -> Vec<T> {
        items.sort();
        items
    }

    #[test]
    fn first_write_wins() {
        let mut set = HashSet::with_selector(|code: &u8| code % 12);
        assert!(set.add(60));
        assert!(!set.add(72));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&72));
        assert_eq!(set.get(&84), Some(&60));
        assert_eq!(set.to_vec(), vec![60]);
    }

    #[test]
    fn remove_absent_keeps_count() {
        let mut set: HashSet<_> = [1, 2].into_iter().collect();
        assert_eq!(set.remove(&5), None);
        assert_eq!(set.len(), 2);
        assert_eq!(set.count(), 2);

        assert_eq!(set.remove(&1), Some(1));
        assert_eq!(set.remove(&1), None);
        assert_eq!(set.len(), 1);
        assert!(!set.contains(&1));
        assert!(set.add(1));
        assert_eq!(sorted(set.to_vec()), vec![1, 2]);
    }

    #[test]
    fn set_algebra_leaves_operands_alone() {
        let a: HashSet<_> = [1, 2, 3].into_iter().collect();
        let b: HashSet<_> = [2, 3, 4].into_iter().collect();

        assert_eq!(sorted(a.intersect(&b).to_vec()), vec![2, 3]);
        assert_eq!(sorted(a.union(&b).to_vec()), vec![1, 2, 3, 4]);
        assert_eq!(sorted(a.to_vec()), vec![1, 2, 3]);
        assert_eq!(sorted(b.to_vec()), vec![2, 3, 4]);
    }

    #[test]
    fn set_algebra_uses_each_sides_selector() {
        #[derive(Clone, Debug, PartialEq)]
        struct Note {
            name: &'static str,
            code: u8,
        }
        let note = |name, code| Note { name, code };

        let by_name = |n: &Note| n.name;
        let by_code = |n: &Note| n.code;
        let mut pressed = HashSet::with_selector(by_name);
        pressed.add_range([note("C4", 60), note("E4", 64)]);
        let mut midi = HashSet::with_selector(by_code);
        midi.add_range([note("C", 60), note("G", 67)]);

        // Membership in `midi` goes by code, so "C4" matches "C".
        let common = pressed.intersect(&midi);
        assert_eq!(common.to_vec(), vec![note("C4", 60)]);

        // The result is keyed by name, so "C" and "C4" are distinct there.
        let all = pressed.union(&midi);
        assert_eq!(all.len(), 4);
        assert!(all.contains(&note("G", 0)));
    }

    #[test]
    fn selector_survives_cloning_into_results() {
        let mut lower = HashSet::with_selector(|s: &String| s.to_lowercase());
        lower.add("Piano".to_owned());
        let other: HashSet<String> = ["PIANO".to_owned()].into_iter().collect();
        let merged = lower.union(&other);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.to_vec(), vec!["Piano".to_owned()]);
        assert!(merged.selector().key(&"pIaNo".to_owned()) == "piano");
    }

    #[test]
    fn iteration() {
        let set: HashSet<_> = [5, 6, 7].into_iter().collect();
        assert_eq!(set.iter().filter(|n| n % 2 == 1).count(), 2);
        assert_eq!(set.iter().sum(), 18);
        assert_eq!(sorted::<i32>((&set).into_iter().copied().collect()), vec![5, 6, 7]);
        assert_eq!(sorted::<i32>(set.into_iter().collect()), vec![5, 6, 7]);
    }
}
