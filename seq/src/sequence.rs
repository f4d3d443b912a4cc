//! Capabilities shared by the concrete collections.

use crate::{cursor::BoxCursor, iterable::Iterable};

/// A collection that can be iterated any number of times.
///
/// Implementors only need [`Sequence::iterator`]; they should override
/// [`Sequence::count`] when they know their length.
pub trait Sequence {
    type Item;

    /// A fresh cursor over the current contents.
    fn iterator(&self) -> BoxCursor<'_, Self::Item>;

    /// A fresh lazy pipeline over the current contents.
    fn iter(&self) -> Iterable<'_, Self::Item> {
        Iterable::from_boxed(self.iterator())
    }

    fn count(&self) -> usize {
        self.iter().count()
    }

    /// Copies the contents out, in iteration order.
    fn to_vec(&self) -> Vec<Self::Item> {
        self.iter().to_vec()
    }
}

/// A [`Sequence`] whose elements have stable positions.
pub trait Indexed: Sequence {
    /// The element at logical position `idx`, or `None` if out of bounds.
    fn get(&self, idx: usize) -> Option<&Self::Item>;

    /// Keeps only the elements for which `keep` returns `true`, preserving
    /// their relative order.
    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Self::Item) -> bool;

    /// The position of the first element satisfying `pred`.
    fn first_index<P>(&self, mut pred: P) -> Option<usize>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        (0..self.count()).find(|&idx| self.get(idx).is_some_and(&mut pred))
    }

    /// The position of the last element satisfying `pred`.
    fn last_index<P>(&self, mut pred: P) -> Option<usize>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        (0..self.count())
            .rev()
            .find(|&idx| self.get(idx).is_some_and(&mut pred))
    }

    /// The last element satisfying `pred`, found by scanning backwards.
    fn last_where<P>(&self, pred: P) -> Option<&Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.last_index(pred).and_then(|idx| self.get(idx))
    }

    /// Removes every element equal to `item`.
    fn remove(&mut self, item: &Self::Item)
    where
        Self::Item: PartialEq,
    {
        self.remove_by(item, |a, b| a == b)
    }

    /// Removes every element for which `eq(element, item)` holds.
    fn remove_by<E>(&mut self, item: &Self::Item, mut eq: E)
    where
        E: FnMut(&Self::Item, &Self::Item) -> bool,
    {
        self.retain(|elt| !eq(elt, item))
    }
}
