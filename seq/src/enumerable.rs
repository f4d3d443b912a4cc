use std::ops::Index;

use crate::{
    cursor::{BoxCursor, Cursor, Pulled},
    error::Error,
    range::{Direction, Numeric, RangeCursor},
    sequence::{Indexed, Sequence},
};

/// An ordered collection backed by a [`Vec`].
///
/// The backing vector is exposed through [`Enumerable::data`] and
/// [`Enumerable::data_mut`]; changes made through `data_mut` are visible on the
/// next read. Reading never copies: only [`Sequence::to_vec`] does.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Enumerable<T> {
    data: Vec<T>,
}

impl<T> Default for Enumerable<T> {
    fn default() -> Self {
        Enumerable { data: Vec::new() }
    }
}

impl<T> Enumerable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mahler_seq::Enumerable;
    /// let notes = Enumerable::from(vec![60, 62, 64]);
    /// assert_eq!(notes.len(), 3);
    /// ```
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The backing store, in order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the backing store, for bulk edits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mahler_seq::{Enumerable, Sequence};
    /// let mut bar = Enumerable::from(vec!["C4", "E4"]);
    /// bar.data_mut().push("G4");
    /// assert_eq!(bar.count(), 3);
    /// assert_eq!(bar.data(), &["C4", "E4", "G4"]);
    /// ```
    pub fn data_mut(&mut self) -> &mut Vec<T> {
        &mut self.data
    }

    /// Replaces the backing store wholesale.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}

impl<T: Numeric> Enumerable<T> {
    /// Materializes `start, start + step, ...`, stopping strictly before `stop`.
    ///
    /// Returns [`Error::ZeroStep`] if `step` is zero, since such a range would
    /// never end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mahler_seq::Enumerable;
    /// let octaves = Enumerable::range(72, -12, 24).unwrap();
    /// assert_eq!(octaves.data(), &[72, 60, 48, 36]);
    /// assert!(Enumerable::range(0, 0, 1).is_err());
    /// ```
    pub fn range(start: T, step: T, stop: T) -> Result<Self, Error> {
        if Direction::of(step) == Direction::Stalled {
            return Err(Error::ZeroStep);
        }
        let mut cursor = RangeCursor::new(start, step, Some(stop));
        let mut data = Vec::new();
        while cursor.has_elements() {
            data.extend(cursor.next());
        }
        Ok(Enumerable { data })
    }

    /// `0, 1, ..., stop - 1`.
    pub fn range_to(stop: T) -> Self {
        Self::range_between(T::ZERO, stop)
    }

    /// `start, start + 1, ..., stop - 1`.
    pub fn range_between(start: T, stop: T) -> Self {
        // A step of one is never zero.
        Self::range(start, T::ONE, stop).unwrap_or_default()
    }
}

impl<T: Clone> Sequence for Enumerable<T> {
    type Item = T;

    fn iterator(&self) -> BoxCursor<'_, T> {
        Box::new(Pulled::new(self.data.iter().cloned()))
    }

    fn count(&self) -> usize {
        self.data.len()
    }

    fn to_vec(&self) -> Vec<T> {
        self.data.clone()
    }
}

impl<T: Clone> Indexed for Enumerable<T> {
    fn get(&self, idx: usize) -> Option<&T> {
        self.data.get(idx)
    }

    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.data.retain(keep);
    }
}

impl<T> From<Vec<T>> for Enumerable<T> {
    fn from(data: Vec<T>) -> Self {
        Enumerable { data }
    }
}

impl<T> FromIterator<T> for Enumerable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Enumerable {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Enumerable<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

impl<T> IntoIterator for Enumerable<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Enumerable<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> Index<usize> for Enumerable<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Enumerable<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.data, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Enumerable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = <Vec<T> as serde::Deserialize<'de>>::deserialize(deserializer)?;
        Ok(data.into())
    }
}
