use crate::{
    cursor::{BoxCursor, Pulled},
    sequence::{Indexed, Sequence},
};

/// A FIFO queue with amortized constant-time [`Queue::dequeue`].
///
/// Dequeuing doesn't shift the remaining elements: it empties the front slot
/// and moves the `first` offset past it. Once at least half of the backing
/// store is made of such consumed slots, they are dropped in one go.
#[derive(Clone)]
pub struct Queue<T> {
    // Invariant: `slots[..first]` are all `None` and `slots[first..]` are all
    // `Some`.
    slots: Vec<Option<T>>,
    first: usize,
    // Tracked separately rather than derived from `slots.len() - first`.
    count: usize,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Queue {
            slots: Vec::new(),
            first: 0,
            count: 0,
        }
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Adds `item` at the back of the queue.
    pub fn enqueue(&mut self, item: T) {
        self.slots.push(Some(item));
        self.count += 1;
    }

    /// Removes and returns the item at the front of the queue, or `None` if
    /// the queue is empty (in which case nothing changes).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mahler_seq::Queue;
    /// let mut bars = Queue::new();
    /// bars.enqueue("bar 1");
    /// bars.enqueue("bar 2");
    /// assert_eq!(bars.dequeue(), Some("bar 1"));
    /// assert_eq!(bars.peek(), Some(&"bar 2"));
    /// ```
    pub fn dequeue(&mut self) -> Option<T> {
        let item = self.slots.get_mut(self.first)?.take()?;
        self.first += 1;
        self.count -= 1;
        if self.first * 2 >= self.slots.len() {
            self.compact();
        }
        Some(item)
    }

    /// The item at the front of the queue, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.slots.get(self.first).and_then(Option::as_ref)
    }

    /// Replaces the whole contents. `data[0]` becomes the front of the queue.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.count = data.len();
        self.slots = data.into_iter().map(Some).collect();
        self.first = 0;
    }

    /// The contents, front first. Consumed slots are dropped.
    pub fn into_data(self) -> Vec<T> {
        self.slots.into_iter().flatten().collect()
    }

    fn compact(&mut self) {
        if self.first > 0 {
            log::trace!(
                "compacting queue: dropping {} consumed slots, keeping {}",
                self.first,
                self.count
            );
            self.slots.drain(..self.first);
            self.first = 0;
        }
    }

    /// Panics if the internal bookkeeping is inconsistent.
    pub fn check_invariants(&self) {
        assert!(self.first <= self.slots.len());
        assert!(self.slots[..self.first].iter().all(Option::is_none));
        assert!(self.slots[self.first..].iter().all(Option::is_some));
        assert_eq!(self.count, self.slots.len() - self.first);
        // Compaction happens as soon as half the slots are consumed.
        assert!(self.first == 0 || self.first * 2 < self.slots.len());
    }
}

impl<T: Clone> Sequence for Queue<T> {
    type Item = T;

    fn iterator(&self) -> BoxCursor<'_, T> {
        Box::new(Pulled::new(self.slots[self.first..].iter().flatten().cloned()))
    }

    fn count(&self) -> usize {
        self.count
    }
}

impl<T: Clone> Indexed for Queue<T> {
    fn get(&self, idx: usize) -> Option<&T> {
        let slot = self.first.checked_add(idx)?;
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.compact();
        self.slots.retain(|slot| slot.as_ref().is_some_and(&mut keep));
        self.count = self.slots.len();
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.enqueue(item);
        }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

impl<T: PartialEq> PartialEq for Queue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count
            && self.slots[self.first..]
                .iter()
                .eq(other.slots[other.first..].iter())
    }
}

impl<T: Eq> Eq for Queue<T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.slots[self.first..].iter().flatten())
            .finish()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Queue<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(self.count))?;
        for item in self.slots[self.first..].iter().flatten() {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Queue<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = <Vec<T> as serde::Deserialize<'de>>::deserialize(deserializer)?;
        let mut queue = Queue::new();
        queue.set_data(data);
        Ok(queue)
    }
}
