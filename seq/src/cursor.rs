//! The pull protocol every sequence in this crate is built on.
//!
//! A [`Cursor`] is a single-pass, stateful position in some source. Unlike
//! [`Iterator`], it separates asking "is there more?" from advancing, which
//! is what lets filtering cursors buffer exactly one element of lookahead
//! and still answer [`Cursor::has_elements`] truthfully.

/// A single-pass cursor.
///
/// Callers must check [`Cursor::has_elements`] before every call to
/// [`Cursor::next`]. Calling `next` on an exhausted cursor returns `None`; it
/// never panics. Cursors cannot be rewound: to iterate again, ask the owning
/// sequence for a fresh one.
pub trait Cursor {
    type Item;

    /// Returns `true` if a call to [`Cursor::next`] would produce an element.
    /// Never advances.
    fn has_elements(&self) -> bool;

    /// Advances and returns the current element, or `None` if exhausted.
    fn next(&mut self) -> Option<Self::Item>;
}

/// A type-erased cursor, as captured by derived pipelines.
pub type BoxCursor<'a, T> = Box<dyn Cursor<Item = T> + 'a>;

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    fn has_elements(&self) -> bool {
        (**self).has_elements()
    }

    fn next(&mut self) -> Option<Self::Item> {
        (**self).next()
    }
}

/// A [`Cursor`] over a standard [`Iterator`].
///
/// One element is pulled from the iterator as soon as the cursor is built,
/// and then again after each element handed out.
pub struct Pulled<I: Iterator> {
    iter: I,
    lookahead: Option<I::Item>,
}

impl<I: Iterator> Pulled<I> {
    pub fn new(mut iter: I) -> Self {
        let lookahead = iter.next();
        Pulled { iter, lookahead }
    }
}

impl<I: Iterator> Cursor for Pulled<I> {
    type Item = I::Item;

    fn has_elements(&self) -> bool {
        self.lookahead.is_some()
    }

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.lookahead.take()?;
        self.lookahead = self.iter.next();
        Some(current)
    }
}

/// Drives a [`Cursor`] as a standard [`Iterator`].
#[derive(Debug, Clone)]
pub struct Pulls<C> {
    cursor: C,
}

impl<C: Cursor> Pulls<C> {
    pub fn new(cursor: C) -> Self {
        Pulls { cursor }
    }
}

impl<C: Cursor> Iterator for Pulls<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.has_elements() {
            self.cursor.next()
        } else {
            None
        }
    }
}

impl<C: Cursor> std::iter::FusedIterator for Pulls<C> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulled_answers_before_advancing() {
        let mut cursor = Pulled::new([1, 2].into_iter());
        assert!(cursor.has_elements());
        assert_eq!(cursor.next(), Some(1));
        assert!(cursor.has_elements());
        assert_eq!(cursor.next(), Some(2));
        assert!(!cursor.has_elements());
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn boxed_cursor_round_trips_through_iterator() {
        let boxed: BoxCursor<'_, char> = Box::new(Pulled::new("abc".chars()));
        assert_eq!(Pulls::new(boxed).collect::<String>(), "abc");
    }

    #[test]
    fn empty_source() {
        let mut cursor = Pulled::new(std::iter::empty::<u8>());
        assert!(!cursor.has_elements());
        assert_eq!(cursor.next(), None);
    }
}
