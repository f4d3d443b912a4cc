//! Lazy, chainable sequence pipelines.
//!
//! An [`Iterable`] is either a *root*, holding a factory that builds a fresh
//! [`Cursor`] whenever one is needed, or a *pipeline*, holding the one cursor
//! captured from its parent when a lazy operation was applied. Every lazy
//! operation consumes its receiver, so at most one pipeline can ever pull from
//! a given cursor.
//!
//! ```rust
//! # use mahler_seq::Iterable;
//! let squares = Iterable::range_from(1)
//!     .filter(|n| n % 2 == 1)
//!     .map(|n| n * n)
//!     .take(4)
//!     .to_vec();
//! assert_eq!(squares, vec![1, 9, 25, 49]);
//! ```

use std::{hash::Hash, iter::Sum, rc::Rc};

use indexmap::IndexMap;

use crate::{
    cursor::{BoxCursor, Cursor, Pulled, Pulls},
    hash_set::{HashSet, Identity, KeySelector},
    range::{Numeric, RangeCursor},
};

type Factory<'a, T> = Rc<dyn Fn() -> BoxCursor<'a, T> + 'a>;

enum Source<'a, T> {
    Factory(Factory<'a, T>),
    Captured(BoxCursor<'a, T>),
}

/// A lazy sequence. See the [module documentation](self).
pub struct Iterable<'a, T> {
    source: Source<'a, T>,
}

pub type IntoIter<'a, T> = Pulls<BoxCursor<'a, T>>;

impl<'a, T> Iterable<'a, T> {
    /// Wraps a cursor that has already been boxed.
    pub fn from_boxed(cursor: BoxCursor<'a, T>) -> Self {
        Iterable {
            source: Source::Captured(cursor),
        }
    }

    /// Consumes this iterable and returns the cursor it would be pulled through.
    ///
    /// For a root this builds a fresh cursor from the factory.
    pub fn iterator(self) -> BoxCursor<'a, T> {
        match self.source {
            Source::Factory(factory) => factory(),
            Source::Captured(cursor) => cursor,
        }
    }

    /// Returns `true` if this iterable was built from a factory and can
    /// therefore hand out independent cursors.
    pub fn is_replayable(&self) -> bool {
        matches!(self.source, Source::Factory(_))
    }

    /// Makes an independent copy of a root iterable.
    ///
    /// Pipelines derived through a lazy operation own their parent's cursor
    /// and cannot be copied; for those this returns `None`.
    pub fn try_clone(&self) -> Option<Self> {
        match &self.source {
            Source::Factory(factory) => Some(Iterable {
                source: Source::Factory(Rc::clone(factory)),
            }),
            Source::Captured(_) => {
                log::debug!("refusing to clone an iterable that owns a captured cursor");
                None
            }
        }
    }

    // Terminal operations. All of them consume the iterable.

    /// The number of elements. Drains the source.
    pub fn count(self) -> usize {
        self.into_iter().count()
    }

    /// Returns `true` if there is no element. Pulls nothing.
    pub fn is_empty(self) -> bool {
        !self.iterator().has_elements()
    }

    pub fn contains(self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.contains_by(item, |a, b| a == b)
    }

    /// Like [`Iterable::contains`] with a custom equality, called as
    /// `eq(item, element)`.
    pub fn contains_by<E>(self, item: &T, mut eq: E) -> bool
    where
        E: FnMut(&T, &T) -> bool,
    {
        self.into_iter().any(|elt| eq(item, &elt))
    }

    /// The first element, or `None` if the sequence is empty.
    pub fn first(self) -> Option<T> {
        self.into_iter().next()
    }

    /// The first element satisfying `pred`. Stops pulling as soon as one is found.
    pub fn first_where<P>(self, mut pred: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.into_iter().find(|elt| pred(elt))
    }

    /// The last element, or `None` if the sequence is empty. Drains the source.
    pub fn last(self) -> Option<T> {
        self.into_iter().last()
    }

    /// The last element satisfying `pred`. Drains the source.
    pub fn last_where<P>(self, mut pred: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.into_iter().filter(|elt| pred(elt)).last()
    }

    pub fn for_each<F>(self, f: F)
    where
        F: FnMut(T),
    {
        self.into_iter().for_each(f)
    }

    /// Returns `true` if the sequence is non-empty and every element satisfies
    /// `pred`. Note that, unlike [`Iterator::all`], an empty sequence gives
    /// `false`.
    pub fn all<P>(self, mut pred: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        let cursor = self.iterator();
        let non_empty = cursor.has_elements();
        non_empty && Pulls::new(cursor).all(|elt| pred(&elt))
    }

    pub fn any<P>(self, mut pred: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.into_iter().any(|elt| pred(&elt))
    }

    /// Left fold in iteration order. An empty sequence returns `seed`.
    pub fn aggregate<A, F>(self, seed: A, f: F) -> A
    where
        F: FnMut(A, T) -> A,
    {
        self.into_iter().fold(seed, f)
    }

    /// The greatest element by `PartialOrd`, or `None` if empty.
    pub fn max(self) -> Option<T>
    where
        T: PartialOrd,
    {
        self.max_by(|acc, elt| if elt > acc { elt } else { acc })
    }

    /// Reduces with `pick`, which returns whichever of its two arguments should
    /// be kept. The first element seeds the reduction; `None` if empty.
    pub fn max_by<F>(self, pick: F) -> Option<T>
    where
        F: FnMut(T, T) -> T,
    {
        self.into_iter().reduce(pick)
    }

    /// The least element by `PartialOrd`, or `None` if empty.
    pub fn min(self) -> Option<T>
    where
        T: PartialOrd,
    {
        self.min_by(|acc, elt| if elt < acc { elt } else { acc })
    }

    /// See [`Iterable::max_by`].
    pub fn min_by<F>(self, pick: F) -> Option<T>
    where
        F: FnMut(T, T) -> T,
    {
        self.into_iter().reduce(pick)
    }

    pub fn sum(self) -> T
    where
        T: Sum<T>,
    {
        self.into_iter().sum()
    }

    pub fn sum_by<N, F>(self, f: F) -> N
    where
        N: Sum<N>,
        F: FnMut(T) -> N,
    {
        self.into_iter().map(f).sum()
    }

    pub fn to_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    /// Collects into a [`HashSet`] keyed by the elements themselves.
    pub fn to_set(self) -> HashSet<T>
    where
        T: Hash + Eq + Clone,
    {
        self.to_set_with(Identity)
    }

    /// Collects into a [`HashSet`] keyed by `selector`. Elements whose key is
    /// already present are dropped.
    pub fn to_set_with<H>(self, selector: H) -> HashSet<T, H>
    where
        H: KeySelector<T>,
    {
        let mut set = HashSet::with_selector(selector);
        set.add_range(self);
        set
    }

    /// Groups the elements by `key`. Drains the source.
    ///
    /// Groups appear in the order their key was first seen, and each group
    /// keeps its members in iteration order.
    pub fn group_by<K, F>(self, mut key: F) -> IndexMap<K, Vec<T>>
    where
        K: Hash + Eq,
        F: FnMut(&T) -> K,
    {
        let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
        self.for_each(|elt| groups.entry(key(&elt)).or_default().push(elt));
        log::debug!("group_by drained its source into {} groups", groups.len());
        groups
    }
}

impl<'a, T: 'a> Iterable<'a, T> {
    /// Builds a replayable iterable from a cursor factory.
    pub fn new<C, F>(factory: F) -> Self
    where
        C: Cursor<Item = T> + 'a,
        F: Fn() -> C + 'a,
    {
        let factory: Factory<'a, T> = Rc::new(move || Box::new(factory()) as BoxCursor<'a, T>);
        Iterable {
            source: Source::Factory(factory),
        }
    }

    pub fn from_cursor<C>(cursor: C) -> Self
    where
        C: Cursor<Item = T> + 'a,
    {
        Self::from_boxed(Box::new(cursor))
    }

    /// Wraps a standard iterator. One element is pulled immediately to answer
    /// [`Cursor::has_elements`].
    pub fn of<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self::from_cursor(Pulled::new(items.into_iter()))
    }

    /// An unbounded sequence of `value`.
    pub fn repeat(value: T) -> Self
    where
        T: Clone,
    {
        Iterable::new(move || Repeat {
            value: value.clone(),
        })
    }

    /// An unbounded sequence of `T::default()`.
    pub fn repeat_default() -> Self
    where
        T: Clone + Default,
    {
        Self::repeat(T::default())
    }

    // Lazy operations. Each consumes `self` and captures its cursor.

    /// At most the first `n` elements. Never pulls more than `n` elements from
    /// upstream.
    pub fn take(self, n: usize) -> Self {
        Self::from_cursor(Take {
            upstream: self.iterator(),
            remaining: n,
        })
    }

    /// Elements up to, not including, the first one failing `pred`. That
    /// element is consumed and discarded.
    pub fn take_while<P>(self, mut pred: P) -> Self
    where
        P: FnMut(&T) -> bool + 'a,
    {
        let mut upstream = self.iterator();
        let lookahead = pull_if(&mut upstream, &mut pred);
        Self::from_cursor(TakeWhile {
            upstream,
            pred,
            lookahead,
        })
    }

    /// Discards the first `n` elements right away and passes the rest through.
    pub fn skip(self, n: usize) -> Self {
        let mut upstream = self.iterator();
        for _ in 0..n {
            if !upstream.has_elements() {
                break;
            }
            upstream.next();
        }
        Self::from_boxed(upstream)
    }

    /// Discards the leading run of elements satisfying `pred` right away. The
    /// predicate is not consulted again afterwards.
    pub fn skip_while<P>(self, mut pred: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let mut upstream = self.iterator();
        let mut lookahead = None;
        while upstream.has_elements() {
            match upstream.next() {
                Some(elt) if pred(&elt) => continue,
                elt => {
                    lookahead = elt;
                    break;
                }
            }
        }
        Self::from_cursor(SkipWhile {
            lookahead,
            upstream,
        })
    }

    /// Everything except the last `n` elements.
    ///
    /// The whole source is pulled when this is called, so it must be finite.
    pub fn skip_last(self, n: usize) -> Self {
        let mut items = self.to_vec();
        let keep = items.len().saturating_sub(n);
        log::debug!("skip_last({n}) drained {} elements, keeping {keep}", items.len());
        items.truncate(keep);
        Self::of(items)
    }

    /// Only the elements satisfying `pred`. The first match is located right
    /// away.
    pub fn filter<P>(self, mut pred: P) -> Self
    where
        P: FnMut(&T) -> bool + 'a,
    {
        let mut upstream = self.iterator();
        let lookahead = find_next(&mut upstream, &mut pred);
        Self::from_cursor(Filter {
            upstream,
            pred,
            lookahead,
        })
    }

    /// Applies `f` to every element.
    pub fn map<U, F>(self, f: F) -> Iterable<'a, U>
    where
        U: 'a,
        F: FnMut(T) -> U + 'a,
    {
        Iterable::from_cursor(Map {
            upstream: self.iterator(),
            f,
        })
    }
}

impl<'a, T: Numeric + 'a> Iterable<'a, T> {
    /// `start, start + step, ...`, stopping strictly before `stop` if given.
    ///
    /// The direction comes from the sign of `step`. With `stop == None` the
    /// sequence only ends where the next step would overflow `T`. A zero step
    /// repeats `start` forever.
    pub fn range(start: T, step: T, stop: Option<T>) -> Self {
        Iterable::new(move || RangeCursor::new(start, step, stop))
    }

    /// `0, 1, ..., stop - 1`.
    pub fn range_to(stop: T) -> Self {
        Self::range(T::ZERO, T::ONE, Some(stop))
    }

    /// `start, start + 1, ..., stop - 1`.
    pub fn range_between(start: T, stop: T) -> Self {
        Self::range(start, T::ONE, Some(stop))
    }

    /// `start, start + 1, ...` without end.
    pub fn range_from(start: T) -> Self {
        Self::range(start, T::ONE, None)
    }
}

impl<'a, T> IntoIterator for Iterable<'a, T> {
    type Item = T;
    type IntoIter = IntoIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Pulls::new(self.iterator())
    }
}

impl<'a, T: 'a> From<Vec<T>> for Iterable<'a, T> {
    fn from(items: Vec<T>) -> Self {
        Iterable::of(items)
    }
}

impl<T> std::fmt::Debug for Iterable<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iterable")
            .field("replayable", &self.is_replayable())
            .finish_non_exhaustive()
    }
}

fn find_next<T, P>(upstream: &mut BoxCursor<'_, T>, pred: &mut P) -> Option<T>
where
    P: FnMut(&T) -> bool,
{
    while upstream.has_elements() {
        match upstream.next() {
            Some(elt) if pred(&elt) => return Some(elt),
            Some(_) => continue,
            None => break,
        }
    }
    None
}

fn pull_if<T, P>(upstream: &mut BoxCursor<'_, T>, pred: &mut P) -> Option<T>
where
    P: FnMut(&T) -> bool,
{
    if upstream.has_elements() {
        upstream.next().filter(|elt| pred(elt))
    } else {
        None
    }
}

struct Repeat<T> {
    value: T,
}

impl<T: Clone> Cursor for Repeat<T> {
    type Item = T;

    fn has_elements(&self) -> bool {
        true
    }

    fn next(&mut self) -> Option<T> {
        Some(self.value.clone())
    }
}

struct Take<'a, T> {
    upstream: BoxCursor<'a, T>,
    remaining: usize,
}

impl<T> Cursor for Take<'_, T> {
    type Item = T;

    fn has_elements(&self) -> bool {
        self.remaining > 0 && self.upstream.has_elements()
    }

    fn next(&mut self) -> Option<T> {
        if !self.has_elements() {
            return None;
        }
        self.remaining -= 1;
        self.upstream.next()
    }
}

struct TakeWhile<'a, T, P> {
    upstream: BoxCursor<'a, T>,
    pred: P,
    // `None` once the predicate has failed or upstream ran dry.
    lookahead: Option<T>,
}

impl<T, P> Cursor for TakeWhile<'_, T, P>
where
    P: FnMut(&T) -> bool,
{
    type Item = T;

    fn has_elements(&self) -> bool {
        self.lookahead.is_some()
    }

    fn next(&mut self) -> Option<T> {
        let current = self.lookahead.take()?;
        self.lookahead = pull_if(&mut self.upstream, &mut self.pred);
        Some(current)
    }
}

struct SkipWhile<'a, T> {
    // The first element that failed the predicate, if any.
    lookahead: Option<T>,
    upstream: BoxCursor<'a, T>,
}

impl<T> Cursor for SkipWhile<'_, T> {
    type Item = T;

    fn has_elements(&self) -> bool {
        self.lookahead.is_some() || self.upstream.has_elements()
    }

    fn next(&mut self) -> Option<T> {
        match self.lookahead.take() {
            Some(elt) => Some(elt),
            None if self.upstream.has_elements() => self.upstream.next(),
            None => None,
        }
    }
}

struct Filter<'a, T, P> {
    upstream: BoxCursor<'a, T>,
    pred: P,
    lookahead: Option<T>,
}

impl<T, P> Cursor for Filter<'_, T, P>
where
    P: FnMut(&T) -> bool,
{
    type Item = T;

    fn has_elements(&self) -> bool {
        self.lookahead.is_some()
    }

    fn next(&mut self) -> Option<T> {
        let current = self.lookahead.take()?;
        self.lookahead = find_next(&mut self.upstream, &mut self.pred);
        Some(current)
    }
}

struct Map<'a, T, F> {
    upstream: BoxCursor<'a, T>,
    f: F,
}

impl<T, U, F> Cursor for Map<'_, T, F>
where
    F: FnMut(T) -> U,
{
    type Item = U;

    fn has_elements(&self) -> bool {
        self.upstream.has_elements()
    }

    fn next(&mut self) -> Option<U> {
        self.upstream.next().map(&mut self.f)
    }
}
