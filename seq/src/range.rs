use crate::cursor::Cursor;

/// Numbers that can be used as range bounds and steps.
///
/// Implemented for every primitive integer and float type.
pub trait Numeric: Copy + PartialOrd {
    const ZERO: Self;
    const ONE: Self;

    /// `self + step`, or `None` if the result doesn't fit in `Self`.
    fn checked_step(self, step: Self) -> Option<Self>;
}

macro_rules! impl_numeric_for_int {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                const ZERO: Self = 0;
                const ONE: Self = 1;

                fn checked_step(self, step: Self) -> Option<Self> {
                    self.checked_add(step)
                }
            }
        )*
    };
}

macro_rules! impl_numeric_for_float {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;

                fn checked_step(self, step: Self) -> Option<Self> {
                    Some(self + step)
                }
            }
        )*
    };
}

impl_numeric_for_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_numeric_for_float!(f32, f64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Ascending,
    Descending,
    // A zero step never reaches any bound.
    Stalled,
}

impl Direction {
    pub(crate) fn of<T: Numeric>(step: T) -> Self {
        if step > T::ZERO {
            Direction::Ascending
        } else if step < T::ZERO {
            Direction::Descending
        } else {
            Direction::Stalled
        }
    }
}

/// Counts `start, start + step, ...`, stopping strictly before `stop` if there
/// is one.
///
/// The count also ends at the last value before stepping would leave the
/// range of `T`, so an unbounded integer range stops at `T::MAX` (or
/// `T::MIN` going down).
#[derive(Clone, Debug)]
pub struct RangeCursor<T> {
    // `None` once the next step would overflow.
    next: Option<T>,
    step: T,
    stop: Option<T>,
    direction: Direction,
}

impl<T: Numeric> RangeCursor<T> {
    pub fn new(start: T, step: T, stop: Option<T>) -> Self {
        RangeCursor {
            next: Some(start),
            step,
            stop,
            direction: Direction::of(step),
        }
    }
}

impl<T: Numeric> Cursor for RangeCursor<T> {
    type Item = T;

    fn has_elements(&self) -> bool {
        let Some(next) = self.next else {
            return false;
        };
        match (self.stop, self.direction) {
            (None, _) | (_, Direction::Stalled) => true,
            (Some(stop), Direction::Ascending) => next < stop,
            (Some(stop), Direction::Descending) => next > stop,
        }
    }

    fn next(&mut self) -> Option<T> {
        if !self.has_elements() {
            return None;
        }
        let current = self.next?;
        self.next = current.checked_step(self.step);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Pulls;

    #[test]
    fn bounded() {
        let up: Vec<i32> = Pulls::new(RangeCursor::new(0, 3, Some(10))).collect();
        assert_eq!(up, vec![0, 3, 6, 9]);

        let down: Vec<i32> = Pulls::new(RangeCursor::new(5, -2, Some(0))).collect();
        assert_eq!(down, vec![5, 3, 1]);
    }

    #[test]
    fn bound_already_passed() {
        assert!(!RangeCursor::new(4, 1, Some(4)).has_elements());
        assert!(!RangeCursor::new(4, -1, Some(9)).has_elements());
    }

    #[test]
    fn stalled_never_ends() {
        let mut cursor = RangeCursor::new(2.5, 0.0, Some(1.0));
        for _ in 0..100 {
            assert!(cursor.has_elements());
            assert_eq!(cursor.next(), Some(2.5));
        }
    }

    #[test]
    fn stops_before_overflowing() {
        let top: Vec<u8> = Pulls::new(RangeCursor::new(250, 10, Some(255))).collect();
        assert_eq!(top, vec![250]);

        let bottom: Vec<i8> = Pulls::new(RangeCursor::new(-120, -5, Some(-128))).collect();
        assert_eq!(bottom, vec![-120, -125]);

        let unbounded: Vec<u8> = Pulls::new(RangeCursor::new(253, 1, None)).collect();
        assert_eq!(unbounded, vec![253, 254, 255]);
        let down: Vec<i16> = Pulls::new(RangeCursor::new(i16::MIN + 1, -1, None)).collect();
        assert_eq!(down, vec![i16::MIN + 1, i16::MIN]);
    }

    #[test]
    fn direction() {
        assert_eq!(Direction::of(3u32), Direction::Ascending);
        assert_eq!(Direction::of(-0.5f64), Direction::Descending);
        assert_eq!(Direction::of(0i64), Direction::Stalled);
        assert_eq!(Direction::of(-1i8), Direction::Descending);
    }
}
