//! Key ordering policies.
//!
//! A policy decides where a key sits relative to another. The list never
//! looks at keys any other way, apart from the score pre-filter in
//! [`score`](crate::score).

use std::cmp::Ordering;

/// Direction of the list's effective order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Ascending,
    Descending,
}

impl Orientation {
    #[inline]
    pub fn is_descending(self) -> bool {
        self == Orientation::Descending
    }

    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Orientation::Ascending => Orientation::Descending,
            Orientation::Descending => Orientation::Ascending,
        }
    }
}

/// A strict total order over keys of type `K`.
///
/// `compare(lhs, rhs)` returns `true` when `lhs` is placed after `rhs` in
/// the list. It must be antisymmetric, and equal keys must compare `false`
/// in both directions: that is how the list recognizes an existing key.
pub trait KeyOrder<K: ?Sized> {
    fn orientation(&self) -> Orientation;

    fn compare(&self, lhs: &K, rhs: &K) -> bool;

    /// Three-way comparison in list order.
    fn ordering(&self, lhs: &K, rhs: &K) -> Ordering {
        if self.compare(lhs, rhs) {
            Ordering::Greater
        } else if self.compare(rhs, lhs) {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

impl<K: ?Sized, O: KeyOrder<K> + ?Sized> KeyOrder<K> for &O {
    #[inline]
    fn orientation(&self) -> Orientation {
        (**self).orientation()
    }

    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> bool {
        (**self).compare(lhs, rhs)
    }
}

impl<K: ?Sized, O: KeyOrder<K> + ?Sized> KeyOrder<K> for Box<O> {
    #[inline]
    fn orientation(&self) -> Orientation {
        (**self).orientation()
    }

    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> bool {
        (**self).compare(lhs, rhs)
    }
}

/// Ascending order for any `PartialOrd` key: integers of every width,
/// floats, `char`, `str`/`String` and byte sequences.
///
/// Float keys must not be NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ascending;

/// Descending counterpart of [`Ascending`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Descending;

impl<K: PartialOrd + ?Sized> KeyOrder<K> for Ascending {
    #[inline]
    fn orientation(&self) -> Orientation {
        Orientation::Ascending
    }

    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> bool {
        lhs > rhs
    }
}

impl<K: PartialOrd + ?Sized> KeyOrder<K> for Descending {
    #[inline]
    fn orientation(&self) -> Orientation {
        Orientation::Descending
    }

    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> bool {
        lhs < rhs
    }
}

/// Ascending policy built from a "greater than" predicate.
#[derive(Clone, Copy)]
pub struct GreaterThan<F>(pub F);

/// Descending policy built from a "less than" predicate.
#[derive(Clone, Copy)]
pub struct LessThan<F>(pub F);

impl<K: ?Sized, F: Fn(&K, &K) -> bool> KeyOrder<K> for GreaterThan<F> {
    #[inline]
    fn orientation(&self) -> Orientation {
        Orientation::Ascending
    }

    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> bool {
        (self.0)(lhs, rhs)
    }
}

impl<K: ?Sized, F: Fn(&K, &K) -> bool> KeyOrder<K> for LessThan<F> {
    #[inline]
    fn orientation(&self) -> Orientation {
        Orientation::Descending
    }

    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> bool {
        (self.0)(lhs, rhs)
    }
}

/// Flips the orientation of another policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<O>(pub O);

impl<K: ?Sized, O: KeyOrder<K>> KeyOrder<K> for Reversed<O> {
    #[inline]
    fn orientation(&self) -> Orientation {
        self.0.orientation().reverse()
    }

    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> bool {
        self.0.compare(rhs, lhs)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn three_way_compare() {
        assert_eq!(Ascending.ordering(&0, &0), Ordering::Equal);
        assert_eq!(Ascending.ordering(&2, &0), Ordering::Greater);
        assert_eq!(Ascending.ordering(&-1, &1), Ordering::Less);
        assert_eq!(Ascending.ordering(&9u8, &2u8), Ordering::Greater);
        assert_eq!(Ascending.ordering(&1.2f32, &1.20001f32), Ordering::Less);
        assert_eq!(Ascending.ordering("foo", "bar"), Ordering::Greater);
        assert_eq!(Ascending.ordering("001", "101"), Ordering::Less);
        assert_eq!(Ascending.ordering("equals", "equals"), Ordering::Equal);
        assert_eq!(
            Ascending.ordering(&b"abcdefghijk"[..], &b"abcdefghij"[..]),
            Ordering::Greater
        );
    }

    #[test]
    fn descending_flips_order() {
        assert_eq!(Descending.ordering(&2, &0), Ordering::Less);
        assert_eq!(KeyOrder::<i32>::orientation(&Descending), Orientation::Descending);
    }

    #[test]
    fn predicates() {
        let greater = GreaterThan(|lhs: &i64, rhs: &i64| lhs > rhs);
        assert_eq!(greater.orientation(), Orientation::Ascending);
        assert!(greater.compare(&3, &1));
        assert!(!greater.compare(&1, &1));

        let less = LessThan(|lhs: &i64, rhs: &i64| lhs < rhs);
        assert_eq!(less.orientation(), Orientation::Descending);
        assert!(less.compare(&1, &3));
    }

    #[test]
    fn reversed_policy() {
        let reversed = Reversed(Ascending);
        assert_eq!(KeyOrder::<u32>::orientation(&reversed), Orientation::Descending);
        assert!(reversed.compare(&1u32, &5u32));
        assert!(!reversed.compare(&5u32, &5u32));

        let twice = Reversed(Reversed(Ascending));
        assert_eq!(KeyOrder::<u32>::orientation(&twice), Orientation::Ascending);
        assert!(twice.compare(&5u32, &1u32));
    }
}
