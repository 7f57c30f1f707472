//! Score pre-filter.
//!
//! Every key is reduced to an `f64` before a search. Scores decide most
//! comparisons on their own; the ordering policy only breaks ties.

use crate::order::Orientation;

/// Cheap numeric projection of a key.
///
/// For any two keys where the list's ordering policy places `k1` after
/// `k2`, `k1.score() >= k2.score()` must hold. A key type without a useful
/// projection can rely on the default, which scores every key `0.0` and
/// leaves all ordering to the policy.
///
/// The built-in scores assume the natural order of the type. A policy that
/// orders a built-in key some other way needs the key wrapped in a type
/// with a matching score.
pub trait Scorable {
    #[inline]
    fn score(&self) -> f64 {
        0.0
    }
}

macro_rules! numeric_score {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scorable for $t {
                #[inline]
                fn score(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

numeric_score!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Scorable for char {
    #[inline]
    fn score(&self) -> f64 {
        u32::from(*self) as f64
    }
}

impl Scorable for [u8] {
    #[inline]
    fn score(&self) -> f64 {
        bytes_score(self)
    }
}

impl<const N: usize> Scorable for [u8; N] {
    #[inline]
    fn score(&self) -> f64 {
        bytes_score(self)
    }
}

impl Scorable for Vec<u8> {
    #[inline]
    fn score(&self) -> f64 {
        bytes_score(self)
    }
}

impl Scorable for str {
    #[inline]
    fn score(&self) -> f64 {
        bytes_score(self.as_bytes())
    }
}

impl Scorable for String {
    #[inline]
    fn score(&self) -> f64 {
        bytes_score(self.as_bytes())
    }
}

impl<T: Scorable + ?Sized> Scorable for &T {
    #[inline]
    fn score(&self) -> f64 {
        (**self).score()
    }
}

impl<T: Scorable + ?Sized> Scorable for Box<T> {
    #[inline]
    fn score(&self) -> f64 {
        (**self).score()
    }
}

/// Packs up to the first 8 bytes big-endian. Longer inputs sharing a
/// prefix collide and are told apart by the ordering policy.
pub fn bytes_score(data: &[u8]) -> f64 {
    let mut buf = [0u8; 8];
    let len = data.len().min(8);
    buf[..len].copy_from_slice(&data[..len]);
    u64::from_be_bytes(buf) as f64
}

/// Score of `key` as an ascending list sees it.
#[inline]
pub fn calc_score<K: Scorable + ?Sized>(key: &K) -> f64 {
    key.score()
}

/// Descending lists negate every score so the search stays ascending.
#[inline]
pub(crate) fn oriented_score<K: Scorable + ?Sized>(key: &K, orientation: Orientation) -> f64 {
    let score = key.score();
    if orientation.is_descending() {
        -score
    } else {
        score
    }
}
