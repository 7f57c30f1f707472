//! Leveling policy and random sources.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Threshold on 16 random bits: a node grows one more level with
/// probability `0x3FFF / 0x10000`, about 1/4.
pub const PROBABILITY: u64 = 0x3FFF;

/// Height ceiling of new lists unless changed with [`set_default_max_level`].
pub const DEFAULT_MAX_LEVEL: usize = 32;

static DEFAULT_LEVEL: AtomicUsize = AtomicUsize::new(DEFAULT_MAX_LEVEL);

static GLOBAL_RNG: LazyLock<Mutex<StdRng>> = LazyLock::new(|| Mutex::new(StdRng::from_os_rng()));

/// Current process-wide default max level.
pub fn default_max_level() -> usize {
    DEFAULT_LEVEL.load(Ordering::Relaxed)
}

/// Replaces the process-wide default max level and returns the old one.
///
/// Lists already built keep their ceiling. A zero default is stored as
/// given; constructing a list with it fails with
/// [`Error::InvalidMaxLevel`](crate::Error::InvalidMaxLevel).
pub fn set_default_max_level(level: usize) -> usize {
    DEFAULT_LEVEL.swap(level, Ordering::Relaxed)
}

/// Handle on the process-wide generator every list starts with.
///
/// The generator sits behind a mutex, so each height draw takes a lock.
/// Lists that are never shared can avoid that with
/// [`SkipList::set_rand_source`](crate::SkipList::set_rand_source).
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalRandSource;

impl RngCore for GlobalRandSource {
    fn next_u32(&mut self) -> u32 {
        GLOBAL_RNG.lock().next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        GLOBAL_RNG.lock().next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        GLOBAL_RNG.lock().fill_bytes(dst)
    }
}

/// Reseeds the process-wide generator, making height draws repeatable.
pub fn seed_global_rand(seed: u64) {
    *GLOBAL_RNG.lock() = StdRng::seed_from_u64(seed);
}

/// Non-negative 63-bit draw.
#[inline]
fn int63(rng: &mut dyn RngCore) -> u64 {
    rng.next_u64() >> 1
}

/// Draws a node height in `1..=max_level`.
pub(crate) fn random_level(rng: &mut dyn RngCore, max_level: usize) -> usize {
    let mut level = 1;
    while level < max_level && ((int63(rng) >> 32) & 0xFFFF) < PROBABILITY {
        level += 1;
    }
    level
}
