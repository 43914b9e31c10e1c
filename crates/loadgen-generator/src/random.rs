//! Random placeholder values.
//!
//! Values are drawn from one generator shared by every caller. The generator
//! sits behind a mutex and every value is produced under a single lock
//! acquisition, so concurrent callers never observe a torn or repeated draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Alphabet used for random strings.
pub const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Exclusive upper bound of [`RandomValueProvider::random_int`].
pub const RANDOM_INT_BOUND: i64 = 1_000_000;

/// Source of random values used to fill query placeholders.
///
/// Implementations must be callable from many threads at once.
pub trait RandomValueProvider: Send + Sync {
    /// A string of `length` characters drawn uniformly from [`CHARSET`].
    fn random_string(&self, length: usize) -> String;

    /// An integer uniform in `[0, 1_000_000)`.
    fn random_int(&self) -> i64;

    /// A float uniform in `[0, 1)`.
    fn random_float(&self) -> f64;
}

/// Thread-safe random source backed by a mutex-protected [`StdRng`].
#[derive(Debug)]
pub struct SharedRng {
    rng: Mutex<StdRng>,
}

impl SharedRng {
    /// Create a source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Create a reproducible source from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StdRng> {
        // A panic while holding the lock cannot leave the RNG in an invalid state.
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomValueProvider for SharedRng {
    fn random_string(&self, length: usize) -> String {
        let mut rng = self.lock();
        (0..length)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect()
    }

    fn random_int(&self) -> i64 {
        self.lock().random_range(0..RANDOM_INT_BOUND)
    }

    fn random_float(&self) -> f64 {
        self.lock().random::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_random_string_length_and_charset() {
        let rng = SharedRng::seeded(42);
        for length in [0, 1, 10, 64] {
            let s = rng.random_string(length);
            assert_eq!(s.len(), length);
            assert!(s.bytes().all(|b| CHARSET.contains(&b)));
        }
    }

    #[test]
    fn test_random_int_range() {
        let rng = SharedRng::seeded(42);
        for _ in 0..10_000 {
            let value = rng.random_int();
            assert!((0..RANDOM_INT_BOUND).contains(&value));
        }
    }

    #[test]
    fn test_random_float_range() {
        let rng = SharedRng::seeded(42);
        for _ in 0..10_000 {
            let value = rng.random_float();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SharedRng::seeded(7);
        let b = SharedRng::seeded(7);
        assert_eq!(a.random_string(10), b.random_string(10));
        assert_eq!(a.random_int(), b.random_int());
        assert_eq!(a.random_float(), b.random_float());
    }

    #[test]
    fn test_concurrent_callers_get_distinct_strings() {
        let rng = Arc::new(SharedRng::from_entropy());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let rng = Arc::clone(&rng);
                thread::spawn(move || {
                    (0..500)
                        .map(|_| rng.random_string(16))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for s in handle.join().unwrap() {
                assert_eq!(s.len(), 16);
                assert!(seen.insert(s), "duplicate random string across threads");
            }
        }
        assert_eq!(seen.len(), 4000);
    }
}
