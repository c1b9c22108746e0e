//! Deterministic PRNG for reservoir weight initialization.
//!
//! Splitmix64-based: tiny, fast, and reproducible from a single `u64`
//! seed. Weight initialization never touches a process-wide random
//! source, so reservoirs are fully reproducible given their config.

/// Deterministic PRNG based on splitmix64.
///
/// # Example
///
/// ```
/// use echo_core::SeedRng;
///
/// let mut rng = SeedRng::new(42);
/// let val = rng.next_f64();
/// assert!((0.0..1.0).contains(&val));
/// ```
#[derive(Debug, Clone)]
pub struct SeedRng(u64);

impl SeedRng {
    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the next pseudo-random u64.
    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    /// Returns a uniform f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniform f64 in [lo, hi).
    pub fn next_in(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}
