//! Simulation context implementing MatrixContext with a virtual clock.

use async_trait::async_trait;
use neon_env::MatrixContext;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Simulation context backed by a virtual clock and a seed.
///
/// - `sleep` advances the virtual clock and returns immediately
/// - `system_time` is a fixed epoch plus virtual time
/// - `rng` hands out ChaCha8 generators derived from the seed
pub struct SimContext {
    /// Master seed for this run
    seed: u64,

    /// Current virtual time (nanoseconds since simulation start)
    virtual_time_ns: AtomicU64,

    /// Virtual time 0 maps to this wall-clock time
    epoch: SystemTime,
}

impl SimContext {
    /// Creates a new SimContext with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            virtual_time_ns: AtomicU64::new(0),
            epoch: UNIX_EPOCH + Duration::from_secs(1704067200), // 2024-01-01 00:00:00 UTC
        }
    }

    /// Advances virtual time by the given duration.
    pub fn advance_time(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.virtual_time_ns.fetch_add(nanos, Ordering::Relaxed);
    }

    /// Returns the current virtual time in nanoseconds.
    pub fn time_ns(&self) -> u64 {
        self.virtual_time_ns.load(Ordering::Relaxed)
    }

    /// Returns a generator seeded from the master seed and `stream`.
    ///
    /// Same seed and stream give the same sequence.
    pub fn rng(&self, stream: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed.wrapping_mul(0x9e3779b97f4a7c15) ^ stream)
    }
}

#[async_trait]
impl MatrixContext for SimContext {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.time_ns())
    }

    fn system_time(&self) -> SystemTime {
        self.epoch + self.now()
    }

    async fn sleep(&self, duration: Duration) {
        // No real waiting; the clock jumps forward
        self.advance_time(duration);
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}
