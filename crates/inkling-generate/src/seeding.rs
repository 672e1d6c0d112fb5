//! Seeding policy for the shared random source.
//!
//! A generation cycle takes exclusive ownership of the source, seeds it for
//! the requested mode, draws, and re-randomizes it on the way out when the
//! seed was deterministic.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Datelike, NaiveDate};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::model::GenerationMode;

/// Seed for a calendar date, read as the number `YYYYMMDD`.
pub fn daily_seed(date: NaiveDate) -> u64 {
    let value = i64::from(date.year()) * 10_000 + i64::from(date.month() * 100 + date.day());
    value as u64
}

/// Process-wide random source shared by every generation request.
#[derive(Debug)]
pub struct RandomSource {
    rng: Mutex<ChaCha8Rng>,
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(entropy_rng()),
        }
    }

    /// Lock the source and seed it for `mode`.
    ///
    /// The returned guard is the random stream for the cycle. Other cycles
    /// block until it is dropped.
    pub fn begin(&self, mode: GenerationMode, today: NaiveDate) -> SeededCycle<'_> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        match mode {
            GenerationMode::Daily => {
                let seed = daily_seed(today);
                debug!(seed, "seeding daily cycle");
                *rng = ChaCha8Rng::seed_from_u64(seed);
            }
            GenerationMode::Random => {
                *rng = entropy_rng();
            }
        }
        SeededCycle { rng, mode }
    }
}

/// Exclusive, seeded access to the shared source for one generation.
#[derive(Debug)]
pub struct SeededCycle<'a> {
    rng: MutexGuard<'a, ChaCha8Rng>,
    mode: GenerationMode,
}

impl RngCore for SeededCycle<'_> {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.rng.fill_bytes(dst)
    }
}

impl Drop for SeededCycle<'_> {
    fn drop(&mut self) {
        if self.mode == GenerationMode::Daily {
            *self.rng = entropy_rng();
        }
    }
}

fn entropy_rng() -> ChaCha8Rng {
    ChaCha8Rng::from_rng(&mut rand::rng())
}
