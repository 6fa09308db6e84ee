use alloc::format;
use alloc::string::{String, ToString};
use core::time::Duration;

use crate::*;

/// Shown when a difficulty has no recorded best time.
pub const NO_SCORE: &str = "no score yet";

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Elapsed seconds rounded up to the next multiple of the difficulty level.
pub fn normalized_score(elapsed: Duration, difficulty: Difficulty) -> u32 {
    let level = u128::from(difficulty.level());
    let step = level * NANOS_PER_SEC;
    let score = elapsed.as_nanos().div_ceil(step) * level;
    score.try_into().unwrap_or(u32::MAX)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Candidate was strictly better, or nothing was stored yet.
    Recorded { previous: Option<u32> },
    Kept { best: u32 },
}

impl SaveOutcome {
    pub const fn is_new_best(self) -> bool {
        matches!(self, Self::Recorded { .. })
    }
}

/// Best completion time per difficulty, on top of a host key-value store.
///
/// Values are stored as `<label>:<seconds>` under `best-<label>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreStore<S> {
    store: S,
}

impl<S: KeyValueStore> ScoreStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn key(difficulty: Difficulty) -> String {
        format!("best-{}", difficulty.label())
    }

    fn format_value(score: u32, difficulty: Difficulty) -> String {
        format!("{}:{}", difficulty.label(), score)
    }

    fn parse_value(value: &str, difficulty: Difficulty) -> Option<u32> {
        let (label, score) = value.trim().split_once(':')?;
        if label != difficulty.label() {
            return None;
        }
        score.parse().ok()
    }

    /// Stored best for the difficulty, unreadable values count as absent.
    pub fn best(&self, difficulty: Difficulty) -> Option<u32> {
        let key = Self::key(difficulty);
        let value = self.store.get(&key)?;
        let best = Self::parse_value(&value, difficulty);
        if best.is_none() {
            log::warn!("Ignoring corrupt score {:?} stored under {}", value, key);
        }
        best
    }

    /// Records `candidate` only when it beats the stored best.
    pub fn save(
        &mut self,
        candidate: u32,
        difficulty: Difficulty,
    ) -> core::result::Result<SaveOutcome, StoreError> {
        let previous = self.best(difficulty);
        match previous {
            Some(best) if candidate >= best => Ok(SaveOutcome::Kept { best }),
            _ => {
                self.store.set(
                    &Self::key(difficulty),
                    Self::format_value(candidate, difficulty),
                )?;
                log::debug!("New best for {}: {} (was {:?})", difficulty, candidate, previous);
                Ok(SaveOutcome::Recorded { previous })
            }
        }
    }

    pub fn display_best(&self, difficulty: Difficulty) -> String {
        self.best(difficulty)
            .map(|best| best.to_string())
            .unwrap_or_else(|| NO_SCORE.into())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
