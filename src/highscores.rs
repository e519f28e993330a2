//! Persistent experience record
//!
//! The best total experience ever reached, read once at startup and written
//! back every frame.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Best total experience across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u32,
    /// Set while the store is rejecting writes, to log the failure once
    #[serde(skip)]
    save_failing: bool,
}

impl HighScore {
    /// Store key
    pub const STORAGE_KEY: &'static str = "HighScore";

    pub fn new(best: u32) -> Self {
        Self {
            best,
            save_failing: false,
        }
    }

    /// Raise the record to `total` if it is higher. Returns true on a new record.
    pub fn observe(&mut self, total: u32) -> bool {
        if total > self.best {
            self.best = total;
            true
        } else {
            false
        }
    }

    /// Read the record from `store`. Any failure counts as no record.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(value)) => {
                let best = u32::try_from(value.max(0)).unwrap_or(u32::MAX);
                log::info!("Loaded high score {}", best);
                Self::new(best)
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("High score unavailable: {}", e);
                Self::default()
            }
        }
    }

    /// Write the record to `store`. Failures are logged and dropped.
    pub fn save<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) {
        match store.set(Self::STORAGE_KEY, i64::from(self.best)) {
            Ok(()) => self.save_failing = false,
            Err(e) => {
                if !self.save_failing {
                    log::warn!("Failed to save high score: {}", e);
                }
                self.save_failing = true;
            }
        }
    }
}
