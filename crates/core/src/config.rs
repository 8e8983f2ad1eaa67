//! Engine configuration
//!
//! Read from environment variables the same way for every host:
//!
//! - `BLOCKTRIS_SEED`: piece generator seed (default: seeded from the clock)
//! - `BLOCKTRIS_AUTOSAVE`: `"0"` or `"false"` turns off autosave (default: on)

use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Piece generator seed; `None` seeds from the system clock
    pub seed: Option<u32>,
    /// Write the saved game after every state change while running
    pub autosave: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            autosave: true,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("BLOCKTRIS_SEED").ok().as_deref(),
            env::var("BLOCKTRIS_AUTOSAVE").ok().as_deref(),
        )
    }

    fn from_vars(seed: Option<&str>, autosave: Option<&str>) -> Self {
        let seed = seed.and_then(|s| s.trim().parse().ok());
        let autosave = autosave
            .map(|v| {
                let v = v.trim().to_lowercase();
                !(v == "0" || v == "false")
            })
            .unwrap_or(true);

        Self { seed, autosave }
    }

    /// Fixed seed, autosave off. Convenient for tests and benchmarks.
    pub fn seeded(seed: u32) -> Self {
        Self {
            seed: Some(seed),
            autosave: false,
        }
    }

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }
}
