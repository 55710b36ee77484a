//! Runtime configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `CANDY_SEED` | clock-derived | RNG seed |
//! | `CANDY_LEVEL` | 1 | starting built-in level |
//! | `CANDY_PACING` | `paced` | `paced` or `instant` cascades |
//! | `CANDY_LOG_PATH` | unset | log file; logging is off without it |

use std::time::{SystemTime, UNIX_EPOCH};

use crate::engine::Pacing;
use crate::types::LevelConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    pub level: u32,
    pub pacing: Pacing,
    pub log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            level: 1,
            pacing: Pacing::Paced,
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("CANDY_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let level = lookup("CANDY_LEVEL")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(1)
            .clamp(1, LevelConfig::builtin_count());

        let pacing = lookup("CANDY_PACING")
            .and_then(|s| Pacing::parse(&s))
            .unwrap_or_default();

        let log_path = lookup("CANDY_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            seed,
            level,
            pacing,
            log_path,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
