//! Engine configuration from environment variables.
//!
//! - `STACKFALL_SEED`: piece generator seed (default: derived from the clock)
//! - `STACKFALL_QUEUE_CAPACITY`: command queue depth (default: 64)

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use log::warn;

pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub seed: u32,
    pub queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create from an arbitrary variable lookup. Invalid values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = parse_var(&lookup, "STACKFALL_SEED").unwrap_or_else(clock_seed);
        let queue_capacity = parse_var(&lookup, "STACKFALL_QUEUE_CAPACITY")
            .filter(|&capacity: &usize| capacity > 0)
            .unwrap_or(DEFAULT_QUEUE_CAPACITY);

        Self {
            seed,
            queue_capacity,
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("[Config] ignoring invalid {}={:?}", name, raw);
            None
        }
    }
}

/// Seed derived from the wall clock, never zero.
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn reads_seed_and_capacity() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("STACKFALL_SEED", "42"),
            ("STACKFALL_QUEUE_CAPACITY", " 8 "),
        ]));
        assert_eq!(config.seed, 42);
        assert_eq!(config.queue_capacity, 8);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("STACKFALL_SEED", "not-a-number"),
            ("STACKFALL_QUEUE_CAPACITY", "0"),
        ]));
        assert!(config.seed > 0);
        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    }

    #[test]
    fn missing_values_use_defaults() {
        let config = EngineConfig::from_lookup(|_| None);
        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    }
}
