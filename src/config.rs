//! Configuration Module
//!
//! Limits and reclaim behavior for a bounded cache.

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

// == Defaults ==
/// Default maximum number of entries
pub const DEFAULT_MAX_ITEMS: usize = 125;

/// Bytes in one mebibyte
pub const BYTES_PER_MB: usize = 1024 * 1024;

/// Default maximum aggregate cost (25 MiB)
pub const DEFAULT_MAX_COST_BYTES: usize = 25 * BYTES_PER_MB;

// == Reclaim Strategy ==
/// What a cache does when the host asks it to give memory back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReclaimStrategy {
    /// Evict least recently used entries until both limits hold
    TrimToLimits,
    /// Evict least recently used entries until count and cost are at most half their limits
    Halve,
    /// Drop every entry
    #[default]
    Purge,
}

// == Cache Config ==
/// Cache configuration parameters.
///
/// Any field left out when deserializing falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache holds after an eviction pass
    pub max_items: usize,
    /// Maximum aggregate cost of all entries after an eviction pass
    pub max_cost_bytes: usize,
    /// Response to a reclamation signal
    pub reclaim: ReclaimStrategy,
}

impl CacheConfig {
    /// Creates a config with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the item count limit.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Overrides the cost limit in bytes.
    pub fn with_max_cost_bytes(mut self, max_cost_bytes: usize) -> Self {
        self.max_cost_bytes = max_cost_bytes;
        self
    }

    /// Overrides the cost limit in mebibytes.
    ///
    /// Fails if the limit does not fit in `usize` bytes.
    pub fn with_max_cost_mb(self, capacity_mb: usize) -> Result<Self> {
        let bytes = capacity_mb.checked_mul(BYTES_PER_MB).ok_or_else(|| {
            CacheError::InvalidConfig(format!(
                "max cost of {} MiB overflows the byte counter",
                capacity_mb
            ))
        })?;
        Ok(self.with_max_cost_bytes(bytes))
    }

    /// Overrides the reclaim strategy.
    pub fn with_reclaim(mut self, reclaim: ReclaimStrategy) -> Self {
        self.reclaim = reclaim;
        self
    }

    // == Validate ==
    /// Rejects limits that would evict every entry as soon as it is stored.
    pub fn validate(&self) -> Result<()> {
        if self.max_items == 0 {
            return Err(CacheError::InvalidConfig(
                "max_items must be greater than zero".to_string(),
            ));
        }
        if self.max_cost_bytes == 0 {
            return Err(CacheError::InvalidConfig(
                "max_cost_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            max_cost_bytes: DEFAULT_MAX_COST_BYTES,
            reclaim: ReclaimStrategy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max_items, 125);
        assert_eq!(config.max_cost_bytes, 26_214_400);
        assert_eq!(config.reclaim, ReclaimStrategy::Purge);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builders() {
        let config = CacheConfig::new()
            .with_max_items(10)
            .with_max_cost_mb(2)
            .unwrap()
            .with_reclaim(ReclaimStrategy::Halve);

        assert_eq!(config.max_items, 10);
        assert_eq!(config.max_cost_bytes, 2 * 1024 * 1024);
        assert_eq!(config.reclaim, ReclaimStrategy::Halve);
    }

    #[test]
    fn test_config_rejects_zero_items() {
        let config = CacheConfig::new().with_max_items(0);
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_rejects_zero_cost() {
        let config = CacheConfig::new().with_max_cost_bytes(0);
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_mb_overflow() {
        let result = CacheConfig::new().with_max_cost_mb(usize::MAX);
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: CacheConfig =
            serde_json::from_str(r#"{"max_items": 7, "reclaim": "trim_to_limits"}"#).unwrap();
        assert_eq!(config.max_items, 7);
        assert_eq!(config.max_cost_bytes, DEFAULT_MAX_COST_BYTES);
        assert_eq!(config.reclaim, ReclaimStrategy::TrimToLimits);
    }
}
