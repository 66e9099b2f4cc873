//! Planner configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default number of distinct plans kept by a planner's cache.
pub const DEFAULT_CACHE_ENTRIES: usize = 64;

/// How much work the planner spends choosing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlanEffort {
    /// Portable scalar algorithms, no CPU feature probing.
    Estimate,
    /// Probe the CPU and select SIMD algorithms where available.
    #[default]
    Measure,
}

/// Configuration handed to [`crate::Planner::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FftConfig {
    /// Planning effort.
    pub effort: PlanEffort,
    /// Wisdom file to warm from and save to.
    pub wisdom_path: Option<PathBuf>,
    /// Write the wisdom file when the planner is dropped.
    pub save_on_drop: bool,
    /// Maximum number of cached plans.
    pub cache_entries: usize,
}

impl Default for FftConfig {
    fn default() -> Self {
        Self {
            effort: PlanEffort::default(),
            wisdom_path: None,
            save_on_drop: false,
            cache_entries: DEFAULT_CACHE_ENTRIES,
        }
    }
}

impl FftConfig {
    /// Configuration that warms from and saves to `path`.
    #[must_use]
    pub fn with_wisdom(path: impl Into<PathBuf>) -> Self {
        Self {
            wisdom_path: Some(path.into()),
            save_on_drop: true,
            ..Self::default()
        }
    }

    /// Replace zero-valued fields with defaults.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.cache_entries == 0 {
            self.cache_entries = DEFAULT_CACHE_ENTRIES;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_measures_without_wisdom() {
        let config = FftConfig::default();
        assert_eq!(config.effort, PlanEffort::Measure);
        assert!(config.wisdom_path.is_none());
        assert!(!config.save_on_drop);
        assert_eq!(config.cache_entries, DEFAULT_CACHE_ENTRIES);
    }

    #[test]
    fn with_wisdom_enables_saving() {
        let config = FftConfig::with_wisdom("/tmp/wisdom.json");
        assert!(config.save_on_drop);
        assert_eq!(
            config.wisdom_path.as_deref(),
            Some(std::path::Path::new("/tmp/wisdom.json"))
        );
    }

    #[test]
    fn normalize_restores_cache_size() {
        let config = FftConfig {
            cache_entries: 0,
            ..FftConfig::default()
        }
        .normalize();
        assert_eq!(config.cache_entries, DEFAULT_CACHE_ENTRIES);
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = FftConfig {
            effort: PlanEffort::Estimate,
            wisdom_path: Some(PathBuf::from("w.json")),
            save_on_drop: true,
            cache_entries: 8,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: FftConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
