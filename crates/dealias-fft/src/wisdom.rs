//! Plan wisdom persistence (load/save).
//!
//! Wisdom records which transform shapes a process planned, so the next run
//! can plan them up front instead of on first use.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::PlanKey;
use crate::config::PlanEffort;
use crate::error::FftError;

/// Current wisdom file format version.
pub const WISDOM_VERSION: u32 = 1;

/// Conventional wisdom file name.
pub const WISDOM_FILENAME: &str = "dealias_wisdom.json";

/// Persisted record of planned shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wisdom {
    /// File format version.
    pub version: u32,
    /// Effort the shapes were planned with.
    pub effort: PlanEffort,
    /// Planned shapes.
    pub plans: Vec<PlanKey>,
}

impl Wisdom {
    /// Wisdom for the current format version.
    #[must_use]
    pub fn new(effort: PlanEffort, plans: Vec<PlanKey>) -> Self {
        Self {
            version: WISDOM_VERSION,
            effort,
            plans,
        }
    }

    /// Check whether this wisdom was written by a compatible version.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.version == WISDOM_VERSION
    }
}

/// Load wisdom from `path`, rejecting incompatible versions.
pub fn load(path: &Path) -> Result<Wisdom, FftError> {
    let content = std::fs::read_to_string(path)?;
    let wisdom: Wisdom = serde_json::from_str(&content)?;
    if !wisdom.is_compatible() {
        return Err(FftError::VersionMismatch {
            found: wisdom.version,
            expected: WISDOM_VERSION,
        });
    }
    Ok(wisdom)
}

/// Save wisdom to `path`, creating missing parent directories.
pub fn save(wisdom: &Wisdom, path: &Path) -> Result<(), FftError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(wisdom)?;
    std::fs::write(path, content)?;
    Ok(())
}
