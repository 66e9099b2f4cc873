//! Shared transform planner.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rustfft::{Fft, FftPlanner, FftPlannerScalar};

use crate::cache::{PlanCache, PlanKey};
use crate::config::{FftConfig, PlanEffort};
use crate::error::FftError;
use crate::plan::{ComplexPlan, Direction, RealPlan, StridedPlan};
use crate::wisdom::{self, Wisdom};

enum Backend {
    Simd(FftPlanner<f64>),
    Scalar(FftPlannerScalar<f64>),
}

impl Backend {
    fn new(effort: PlanEffort) -> Self {
        match effort {
            PlanEffort::Estimate => Self::Scalar(FftPlannerScalar::new()),
            PlanEffort::Measure => Self::Simd(FftPlanner::new()),
        }
    }

    fn plan(&mut self, key: PlanKey) -> Arc<dyn Fft<f64>> {
        let direction = key.direction.to_rustfft();
        match self {
            Self::Simd(planner) => planner.plan_fft(key.len, direction),
            Self::Scalar(planner) => planner.plan_fft(key.len, direction),
        }
    }
}

/// Creates transform plans, one shared transform per distinct shape.
///
/// A planner is an explicit object: engines that should share plans are
/// built from the same planner. Planning is serialised by an internal lock;
/// the returned plans are independent and may be used concurrently.
pub struct Planner {
    backend: Mutex<Backend>,
    cache: PlanCache,
    seen: Mutex<BTreeSet<PlanKey>>,
    config: FftConfig,
}

impl Planner {
    /// Build a planner, warming it from the configured wisdom file if any.
    #[must_use]
    pub fn new(config: FftConfig) -> Self {
        let config = config.normalize();
        let planner = Self {
            backend: Mutex::new(Backend::new(config.effort)),
            cache: PlanCache::new(config.cache_entries),
            seen: Mutex::new(BTreeSet::new()),
            config,
        };
        if let Some(path) = planner.config.wisdom_path.clone() {
            planner.warm_from(&path);
        }
        planner
    }

    /// Configuration this planner was built with.
    #[must_use]
    pub fn config(&self) -> &FftConfig {
        &self.config
    }

    /// Underlying plan cache.
    #[must_use]
    pub fn cache(&self) -> &PlanCache {
        &self.cache
    }

    /// Shared transform for `key`, planned on first request.
    fn transform(&self, key: PlanKey) -> Arc<dyn Fft<f64>> {
        if let Some(fft) = self.cache.get(&key) {
            return fft;
        }
        let fft = self.backend.lock().plan(key);
        tracing::debug!(len = key.len, direction = ?key.direction, "planned transform");
        self.cache.put(key, Arc::clone(&fft));
        self.seen.lock().insert(key);
        fft
    }

    /// Complex transform of `len` points.
    pub fn complex(&self, len: usize, direction: Direction) -> ComplexPlan {
        let fft = self.transform(PlanKey::new(len, direction));
        ComplexPlan::new(fft, len, direction)
    }

    /// Complex transform of `len` rows applied to `columns` interleaved
    /// columns with row `stride`.
    pub fn strided(
        &self,
        len: usize,
        columns: usize,
        stride: usize,
        direction: Direction,
    ) -> StridedPlan {
        StridedPlan::new(self.complex(len, direction), columns, stride)
    }

    /// Real transforms of real length `n`.
    pub fn real(&self, n: usize) -> RealPlan {
        let len = RealPlan::complex_len(n);
        let forward = self.transform(PlanKey::new(len, Direction::Forward));
        let backward = self.transform(PlanKey::new(len, Direction::Backward));
        RealPlan::new(n, forward, backward)
    }

    /// Every shape planned so far, sorted.
    #[must_use]
    pub fn known_plans(&self) -> Vec<PlanKey> {
        self.seen.lock().iter().copied().collect()
    }

    /// Pre-plan every shape listed in the wisdom file at `path`.
    ///
    /// Returns the number of shapes planned. Unreadable, malformed or
    /// incompatible files are logged and ignored.
    pub fn warm_from(&self, path: &Path) -> usize {
        if !path.exists() {
            return 0;
        }
        let wisdom = match wisdom::load(path) {
            Ok(wisdom) => wisdom,
            Err(err) => {
                tracing::info!(path = %path.display(), error = %err, "ignoring wisdom file");
                return 0;
            }
        };
        if wisdom.effort != self.config.effort {
            tracing::info!(
                path = %path.display(),
                "wisdom planned with a different effort, ignoring"
            );
            return 0;
        }
        for key in &wisdom.plans {
            self.transform(*key);
        }
        tracing::info!(plans = wisdom.plans.len(), path = %path.display(), "loaded wisdom");
        wisdom.plans.len()
    }

    /// Save the planned shapes to the configured wisdom file, if any.
    pub fn save_wisdom(&self) -> Result<(), FftError> {
        match &self.config.wisdom_path {
            Some(path) => self.save_wisdom_to(path),
            None => Ok(()),
        }
    }

    /// Save the planned shapes to `path`.
    pub fn save_wisdom_to(&self, path: &Path) -> Result<(), FftError> {
        let wisdom = Wisdom::new(self.config.effort, self.known_plans());
        wisdom::save(&wisdom, path)?;
        tracing::info!(plans = wisdom.plans.len(), path = %path.display(), "saved wisdom");
        Ok(())
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(FftConfig::default())
    }
}

impl Drop for Planner {
    fn drop(&mut self) {
        if self.config.save_on_drop {
            if let Err(err) = self.save_wisdom() {
                tracing::warn!(error = %err, "failed to save wisdom");
            }
        }
    }
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("config", &self.config)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}
