use configuration::AnalysisSettings;
use core_types::AssetReturns;
use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identifies one analysis over one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub operation: &'static str,
    pub input_hash: u64,
}

impl CacheKey {
    /// Hashes the panel (asset names and the exact bits of every value)
    /// together with every analysis parameter.
    pub fn new(
        operation: &'static str,
        returns: &AssetReturns,
        settings: &AnalysisSettings,
    ) -> Self {
        let mut hasher = DefaultHasher::new();
        for (asset, series) in returns {
            asset.hash(&mut hasher);
            series.len().hash(&mut hasher);
            for v in series {
                v.to_bits().hash(&mut hasher);
            }
        }
        for value in [
            settings.confidence_level,
            settings.tolerance,
            settings.significance,
            settings.risk_aversion,
            settings.tau,
        ] {
            value.to_bits().hash(&mut hasher);
        }
        (
            settings.lookback_days,
            settings.max_lags,
            settings.lag_order,
            settings.max_iterations,
            settings.simulations,
            settings.seed,
        )
            .hash(&mut hasher);
        Self {
            operation,
            input_hash: hasher.finish(),
        }
    }

    /// Mixes an extra parameter into the key.
    pub fn with<T: Hash>(mut self, extra: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        self.input_hash.hash(&mut hasher);
        extra.hash(&mut hasher);
        self.input_hash = hasher.finish();
        self
    }
}

/// Memoized analysis results, owned by whoever drives the engine.
#[derive(Default)]
pub struct ResultCache {
    entries: HashMap<CacheKey, Arc<dyn Any + Send + Sync>>,
    hits: usize,
    misses: usize,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, or computes, stores and returns it.
    /// Errors are not cached.
    pub fn get_or_try_insert_with<T, E, F>(&mut self, key: CacheKey, compute: F) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.entries.get(&key).and_then(|v| v.downcast_ref::<T>()) {
            self.hits += 1;
            tracing::trace!(operation = key.operation, "cache hit");
            return Ok(value.clone());
        }
        self.misses += 1;
        let value = compute()?;
        self.entries.insert(key, Arc::new(value.clone()));
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("entries", &self.entries.len())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}
