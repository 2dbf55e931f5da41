use crate::types::parameter::Parameter;
use log::{debug, info};
use polars::prelude::DataFrame;
use std::collections::{hash_map::Entry, HashMap, VecDeque};
use tokio::sync::Mutex;

/// Arguments a derived display frame depends on. Equal keys always describe the same frame
/// for a given set of loaded data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameKey {
    AreaChart {
        stations: Vec<String>,
        period_days: u32,
    },
    StationMap {
        parameter: Option<Parameter>,
        period_days: u32,
    },
}

/// Frames kept by [`FrameCache::new`].
pub const DEFAULT_FRAME_CACHE_CAPACITY: usize = 64;

#[derive(Default)]
struct CachedFrames {
    frames: HashMap<FrameKey, DataFrame>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<FrameKey>,
}

/// Memoises frames built by pure functions, keyed by the arguments they were built from.
///
/// Holds at most `capacity` frames; inserting beyond that evicts the oldest entry.
pub struct FrameCache {
    cached: Mutex<CachedFrames>,
    capacity: usize,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FRAME_CACHE_CAPACITY)
    }

    /// A cache holding at most `capacity` frames (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cached: Mutex::new(CachedFrames::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the frame cached under `key`, building and storing it with `build` on a miss.
    pub async fn get_or_try_insert_with<F, E>(&self, key: FrameKey, build: F) -> Result<DataFrame, E>
    where
        F: FnOnce() -> Result<DataFrame, E>,
    {
        {
            let cached = self.cached.lock().await;
            if let Some(cached) = cached.frames.get(&key) {
                debug!("Frame cache hit for {:?}", key);
                return Ok(cached.clone());
            }
        }

        // Built outside the lock
        info!("Frame cache miss for {:?}", key);
        let built = build()?;

        let mut cached = self.cached.lock().await;
        if let Some(existing) = cached.frames.get(&key) {
            return Ok(existing.clone());
        }
        while cached.frames.len() >= self.capacity {
            let Some(oldest) = cached.order.pop_front() else {
                break;
            };
            debug!("Evicting cached frame {:?}", oldest);
            cached.frames.remove(&oldest);
        }
        cached.order.push_back(key.clone());
        match cached.frames.entry(key) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                entry.insert(built.clone());
                Ok(built)
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.cached.lock().await.frames.len()
    }

    pub async fn clear(&self) {
        let mut cached = self.cached.lock().await;
        cached.frames.clear();
        cached.order.clear();
    }
}

impl Default for FrameCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use std::cell::Cell;

    fn key(days: u32) -> FrameKey {
        FrameKey::AreaChart {
            stations: vec!["Airolo".to_string()],
            period_days: days,
        }
    }

    #[tokio::test]
    async fn test_builds_once_per_key() -> Result<(), PolarsError> {
        let cache = FrameCache::new();
        let builds = Cell::new(0);
        let build = || {
            builds.set(builds.get() + 1);
            df!("value" => [1.0f64])
        };

        let first = cache.get_or_try_insert_with(key(7), build).await?;
        let second = cache.get_or_try_insert_with(key(7), build).await?;
        cache.get_or_try_insert_with(key(14), build).await?;

        assert_eq!(builds.get(), 2);
        assert!(first.equals(&second));
        assert_eq!(cache.len().await, 2);

        cache.clear().await;
        assert_eq!(cache.len().await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_oldest_frame_is_evicted_at_capacity() -> Result<(), PolarsError> {
        let cache = FrameCache::with_capacity(2);
        let builds = Cell::new(0);
        let build = || {
            builds.set(builds.get() + 1);
            df!("value" => [1.0f64])
        };

        for days in [1, 3, 7] {
            cache.get_or_try_insert_with(key(days), build).await?;
        }
        assert_eq!(cache.len().await, 2);
        assert_eq!(builds.get(), 3);

        // 3 and 7 are still cached, 1 was evicted
        cache.get_or_try_insert_with(key(7), build).await?;
        assert_eq!(builds.get(), 3);
        cache.get_or_try_insert_with(key(1), build).await?;
        assert_eq!(builds.get(), 4);
        assert_eq!(cache.len().await, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_build_is_not_cached() {
        let cache = FrameCache::new();
        let failed: Result<DataFrame, String> = cache
            .get_or_try_insert_with(key(1), || Err("boom".to_string()))
            .await;
        assert!(failed.is_err());
        assert_eq!(cache.len().await, 0);
    }
}
