//! Snapshot cache
//!
//! Holds at most one immutable [`CachedSnapshot`] plus the settings reports
//! are computed with. Readers copy the snapshot pointer and release the lock
//! right away. A rebuild is single-flight: [`SnapshotCache::begin_rebuild`]
//! hands out one [`RebuildGuard`] at a time and refuses everyone else.
//!
//! Settings swaps and the stale mark happen in one critical section, and a
//! rebuild that started before a swap installs its result as already stale.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Settings;
use crate::error::{MintedError, MintedResult};
use crate::reports::ReportBundle;

/// One installed bundle of reports
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub reports: Arc<ReportBundle>,
    pub last_refresh: DateTime<Utc>,
    /// Settings changed after this snapshot was computed
    pub stale: bool,
}

/// Cache metadata for callers deciding whether to refresh
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub has_snapshot: bool,
    pub rebuild_in_progress: bool,
    pub last_refresh: Option<DateTime<Utc>>,
    pub stale: bool,
    pub needs_refresh: bool,
}

#[derive(Debug)]
struct CacheState {
    snapshot: Option<Arc<CachedSnapshot>>,
    rebuilding: bool,
    settings: Arc<Settings>,
    settings_version: u64,
}

#[derive(Debug)]
pub struct SnapshotCache {
    state: RwLock<CacheState>,
}

impl SnapshotCache {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: RwLock::new(CacheState {
                snapshot: None,
                rebuilding: false,
                settings: Arc::new(settings),
                settings_version: 0,
            }),
        }
    }

    fn read(&self) -> MintedResult<RwLockReadGuard<'_, CacheState>> {
        self.state
            .read()
            .map_err(|e| MintedError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> MintedResult<RwLockWriteGuard<'_, CacheState>> {
        self.state
            .write()
            .map_err(|e| MintedError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// The installed snapshot, or `CacheEmpty` before the first rebuild
    pub fn snapshot(&self) -> MintedResult<Arc<CachedSnapshot>> {
        self.read()?.snapshot.clone().ok_or(MintedError::CacheEmpty)
    }

    pub fn status(&self) -> MintedResult<CacheStatus> {
        let state = self.read()?;
        Ok(match &state.snapshot {
            Some(snapshot) => CacheStatus {
                has_snapshot: true,
                rebuild_in_progress: state.rebuilding,
                last_refresh: Some(snapshot.last_refresh),
                stale: snapshot.stale,
                needs_refresh: snapshot.stale,
            },
            None => CacheStatus {
                has_snapshot: false,
                rebuild_in_progress: state.rebuilding,
                last_refresh: None,
                stale: false,
                needs_refresh: true,
            },
        })
    }

    pub fn settings(&self) -> MintedResult<Arc<Settings>> {
        Ok(Arc::clone(&self.read()?.settings))
    }

    /// Swap in new settings and mark the installed snapshot stale.
    ///
    /// The snapshot keeps serving its old values until the next rebuild.
    pub fn update_settings(&self, settings: Settings) -> MintedResult<()> {
        let mut state = self.write()?;
        state.settings = Arc::new(settings);
        state.settings_version += 1;
        if let Some(current) = state.snapshot.take() {
            state.snapshot = Some(Arc::new(CachedSnapshot {
                stale: true,
                ..(*current).clone()
            }));
        }
        Ok(())
    }

    /// Claim the single rebuild slot, or fail with `RefreshInProgress`
    pub fn begin_rebuild(&self) -> MintedResult<RebuildGuard<'_>> {
        let mut state = self.write()?;
        if state.rebuilding {
            return Err(MintedError::RefreshInProgress);
        }
        state.rebuilding = true;
        Ok(RebuildGuard {
            cache: self,
            settings: Arc::clone(&state.settings),
            settings_version: state.settings_version,
            released: false,
        })
    }
}

/// Exclusive right to rebuild. Dropping it frees the slot, whether or not
/// anything was installed.
#[derive(Debug)]
pub struct RebuildGuard<'a> {
    cache: &'a SnapshotCache,
    settings: Arc<Settings>,
    settings_version: u64,
    /// Set once the slot was freed together with an install
    released: bool,
}

impl RebuildGuard<'_> {
    /// Settings captured when the rebuild started
    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// Atomically replace the installed snapshot and free the rebuild slot
    pub fn install(mut self, reports: ReportBundle, at: DateTime<Utc>) -> MintedResult<Arc<CachedSnapshot>> {
        let mut state = self.cache.write()?;
        let snapshot = Arc::new(CachedSnapshot {
            reports: Arc::new(reports),
            last_refresh: at,
            stale: state.settings_version != self.settings_version,
        });
        state.snapshot = Some(Arc::clone(&snapshot));
        state.rebuilding = false;
        // The slot may be claimed again as soon as the lock drops
        self.released = true;
        Ok(snapshot)
    }
}

impl Drop for RebuildGuard<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.cache
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .rebuilding = false;
    }
}
