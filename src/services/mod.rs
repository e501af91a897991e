//! Service layer for Minted
//!
//! The service layer sits between the ledger source and the presentation
//! layer: it owns the snapshot cache and routes each report request to the
//! cached or the filtered path.

pub mod cache;
pub mod dashboard;

pub use cache::{CacheStatus, CachedSnapshot, RebuildGuard, SnapshotCache};
pub use dashboard::DashboardService;
