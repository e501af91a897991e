//! Custom error types for Minted
//!
//! This module defines the error hierarchy for the aggregation engine using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Minted operations
#[derive(Error, Debug)]
pub enum MintedError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid input (bad date range, bad depth, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The ledger query service could not be invoked or returned malformed data
    #[error("Ledger query failed: {0}")]
    Upstream(String),

    /// A cache rebuild was requested while another one was running
    #[error("refresh already in progress")]
    RefreshInProgress,

    /// No snapshot has been built yet
    #[error("cache empty; refresh required")]
    CacheEmpty,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Lock or shared-state errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl MintedError {
    /// Create a "not found" error for expense categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for tiers
    pub fn tier_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Tier",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for income sources
    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is the single-flight refusal
    pub fn is_refresh_in_progress(&self) -> bool {
        matches!(self, Self::RefreshInProgress)
    }

    /// Check if the cache has never been filled
    pub fn is_cache_empty(&self) -> bool {
        matches!(self, Self::CacheEmpty)
    }
}

impl From<std::io::Error> for MintedError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MintedError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Minted operations
pub type MintedResult<T> = Result<T, MintedError>;
