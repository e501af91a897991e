//! Minted - personal finance reports over an hledger journal
//!
//! This library turns the postings an hledger journal produces into budget,
//! spending, income and net worth reports, and keeps a snapshot of all of them
//! ready to serve.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Postings, transactions, account classification, dates
//! - `ledger`: The ledger query seam (hledger CLI, in-memory fixture)
//! - `aggregate`: Monthly bucketing, outlier-aware averages, tier rollup
//! - `reports`: One builder per report view
//! - `services`: Snapshot cache and the dashboard service
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use minted::config::{MintedPaths, Settings};
//! use minted::ledger::HledgerCli;
//! use minted::services::DashboardService;
//!
//! let paths = MintedPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let ledger = HledgerCli::new(settings.ledger_file().unwrap());
//! let service = DashboardService::new(Arc::new(ledger), settings);
//! service.rebuild_cache()?;
//! let budget = service.budget(None)?;
//! ```

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod services;

pub use error::MintedError;
