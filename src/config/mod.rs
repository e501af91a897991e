//! Configuration module for Minted
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - User settings persistence (tiers, subcategory depth, variables)

pub mod paths;
pub mod settings;

pub use paths::MintedPaths;
pub use settings::{Settings, Tier};
