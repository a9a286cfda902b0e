//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) shared through `AppState`
//! - One parameterized statement per repository call, no N+1 queries
//! - "Not found" is `Option::None` or an empty `Vec`, never an error

#[cfg(test)]
pub(crate) mod fixtures;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
