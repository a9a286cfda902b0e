//! prairielearn-server: question settings pages, news items and variant data access
//!
//! Library behind the `prairielearn` binary. Pages are rendered on the
//! server from PostgreSQL data; news item content is read from disk.

pub mod config;
pub mod context;
pub mod csrf;
pub mod db;
pub mod http;
pub mod models;
pub mod render;

pub use config::AppConfig;
pub use db::{create_pool, create_pool_with_options};
pub use http::{run_server, ServerConfig};
