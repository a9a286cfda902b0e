//! HTTP server command
//!
//! Runs the question settings and news item pages against PostgreSQL.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use prairielearn_server::db::{create_pool_with_options, migrations};
use prairielearn_server::{run_server, AppConfig, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Directory holding one subdirectory of assets per news item
    #[arg(long, env = "NEWS_ITEMS_DIR")]
    pub news_items_dir: Option<PathBuf>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Maximum database connections in the pool
    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,

    /// Create the schema before serving
    #[arg(long)]
    pub migrate: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let mut app_config = AppConfig::from_env();
    if let Some(dir) = args.news_items_dir {
        app_config.news_items_dir = dir;
    }

    tracing::info!("Starting prairielearn server on {}", args.bind);

    let pool = create_pool_with_options(&database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    if args.migrate {
        migrations::run(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        ..ServerConfig::default()
    };

    // Blocks until shutdown
    run_server(pool, app_config, config)
        .await
        .context("Server error")?;

    Ok(())
}
