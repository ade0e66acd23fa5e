//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use pennywise_server::ServerConfig;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting Pennywise web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let config = ServerConfig::from_env().with_origins(allowed_origins);
    if config.allowed_origins.is_empty() {
        println!("   🌐 CORS: any origin (set PENNYWISE_ALLOWED_ORIGINS to restrict)");
    } else {
        println!("   🌐 CORS: {}", config.allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    // Opening also seeds default goals and salary (idempotent)
    let db = open_db(db_path)?;

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("Static directory path must be valid UTF-8"))
        .transpose()?;
    pennywise_server::serve(db, host, port, static_dir_str, config).await?;

    Ok(())
}
