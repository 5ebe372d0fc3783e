use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod db;
mod notes;

use config::Config;
use db::Database;
use notes::NoteService;

pub struct AppState {
    pub notes: NoteService,
    pub config: Config,
    /// Server start time for uptime calculation
    pub started_at: std::time::Instant,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Notes backend v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    let port = config.port;
    let bind_address = config.bind_address.clone();

    if let Some(dir) = config.database_dir() {
        std::fs::create_dir_all(&dir)?;
    }

    log::info!("Initializing database at {}", config.database_url);
    let db = match Database::new(&config.database_url, config.db_pool_size) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            log::error!("Database connection error: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    let state = web::Data::new(AppState {
        notes: NoteService::new(Arc::clone(&db)),
        config,
        started_at: std::time::Instant::now(),
    });

    log::info!("Server running on {}:{}", bind_address, port);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::notes::config)
            .configure(controllers::pages::config)
    })
    .bind((bind_address.as_str(), port))?
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop).await.is_err() {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::{tempdir, TempDir};

    /// App state over a fresh database in a temp dir. Keep the dir alive for the test.
    pub fn app_state() -> (TempDir, web::Data<AppState>) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("notes.db");
        let db = Database::new(db_path.to_str().unwrap(), 2).expect("Failed to create database");

        let state = web::Data::new(AppState {
            notes: NoteService::new(Arc::new(db)),
            config: Config::default(),
            started_at: std::time::Instant::now(),
        });
        (dir, state)
    }
}
