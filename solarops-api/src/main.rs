use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use solarops_api::{config, handlers, helpers};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

// CSV uploads arrive as a single text body
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Read configuration from this file instead of the per-user default
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(log_file_path: Option<String>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("solarops-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

fn to_io_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file_path);

    // Load config
    let (config, config_path) = match args.config {
        Some(path) => config::ApiConfig::load_from(path),
        None => config::ApiConfig::load(),
    }
    .map_err(|e| to_io_error("Failed to load config", e))?;
    tracing::info!("Configuration loaded from {:?}", config_path);

    // Initialize database
    let configured_db_path = config.database.as_ref().and_then(|d| d.path.clone());
    let (db, db_path) = helpers::database::initialize_database(configured_db_path)
        .map_err(|e| to_io_error("Failed to initialize database", e))?;
    tracing::info!("Database initialized at: {:?}", db_path);

    // Get server config or use defaults
    let (host, port) = if let Some(server_config) = &config.server {
        (server_config.host.clone(), server_config.port)
    } else {
        ("127.0.0.1".to_string(), 8080)
    };

    tracing::info!("Server will listen on {}:{}", host, port);

    let import_config = config.import.clone();
    let cors_config = config.cors.clone();

    HttpServer::new(move || {
        let cors = if let Some(cors_config) = &cors_config {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
        } else {
            Cors::default().allow_any_origin()
        }
        .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
        .allowed_headers(vec![
            "Authorization",
            "Accept",
            "Content-Type",
            helpers::session::USER_ID_HEADER,
            helpers::session::TENANT_ID_HEADER,
        ])
        .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(actix_web::middleware::Logger::default())
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(import_config.clone()))
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
