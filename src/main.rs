use actix_web::{web, App, HttpResponse, HttpServer};
use tracing::info;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

mod api;
mod board;
mod config;
mod discord;
mod format;
mod shutdown;
mod worker;

use crate::api::{health::health_config, redirect::redirect_config};
use crate::board::JobBoard;
use crate::discord::DiscordClient;
use crate::shutdown::ShutdownCoordinator;
use crate::worker::Announcer;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from environment
    let config = config::Config::from_env().expect("Failed to load configuration");

    // Create logs directory if it doesn't exist
    std::fs::create_dir_all(&config.log_dir).expect("Failed to create logs directory");

    // File-based logging with daily rotation, plus console output.
    // Log files are created as: logs/info.2026-08-30.log, logs/error.2026-08-30.log
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_file = tracing_appender::rolling::daily(&config.log_dir, "info.log");
    let error_file = tracing_appender::rolling::daily(&config.log_dir, "error.log");

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_file)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(error_layer)
        .init();

    info!("Starting job-announcer application");
    info!("Configuration loaded successfully:");
    info!("  - Announce channel: {}", config.discord_channel);
    info!("  - Recency window: {} hours", config.recency_window_hours);
    info!("  - Announce interval: {} seconds", config.announce_interval_secs);
    info!("  - Public base URL: {}", config.public_base_url);

    // Create shutdown channel for graceful shutdown
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    // Spawn the announcement worker
    let announcer = Announcer::new(
        JobBoard::new(&config),
        DiscordClient::new(&config),
        config.clone(),
    );
    let announcer_handle = tokio::spawn(async move {
        announcer.run(shutdown_rx).await;
    });

    // Job board client shared by the redirect route
    let board = web::Data::new(JobBoard::new(&config));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(board.clone())
            .configure(health_config)
            .configure(redirect_config)
            .default_service(web::to(HttpResponse::NotFound))
    });

    info!("Server starting on http://{}", config.bind_addr);

    // Bind and start the server
    let server = server.bind(config.bind_addr.as_str())?.run();

    // Get server handle for graceful shutdown
    let server_handle = server.handle();

    // Spawn server in background
    let server_task = tokio::spawn(server);

    // Create shutdown coordinator and wait for shutdown signal
    let coordinator = ShutdownCoordinator::new(
        server_handle,
        server_task,
        announcer_handle,
        shutdown_tx,
    );

    coordinator.wait_for_shutdown().await
}
