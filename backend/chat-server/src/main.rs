use chat_server::{AppState, build_router, logger, metrics};

use chat_config::Config;
use chat_db::{MessageStore, SqliteMessageStore};
use chat_room::{ChatCoordinator, RoomConfig, ShutdownCoordinator};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use tokio::net::TcpListener;

const DISPATCHER_DRAIN_TIMEOUT_SECS: u64 = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Ensure log directory exists before the logger opens the file
    let log_file_path = config.log_file_path()?;
    if let Some(parent) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting chat-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Metrics recorder must exist before the room records anything
    let metrics_handle = metrics::install_recorder()?;

    // Open the message store (creates and migrates the file if needed)
    let database_path = config.database_path()?;
    let store: Arc<dyn MessageStore> = Arc::new(SqliteMessageStore::open(&database_path).await?);

    // Start the room and its dispatcher
    let shutdown = ShutdownCoordinator::new();
    let room_config = RoomConfig {
        client_queue_capacity: config.chat.client_queue_capacity,
    };
    let (coordinator, dispatcher_task) =
        ChatCoordinator::start(Arc::clone(&store), room_config, &shutdown);

    // Identifiers registered before a restart get their live queues back
    coordinator.restore().await?;

    let app_state = AppState {
        coordinator,
        shutdown: shutdown.clone(),
        metrics: Some(metrics_handle),
    };

    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    let mut server_guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            server_guard.wait().await;
            info!("HTTP server draining connections");
        })
        .await?;

    // Server may also stop on its own; make sure the dispatcher follows
    shutdown.shutdown();
    match tokio::time::timeout(
        Duration::from_secs(DISPATCHER_DRAIN_TIMEOUT_SECS),
        dispatcher_task,
    )
    .await
    {
        Ok(Ok(())) => info!("Broadcast dispatcher stopped"),
        Ok(Err(e)) => error!("Broadcast dispatcher task failed: {}", e),
        Err(_) => warn!(
            "Broadcast dispatcher did not stop within {}s",
            DISPATCHER_DRAIN_TIMEOUT_SECS
        ),
    }

    store.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}
