//! canteen-gateway server entry point.
//!
//! Starts the transports, registers them with the broadcast hub, and serves
//! the Axum HTTP/WebSocket router until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use canteen_gateway::api;
use canteen_gateway::app_state::AppState;
use canteen_gateway::broadcast::{BroadcastHub, Role};
use canteen_gateway::config::{GatewayConfig, LogFormat};
use canteen_gateway::domain::ShopRegistry;
use canteen_gateway::service::ShopService;
use canteen_gateway::transport::{AdminStream, MessageChannel};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env().context("invalid listen address")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting canteen-gateway");

    // Broadcast hub
    let hub = Arc::new(BroadcastHub::new(config.delivery_timeout));

    // Transports register themselves on startup
    let admin_stream = AdminStream::bind(config.admin_stream_addr, config.channel_capacity)
        .await
        .with_context(|| format!("binding admin stream on {}", config.admin_stream_addr))?;
    let seller_channel = Arc::new(MessageChannel::new(Role::Seller, config.channel_capacity));
    let user_channel = Arc::new(MessageChannel::new(Role::User, config.channel_capacity));
    hub.register_admin(&admin_stream);
    hub.register_seller(&seller_channel);
    hub.register_user(&user_channel);

    // Build service layer
    let shop_service = Arc::new(ShopService::new(
        Arc::new(ShopRegistry::new()),
        Arc::clone(&hub),
    ));

    // Build application state
    let app_state = AppState {
        shop_service,
        hub: Arc::clone(&hub),
        seller_channel: Arc::clone(&seller_channel),
        user_channel: Arc::clone(&user_channel),
    };
    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Transports clear their registrations on shutdown
    hub.clear_admin();
    hub.clear_seller();
    hub.clear_user();
    admin_stream.shutdown();
    seller_channel.shutdown();
    user_channel.shutdown();
    tracing::info!("canteen-gateway stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
