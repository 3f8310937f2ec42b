use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use completion_gateway::config::GatewayConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // INFO by default; RUST_LOG overrides.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();

    tracing::info!("Starting standalone completion gateway...");

    let config = GatewayConfig::from_env();
    if let Err(e) = completion_gateway::server::run(config).await {
        tracing::error!("Failed to run completion gateway: {}", e);
        std::process::exit(1);
    }
}
