use tracing::{error, info};
use wxpay_gateway::domain::FIELD_NONCE_STR;
use wxpay_gateway::infrastructure::http::notification_channel;
use wxpay_gateway::shared::LoggingUtils;
use wxpay_gateway::{AppConfig, NotifyServer, WxPayClient};

/// Buffered notifications before the listener starts refusing them.
const NOTIFY_QUEUE_DEPTH: usize = 256;

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    if let Err(e) = LoggingUtils::initialize(
        &config.logging.level,
        &config.logging.format,
        config.logging.structured,
    ) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting WxPay gateway...");

    let client = match WxPayClient::from_config(&config) {
        Ok(client) => {
            info!(
                "Gateway client ready for {} (mutual TLS: {})",
                client.domain(),
                client.has_tls_transport()
            );
            client
        }
        Err(e) => {
            error!("Failed to initialize gateway client: {}", e);
            std::process::exit(1);
        }
    };

    let (tx, mut rx) = notification_channel(NOTIFY_QUEUE_DEPTH);
    tokio::spawn(async move {
        while let Some(notification) = rx.recv().await {
            info!(
                nonce = notification.get(FIELD_NONCE_STR).unwrap_or_default(),
                out_trade_no = notification.get("out_trade_no").unwrap_or_default(),
                result_code = notification.get("result_code").unwrap_or_default(),
                "Payment notification received"
            );
        }
    });

    let server = NotifyServer::new(config, client.shared_account(), tx);
    info!("Server starting on {}", server.config().server_address());

    if let Err(e) = server.run().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
