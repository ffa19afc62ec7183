use error_stack::ResultExt;
use thiserror::Error;
use tracing::{info, instrument, Level};
use tracing_subscriber::{filter::Targets, layer::SubscriberExt, util::SubscriberInitExt, Registry};

use trailer_inquiry::adapters::credentials::CredentialLoader;
use trailer_inquiry::adapters::sheets;
use trailer_inquiry::ports::spreadsheet_client::SpreadsheetClient;
use trailer_inquiry::prettyprint::prettyprint::PrettyFormatter;
use trailer_inquiry::{create_router, AppConfig, AppState};

#[derive(Error, Debug)]
enum StartupError {
    #[error("Could not load configuration")]
    Config,
    #[error("Could not bind the listen address")]
    Bind,
    #[error("Server stopped unexpectedly")]
    Serve,
}

fn setup_tracing(config: &AppConfig) {
    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stdout);

    Registry::default()
        .with(
            Targets::new()
                .with_target("trailer_inquiry", level)
                .with_target("tower_http", level),
        )
        .with(stdout_layer)
        .init();

    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "✅ YES"
    } else {
        "❌ NO"
    }
}

async fn log_banner(config: &AppConfig, client: &dyn SpreadsheetClient) {
    let credentials = CredentialLoader::new(config.credentials_file_path.clone());
    info!("🚀 TRAILER HOUSE FORM BACKEND");
    info!("📍 Port: {}", config.port);
    info!("🌐 Frontend: {}", config.frontend_url);
    info!(
        "📊 Sheets Key: {}",
        if config.sheet_key().is_some() {
            "✅ SET"
        } else {
            "❌ NOT SET"
        }
    );
    info!("📁 Credentials Path: {}", credentials.path().display());
    info!("📁 File Exists: {}", yes_no(credentials.exists().await));
    info!(
        "📚 Sheets Lib: {}",
        if client.is_available() {
            "✅ AVAILABLE"
        } else {
            "❌ MISSING"
        }
    );
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
#[instrument]
async fn main() -> error_stack::Result<(), StartupError> {
    let config = AppConfig::load().change_context(StartupError::Config)?;
    setup_tracing(&config);

    let client = sheets::default_client();
    log_banner(&config, client.as_ref()).await;

    let addr = config.listen_address();
    let state = AppState::new(config, client);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .change_context(StartupError::Bind)
        .attach_printable_lazy(|| format!("address: {addr}"))?;
    info!("Starting server on {}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .change_context(StartupError::Serve)
}
