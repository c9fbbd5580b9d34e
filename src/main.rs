//! Service entrypoint: load configuration, wire adapters, serve.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use subgate::adapters::deadletter::JsonlDeadLetterQueue;
use subgate::adapters::http::{app_router, AppState};
use subgate::adapters::memory::{InMemoryDeadLetterQueue, InMemoryEntitlementStore};
use subgate::adapters::paypal::{PayPalAuth, PayPalSubscriptionClient};
use subgate::application::{
    ConfirmHandler, EntitlementQuery, ReconciliationEngine, SubscriptionLocks, WebhookRouter,
};
use subgate::config::AppConfig;
use subgate::ports::{
    AcceptAllVerifier, DeadLetterQueue, EntitlementStore, SubscriptionClient, TokenProvider,
};

/// Outbound provider calls get their own timeout, independent of the
/// inbound request timeout.
const PROVIDER_TIMEOUT_SECS: u64 = 10;

#[tokio::main]
async fn main() {
    // Fail fast before anything else starts: a service without provider
    // credentials cannot do its one job.
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("invalid configuration: {e}");
        std::process::exit(1);
    }

    init_tracing(&config);

    let http_client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(PROVIDER_TIMEOUT_SECS))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let tokens: Arc<dyn TokenProvider> =
        Arc::new(PayPalAuth::new(config.paypal.clone(), http_client.clone()));
    let client: Arc<dyn SubscriptionClient> = Arc::new(PayPalSubscriptionClient::new(
        config.paypal.base_url.clone(),
        http_client,
        Arc::clone(&tokens),
    ));

    let store: Arc<dyn EntitlementStore> = Arc::new(InMemoryEntitlementStore::new());
    let dead_letters: Arc<dyn DeadLetterQueue> = match &config.dead_letter.path {
        Some(path) => {
            tracing::info!(path = %path.display(), "dead letters recorded to file");
            Arc::new(JsonlDeadLetterQueue::new(path.clone()))
        }
        None => {
            tracing::info!("dead letters kept in memory");
            Arc::new(InMemoryDeadLetterQueue::new())
        }
    };

    let engine = Arc::new(ReconciliationEngine::new(
        client,
        Arc::clone(&store),
        Arc::new(SubscriptionLocks::new()),
    ));
    let confirm = Arc::new(ConfirmHandler::new(
        Arc::clone(&engine),
        Arc::clone(&store),
        config.paypal.expected_plan_id.clone(),
    ));
    let webhook = Arc::new(WebhookRouter::new(
        engine,
        Arc::new(AcceptAllVerifier),
        dead_letters,
    ));
    let entitlements = Arc::new(EntitlementQuery::new(Arc::clone(&store)));

    let state = AppState::new(confirm, webhook, entitlements, store);
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind listener");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, environment = ?config.server.environment, "subgate listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received, stopping server"),
        Err(e) => tracing::error!(error = %e, "failed to install shutdown handler"),
    }
}
