use std::process::ExitCode;
use std::sync::Arc;

use axum::http::HeaderValue;
use sichuan_hu::{config::Settings, router, rules::load_basic_rules, AppState, Ruleset};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sichuan_hu=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env();
    info!(?settings, "Starting Sichuan Mahjong scoring server");

    // The ruleset is loaded once and shared read-only for the life of the process
    let ruleset = match Ruleset::load(&settings.ruleset_path) {
        Ok(ruleset) => Arc::new(ruleset),
        Err(err) => {
            error!(error = %err, "Failed to load ruleset");
            return ExitCode::FAILURE;
        }
    };

    let basic_rules = load_basic_rules(&settings.basic_rules_path);

    let app = router(AppState::new(ruleset).with_basic_rules(basic_rules))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http());

    let listener = match tokio::net::TcpListener::bind(&settings.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(error = %err, addr = %settings.bind_addr, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!("Server running on http://{}", settings.bind_addr);

    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "Server stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
