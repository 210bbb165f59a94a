mod airtable;
mod catalog;
mod config;
mod errors;
mod form;
mod mappers;
mod models;
mod pdfmonkey;
mod recruitcrm;
mod routes;
mod state;
mod submit;
mod translate;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::airtable::AirtableClient;
use crate::catalog::FieldCatalog;
use crate::config::Config;
use crate::pdfmonkey::PdfMonkeyClient;
use crate::recruitcrm::RecruitCrmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting interview-sheet API v{}",
        env!("CARGO_PKG_VERSION")
    );

    let recruit = RecruitCrmClient::new(config.recruitcrm_api_key.clone());
    let airtable = AirtableClient::new(config.airtable_api_key.clone());
    let pdf = PdfMonkeyClient::new(config.pdfmonkey_api_key.clone());
    let catalog = FieldCatalog::default();

    // Warm the field catalog in the background and surface dictionary
    // drift as startup warnings instead of silent per-request drops.
    {
        let recruit = recruit.clone();
        let catalog = catalog.clone();
        tokio::spawn(async move {
            let field_map = catalog.field_map(&recruit).await;
            if field_map.is_empty() {
                warn!("Field catalog warm-up failed; dictionary drift check skipped");
                return;
            }
            for name in translate::dictionary_drift(&field_map) {
                warn!("Dictionary entry '{name}' matches no custom field in the tracking system");
            }
        });
    }

    // Build app state
    let state = AppState {
        recruit,
        airtable,
        pdf,
        catalog,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
