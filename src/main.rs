//! Match Predictor: prediction API
//!
//! What it does:
//!   1. Loads the match history CSV once at startup (fatal if missing or malformed)
//!   2. Serves POST /predict with a rule-based verdict plus form / head-to-head summaries
//!   3. Appends every served prediction to ./logs/<date>.jsonl
//!
//! Run:
//!   MATCHES_CSV_PATH=epl_matches_2017_2023.csv cargo run --bin predict-api

mod api;
mod config;

use anyhow::{Context, Result};
use dotenv::dotenv;
use logger::EventLogger;
use prediction_engine::{MatchHistoryStore, PredictionEngine};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::api::AppState;
use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cfg = ApiConfig::from_env()?;

    info!("=== Match Predictor API ===");
    info!("Match data: {}", cfg.matches_path.display());
    info!("Logs: {}/", cfg.log_dir.display());

    let store = MatchHistoryStore::from_csv_path(&cfg.matches_path)
        .with_context(|| format!("load match history from {}", cfg.matches_path.display()))?;

    let state = AppState::new(
        PredictionEngine::new(Arc::new(store)),
        EventLogger::new(&cfg.log_dir),
    );

    let listener = TcpListener::bind(cfg.bind).await.context("bind failed")?;
    info!("predict-api listening on http://{} (POST /predict, GET /health)", cfg.bind);

    axum::serve(listener, api::router(state))
        .await
        .context("http server stopped")?;
    Ok(())
}
