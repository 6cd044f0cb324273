//! Offline prediction: prints the same JSON the API would return.
//!
//!   cargo run --bin predict -- "Arsenal" "Chelsea"

use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use prediction_engine::{MatchHistoryStore, PredictionEngine, DEFAULT_MATCHES_PATH};
use std::sync::Arc;

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [home, away] = args.as_slice() else {
        bail!("usage: predict <home team> <away team>");
    };

    let path = std::env::var("MATCHES_CSV_PATH")
        .unwrap_or_else(|_| DEFAULT_MATCHES_PATH.to_string());
    let store = MatchHistoryStore::from_csv_path(&path)
        .with_context(|| format!("load match history from {path}"))?;

    for team in [home, away] {
        if store.team_id(team).is_none() {
            tracing::warn!("{team:?} not found in match history; its form counts as empty");
        }
    }

    let engine = PredictionEngine::new(Arc::new(store));
    let (prediction, report) = engine.report(home, away);

    println!("{}", serde_json::to_string_pretty(&report)?);
    println!(
        "score: {} {} - {} {}",
        home, prediction.score.home, prediction.score.away, away
    );
    Ok(())
}
