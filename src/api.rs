//! HTTP surface: `POST /predict`, `GET /health`

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use logger::{now_iso, EventLogger, PredictRejectedEvent, PredictionEvent};
use prediction_engine::{MatchReport, PredictionEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

pub const MISSING_TEAMS: &str = "Missing team names.";

#[derive(Clone)]
pub struct AppState {
    engine: PredictionEngine,
    events: Arc<EventLogger>,
}

impl AppState {
    pub fn new(engine: PredictionEngine, events: EventLogger) -> Self {
        Self {
            engine,
            events: Arc::new(events),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Report(MatchReport),
    Error { error: &'static str },
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}

fn non_empty(name: Option<String>) -> Option<String> {
    name.filter(|n| !n.is_empty())
}

/// The body is read as JSON whatever Content-Type the client sent.
async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictResponse>, (StatusCode, String)> {
    let req: PredictRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!("rejecting /predict body: {e}");
        (StatusCode::BAD_REQUEST, format!("invalid JSON body: {e}"))
    })?;

    let (Some(home), Some(away)) = (non_empty(req.home_team), non_empty(req.away_team)) else {
        let ev = PredictRejectedEvent {
            ts:     now_iso(),
            event:  "PREDICT_REJECTED",
            reason: MISSING_TEAMS.to_string(),
        };
        if let Err(e) = state.events.log(&ev) {
            warn!("event log write failed: {e}");
        }
        return Ok(Json(PredictResponse::Error {
            error: MISSING_TEAMS,
        }));
    };

    let (prediction, report) = state.engine.report(&home, &away);
    let store = state.engine.store();

    info!(
        home_score = prediction.score.home,
        away_score = prediction.score.away,
        "{} vs {}: {}",
        home,
        away,
        report.prediction
    );

    let ev = PredictionEvent {
        ts:         now_iso(),
        event:      "PREDICTION",
        home_known: store.team_id(&home).is_some(),
        away_known: store.team_id(&away).is_some(),
        prediction: report.prediction.clone(),
        home_score: prediction.score.home,
        away_score: prediction.score.away,
        home,
        away,
    };
    if let Err(e) = state.events.log(&ev) {
        warn!("event log write failed: {e}");
    }

    Ok(Json(PredictResponse::Report(report)))
}
