//! Match Predictor: Logger
//! JSONL event stream, one file per UTC day

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct EventLogger {
    log_dir: PathBuf,
}

impl EventLogger {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        let dir = log_dir.into();
        fs::create_dir_all(&dir).ok();
        Self { log_dir: dir }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn log<T: Serialize>(&self, event: &T) -> Result<()> {
        let date  = Utc::now().format("%Y-%m-%d").to_string();
        let path  = self.log_dir.join(format!("{date}.jsonl"));
        let line  = serde_json::to_string(event)?;
        let mut f = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(f, "{line}")?;
        Ok(())
    }
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

// ── Event types ──────────────────────────────────────────────────────────────

#[derive(Serialize, Debug)]
pub struct PredictionEvent {
    pub ts:          String,
    pub event:       &'static str,   // "PREDICTION"
    pub home:        String,
    pub away:        String,
    pub prediction:  String,         // "<Team> to win" | "Draw"
    pub home_score:  i64,
    pub away_score:  i64,
    pub home_known:  bool,           // team present in match history
    pub away_known:  bool,
}

#[derive(Serialize, Debug)]
pub struct PredictRejectedEvent {
    pub ts:     String,
    pub event:  &'static str,        // "PREDICT_REJECTED"
    pub reason: String,
}
