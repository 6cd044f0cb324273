//! Prediction Engine for football fixtures
//! Rule-based heuristic over recent form and head-to-head history, no ML.

pub mod form;
pub mod h2h;
pub mod scorer;
pub mod store;
pub mod summary;

pub use form::{team_form, FormSnapshot};
pub use h2h::{head_to_head, HeadToHead};
pub use scorer::{Prediction, Score, Verdict, DECISIVE_MARGIN};
pub use store::{MatchHistoryStore, MatchRecord, MatchResult, StoreBuilder, StoreError, TeamId};

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Match history file used when `MATCHES_CSV_PATH` is unset
pub const DEFAULT_MATCHES_PATH: &str = "epl_matches_2017_2023.csv";

/// Matches feeding the score
pub const FORM_WINDOW: usize = 5;
/// Matches shown in the text summaries
pub const DISPLAY_WINDOW: usize = 10;

/// Everything returned for one fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub prediction: String,
    /// Home form, away form, head-to-head
    pub stats: [String; 3],
    pub discussion: String,
}

/// Cheap to clone; every clone reads the same store.
#[derive(Debug, Clone)]
pub struct PredictionEngine {
    store: Arc<MatchHistoryStore>,
}

impl PredictionEngine {
    pub fn new(store: Arc<MatchHistoryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MatchHistoryStore {
        &self.store
    }

    /// Scores the fixture over the last [`FORM_WINDOW`] matches.
    /// Unknown teams are not an error; they just score nothing.
    pub fn predict(&self, home: &str, away: &str) -> Prediction {
        let home_form = team_form(&self.store, home, FORM_WINDOW);
        let away_form = team_form(&self.store, away, FORM_WINDOW);
        let h2h = head_to_head(&self.store, home, away, FORM_WINDOW);

        let score = scorer::score(&home_form, &away_form, &h2h);
        let verdict = score.verdict();
        debug!(
            home,
            away,
            home_score = score.home,
            away_score = score.away,
            ?verdict,
            "fixture scored"
        );

        Prediction {
            home_team: home.to_string(),
            away_team: away.to_string(),
            verdict,
            score,
        }
    }

    /// Prediction plus display summaries over the last [`DISPLAY_WINDOW`] matches.
    pub fn report(&self, home: &str, away: &str) -> (Prediction, MatchReport) {
        let prediction = self.predict(home, away);
        let label = prediction.label();

        let home_block = summary::form_block(home, &team_form(&self.store, home, DISPLAY_WINDOW));
        let away_block = summary::form_block(away, &team_form(&self.store, away, DISPLAY_WINDOW));
        let h2h_block = summary::h2h_block(
            home,
            away,
            &head_to_head(&self.store, home, away, DISPLAY_WINDOW),
        );

        let discussion =
            summary::discussion(home, away, &home_block, &away_block, &h2h_block, &label);

        let report = MatchReport {
            prediction: label,
            stats: [home_block, away_block, h2h_block],
            discussion: discussion.trim().to_string(),
        };
        (prediction, report)
    }
}
