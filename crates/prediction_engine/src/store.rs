//! Match History Store
//!
//! Immutable table of historical matches, loaded once at startup. Each real
//! match is stored twice, once from each side's perspective. Rows are kept
//! ordered most-recent-first so window queries are a filter plus a take.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Interned team identity. Only meaningful for the store that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(u32);

/// Result from the subject team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

impl MatchResult {
    /// Same match seen from the other side
    pub fn mirror(self) -> Self {
        match self {
            MatchResult::Win => MatchResult::Loss,
            MatchResult::Draw => MatchResult::Draw,
            MatchResult::Loss => MatchResult::Win,
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "w" | "win" => Some(MatchResult::Win),
            "d" | "draw" => Some(MatchResult::Draw),
            "l" | "loss" => Some(MatchResult::Loss),
            _ => None,
        }
    }
}

/// One row: a match seen from `team`'s side.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub team: TeamId,
    pub opponent: TeamId,
    pub result: MatchResult,
    pub goals_for: u32,
    pub goals_against: u32,
    pub expected_goals: Option<f64>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot open match data {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed CSV near line {line}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("line {line}: invalid date {value:?}")]
    InvalidDate { line: u64, value: String },
    #[error("line {line}: unknown result {value:?}")]
    InvalidResult { line: u64, value: String },
    #[error("line {line}: {column} must be a non-negative whole number, got {value}")]
    InvalidGoals {
        line: u64,
        column: &'static str,
        value: f64,
    },
    #[error("line {line}: xG must be a non-negative number, got {value}")]
    InvalidExpectedGoals { line: u64, value: f64 },
    #[error("match data contains no rows")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    #[serde(rename = "Team", alias = "team")]
    team: String,
    #[serde(rename = "Opponent", alias = "opponent")]
    opponent: String,
    #[serde(rename = "Result", alias = "result")]
    result: String,
    #[serde(rename = "GF", alias = "gf", deserialize_with = "trimmed_f64")]
    goals_for: f64,
    #[serde(rename = "GA", alias = "ga", deserialize_with = "trimmed_f64")]
    goals_against: f64,
    #[serde(rename = "xG", alias = "xg", default, deserialize_with = "trimmed_opt_f64")]
    expected_goals: Option<f64>,
}

// Only headers are trimmed by the reader; names must survive byte for byte.
fn trimmed_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let raw = String::deserialize(d)?;
    raw.trim().parse().map_err(serde::de::Error::custom)
}

fn trimmed_opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    match Option::<String>::deserialize(d)? {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map(Some).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
}

fn whole_goals(line: u64, column: &'static str, value: f64) -> Result<u32, StoreError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Ok(value as u32)
    } else {
        Err(StoreError::InvalidGoals { line, column, value })
    }
}

/// Collects rows and team names before the store is frozen.
#[derive(Debug, Default)]
pub struct StoreBuilder {
    names: Vec<String>,
    ids: HashMap<String, TeamId>,
    rows: Vec<MatchRecord>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, name: &str) -> TeamId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = TeamId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Adds a single row as-is. The mirrored row is the caller's business.
    #[allow(clippy::too_many_arguments)]
    pub fn row(
        &mut self,
        date: NaiveDate,
        team: &str,
        opponent: &str,
        result: MatchResult,
        goals_for: u32,
        goals_against: u32,
        expected_goals: Option<f64>,
    ) -> &mut Self {
        let team = self.intern(team);
        let opponent = self.intern(opponent);
        self.rows.push(MatchRecord {
            date,
            team,
            opponent,
            result,
            goals_for,
            goals_against,
            expected_goals,
        });
        self
    }

    /// Adds both rows of one match: home's row first, then away's.
    pub fn fixture(
        &mut self,
        date: NaiveDate,
        home: &str,
        away: &str,
        score: (u32, u32),
        xg: (Option<f64>, Option<f64>),
    ) -> &mut Self {
        let (home_goals, away_goals) = score;
        let home_result = match home_goals.cmp(&away_goals) {
            std::cmp::Ordering::Greater => MatchResult::Win,
            std::cmp::Ordering::Equal => MatchResult::Draw,
            std::cmp::Ordering::Less => MatchResult::Loss,
        };
        self.row(date, home, away, home_result, home_goals, away_goals, xg.0);
        self.row(date, away, home, home_result.mirror(), away_goals, home_goals, xg.1);
        self
    }

    pub fn build(self) -> MatchHistoryStore {
        let StoreBuilder { names, ids, mut rows } = self;

        // Stable: rows sharing a date keep their load order.
        rows.sort_by(|a, b| b.date.cmp(&a.date));

        let mut by_team: HashMap<TeamId, Vec<usize>> = HashMap::new();
        for (idx, row) in rows.iter().enumerate() {
            by_team.entry(row.team).or_default().push(idx);
        }

        MatchHistoryStore {
            names,
            ids,
            rows,
            by_team,
        }
    }
}

/// Read-only after construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct MatchHistoryStore {
    names: Vec<String>,
    ids: HashMap<String, TeamId>,
    /// Most recent first.
    rows: Vec<MatchRecord>,
    /// Row positions per subject team, ascending (so most recent first).
    by_team: HashMap<TeamId, Vec<usize>>,
}

impl MatchHistoryStore {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// Loads the match table from a CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| StoreError::Open {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        })?;
        let store = Self::from_csv_reader(file)?;
        info!(
            path = %path.display(),
            rows = store.row_count(),
            teams = store.team_count(),
            "match history loaded"
        );
        Ok(store)
    }

    /// Loads the match table from any CSV source with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut builder = StoreBuilder::new();
        for (idx, row) in rdr.deserialize::<CsvRow>().enumerate() {
            // header is line 1
            let line = idx as u64 + 2;
            let row = row.map_err(|source| StoreError::Csv {
                line: source.position().map(|p| p.line()).unwrap_or(line),
                source,
            })?;

            let date = parse_date(&row.date).ok_or_else(|| StoreError::InvalidDate {
                line,
                value: row.date.clone(),
            })?;
            let result = MatchResult::parse(&row.result).ok_or_else(|| StoreError::InvalidResult {
                line,
                value: row.result.clone(),
            })?;
            let goals_for = whole_goals(line, "GF", row.goals_for)?;
            let goals_against = whole_goals(line, "GA", row.goals_against)?;
            let expected_goals = match row.expected_goals {
                Some(xg) if !xg.is_finite() || xg < 0.0 => {
                    return Err(StoreError::InvalidExpectedGoals { line, value: xg })
                }
                other => other,
            };

            builder.row(
                date,
                &row.team,
                &row.opponent,
                result,
                goals_for,
                goals_against,
                expected_goals,
            );
        }

        if builder.rows.is_empty() {
            return Err(StoreError::Empty);
        }
        Ok(builder.build())
    }

    /// Exact, case-sensitive lookup.
    pub fn team_id(&self, name: &str) -> Option<TeamId> {
        self.ids.get(name).copied()
    }

    pub fn team_name(&self, id: TeamId) -> &str {
        &self.names[id.0 as usize]
    }

    /// Team names in first-seen order.
    pub fn team_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn team_count(&self) -> usize {
        self.names.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All rows, most recent first.
    pub fn rows(&self) -> &[MatchRecord] {
        &self.rows
    }

    /// Oldest and newest match dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.rows.last()?.date, self.rows.first()?.date))
    }

    /// Rows with `team` as subject, most recent first, at most `n`.
    /// Unknown names give an empty selection.
    pub fn recent_for_team(&self, team: &str, n: usize) -> Vec<&MatchRecord> {
        let Some(id) = self.team_id(team) else {
            return Vec::new();
        };
        self.positions(id)
            .iter()
            .take(n)
            .map(|&idx| &self.rows[idx])
            .collect()
    }

    /// Rows between `a` and `b` from either side, most recent first, at most `n`.
    pub fn recent_between(&self, a: &str, b: &str, n: usize) -> Vec<&MatchRecord> {
        let (Some(a), Some(b)) = (self.team_id(a), self.team_id(b)) else {
            return Vec::new();
        };

        let mut positions: Vec<usize> = self
            .positions(a)
            .iter()
            .filter(|&&idx| self.rows[idx].opponent == b)
            .chain(
                self.positions(b)
                    .iter()
                    .filter(|&&idx| self.rows[idx].opponent == a),
            )
            .copied()
            .collect();
        positions.sort_unstable();
        positions.dedup();

        positions
            .into_iter()
            .take(n)
            .map(|idx| &self.rows[idx])
            .collect()
    }

    fn positions(&self, id: TeamId) -> &[usize] {
        self.by_team.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}
