//! Recent form of a single team

use crate::store::{MatchHistoryStore, MatchRecord, MatchResult};

/// Form over a team's most recent matches.
///
/// Averages are NaN when no rows were considered (or, for xG, when none of
/// them carried a value). NaN compares false against everything, so callers
/// can compare freely.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    /// Rows actually considered, at most the requested window
    pub matches: usize,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub avg_goals_for: f64,
    pub avg_goals_against: f64,
    pub avg_expected_goals: f64,
}

impl FormSnapshot {
    pub fn from_rows(rows: &[&MatchRecord]) -> Self {
        let mut snap = FormSnapshot {
            matches: rows.len(),
            wins: 0,
            draws: 0,
            losses: 0,
            avg_goals_for: f64::NAN,
            avg_goals_against: f64::NAN,
            avg_expected_goals: f64::NAN,
        };

        for row in rows {
            match row.result {
                MatchResult::Win => snap.wins += 1,
                MatchResult::Draw => snap.draws += 1,
                MatchResult::Loss => snap.losses += 1,
            }
        }

        snap.avg_goals_for = mean(rows.iter().map(|r| r.goals_for as f64));
        snap.avg_goals_against = mean(rows.iter().map(|r| r.goals_against as f64));
        snap.avg_expected_goals = mean(rows.iter().filter_map(|r| r.expected_goals));
        snap
    }

    pub fn has_data(&self) -> bool {
        self.matches > 0
    }
}

/// NaN for an empty input.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Form over `team`'s `n` most recent matches. Unknown teams get an empty snapshot.
pub fn team_form(store: &MatchHistoryStore, team: &str, n: usize) -> FormSnapshot {
    FormSnapshot::from_rows(&store.recent_for_team(team, n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 8, d).unwrap()
    }

    fn store() -> MatchHistoryStore {
        let mut b = MatchHistoryStore::builder();
        b.fixture(day(1), "Spurs", "Fulham", (3, 0), (Some(2.5), Some(0.3)))
            .fixture(day(8), "Leeds", "Spurs", (1, 1), (Some(1.0), None))
            .fixture(day(15), "Spurs", "Wolves", (0, 2), (Some(0.8), Some(1.6)))
            .fixture(day(22), "Brighton", "Spurs", (1, 2), (Some(1.2), Some(1.4)));
        b.build()
    }

    #[test]
    fn counts_and_averages_over_window() {
        let snap = team_form(&store(), "Spurs", 3);
        assert_eq!(snap.matches, 3);
        assert_eq!((snap.wins, snap.draws, snap.losses), (1, 1, 1));
        // 2 + 0 + 1 scored, 1 + 2 + 1 conceded
        assert!((snap.avg_goals_for - 1.0).abs() < 1e-9);
        assert!((snap.avg_goals_against - 4.0 / 3.0).abs() < 1e-9);
        // Leeds row has no xG for Spurs
        assert!((snap.avg_expected_goals - 1.1).abs() < 1e-9);
    }

    #[test]
    fn short_history_uses_what_exists() {
        let snap = team_form(&store(), "Spurs", 10);
        assert_eq!(snap.matches, 4);
        assert_eq!(snap.wins + snap.draws + snap.losses, 4);
    }

    #[test]
    fn unknown_team_is_empty_with_nan_averages() {
        let snap = team_form(&store(), "Sunderland", 5);
        assert!(!snap.has_data());
        assert_eq!((snap.wins, snap.draws, snap.losses), (0, 0, 0));
        assert!(snap.avg_goals_for.is_nan());
        assert!(snap.avg_goals_against.is_nan());
        assert!(snap.avg_expected_goals.is_nan());
    }

    #[test]
    fn xg_average_is_nan_when_no_row_has_it() {
        let mut b = MatchHistoryStore::builder();
        b.fixture(day(1), "A", "B", (1, 0), (None, None));
        let snap = team_form(&b.build(), "A", 5);
        assert_eq!(snap.wins, 1);
        assert!((snap.avg_goals_for - 1.0).abs() < 1e-9);
        assert!(snap.avg_expected_goals.is_nan());
    }
}
