//! Head-to-head record between two teams

use crate::store::{MatchHistoryStore, MatchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadToHead {
    /// Rows considered. Each real match contributes up to two.
    pub matches: usize,
    pub home_wins: u32,
    pub away_wins: u32,
    /// Every drawn row in the window, so a fully visible draw counts twice.
    pub draws: u32,
}

impl HeadToHead {
    pub fn is_empty(&self) -> bool {
        self.matches == 0
    }
}

/// Head-to-head over the `n` most recent rows between `home` and `away`.
pub fn head_to_head(store: &MatchHistoryStore, home: &str, away: &str, n: usize) -> HeadToHead {
    let rows = store.recent_between(home, away, n);
    let mut h2h = HeadToHead {
        matches: rows.len(),
        ..HeadToHead::default()
    };
    if rows.is_empty() {
        return h2h;
    }

    // Both ids exist, otherwise the selection would be empty.
    let home_id = store.team_id(home);
    let away_id = store.team_id(away);

    for row in rows {
        match row.result {
            MatchResult::Win if Some(row.team) == home_id => h2h.home_wins += 1,
            MatchResult::Win if Some(row.team) == away_id => h2h.away_wins += 1,
            MatchResult::Draw => h2h.draws += 1,
            _ => {}
        }
    }
    h2h
}
