//! Rule-based outcome scoring
//!
//! Each side earns a point per recent win, one for out-scoring what the other
//! side concedes, one for the higher xG average, and one per head-to-head win.
//! A lead of [`DECISIVE_MARGIN`] points or more picks a winner.

use crate::form::FormSnapshot;
use crate::h2h::HeadToHead;

/// Score lead needed to call a winner
pub const DECISIVE_MARGIN: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    HomeWin,
    AwayWin,
    Draw,
}

/// Points each side collected and the resulting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub home: i64,
    pub away: i64,
}

impl Score {
    pub fn diff(&self) -> i64 {
        self.home - self.away
    }

    pub fn verdict(&self) -> Verdict {
        let diff = self.diff();
        if diff >= DECISIVE_MARGIN {
            Verdict::HomeWin
        } else if diff <= -DECISIVE_MARGIN {
            Verdict::AwayWin
        } else {
            Verdict::Draw
        }
    }
}

fn point(cond: bool) -> i64 {
    i64::from(cond)
}

/// Comparisons with NaN averages are false and earn nothing.
pub fn score(home: &FormSnapshot, away: &FormSnapshot, h2h: &HeadToHead) -> Score {
    let home_score = i64::from(home.wins)
        + point(home.avg_goals_for > away.avg_goals_against)
        + point(home.avg_expected_goals > away.avg_expected_goals)
        + i64::from(h2h.home_wins);
    let away_score = i64::from(away.wins)
        + point(away.avg_goals_for > home.avg_goals_against)
        + point(away.avg_expected_goals > home.avg_expected_goals)
        + i64::from(h2h.away_wins);

    Score {
        home: home_score,
        away: away_score,
    }
}

/// Verdict for a named fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub home_team: String,
    pub away_team: String,
    pub verdict: Verdict,
    pub score: Score,
}

impl Prediction {
    /// Winning team, if any
    pub fn winner(&self) -> Option<&str> {
        match self.verdict {
            Verdict::HomeWin => Some(self.home_team.as_str()),
            Verdict::AwayWin => Some(self.away_team.as_str()),
            Verdict::Draw => None,
        }
    }

    /// `"<Team> to win"` or `"Draw"`
    pub fn label(&self) -> String {
        match self.winner() {
            Some(team) => format!("{team} to win"),
            None => "Draw".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(wins: u32, gf: f64, ga: f64, xg: f64) -> FormSnapshot {
        FormSnapshot {
            matches: 5,
            wins,
            draws: 5 - wins,
            losses: 0,
            avg_goals_for: gf,
            avg_goals_against: ga,
            avg_expected_goals: xg,
        }
    }

    fn empty() -> FormSnapshot {
        FormSnapshot::from_rows(&[])
    }

    #[test]
    fn adds_up_every_component() {
        let home = form(3, 2.0, 0.5, 1.9);
        let away = form(1, 1.0, 1.5, 1.1);
        let h2h = HeadToHead {
            matches: 4,
            home_wins: 2,
            away_wins: 1,
            draws: 0,
        };
        let s = score(&home, &away, &h2h);
        // 3 wins + (2.0 > 1.5) + (1.9 > 1.1) + 2
        assert_eq!(s.home, 7);
        // 1 win + (1.0 > 0.5) + 0 + 1
        assert_eq!(s.away, 3);
        assert_eq!(s.verdict(), Verdict::HomeWin);
    }

    #[test]
    fn margin_boundaries() {
        assert_eq!(Score { home: 5, away: 3 }.verdict(), Verdict::HomeWin);
        assert_eq!(Score { home: 4, away: 3 }.verdict(), Verdict::Draw);
        assert_eq!(Score { home: 3, away: 4 }.verdict(), Verdict::Draw);
        assert_eq!(Score { home: 3, away: 5 }.verdict(), Verdict::AwayWin);
    }

    #[test]
    fn nan_averages_never_score() {
        let known = form(2, 1.5, 1.0, 1.3);
        let s = score(&known, &empty(), &HeadToHead::default());
        assert_eq!(s, Score { home: 2, away: 0 });

        let s = score(&empty(), &empty(), &HeadToHead::default());
        assert_eq!(s.verdict(), Verdict::Draw);
    }

    #[test]
    fn labels_name_the_winner() {
        let mut p = Prediction {
            home_team: "Arsenal".into(),
            away_team: "Chelsea".into(),
            verdict: Verdict::HomeWin,
            score: Score { home: 6, away: 2 },
        };
        assert_eq!(p.label(), "Arsenal to win");
        p.verdict = Verdict::AwayWin;
        assert_eq!(p.label(), "Chelsea to win");
        p.verdict = Verdict::Draw;
        assert_eq!(p.label(), "Draw");
        assert_eq!(p.winner(), None);
    }
}
