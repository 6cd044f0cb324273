//! Text blocks shown next to a prediction

use crate::form::FormSnapshot;
use crate::h2h::HeadToHead;

pub const NO_H2H_DATA: &str = "No recent head-to-head match data available.";

/// Two decimals; averages with no data render as `0.00`.
fn avg(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        "0.00".to_string()
    }
}

/// ```text
/// <Team> - Last <K> Matches:
/// - Wins: <w>, Draws: <d>, Losses: <l>
/// - Avg Goals Scored: <gf>, Avg Goals Conceded: <ga>
/// ```
pub fn form_block(team: &str, form: &FormSnapshot) -> String {
    format!(
        "{team} - Last {k} Matches:\n- Wins: {w}, Draws: {d}, Losses: {l}\n- Avg Goals Scored: {gf}, Avg Goals Conceded: {ga}",
        k = form.matches,
        w = form.wins,
        d = form.draws,
        l = form.losses,
        gf = avg(form.avg_goals_for),
        ga = avg(form.avg_goals_against),
    )
}

pub fn h2h_block(home: &str, away: &str, h2h: &HeadToHead) -> String {
    if h2h.is_empty() {
        return NO_H2H_DATA.to_string();
    }
    format!(
        "Head-to-Head ({home} vs {away}) - Last {k} Matches:\n- {home} Wins: {hw}, {away} Wins: {aw}, Draws: {d}",
        k = h2h.matches,
        hw = h2h.home_wins,
        aw = h2h.away_wins,
        d = h2h.draws,
    )
}

/// One paragraph built from the record line of each form block, the last line
/// of the head-to-head block and the lower-cased prediction label.
pub fn discussion(
    home: &str,
    away: &str,
    home_block: &str,
    away_block: &str,
    h2h_block: &str,
    prediction_label: &str,
) -> String {
    let home_line = home_block.lines().nth(1).unwrap_or_default();
    let away_line = away_block.lines().nth(1).unwrap_or_default();
    let h2h_line = h2h_block.lines().last().unwrap_or_default();

    format!(
        "{home} comes into this fixture with {home_line}. \
         {away} shows {away_line}. \
         The head-to-head record suggests: {h2h_line}. \
         Considering form and past performance, this match is predicted to end in: {}.",
        prediction_label.to_lowercase()
    )
}
