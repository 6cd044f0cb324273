use anyhow::{Context, Result};
use dotenv::dotenv;
use prediction_engine::{MatchHistoryStore, DEFAULT_MATCHES_PATH};
use std::collections::{HashMap, HashSet};

fn main() -> Result<()> {
    dotenv().ok();

    let path = std::env::var("MATCHES_CSV_PATH")
        .unwrap_or_else(|_| DEFAULT_MATCHES_PATH.to_string());
    let store = MatchHistoryStore::from_csv_path(&path)
        .with_context(|| format!("load match history from {path}"))?;

    println!("path={path}");
    println!("rows: {}", store.row_count());
    println!("teams: {}", store.team_count());
    match store.date_range() {
        Some((first, last)) => println!("dates: {first} .. {last}"),
        None => println!("dates: <none>"),
    }

    let mut per_team: HashMap<&str, usize> = HashMap::new();
    for row in store.rows() {
        *per_team.entry(store.team_name(row.team)).or_default() += 1;
    }
    // every match should appear once from each side
    let keys: HashSet<_> = store
        .rows()
        .iter()
        .map(|r| (r.date, r.team, r.opponent, r.result))
        .collect();
    let unpaired = store
        .rows()
        .iter()
        .filter(|r| !keys.contains(&(r.date, r.opponent, r.team, r.result.mirror())))
        .count();

    // first-seen order, as in the file
    for team in store.team_names() {
        let count = per_team.get(team).copied().unwrap_or(0);
        println!("{team:?}: {count}");
    }
    println!("rows without a mirrored row: {unpaired}");

    Ok(())
}
