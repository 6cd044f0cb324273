use anyhow::{Context, Result};
pub use prediction_engine::DEFAULT_MATCHES_PATH;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    pub matches_path: PathBuf,
    pub log_dir: PathBuf,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind = get("PREDICT_API_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind
            .parse()
            .with_context(|| format!("Invalid PREDICT_API_BIND {bind:?}"))?;

        let matches_path = get("MATCHES_CSV_PATH")
            .unwrap_or_else(|| DEFAULT_MATCHES_PATH.to_string())
            .into();
        let log_dir = get("PREDICT_LOG_DIR")
            .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())
            .into();

        Ok(Self {
            bind,
            matches_path,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bind, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.matches_path, PathBuf::from(DEFAULT_MATCHES_PATH));
        assert_eq!(cfg.log_dir, PathBuf::from(DEFAULT_LOG_DIR));
    }

    #[test]
    fn overrides_are_read() {
        let cfg = ApiConfig::from_lookup(lookup(&[
            ("PREDICT_API_BIND", "127.0.0.1:9100"),
            ("MATCHES_CSV_PATH", "/data/matches.csv"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind.port(), 9100);
        assert_eq!(cfg.matches_path, PathBuf::from("/data/matches.csv"));
    }

    #[test]
    fn bad_bind_is_rejected() {
        let err = ApiConfig::from_lookup(lookup(&[("PREDICT_API_BIND", "localhost")])).unwrap_err();
        assert!(err.to_string().contains("PREDICT_API_BIND"));
    }
}
