use std::net::SocketAddr;
use anyhow::Context;

pub const DEFAULT_DATA_URL: &str = "https://raw.githubusercontent.com/AwalDinz/crypto-datasets/main/crypto_top1000_dataset.csv";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:7575";

#[derive(Debug, Clone)]
pub struct Config {
  /// `http(s)://` URL or a local path of the CSV.
  pub data_url: String,
  pub bind_addr: SocketAddr,
  /// Allowed browser origin; any origin when unset.
  pub cors_origin: Option<String>,
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    // dotenvy loads .env, but doesn't override already-set env vars
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
    let data_url = lookup("DATA_URL").unwrap_or_else(|| DEFAULT_DATA_URL.to_string());
    let bind_addr = lookup("BIND_ADDR")
      .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
      .parse::<SocketAddr>()
      .context("BIND_ADDR must be a socket address like 0.0.0.0:7575")?;
    let cors_origin = lookup("CORS_ORIGIN").filter(|o| !o.is_empty());

    Ok(Self { data_url, bind_addr, cors_origin })
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;
  use super::*;

  fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<HashMap<_, _>>();
    move |key| vars.get(key).cloned()
  }

  #[test]
  fn defaults() {
    let config = Config::from_lookup(lookup(&[])).expect("defaults are valid");
    assert_eq!(config.data_url, DEFAULT_DATA_URL);
    assert_eq!(config.bind_addr.port(), 7575);
    assert_eq!(config.cors_origin, None);
  }

  #[test]
  fn overrides() {
    let config = Config::from_lookup(lookup(&[
      ("DATA_URL", "data/top1000.csv"),
      ("BIND_ADDR", "127.0.0.1:8080"),
      ("CORS_ORIGIN", "http://localhost:8080"),
    ])).expect("valid overrides");
    assert_eq!(config.data_url, "data/top1000.csv");
    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
    assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:8080"));
  }

  #[test]
  fn bad_bind_addr() {
    assert!(Config::from_lookup(lookup(&[("BIND_ADDR", "localhost")])).is_err());
  }
}
