//! Runtime configuration: command-line flags with environment fallbacks.
//!
//! A `.env` file in the working directory is loaded before parsing, so any
//! `POKE*` variable can live there.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use reqwest::Url;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone, Parser)]
#[command(name = "pokemon-arena", about = "Pick two Pokémon and compare them in the Battle Arena")]
pub struct Cli {
    /// Base URL of the PokéAPI instance
    #[arg(long, env = "POKEAPI_BASE_URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// How many Pokémon to request from the index endpoint
    #[arg(long, env = "POKEMON_LIMIT", default_value_t = 151)]
    pub limit: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "POKEMON_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Maximum number of detail requests in flight (unbounded when unset)
    #[arg(long, env = "POKEMON_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Write logs to this file while the terminal UI is running
    #[arg(long, env = "POKEMON_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Fetch the roster, print it as JSON and exit
    #[arg(long)]
    pub json: bool,
}

/// Settings consumed by the roster fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub api_base: String,
    pub limit: usize,
    pub timeout: Duration,
    pub concurrency: Option<usize>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            limit: 151,
            timeout: Duration::from_secs(10),
            concurrency: None,
        }
    }
}

impl FetchConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Self {
            api_base: cli.api_base.trim_end_matches('/').to_string(),
            limit: cli.limit,
            timeout: Duration::from_secs(cli.timeout_secs),
            concurrency: cli.concurrency,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_base)
            .with_context(|| format!("Invalid API base URL: {}", self.api_base))?;
        if self.limit == 0 {
            bail!("POKEMON_LIMIT must be at least 1");
        }
        if self.timeout.is_zero() {
            bail!("POKEMON_TIMEOUT_SECS must be at least 1");
        }
        if self.concurrency == Some(0) {
            bail!("POKEMON_CONCURRENCY must be at least 1 when set");
        }
        Ok(())
    }

    /// URL of the paginated list of Pokémon names.
    pub fn index_url(&self) -> String {
        format!(
            "{}/pokemon?limit={}",
            self.api_base.trim_end_matches('/'),
            self.limit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["pokemon-arena"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_index_url_uses_limit() {
        let config = FetchConfig {
            api_base: "https://pokeapi.co/api/v2/".to_string(),
            limit: 20,
            ..FetchConfig::default()
        };
        assert_eq!(
            config.index_url(),
            "https://pokeapi.co/api/v2/pokemon?limit=20"
        );
    }

    #[test]
    fn test_from_cli_flags() {
        let cli = parse(&[
            "--api-base",
            "http://localhost:8000/api/v2/",
            "--limit",
            "9",
            "--timeout-secs",
            "3",
            "--concurrency",
            "4",
        ]);
        let config = FetchConfig::from_cli(&cli).unwrap();
        assert_eq!(config.api_base, "http://localhost:8000/api/v2");
        assert_eq!(config.limit, 9);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.concurrency, Some(4));
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_url = FetchConfig {
            api_base: "not a url".to_string(),
            ..FetchConfig::default()
        };
        assert!(bad_url.validate().is_err());

        let zero_limit = FetchConfig {
            limit: 0,
            ..FetchConfig::default()
        };
        assert!(zero_limit.validate().is_err());

        let zero_workers = FetchConfig {
            concurrency: Some(0),
            ..FetchConfig::default()
        };
        assert!(zero_workers.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let cli = parse(&["--timeout-secs", "0"]);
        let err = FetchConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("POKEMON_TIMEOUT_SECS"));
    }
}
