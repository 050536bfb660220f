use anyhow::{Context, Result};
use platform_db::DatabaseSettings;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Build the configuration from the process environment, after merging in
    /// a `.env` file when one is present.
    pub fn load() -> Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err).context("failed to read .env");
            }
        }

        let database = DatabaseSettings::from_env();
        let cors_allowed_origins = parse_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
        );

        Ok(Self {
            database,
            cors_allowed_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        let parsed = parse_origins(" http://a.test, ,http://b.test ,");
        assert_eq!(parsed, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn empty_origin_list_parses_to_nothing() {
        assert!(parse_origins("").is_empty());
    }
}
