//! # API Configuration
//!
//! Environment-based configuration for the query service.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use axum::http::HeaderValue;
use gtd_dataset::TextEncoding;
use gtd_domain::VarianceAssumption;

use crate::error::{ApiError, ApiResult};

/// Default archive name, resolved relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "globalterrorismdb_0718dist.zip";

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub server_addr: SocketAddr,

    /// Dataset archive location
    pub dataset_path: PathBuf,

    /// Text encoding of the CSV inside the archive
    pub dataset_encoding: TextEncoding,

    /// Number of countries in the EDA ranking
    pub top_countries_limit: usize,

    /// Rows returned by the sample endpoint
    pub sample_rows: usize,

    /// Variance assumption of the weapon usage t-test
    pub hypothesis_variance: VarianceAssumption,

    /// Enable GraphQL Playground
    pub enable_playground: bool,

    /// Maximum query depth
    pub max_query_depth: usize,

    /// Maximum query complexity
    pub max_query_complexity: usize,

    /// Logging level
    pub log_level: String,

    /// CORS allowed origins; `*` allows any
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidConfig`] naming the first variable that fails to parse.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup; unset keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidConfig`] naming the first variable that fails to parse.
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => parse_origins(&raw)?,
            None => defaults.cors_origins,
        };

        Ok(Self {
            server_addr: parse_or(&lookup, "SERVER_ADDR", defaults.server_addr)?,
            dataset_path: lookup("DATASET_PATH").map_or(defaults.dataset_path, PathBuf::from),
            dataset_encoding: parse_or(&lookup, "DATASET_ENCODING", defaults.dataset_encoding)?,
            top_countries_limit: parse_or(
                &lookup,
                "TOP_COUNTRIES_LIMIT",
                defaults.top_countries_limit,
            )?,
            sample_rows: parse_or(&lookup, "SAMPLE_ROWS", defaults.sample_rows)?,
            hypothesis_variance: parse_or(
                &lookup,
                "HYPOTHESIS_VARIANCE",
                defaults.hypothesis_variance,
            )?,
            enable_playground: parse_or(
                &lookup,
                "ENABLE_PLAYGROUND",
                defaults.enable_playground,
            )?,
            max_query_depth: parse_or(&lookup, "MAX_QUERY_DEPTH", defaults.max_query_depth)?,
            max_query_complexity: parse_or(
                &lookup,
                "MAX_QUERY_COMPLEXITY",
                defaults.max_query_complexity,
            )?,
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            cors_origins,
        })
    }

    /// True when any origin may call the API.
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            dataset_encoding: TextEncoding::Latin1,
            top_countries_limit: 10,
            sample_rows: 10,
            hypothesis_variance: VarianceAssumption::Pooled,
            enable_playground: true,
            max_query_depth: 10,
            max_query_complexity: 1000,
            log_level: "info".to_string(),
            cors_origins: vec!["*".to_string()],
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> ApiResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ApiError::InvalidConfig(format!("{key}={raw}: {e}"))),
        None => Ok(default),
    }
}

fn parse_origins(raw: &str) -> ApiResult<Vec<String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|origin| {
            if origin != "*" {
                HeaderValue::from_str(origin).map_err(|e| {
                    ApiError::InvalidConfig(format!("CORS_ORIGINS={origin}: {e}"))
                })?;
            }
            Ok(origin.to_string())
        })
        .collect()
}
