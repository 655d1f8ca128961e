use std::path::PathBuf;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;
use crate::filter::StatusFilter;
use crate::models::{Identity, IdentityError};

pub const DEFAULT_LOG_FILE: &str = "employee-projects.log";

/// Configuration read from the environment
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: Option<String>,
    /// Employee whose projects are shown when `--employee` is not given
    pub employee_id: Option<String>,
    /// Where log output is written
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("no employee id given; pass --employee or set EMPLOYEE_ID")]
    MissingEmployee,
    #[error("invalid employee id: {0}")]
    InvalidEmployee(#[from] IdentityError),
    #[error("no data source; pass --fixture or set DATABASE_URL")]
    MissingSource,
}

/// Where project records are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSettings {
    Database { url: String },
    Fixture { path: PathBuf },
}

/// Command line and environment merged into what the app runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub identity: Identity,
    pub source: SourceSettings,
    pub log_file: PathBuf,
    pub search: String,
    pub status_filter: StatusFilter,
}

impl Settings {
    /// Command line values win over environment values.
    pub fn resolve(cli: Cli, config: Config) -> Result<Self, SettingsError> {
        let employee = cli
            .employee
            .or(config.employee_id)
            .ok_or(SettingsError::MissingEmployee)?;
        let identity = employee.parse::<Identity>()?;

        let source = match (cli.fixture, config.database_url) {
            (Some(path), _) => SourceSettings::Fixture { path },
            (None, Some(url)) => SourceSettings::Database { url },
            (None, None) => return Err(SettingsError::MissingSource),
        };

        let log_file = cli
            .log_file
            .or(config.log_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self {
            identity,
            source,
            log_file,
            search: cli.search.unwrap_or_default(),
            status_filter: cli.status.unwrap_or_default(),
        })
    }
}

/// Load the environment and merge it with the command line
pub fn init(cli: Cli) -> Result<Settings> {
    let config = Config::load()?;
    let settings = Settings::resolve(cli, config)?;
    Ok(settings)
}
