//! CLI command implementations
//!
//! The data bank path in the config is relative to the process working
//! directory, matching how the server resolves it at startup.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::MangaDto;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::Logger;
use crate::repository::MangaRepository;
use crate::service::MangaService;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Environment variable overriding `data_bank`
pub const DATA_BANK_ENV: &str = "MANGALIB_DATA_BANK";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data bank file, relative to the working directory. Empty disables
    /// persistence; created records then live in memory only.
    #[serde(default, alias = "dataBank")]
    pub data_bank: String,

    #[serde(default)]
    pub http: HttpServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_bank: "data/mangas.json".to_string(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, then apply the environment override
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_json(&content)?;
        if let Ok(data_bank) = std::env::var(DATA_BANK_ENV) {
            config.data_bank = data_bank;
        }
        Ok(config)
    }

    pub fn from_json(content: &str) -> CliResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Open the repository this config points at, relative to `base_dir`
    pub fn open_repository(&self, base_dir: &Path) -> CliResult<MangaRepository> {
        Ok(MangaRepository::open(&self.data_bank, base_dir)?)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Command::Init { config } => init(&config, &cwd),
        Command::Serve { config, port } => serve(&config, port, &cwd),
        Command::List { config } => list(&config, &cwd),
    }
}

/// Write a default config if none exists, then create an empty data bank.
///
/// Fails if the data bank already exists so existing records are never
/// overwritten.
pub fn init(config_path: &Path, base_dir: &Path) -> CliResult<()> {
    let config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        let config = Config::default();
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(config_path, serde_json::to_string_pretty(&config)?)?;
        config
    };

    if config.data_bank.trim().is_empty() {
        return Err(CliError::config_error(
            "data_bank is empty; nothing to initialize",
        ));
    }

    let data_bank = base_dir.join(config.data_bank.trim());
    if data_bank.exists() {
        return Err(CliError::already_initialized(data_bank.display()));
    }
    if let Some(parent) = data_bank.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&data_bank, "[]")?;

    let path = data_bank.display().to_string();
    Logger::info("DATA_BANK_CREATED", &[("path", path.as_str())]);
    Ok(())
}

/// Open the store and serve HTTP until stopped
pub fn serve(config_path: &Path, port: Option<u16>, base_dir: &Path) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let repository = Arc::new(config.open_repository(base_dir)?);
    let server = HttpServer::new(config.http.clone(), MangaService::new(repository));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print every record, in transfer shape, and exit
pub fn list(config_path: &Path, base_dir: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let repository = config.open_repository(base_dir)?;

    let dtos: Vec<MangaDto> = repository.list().iter().map(MangaDto::from).collect();
    write_response(serde_json::to_value(dtos)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults_and_legacy_key() {
        let config = Config::from_json(r#"{"dataBank": "Data/mangas.json"}"#).unwrap();
        assert_eq!(config.data_bank, "Data/mangas.json");
        assert_eq!(config.http, HttpServerConfig::default());

        let config = Config::from_json("{}").unwrap();
        assert!(config.data_bank.is_empty());
    }

    #[test]
    fn test_config_invalid_json() {
        let err = Config::from_json("{data_bank:").unwrap_err();
        assert!(err.to_string().starts_with("MANGALIB_CLI_CONFIG_ERROR"));
    }

    #[test]
    fn test_init_writes_config_and_empty_bank() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("mangalib.json");

        init(&config_path, temp.path()).unwrap();

        let config = Config::from_json(&fs::read_to_string(&config_path).unwrap()).unwrap();
        assert_eq!(config, Config::default());

        let bank = temp.path().join("data/mangas.json");
        assert_eq!(fs::read_to_string(&bank).unwrap(), "[]");

        let repo = config.open_repository(temp.path()).unwrap();
        assert!(repo.list().is_empty());
    }

    #[test]
    fn test_init_refuses_existing_bank() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("mangalib.json");
        fs::write(&config_path, r#"{"data_bank": "bank.json"}"#).unwrap();
        fs::write(temp.path().join("bank.json"), "[]").unwrap();

        let err = init(&config_path, temp.path()).unwrap_err();
        assert_eq!(err.code(), &crate::cli::CliErrorCode::AlreadyInitialized);
    }
}
