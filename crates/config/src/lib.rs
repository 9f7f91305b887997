//! Configuration management for slotlens
//!
//! This crate provides functionality for managing the slotlens configuration,
//! including loading, saving, updating, and deleting configuration settings.

/// Error types for the configuration module
pub mod error;

use crate::error::Error;
use clap::Parser;
use serde::{Deserialize, Serialize};
use slotlens_common::utils::io::file::{delete_path, read_file, write_file};
#[allow(deprecated)]
use std::env::home_dir;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Default TTL for cached analysis results, in seconds.
const DEFAULT_CACHE_TTL: u64 = 300;

/// Command line arguments for the configuration command
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Display and edit the current configuration",
    after_help = "For more information, read the wiki: https://github.com/slotlens/slotlens/wiki",
    override_usage = "slotlens config [OPTIONS]"
)]
pub struct ConfigArgs {
    /// The target key to update.
    #[clap(required = false, default_value = "")]
    key: String,

    /// The value to set the key to.
    #[clap(required = false, default_value = "")]
    value: String,
}

/// The [`Configuration`] struct represents the configuration of the CLI. Command handlers
/// fall back to these values whenever an argument is left unset.
#[derive(Deserialize, Serialize, Debug)]
pub struct Configuration {
    /// The URL for the Ethereum RPC endpoint
    pub rpc_url: String,

    /// The URL for a local Ethereum RPC endpoint
    pub local_rpc_url: String,

    /// The base URL of the block-explorer API used for ABI lookups
    pub explorer_api_url: String,

    /// The API key for the block-explorer API
    pub explorer_api_key: String,

    /// How long cached analysis results stay fresh, in seconds
    pub cache_ttl: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            rpc_url: "".to_string(),
            local_rpc_url: "http://localhost:8545".to_string(),
            explorer_api_url: "https://api.etherscan.io/api".to_string(),
            explorer_api_key: "".to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Resolve the configuration file path, ~/.slotlens/config.toml
#[allow(deprecated)]
fn config_path() -> Result<PathBuf, Error> {
    let home = home_dir().ok_or_else(|| {
        Error::Generic(
            "failed to get home directory. does your os support `std::env::home_dir()`?"
                .to_string(),
        )
    })?;
    Ok(home.join(".slotlens").join("config.toml"))
}

impl Configuration {
    /// Returns the current configuration.
    pub fn load() -> Result<Self, Error> {
        let path = config_path()?;

        // if the config file doesn't exist, create it
        if !path.exists() {
            let config = Configuration::default();
            config.save()?;
        }

        // read the config file
        let contents = read_file(
            path.to_str()
                .ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))?,
        )
        .map_err(|e| Error::Generic(format!("failed to read config file: {e}")))?;

        // parse the config file
        let mut config: Configuration = toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))?;

        // load mesc config if enabled
        if !mesc::is_mesc_enabled() {
            return Ok(config);
        }

        if let Some(endpoint) = mesc::get_default_endpoint(Some("slotlens"))? {
            debug!("overriding rpc_url with mesc endpoint");
            config.rpc_url = endpoint.url;
        }
        if let Some(key) = mesc::metadata::get_api_key("etherscan", Some("slotlens"))? {
            debug!("overriding explorer_api_key with mesc key");
            config.explorer_api_key = key;
        }

        Ok(config)
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> Result<(), Error> {
        let path = config_path()?;

        write_file(
            path.to_str()
                .ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))?,
            &toml::to_string(&self)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?,
        )
        .map_err(|e| Error::Generic(format!("failed to write config file: {e}")))?;

        Ok(())
    }

    /// Deletes the configuration file at `$HOME/.slotlens/config.toml`.
    pub fn delete() -> Result<(), Error> {
        let path = config_path()?;

        delete_path(
            path.to_str()
                .ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))?,
        );

        Ok(())
    }

    /// Update a single key/value pair in the configuration.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        // update the key in the struct and ensure it's the correct type
        match key {
            "rpc_url" => {
                self.rpc_url = value.to_string();
            }
            "local_rpc_url" => {
                self.local_rpc_url = value.to_string();
            }
            "explorer_api_url" => {
                self.explorer_api_url = value.to_string();
            }
            "explorer_api_key" => {
                self.explorer_api_key = value.to_string();
            }
            "cache_ttl" => {
                self.cache_ttl = value.parse::<u64>().map_err(|_| {
                    Error::ParseError(format!("invalid cache_ttl: \'{value}\' is not a number"))
                })?;
            }
            _ => {
                return Err(Error::Generic(format!(
                    "invalid key: \'{key}\' is not a valid configuration key."
                )))
            }
        }

        // write the updated config to disk
        self.save()?;

        Ok(())
    }
}

/// The `config` command is used to display and edit the current configuration.
pub fn config(args: ConfigArgs) -> Result<(), Error> {
    if !args.key.is_empty() {
        if !args.value.is_empty() {
            // read the config file and update the key/value pair
            let mut config = Configuration::load()?;
            config.update(&args.key, &args.value)?;
            info!("updated configuration! Set \'{}\' = \'{}\' .", &args.key, &args.value);
        } else {
            // key is set, but no value is set
            error!("found key but no value to set. Please specify a value to set, use `slotlens config --help` for more information.");
        }
    } else {
        // no key is set, print the config file
        println!("{:#?}", Configuration::load()?);
        info!("use `slotlens config <KEY> <VALUE>` to set a key/value pair.");
    }

    Ok(())
}

/// Parse user input --rpc-url into a full url
pub fn parse_url_arg(url: &str) -> Result<String, String> {
    if mesc::is_mesc_enabled() {
        if let Ok(Some(endpoint)) = mesc::get_endpoint_by_query(url, Some("slotlens")) {
            return Ok(endpoint.url);
        }
    }
    Ok(url.to_string())
}
