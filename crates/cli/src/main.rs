pub(crate) mod error;
pub(crate) mod log_args;
pub(crate) mod output;

use error::Error;
use log_args::LogArgs;
use output::{build_output_path, print_with_less};
use tracing::debug;

use clap::{Parser, Subcommand};

use slotlens_cache::{cache, read_cache, store_cache, CacheArgs};
use slotlens_common::{constants::ADDRESS_REGEX, utils::io::file::write_file};
use slotlens_config::{config, ConfigArgs, Configuration};
use slotlens_inspect::{inspect, read_slots, InspectArgs, SlotsArgs};

/// TTL for cached results produced with a caller-supplied ABI or storage
/// layout, in seconds. Those results are caller-specific, so they expire
/// much sooner than the configured default.
const VOLATILE_CACHE_TTL: u64 = 60;

#[derive(Debug, Parser)]
#[clap(name = "slotlens", version)]
pub struct Arguments {
    #[clap(subcommand)]
    pub sub: Subcommands,

    #[clap(flatten)]
    logs: LogArgs,
}

#[derive(Debug, Subcommand)]
#[clap(
    about = "Slotlens inspects the persistent storage of deployed contracts, decoding raw slots into typed state variables.",
    after_help = "For more information, read the wiki: https://github.com/slotlens/slotlens/wiki"
)]
#[allow(clippy::large_enum_variant)]
pub enum Subcommands {
    #[clap(
        name = "inspect",
        about = "Analyze the storage of a contract, reconstructing its state variables"
    )]
    Inspect(InspectArgs),

    #[clap(name = "slots", about = "Read specific storage slots of a contract")]
    Slots(SlotsArgs),

    #[clap(name = "config", about = "Display and edit the current configuration")]
    Config(ConfigArgs),

    #[clap(name = "cache", about = "Manage slotlens' cached objects")]
    Cache(CacheArgs),
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Arguments::parse();

    // setup logging
    let _ = args.logs.init_tracing();

    let configuration = Configuration::load()
        .map_err(|e| Error::Generic(format!("failed to load configuration: {}", e)))?;
    match args.sub {
        Subcommands::Inspect(mut cmd) => {
            // if the user has not specified a rpc url, use the default
            if cmd.rpc_url.as_str() == "" {
                cmd.rpc_url = configuration.rpc_url;
            }

            // same for the explorer endpoint and key
            if cmd.explorer_api_url.as_str() == "" {
                cmd.explorer_api_url = configuration.explorer_api_url;
            }
            if cmd.explorer_api_key.as_str() == "" {
                cmd.explorer_api_key = configuration.explorer_api_key;
            }

            if !ADDRESS_REGEX.is_match(&cmd.target).unwrap_or(false) {
                return Err(Error::Generic(format!(
                    "invalid target address: '{}'",
                    cmd.target
                )));
            }

            // if the user has passed an output filename, override the default filename
            let mut filename: String = "contract_storage.json".to_string();
            let given_name = cmd.name.as_str();

            if !given_name.is_empty() {
                filename = format!("{}-{}", given_name, filename);
            }

            // results are cached as rendered JSON, keyed by normalized address
            // and block height. runs with a caller-supplied ABI or layout
            // bypass the cache read and store with the shorter TTL.
            let block_tag =
                cmd.block.map(|b| b.to_string()).unwrap_or_else(|| "latest".to_string());
            let cache_key = format!("storage:{}:{}", cmd.target.to_lowercase(), block_tag);
            let caller_typed = cmd.abi.is_some() || cmd.storage_layout.is_some();

            let cached = if caller_typed {
                None
            } else {
                read_cache::<String>(&cache_key).unwrap_or(None)
            };

            let rendered = match cached {
                Some(rendered) => {
                    debug!("using cached analysis for '{}'", cache_key);
                    rendered
                }
                None => {
                    let result = inspect(cmd.clone())
                        .await
                        .map_err(Error::InspectError)?;
                    let rendered =
                        serde_json::to_string_pretty(&result).map_err(Error::SerdeError)?;

                    let ttl = if caller_typed {
                        VOLATILE_CACHE_TTL
                    } else {
                        configuration.cache_ttl
                    };
                    if let Err(e) = store_cache(&cache_key, &rendered, Some(ttl)) {
                        debug!("failed to cache analysis for '{}': {}", cache_key, e);
                    }

                    rendered
                }
            };

            if cmd.output == "print" {
                print_with_less(&rendered)
                    .await
                    .map_err(|e| Error::Generic(format!("failed to print result: {}", e)))?;
            } else {
                let output_path =
                    build_output_path(&cmd.output, &cmd.target, &cmd.rpc_url, &filename)
                        .await
                        .map_err(|e| {
                            Error::Generic(format!("failed to build output path: {}", e))
                        })?;

                write_file(&output_path, &rendered)
                    .map_err(|e| Error::Generic(format!("failed to write result: {}", e)))?;
            }
        }

        Subcommands::Slots(mut cmd) => {
            // if the user has not specified a rpc url, use the default
            if cmd.rpc_url.as_str() == "" {
                cmd.rpc_url = configuration.rpc_url;
            }

            if !ADDRESS_REGEX.is_match(&cmd.target).unwrap_or(false) {
                return Err(Error::Generic(format!(
                    "invalid target address: '{}'",
                    cmd.target
                )));
            }

            // if the user has passed an output filename, override the default filename
            let mut filename: String = "slots.json".to_string();
            let given_name = cmd.name.as_str();

            if !given_name.is_empty() {
                filename = format!("{}-{}", given_name, filename);
            }

            let readout = read_slots(cmd.clone()).await.map_err(Error::InspectError)?;
            let rendered =
                serde_json::to_string_pretty(&readout).map_err(Error::SerdeError)?;

            if cmd.output == "print" {
                print_with_less(&rendered)
                    .await
                    .map_err(|e| Error::Generic(format!("failed to print slots: {}", e)))?;
            } else {
                let output_path =
                    build_output_path(&cmd.output, &cmd.target, &cmd.rpc_url, &filename)
                        .await
                        .map_err(|e| {
                            Error::Generic(format!("failed to build output path: {}", e))
                        })?;

                write_file(&output_path, &rendered)
                    .map_err(|e| Error::Generic(format!("failed to write slots: {}", e)))?;
            }
        }

        Subcommands::Config(cmd) => {
            config(cmd).map_err(|e| Error::Generic(format!("failed to configure: {}", e)))?;
        }

        Subcommands::Cache(cmd) => {
            cache(cmd).map_err(|e| Error::Generic(format!("failed to manage cache: {}", e)))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use slotlens_cache::{delete_cache, read_cache, store_cache};
    use slotlens_common::ether::types::{DecodedValue, DecodedWord};
    use slotlens_inspect::{ContractStorage, SlotViewEntry, VariableEntry};

    #[test]
    fn test_analysis_result_round_trips_through_cache() {
        let result = ContractStorage {
            address: "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2".to_string(),
            is_proxy: false,
            implementation_address: None,
            slot_view: vec![SlotViewEntry {
                slot: 5,
                raw: "0x0000000000000000000000000000000000000000000000000000000000000001"
                    .to_string(),
                decoded: DecodedWord {
                    type_name: "bool".to_string(),
                    value: Some(DecodedValue::Bool(true)),
                },
            }],
            variable_view: vec![VariableEntry {
                name: "slot_5".to_string(),
                type_name: "bool".to_string(),
                value: Some("true".to_string()),
                slot: Some(5),
            }],
            abi_source: None,
        };

        // the cached object is the rendered JSON, which survives the
        // bincode-backed cache even though the result model itself uses
        // flattened and untagged serde shapes
        let rendered = serde_json::to_string_pretty(&result).expect("failed to render result");
        store_cache("storage_test_round_trip", &rendered, Some(60))
            .expect("failed to store cache");

        let cached: String = read_cache("storage_test_round_trip")
            .expect("failed to read cache")
            .expect("cache entry missing");
        assert_eq!(cached, rendered);

        let parsed: ContractStorage =
            serde_json::from_str(&cached).expect("failed to parse cached result");
        assert_eq!(parsed.slot_view, result.slot_view);
        assert_eq!(parsed.variable_view, result.variable_view);

        let _ = delete_cache("storage_test_round_trip");
    }
}
