use clap::Parser;
use derive_builder::Builder;
use slotlens_config::parse_url_arg;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Inspect the storage of a deployed contract, decoding raw slots into typed state variables.",
    after_help = "For more information, read the wiki: https://github.com/slotlens/slotlens/wiki",
    override_usage = "slotlens inspect <TARGET> [OPTIONS]"
)]
/// Arguments for the inspect operation
///
/// This struct contains all the configuration parameters needed to analyze
/// the storage of a contract and reconstruct its state variables.
pub struct InspectArgs {
    /// The target address to inspect the storage of.
    #[clap(required = true)]
    pub target: String,

    /// The RPC provider to use for fetching storage words.
    /// This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// The explorer API endpoint to fetch verified ABIs from. When empty,
    /// the explorer lookup is skipped.
    #[clap(long = "explorer-api-url", default_value = "", hide_default_value = true)]
    pub explorer_api_url: String,

    /// Your OPTIONAL explorer API key, sent along with ABI lookups.
    #[clap(long = "explorer-api-key", short, default_value = "", hide_default_value = true)]
    pub explorer_api_key: String,

    /// Name for the output files.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub name: String,

    /// The output directory to write the output to, or 'print' to print to the console.
    #[clap(long = "output", short = 'o', default_value = "output", hide_default_value = true)]
    pub output: String,

    /// An optional ABI to reconstruct variables with. Either inline JSON or
    /// the path to a JSON file.
    #[clap(long, short, default_value = None, hide_default_value = true)]
    pub abi: Option<String>,

    /// An optional solc storage layout to reconstruct variables with. Either
    /// inline JSON or the path to a JSON file.
    #[clap(long = "storage-layout", short = 'l', default_value = None, hide_default_value = true)]
    pub storage_layout: Option<String>,

    /// The block height to read storage at. Defaults to the latest block.
    #[clap(long, short, default_value = None, hide_default_value = true)]
    pub block: Option<u64>,

    /// The number of sequential slots to crawl, starting from slot 0.
    #[clap(long = "max-slots", default_value = "500", hide_default_value = true)]
    pub max_slots: usize,

    /// The number of storage words to fetch concurrently per batch group.
    #[clap(long = "batch-size", default_value = "50", hide_default_value = true)]
    pub batch_size: usize,
}

impl InspectArgsBuilder {
    /// Creates a new InspectArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            target: Some(String::new()),
            rpc_url: Some(String::new()),
            explorer_api_url: Some(String::new()),
            explorer_api_key: Some(String::new()),
            name: Some(String::new()),
            output: Some(String::from("output")),
            abi: Some(None),
            storage_layout: Some(None),
            block: Some(None),
            max_slots: Some(500),
            batch_size: Some(50),
        }
    }
}

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Read specific storage slots of a deployed contract.",
    after_help = "For more information, read the wiki: https://github.com/slotlens/slotlens/wiki",
    override_usage = "slotlens slots <TARGET> <SLOTS>... [OPTIONS]"
)]
/// Arguments for the slots operation
///
/// This struct contains all the configuration parameters needed to read an
/// explicit list of storage slots from a contract.
pub struct SlotsArgs {
    /// The target address to read storage from.
    #[clap(required = true)]
    pub target: String,

    /// The slot indices to read, as decimal integers.
    #[clap(required = true, num_args = 1..)]
    pub slots: Vec<u64>,

    /// The RPC provider to use for fetching storage words.
    /// This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// Name for the output files.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub name: String,

    /// The output directory to write the output to, or 'print' to print to the console.
    #[clap(long = "output", short = 'o', default_value = "output", hide_default_value = true)]
    pub output: String,

    /// The block height to read storage at. Defaults to the latest block.
    #[clap(long, short, default_value = None, hide_default_value = true)]
    pub block: Option<u64>,

    /// The number of storage words to fetch concurrently per batch group.
    #[clap(long = "batch-size", default_value = "50", hide_default_value = true)]
    pub batch_size: usize,
}

impl SlotsArgsBuilder {
    /// Creates a new SlotsArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            target: Some(String::new()),
            slots: Some(Vec::new()),
            rpc_url: Some(String::new()),
            name: Some(String::new()),
            output: Some(String::from("output")),
            block: Some(None),
            batch_size: Some(50),
        }
    }
}
