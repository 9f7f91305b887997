use std::{env, io::Write};

use eyre::{eyre, Result};
use slotlens_common::{
    constants::ADDRESS_REGEX,
    ether::provider::{ChainClient, NodeClient},
};

/// build a standardized output path for the given parameters. follows the following cases:
/// - if `output` is `print`, return `None`
/// - if `output` is the default value (`output`)
///   - if `target` is a contract address, return `/output/{chain_id}/{target}/{filename}`
///   - otherwise, return `/output/local/{filename}`
/// - if `output` is specified, return `/{output}/{filename}`
pub async fn build_output_path(
    output: &str,
    target: &str,
    rpc_url: &str,
    filename: &str,
) -> Result<String> {
    // if output is the default value, build a path based on the target
    if output == "output" {
        // get the current working directory
        let cwd = env::current_dir()?
            .into_os_string()
            .into_string()
            .map_err(|_| eyre!("Unable to get current working directory"))?;

        if ADDRESS_REGEX.is_match(target).unwrap_or(false) {
            let client = NodeClient::connect(rpc_url)
                .await
                .map_err(|_| eyre!("Unable to connect to the rpc node"))?;
            let chain_id = client.chain_id().await.map_err(|_| eyre!("Unable to get chain id"))?;
            return Ok(format!("{}/output/{}/{}/{}", cwd, chain_id, target, filename));
        }

        return Ok(format!("{}/output/local/{}", cwd, filename));
    }

    // output is specified, return the path
    Ok(format!("{}/{}", output, filename))
}

/// pass the input to the `less` command
pub async fn print_with_less(input: &str) -> Result<()> {
    let mut child =
        std::process::Command::new("less").stdin(std::process::Stdio::piped()).spawn()?;

    let stdin = child.stdin.as_mut().ok_or_else(|| eyre!("unable to get stdin for less"))?;
    stdin.write_all(input.as_bytes())?;

    child.wait()?;
    Ok(())
}
