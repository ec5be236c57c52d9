//! CLI argument definitions for chainquote.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--deployment` | `oneinch-eth` | Built-in deployment to query |
//! | `--config` | | JSON deployment file replacing the built-in |
//! | `--base-url` | | Override the deployment base URL |
//! | `--timeout-ms` | `10000` | Request timeout in ms (overrides the deployment) |
//! | `--list-deployments` | `false` | Print built-in deployment names |
//!
//! # Examples
//!
//! ```bash
//! chainquote WBTC DOGE ETH
//! chainquote --deployment arken-bsc BETH PHB
//! CHAINQUOTE_DEPLOYMENT=oneinch-bsc chainquote VC
//! ```

use std::path::PathBuf;

use chainquote_core::DeploymentId;
use clap::Parser;

/// Fetch USD token prices from an on-chain price aggregator.
///
/// Prints one comma-separated line with a price per symbol, in request
/// order, and `-` where no price is available.
#[derive(Debug, Parser)]
#[command(name = "chainquote", author, version)]
pub struct Cli {
    /// Token symbols to price, in output order (e.g. WBTC DOGE ETH).
    pub symbols: Vec<String>,

    /// Built-in deployment to query.
    #[arg(
        long,
        env = "CHAINQUOTE_DEPLOYMENT",
        default_value = "oneinch-eth",
        value_parser = parse_deployment
    )]
    pub deployment: DeploymentId,

    /// JSON deployment file used instead of the built-in deployment.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the deployment base URL.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds [default: 10000, or the value in
    /// the deployment file].
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Print the built-in deployment names and exit.
    #[arg(long, default_value_t = false)]
    pub list_deployments: bool,
}

fn parse_deployment(value: &str) -> Result<DeploymentId, String> {
    value.parse().map_err(|error| format!("{error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_keep_their_order() {
        let cli = Cli::try_parse_from(["chainquote", "WBTC", "DOGE", "ETH"]).expect("valid args");
        assert_eq!(cli.symbols, vec!["WBTC", "DOGE", "ETH"]);
        assert_eq!(cli.timeout_ms, None);
        assert!(cli.config.is_none());
    }

    #[test]
    fn deployment_flag_accepts_known_names() {
        let cli = Cli::try_parse_from(["chainquote", "--deployment", "arken-bsc", "PHB"])
            .expect("valid args");
        assert_eq!(cli.deployment, DeploymentId::ArkenBsc);
    }

    #[test]
    fn unknown_deployment_is_a_usage_error() {
        let error = Cli::try_parse_from(["chainquote", "--deployment", "uniswap", "PHB"])
            .expect_err("unknown deployment");
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn no_symbols_is_accepted() {
        let cli = Cli::try_parse_from(["chainquote"]).expect("valid args");
        assert!(cli.symbols.is_empty());
    }
}
