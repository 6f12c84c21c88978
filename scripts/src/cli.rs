//! Definitions of CLI arguments and commands for deploy scripts

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    commands::{deploy, smoke_test},
    constants::{DEFAULT_OUTPUT_FILE, DEFAULT_RPC, DEFAULT_SMOKE_TEST_OUTPUT_FILE},
    errors::ScriptError,
    tx::client::RpcProvider,
};

/// Scripts for deploying & smoke testing the KipuBank Stylus contract
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC)]
    pub rpc_url: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy and initialize a new bank
    Deploy(DeployArgs),
    /// Deploy a bank with a 10 ETH cap and a 1 ETH withdraw limit, then check a zero deposit
    /// reverts with `AmountZero`
    SmokeTest(SmokeTestArgs),
}

impl Command {
    /// Run the command
    pub async fn run(
        self,
        client: RpcProvider,
        rpc_url: &str,
        priv_key: &str,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => {
                info!("Deploying KipuBank...");
                deploy(args, rpc_url, priv_key, client).await
            }
            Command::SmokeTest(args) => {
                info!("Running KipuBank smoke test...");
                smoke_test(args, rpc_url, priv_key, client).await
            }
        }
    }
}

/// Deploy a bank
#[derive(Args)]
pub struct DeployArgs {
    /// Max aggregated balance of the bank, in ETH (e.g. `100` or `0.5`)
    #[arg(long, env = "KIPU_BANK_CAP")]
    pub bank_cap: String,
    /// Max amount of a single withdrawal, in ETH
    #[arg(long, env = "KIPU_MAX_WITHDRAW_PER_TX")]
    pub max_withdraw_per_tx: String,
    /// File where the deployment is recorded
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: String,
}

/// Smoke test a fresh bank
#[derive(Args)]
pub struct SmokeTestArgs {
    /// File where the smoke test deployment is recorded
    #[arg(short, long, default_value = DEFAULT_SMOKE_TEST_OUTPUT_FILE)]
    pub output: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    /// Parse a full command line
    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_deploy_command() {
        let cli = parse(&[
            "scripts",
            "--priv-key",
            "0x01",
            "--rpc-url",
            "http://localhost:8545",
            "deploy",
            "--bank-cap",
            "1000",
            "--max-withdraw-per-tx",
            "1",
        ]);

        assert_eq!(cli.priv_key, "0x01");
        assert_eq!(cli.rpc_url, "http://localhost:8545");
        match cli.command {
            Command::Deploy(args) => {
                assert_eq!(args.bank_cap, "1000");
                assert_eq!(args.max_withdraw_per_tx, "1");
                assert_eq!(args.output, DEFAULT_OUTPUT_FILE);
            }
            Command::SmokeTest(_) => panic!("expected the deploy command"),
        }
    }

    #[test]
    fn parses_smoke_test_command() {
        let cli = parse(&["scripts", "-p", "0x01", "smoke-test", "-o", "out.json"]);

        match cli.command {
            Command::SmokeTest(args) => assert_eq!(args.output, "out.json"),
            Command::Deploy(_) => panic!("expected the smoke-test command"),
        }
    }
}
