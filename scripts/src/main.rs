use std::process;

use clap::Parser;
use dotenv::dotenv;
use scripts::{cli::Cli, tx::client::create_rpc_provider};
use tracing::error;

#[tokio::main]
async fn main() {
    // Load .env file
    dotenv().ok();

    let Cli {
        priv_key,
        rpc_url,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    // Build our RPC client with signer, then run the command
    let result = match create_rpc_provider(&rpc_url, &priv_key).await {
        Ok(client) => command.run(client, &rpc_url, &priv_key).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
