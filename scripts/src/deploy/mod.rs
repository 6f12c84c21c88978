//! Deployment of the bank contract

mod stylus;

use alloy::primitives::{Address, TxHash};
use tracing::info;

use crate::{
    build::wasm::WasmBuilder,
    config::DeployParams,
    constants::{KIPU_BANK_OUTPUT_KEY, KIPU_BANK_PACKAGE},
    errors::ScriptError,
    output_writer::{write_output_file, OutputKeys},
    tx::{client::RpcProvider, sender::send_initialize},
};

/// A deployed and initialized bank
#[derive(Debug, Clone, Copy)]
pub struct Deployment {
    /// Address of the contract
    pub address: Address,
    /// Hash of the `initialize` tx
    pub init_tx: TxHash,
}

/// Build, deploy and initialize a fresh bank, recording it in `output_file`.
/// Every call creates a new contract.
pub async fn deploy_kipu_bank(
    params: DeployParams,
    rpc_url: &str,
    priv_key: &str,
    client: RpcProvider,
    output_file: &str,
) -> Result<Deployment, ScriptError> {
    // Build the contract
    info!("Building contract...");
    let wasm_file_path = WasmBuilder.build_wasm(KIPU_BANK_PACKAGE)?;
    info!("Built with success");

    // Deploy it
    info!("Deploying contract...");
    let address =
        stylus::deploy_contract(&wasm_file_path, rpc_url, priv_key, client.clone()).await?;
    write_output_file(
        output_file,
        OutputKeys::Deployment {
            key: KIPU_BANK_OUTPUT_KEY,
        },
        address,
    )?;

    // Then init it with the bank params
    info!(
        "Initializing with bank cap {} and max withdraw per tx {} (wei)...",
        params.bank_cap, params.max_withdraw_per_tx
    );
    let init_tx = send_initialize(address, params, client).await?;
    write_output_file(
        output_file,
        OutputKeys::Init {
            key: KIPU_BANK_OUTPUT_KEY,
        },
        init_tx,
    )?;

    Ok(Deployment { address, init_tx })
}
