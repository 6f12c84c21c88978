use std::{
    path::Path,
    process::{Command, Stdio},
};

use alloy::{
    primitives::Address,
    providers::{Provider, WalletProvider},
};

use crate::{errors::ScriptError, tx::client::RpcProvider, utils::command_success_or};

/// Deploy a built stylus contract, returning the address it landed on
pub async fn deploy_contract(
    wasm_file_path: &Path,
    rpc_url: &str,
    priv_key: &str,
    client: RpcProvider,
) -> Result<Address, ScriptError> {
    // Predict the contract address
    let contract_address = predict_contract_address(client.clone()).await?;

    // Run deploy command, it returns once the deployment and activation txs are included
    let mut deploy_cmd = Command::new("cargo");
    deploy_cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    deploy_cmd.args("stylus deploy".split_whitespace());
    deploy_cmd.arg("--wasm-file");
    deploy_cmd.arg(wasm_file_path);
    deploy_cmd.arg("-e");
    deploy_cmd.arg(rpc_url);
    deploy_cmd.arg("--private-key");
    deploy_cmd.arg(priv_key);

    command_success_or(
        deploy_cmd,
        "Failed to deploy Stylus contract",
        ScriptError::ContractDeployment,
    )?;

    // Ensure the prediction was right
    let code = client
        .get_code_at(contract_address)
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
    if code.is_empty() {
        return Err(ScriptError::ContractDeployment(format!(
            "no code found at predicted address {}",
            contract_address
        )));
    }

    Ok(contract_address)
}

/// Predict the contract address of the next contract deployed by the client signer
async fn predict_contract_address(client: RpcProvider) -> Result<Address, ScriptError> {
    // Get signer
    let signer = client.default_signer_address();

    // Get the signer nonce
    let signer_nonce = client
        .get_transaction_count(signer)
        .await
        .map_err(|e| ScriptError::NonceFetching(e.to_string()))?;

    // `CREATE` address of the signer next tx
    Ok(signer.create(signer_nonce))
}
