use alloy::primitives::{Address, U256};

use crate::{
    config::DeployParams,
    errors::ScriptError,
    tx::{abi::IKipuBank, client::RpcProvider},
};

/// Read back the params a deployed bank was initialized with
pub async fn get_deployed_params(
    contract_address: Address,
    client: RpcProvider,
) -> Result<DeployParams, ScriptError> {
    // Build our contract
    let contract = IKipuBank::new(contract_address, client);

    // Read the smart contract
    let bank_cap = contract
        .bankCap()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    let max_withdraw_per_tx = contract
        .maxWithdrawPerTx()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    Ok(DeployParams {
        bank_cap: bank_cap._0,
        max_withdraw_per_tx: max_withdraw_per_tx._0,
    })
}

/// Get the bank balance of `user`
pub async fn get_balance_of(
    contract_address: Address,
    client: RpcProvider,
    user: Address,
) -> Result<U256, ScriptError> {
    let contract = IKipuBank::new(contract_address, client);

    let balance = contract
        .balanceOf(user)
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    Ok(balance._0)
}

/// Get the sum of every balance held by the bank
pub async fn get_total_deposited(
    contract_address: Address,
    client: RpcProvider,
) -> Result<U256, ScriptError> {
    let contract = IKipuBank::new(contract_address, client);

    let total = contract
        .totalDeposited()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    Ok(total._0)
}
