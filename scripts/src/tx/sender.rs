use alloy::{
    network::TransactionBuilder,
    primitives::{Address, TxHash, U256},
    providers::{Provider, WalletProvider},
    rpc::types::eth::TransactionRequest,
    sol_types::SolCall,
    transports::TransportError,
};
use tracing::info;

use crate::{
    config::DeployParams,
    errors::ScriptError,
    tx::{
        abi::IKipuBank::{depositCall, initializeCall, withdrawCall, IKipuBankErrors},
        client::RpcProvider,
        revert::{decode_transport_error, revert_name},
    },
};

/// Init the bank contract with its cap and withdraw limit
pub async fn send_initialize(
    contract: Address,
    params: DeployParams,
    client: RpcProvider,
) -> Result<TxHash, ScriptError> {
    let tx_request = initialize_request(contract, params);

    send_and_wait(tx_request, "init", client)
        .await
        .map_err(init_error)
}

/// Deposit `value` into the bank, from the client signer
pub async fn send_deposit(
    contract: Address,
    value: U256,
    client: RpcProvider,
) -> Result<TxHash, ScriptError> {
    let sender = client.default_signer_address();
    send_and_wait(deposit_request(contract, value, sender), "deposit", client).await
}

/// Withdraw `amount` from the client signer balance
pub async fn send_withdraw(
    contract: Address,
    amount: U256,
    client: RpcProvider,
) -> Result<TxHash, ScriptError> {
    let sender = client.default_signer_address();
    send_and_wait(withdraw_request(contract, amount, sender), "withdraw", client).await
}

/// Simulate a deposit of `value` from the client signer, without sending it.
/// Returns the bank error it reverts with, or `None` if it would succeed.
pub async fn simulate_deposit(
    contract: Address,
    value: U256,
    client: RpcProvider,
) -> Result<Option<IKipuBankErrors>, ScriptError> {
    let sender = client.default_signer_address();
    simulate(deposit_request(contract, value, sender), client).await
}

/// Simulate a withdraw of `amount` from the client signer, without sending it
pub async fn simulate_withdraw(
    contract: Address,
    amount: U256,
    client: RpcProvider,
) -> Result<Option<IKipuBankErrors>, ScriptError> {
    let sender = client.default_signer_address();
    simulate(withdraw_request(contract, amount, sender), client).await
}

/// Simulate an `initialize` call from the client signer, without sending it
pub async fn simulate_initialize(
    contract: Address,
    params: DeployParams,
    client: RpcProvider,
) -> Result<Option<IKipuBankErrors>, ScriptError> {
    let sender = client.default_signer_address();
    simulate(initialize_request(contract, params).with_from(sender), client).await
}

/// Build the `initialize` tx
fn initialize_request(contract: Address, params: DeployParams) -> TransactionRequest {
    call_request(
        contract,
        &initializeCall {
            bankCap: params.bank_cap,
            maxWithdrawPerTx: params.max_withdraw_per_tx,
        },
        U256::ZERO,
    )
}

/// Build a `deposit` tx of `value`, sent by `sender`
fn deposit_request(contract: Address, value: U256, sender: Address) -> TransactionRequest {
    call_request(contract, &depositCall {}, value).with_from(sender)
}

/// Build a `withdraw` tx of `amount`, sent by `sender`
fn withdraw_request(contract: Address, amount: U256, sender: Address) -> TransactionRequest {
    call_request(contract, &withdrawCall { amount }, U256::ZERO).with_from(sender)
}

/// Build a tx calling `call` on `contract` with `value` attached
fn call_request<C: SolCall>(contract: Address, call: &C, value: U256) -> TransactionRequest {
    TransactionRequest::default()
        .to(contract)
        .with_call(call)
        .with_value(value)
}

/// Run the tx through `eth_call`, returning the bank error it reverts with if any
async fn simulate(
    tx_request: TransactionRequest,
    client: RpcProvider,
) -> Result<Option<IKipuBankErrors>, ScriptError> {
    match client.call(&tx_request).await {
        Ok(_) => Ok(None),
        Err(e) => match decode_transport_error(&e) {
            Some(revert) => Ok(Some(revert)),
            None => Err(ScriptError::ContractInteraction(e.to_string())),
        },
    }
}

/// Send a tx and wait for it to be included, failing if it reverted
async fn send_and_wait(
    tx_request: TransactionRequest,
    label: &str,
    client: RpcProvider,
) -> Result<TxHash, ScriptError> {
    // Send it, gas estimation fails first if the call reverts
    let pending_tx = client
        .send_transaction(tx_request)
        .await
        .map_err(|e| send_error(label, &e))?;
    info!("Pending {} transaction... {}", label, pending_tx.tx_hash());

    // Wait for the transaction to be included.
    let receipt = pending_tx
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    if !receipt.status() {
        return Err(ScriptError::ContractInteraction(format!(
            "{} tx {} reverted",
            label, receipt.transaction_hash
        )));
    }
    info!("{} tx done on block: {:?}", label, receipt.block_number);

    Ok(receipt.transaction_hash)
}

/// Map a send failure, naming the bank error when the node reports one
fn send_error(label: &str, err: &TransportError) -> ScriptError {
    match decode_transport_error(err) {
        Some(revert) => ScriptError::ContractRevert {
            call: label.to_string(),
            error: revert_name(&revert),
        },
        None => ScriptError::ContractInteraction(err.to_string()),
    }
}

/// The bank can be initialized by anyone between its creation and our init tx
fn init_error(err: ScriptError) -> ScriptError {
    match err {
        ScriptError::ContractRevert {
            error: "AlreadyInitialized",
            ..
        } => ScriptError::ContractDeployment(String::from(
            "bank was initialized by someone else before the init tx",
        )),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    const BANK: Address = address!("a51c1fc2f0d1a1b8494ed1fe312d7c3a78ed91c0");
    const USER: Address = address!("3f1eae7d46d88f08fc2f8ed27fcb2ab183eb2d0e");

    #[test]
    fn deposit_is_simulated_from_the_sender() {
        let tx = deposit_request(BANK, U256::from(1), USER);

        assert_eq!(tx.from, Some(USER));
        assert_eq!(tx.value, Some(U256::from(1)));
        assert_eq!(
            tx.input.input().map(|data| data.to_vec()),
            Some(depositCall {}.abi_encode())
        );
    }

    #[test]
    fn withdraw_carries_amount_and_no_value() {
        let amount = U256::from(42);
        let tx = withdraw_request(BANK, amount, USER);

        assert_eq!(tx.from, Some(USER));
        assert_eq!(tx.value, Some(U256::ZERO));
        assert_eq!(
            tx.input.input().map(|data| data.to_vec()),
            Some(withdrawCall { amount }.abi_encode())
        );
    }

    #[test]
    fn foreign_initialization_is_reported() {
        let err = init_error(ScriptError::ContractRevert {
            call: String::from("init"),
            error: "AlreadyInitialized",
        });
        assert!(matches!(
            &err,
            ScriptError::ContractDeployment(msg) if msg.contains("initialized by someone else")
        ));
    }

    #[test]
    fn other_init_failures_pass_through() {
        let err = init_error(ScriptError::ContractRevert {
            call: String::from("init"),
            error: "InvalidInitialize",
        });
        assert!(matches!(err, ScriptError::ContractRevert { error: "InvalidInitialize", .. }));

        let err = init_error(ScriptError::ContractInteraction(String::from("timeout")));
        assert!(matches!(err, ScriptError::ContractInteraction(_)));
    }
}
