use alloy::primitives::U256;
use tracing::info;

use crate::{
    cli::{DeployArgs, SmokeTestArgs},
    config::DeployParams,
    deploy::deploy_kipu_bank,
    errors::ScriptError,
    tx::{
        abi::IKipuBank::IKipuBankErrors,
        client::RpcProvider,
        reader::get_deployed_params,
        revert::revert_name,
        sender::simulate_deposit,
    },
};

/// Deploy and initialize a new KipuBank
pub async fn deploy(
    args: DeployArgs,
    rpc_url: &str,
    priv_key: &str,
    client: RpcProvider,
) -> Result<(), ScriptError> {
    let params = DeployParams::from_ether(&args.bank_cap, &args.max_withdraw_per_tx)?;

    let deployment = deploy_kipu_bank(params, rpc_url, priv_key, client, &args.output).await?;
    info!("KipuBank deployed to: {}", deployment.address);

    Ok(())
}

/// Deploy a fresh bank with the smoke test params and ensure a zero deposit is rejected
pub async fn smoke_test(
    args: SmokeTestArgs,
    rpc_url: &str,
    priv_key: &str,
    client: RpcProvider,
) -> Result<(), ScriptError> {
    let params = DeployParams::smoke_test()?;

    let deployment =
        deploy_kipu_bank(params, rpc_url, priv_key, client.clone(), &args.output).await?;
    info!("Smoke test bank deployed to: {}", deployment.address);

    // Ensure we got a usable instance
    let deployed_params = get_deployed_params(deployment.address, client.clone()).await?;
    if deployed_params != params {
        return Err(ScriptError::UnexpectedOutcome(format!(
            "bank initialized with {:?}, expected {:?}",
            deployed_params, params
        )));
    }

    // Then try a zero deposit
    info!("Depositing zero value...");
    let outcome = simulate_deposit(deployment.address, U256::ZERO, client).await?;
    expect_amount_zero(outcome)?;
    info!("Zero deposit reverted with AmountZero");

    Ok(())
}

/// Only an `AmountZero` revert is a success
fn expect_amount_zero(outcome: Option<IKipuBankErrors>) -> Result<(), ScriptError> {
    match outcome {
        Some(IKipuBankErrors::AmountZero(_)) => Ok(()),
        Some(other) => Err(ScriptError::UnexpectedOutcome(format!(
            "zero deposit reverted with {} instead of AmountZero",
            revert_name(&other)
        ))),
        None => Err(ScriptError::UnexpectedOutcome(String::from(
            "zero deposit did not revert",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::abi::IKipuBank::{AmountZero, BankCapExceeded};

    #[test]
    fn amount_zero_is_expected() {
        assert!(expect_amount_zero(Some(IKipuBankErrors::AmountZero(AmountZero {}))).is_ok());
    }

    #[test]
    fn other_reverts_are_unexpected() {
        let err = expect_amount_zero(Some(IKipuBankErrors::BankCapExceeded(BankCapExceeded {
            attempted: U256::ZERO,
            available: U256::ZERO,
        })))
        .unwrap_err();
        assert!(err.to_string().contains("BankCapExceeded"));
    }

    #[test]
    fn missing_revert_is_unexpected() {
        assert!(matches!(
            expect_amount_zero(None),
            Err(ScriptError::UnexpectedOutcome(_))
        ));
    }
}
