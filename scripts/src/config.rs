//! Deploy parameters of the bank contract

use alloy::primitives::{
    utils::{format_ether, ParseUnits, Unit},
    U256,
};

use crate::{
    constants::{SMOKE_TEST_BANK_CAP, SMOKE_TEST_MAX_WITHDRAW},
    errors::ScriptError,
};

/// The two values the bank is initialized with, in wei
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployParams {
    /// Max aggregated balance the bank will hold
    pub bank_cap: U256,
    /// Max amount of a single withdrawal
    pub max_withdraw_per_tx: U256,
}

impl DeployParams {
    /// Build the params from two decimal ether amounts (e.g. `"100"`, `"0.5"`)
    pub fn from_ether(bank_cap: &str, max_withdraw_per_tx: &str) -> Result<Self, ScriptError> {
        let params = DeployParams {
            bank_cap: parse_ether_amount(bank_cap)?,
            max_withdraw_per_tx: parse_ether_amount(max_withdraw_per_tx)?,
        };
        params.validate()?;
        Ok(params)
    }

    /// The fixed params the smoke test deploys with
    pub fn smoke_test() -> Result<Self, ScriptError> {
        Self::from_ether(SMOKE_TEST_BANK_CAP, SMOKE_TEST_MAX_WITHDRAW)
    }

    /// Same checks as the contract `initialize`, so a bad config fails before anything is sent
    fn validate(&self) -> Result<(), ScriptError> {
        if self.bank_cap.is_zero() {
            return Err(ScriptError::InvalidConfig(String::from(
                "bank cap must be greater than zero",
            )));
        }
        if self.max_withdraw_per_tx.is_zero() {
            return Err(ScriptError::InvalidConfig(String::from(
                "max withdraw per tx must be greater than zero",
            )));
        }
        if self.max_withdraw_per_tx > self.bank_cap {
            return Err(ScriptError::InvalidConfig(format!(
                "max withdraw per tx ({} ETH) is above the bank cap ({} ETH)",
                format_ether(self.max_withdraw_per_tx),
                format_ether(self.bank_cap)
            )));
        }
        Ok(())
    }
}

/// Convert a decimal ether amount into wei (18 decimals)
pub fn parse_ether_amount(amount: &str) -> Result<U256, ScriptError> {
    let amount = amount.trim();
    let (int_part, frac_part) = amount.split_once('.').unwrap_or((amount, ""));

    // Plain decimal notation only
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() || !is_digits(int_part) || !is_digits(frac_part) {
        return Err(ScriptError::InvalidConfig(format!(
            "invalid amount '{amount}', expected a decimal number of ether"
        )));
    }

    let wei = match ParseUnits::parse_units(amount, Unit::ETHER)
        .map_err(|e| ScriptError::InvalidConfig(format!("invalid amount '{amount}': {e}")))?
    {
        ParseUnits::U256(wei) => wei,
        ParseUnits::I256(_) => {
            return Err(ScriptError::InvalidConfig(format!(
                "negative amount '{amount}'"
            )))
        }
    };

    // The conversion wraps on overflow, the whole ether part must survive it
    let whole_ether = U256::from_str_radix(int_part, 10).ok();
    if whole_ether != Some(wei / U256::from(10u64).pow(U256::from(Unit::ETHER.get()))) {
        return Err(ScriptError::InvalidConfig(format!(
            "amount '{amount}' does not fit in 256 bits of wei"
        )));
    }

    Ok(wei)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One ether, in wei
    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18))
    }

    #[test]
    fn parses_whole_and_fractional_ether() {
        assert_eq!(parse_ether_amount("10").unwrap(), ether(10));
        assert_eq!(parse_ether_amount(" 1 ").unwrap(), ether(1));
        assert_eq!(
            parse_ether_amount("0.5").unwrap(),
            U256::from(500_000_000_000_000_000u64)
        );
        assert_eq!(parse_ether_amount("0.000000000000000001").unwrap(), U256::from(1));
    }

    #[test]
    fn rejects_malformed_amounts() {
        for amount in ["", "   ", "abc", "1e18", "-1", "1_000", ".5", "1.2.3", "0x10"] {
            assert!(
                matches!(parse_ether_amount(amount), Err(ScriptError::InvalidConfig(_))),
                "'{amount}' should be rejected"
            );
        }
    }

    #[test]
    fn rejects_amounts_overflowing_wei() {
        // U256::MAX / 10^18, the biggest whole ether amount
        let max_ether = "115792089237316195423570985008687907853269984665640564039457";
        assert_eq!(
            parse_ether_amount(max_ether).unwrap(),
            U256::from_str_radix(max_ether, 10).unwrap() * ether(1)
        );

        for amount in [
            "115792089237316195423570985008687907853269984665640564039458",
            "115792089237316195423570985008687907853269984665640564039457.9",
            "115792089237316195423570985008687907853269984665640564039457584007913129639935",
        ] {
            assert!(
                matches!(parse_ether_amount(amount), Err(ScriptError::InvalidConfig(_))),
                "'{amount}' should be rejected"
            );
        }
    }

    #[test]
    fn smoke_test_params() {
        let params = DeployParams::smoke_test().unwrap();
        assert_eq!(params.bank_cap, ether(10));
        assert_eq!(params.max_withdraw_per_tx, ether(1));
    }

    #[test]
    fn rejects_zero_values() {
        assert!(DeployParams::from_ether("0", "1").is_err());
        assert!(DeployParams::from_ether("100", "0").is_err());
    }

    #[test]
    fn rejects_limit_above_cap() {
        let err = DeployParams::from_ether("1", "2").unwrap_err();
        assert!(err.to_string().contains("above the bank cap"));

        // Equal values are fine
        assert!(DeployParams::from_ether("1", "1").is_ok());
    }
}
