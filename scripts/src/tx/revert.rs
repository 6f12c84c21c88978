//! Decoding of the bank custom errors out of failed calls

use alloy::{
    hex,
    sol_types::SolInterface,
    transports::{RpcError, TransportError},
};

use crate::tx::abi::IKipuBank::IKipuBankErrors;

/// Name of a decoded bank error, as declared in the contract
pub fn revert_name(revert: &IKipuBankErrors) -> &'static str {
    match revert {
        IKipuBankErrors::AlreadyInitialized(_) => "AlreadyInitialized",
        IKipuBankErrors::InvalidInitialize(_) => "InvalidInitialize",
        IKipuBankErrors::AmountZero(_) => "AmountZero",
        IKipuBankErrors::BankCapExceeded(_) => "BankCapExceeded",
        IKipuBankErrors::WithdrawLimitExceeded(_) => "WithdrawLimitExceeded",
        IKipuBankErrors::InsufficientBalance(_) => "InsufficientBalance",
        IKipuBankErrors::TransferFailed(_) => "TransferFailed",
    }
}

/// Decode raw revert bytes into one of the bank errors
pub fn decode_revert_data(data: &[u8]) -> Option<IKipuBankErrors> {
    IKipuBankErrors::abi_decode(data, true).ok()
}

/// Extract the bank error carried by a failed RPC call (`eth_call`, gas estimation), if any
pub fn decode_transport_error(err: &TransportError) -> Option<IKipuBankErrors> {
    match err {
        RpcError::ErrorResp(payload) => {
            let raw = payload.data.as_ref()?;
            decode_revert_data(&revert_data_from_json(raw.get())?)
        }
        _ => None,
    }
}

/// Read the revert bytes out of the `data` field of a JSON-RPC error.
/// Nodes send them as a quoted hex string.
fn revert_data_from_json(raw: &str) -> Option<Vec<u8>> {
    let parsed = json::parse(raw).ok()?;
    hex::decode(parsed.as_str()?).ok()
}

#[cfg(test)]
mod tests {
    use alloy::{primitives::U256, sol_types::SolError};

    use super::*;
    use crate::tx::abi::IKipuBank::{AmountZero, BankCapExceeded};

    #[test]
    fn decodes_amount_zero() {
        let data = AmountZero {}.abi_encode();
        let revert = decode_revert_data(&data).unwrap();

        assert!(matches!(revert, IKipuBankErrors::AmountZero(_)));
        assert_eq!(revert_name(&revert), "AmountZero");
    }

    #[test]
    fn decodes_error_arguments() {
        let data = BankCapExceeded {
            attempted: U256::from(11),
            available: U256::from(10),
        }
        .abi_encode();

        match decode_revert_data(&data) {
            Some(IKipuBankErrors::BankCapExceeded(err)) => {
                assert_eq!(err.attempted, U256::from(11));
                assert_eq!(err.available, U256::from(10));
            }
            other => panic!("unexpected decoding: {:?}", other.as_ref().map(revert_name)),
        }
    }

    #[test]
    fn ignores_unknown_or_truncated_data() {
        // `Error(string)` selector, i.e. a plain `require` message
        assert!(decode_revert_data(&[0x08, 0xc3, 0x79, 0xa0]).is_none());
        assert!(decode_revert_data(&[0xde, 0xad]).is_none());
        assert!(decode_revert_data(&[]).is_none());

        // Right selector, missing arguments
        let data = BankCapExceeded {
            attempted: U256::from(1),
            available: U256::ZERO,
        }
        .abi_encode();
        assert!(decode_revert_data(&data[..4]).is_none());
    }

    #[test]
    fn reads_revert_data_from_rpc_payload() {
        let selector = AmountZero::SELECTOR;
        let raw = format!("\"0x{}\"", hex::encode(selector));

        assert_eq!(revert_data_from_json(&raw).unwrap(), selector.to_vec());
        let revert = decode_revert_data(&revert_data_from_json(&raw).unwrap()).unwrap();
        assert!(matches!(revert, IKipuBankErrors::AmountZero(_)));
    }

    #[test]
    fn ignores_non_hex_rpc_payload() {
        assert!(revert_data_from_json("null").is_none());
        assert!(revert_data_from_json("42").is_none());
        assert!(revert_data_from_json("\"execution reverted\"").is_none());
        assert!(revert_data_from_json("not json").is_none());
    }
}
