use alloy::{
    hex,
    network::{Ethereum, EthereumWallet},
    primitives::B256,
    providers::{
        fillers::{ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller},
        Identity, Provider, ProviderBuilder, ReqwestProvider,
    },
    signers::local::PrivateKeySigner,
};
use reqwest::{Client, Url};
use tracing::info;

use crate::errors::ScriptError;

/// Re-export from alloy recommend filter
type RecommendFiller =
    JoinFill<JoinFill<JoinFill<Identity, GasFiller>, NonceFiller>, ChainIdFiller>;

/// An alloy provider that uses a `PrivateKeySigner` wallet to sign transactions
/// & interfaces with the RPC endpoint over HTTP
pub type RpcProvider = FillProvider<
    JoinFill<RecommendFiller, WalletFiller<EthereumWallet>>,
    ReqwestProvider,
    alloy::transports::http::Http<Client>,
    Ethereum,
>;

/// Build the RPC client for the given endpoint, signing with the given hex private key
pub async fn create_rpc_provider(
    rpc_url: &str,
    priv_key: &str,
) -> Result<RpcProvider, ScriptError> {
    let signer = parse_signer(priv_key)?;
    let wallet = EthereumWallet::from(signer);

    let url = rpc_url
        .parse::<Url>()
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    // Create our provider with the rpc client + signer
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(url);

    // Fetch chain id, also checks the endpoint is reachable
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    info!("Build client on chain ID: {}", chain_id);

    Ok(provider)
}

/// Parse a hex encoded private key (with or without `0x` prefix)
fn parse_signer(priv_key: &str) -> Result<PrivateKeySigner, ScriptError> {
    let key_bytes = hex::decode(priv_key.trim())
        .map_err(|e| ScriptError::ClientInitialization(format!("invalid private key: {e}")))?;
    if key_bytes.len() != 32 {
        return Err(ScriptError::ClientInitialization(format!(
            "private key must be 32 bytes, got {}",
            key_bytes.len()
        )));
    }

    PrivateKeySigner::from_bytes(&B256::from_slice(&key_bytes))
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// First account of the Nitro dev node
    const DEV_KEY: &str = "0xb6b15c8cb491557369f3c7d2c287b053eb229daa9c22138887752191c9520659";

    #[test]
    fn parses_prefixed_and_bare_keys() {
        let prefixed = parse_signer(DEV_KEY).unwrap();
        let bare = parse_signer(DEV_KEY.trim_start_matches("0x")).unwrap();
        assert_eq!(prefixed.address(), bare.address());
    }

    #[test]
    fn rejects_bad_keys() {
        assert!(matches!(
            parse_signer("0x1234"),
            Err(ScriptError::ClientInitialization(_))
        ));
        assert!(matches!(
            parse_signer("not hex"),
            Err(ScriptError::ClientInitialization(_))
        ));
    }
}
