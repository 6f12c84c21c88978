//! Everything related to the on-chain interactions with the bank

pub mod abi;
pub mod client;
pub mod reader;
pub mod revert;
pub mod sender;
