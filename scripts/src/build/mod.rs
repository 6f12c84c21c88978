//! Compilation of the Stylus contracts

pub mod wasm;
