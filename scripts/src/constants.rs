//! Constants used in the deploy scripts

/// Default RPC endpoint, a local Nitro dev node
pub const DEFAULT_RPC: &str = "http://localhost:8547";

/// The target triple for the WASM build target
pub const WASM_TARGET_TRIPLE: &str = "wasm32-unknown-unknown";

/// The cargo package of the bank contract
pub const KIPU_BANK_PACKAGE: &str = "kipu-bank-stylus";

/// The key of the bank contract inside the output file
pub const KIPU_BANK_OUTPUT_KEY: &str = "kipu_bank";

/// Default file where the deployment outputs are written
pub const DEFAULT_OUTPUT_FILE: &str = "deployed.json";

/// Bank cap used by the smoke test, in ether
pub const SMOKE_TEST_BANK_CAP: &str = "10";

/// Per transaction withdraw limit used by the smoke test, in ether
pub const SMOKE_TEST_MAX_WITHDRAW: &str = "1";

/// Default file where the smoke test deployment is recorded
pub const DEFAULT_SMOKE_TEST_OUTPUT_FILE: &str = "smoke-test.json";
