use stylus_sdk::{alloy_sol_types::sol, prelude::SolidityError};

// Define the global errors
sol! {
    // Initialization related
    error AlreadyInitialized();
    error InvalidInitialize();

    // Deposit / withdraw related
    error AmountZero();
    error BankCapExceeded(uint256 attempted, uint256 available);
    error WithdrawLimitExceeded(uint256 requested, uint256 limit);
    error InsufficientBalance(uint256 requested, uint256 available);
    error TransferFailed();
}

#[derive(SolidityError)]
pub enum Errors {
    AlreadyInitialized(AlreadyInitialized),
    InvalidInitialize(InvalidInitialize),

    AmountZero(AmountZero),
    BankCapExceeded(BankCapExceeded),
    WithdrawLimitExceeded(WithdrawLimitExceeded),
    InsufficientBalance(InsufficientBalance),
    TransferFailed(TransferFailed),
}
