// Allow `cargo stylus export-abi` to generate a main function.
#![cfg_attr(not(any(feature = "export-abi", test)), no_main)]
extern crate alloc;

/// Use an efficient WASM allocator.
#[global_allocator]
static ALLOC: mini_alloc::MiniAlloc = mini_alloc::MiniAlloc::INIT;

use stylus_sdk::{
    alloy_primitives::{Address, U256},
    alloy_sol_types::sol,
    call::transfer_eth,
    evm, msg,
    prelude::*,
    storage::{StorageMap, StorageU256},
};

mod errors;

use crate::errors::{
    AlreadyInitialized, AmountZero, BankCapExceeded, Errors, InsufficientBalance,
    InvalidInitialize, TransferFailed, WithdrawLimitExceeded,
};

// Declare the bank events
sol! {
    event Deposit(address indexed user, uint256 amount);
    event Withdraw(address indexed user, uint256 amount);
}

// Define the global contract storage
#[solidity_storage]
#[entrypoint]
pub struct KipuBank {
    // Max aggregated balance the bank accepts (zero until initialized)
    bank_cap: StorageU256,
    // Max amount for a single withdrawal
    max_withdraw_per_tx: StorageU256,
    // Sum of every user balance
    total_deposited: StorageU256,
    // The user balances (user => amount)
    balances: StorageMap<Address, StorageU256>,
    // Counters of successful operations
    deposit_count: StorageU256,
    withdraw_count: StorageU256,
}

/// Declare that `KipuBank` is a contract with the following external methods.
#[external]
impl KipuBank {
    /* -------------------------------------------------------------------------- */
    /*                                 Constructor                                */
    /* -------------------------------------------------------------------------- */

    /// Initialize the bank with its cap and per transaction withdraw limit.
    /// Stylus doesn't support constructors yet, so the deploy scripts call it right after the
    /// contract creation. See: https://github.com/OffchainLabs/stylus-sdk-rs/issues/99
    #[selector(name = "initialize")]
    pub fn initialize(&mut self, bank_cap: U256, max_withdraw_per_tx: U256) -> Result<(), Errors> {
        // A non zero cap means the bank was already set up
        if !self.bank_cap.get().is_zero() {
            return Err(Errors::AlreadyInitialized(AlreadyInitialized {}));
        }

        if bank_cap.is_zero() || max_withdraw_per_tx.is_zero() || max_withdraw_per_tx > bank_cap {
            return Err(Errors::InvalidInitialize(InvalidInitialize {}));
        }

        self.bank_cap.set(bank_cap);
        self.max_withdraw_per_tx.set(max_withdraw_per_tx);

        Ok(())
    }

    /* -------------------------------------------------------------------------- */
    /*                             Deposit / withdraw                             */
    /* -------------------------------------------------------------------------- */

    /// Deposit the attached value into the sender balance
    #[payable]
    #[selector(name = "deposit")]
    pub fn deposit(&mut self) -> Result<(), Errors> {
        let amount = msg::value();
        if amount.is_zero() {
            return Err(Errors::AmountZero(AmountZero {}));
        }

        // Ensure the bank can still hold the deposit
        let total = self.total_deposited.get();
        let available = self.bank_cap.get().saturating_sub(total);
        if amount > available {
            return Err(Errors::BankCapExceeded(BankCapExceeded {
                attempted: amount,
                available,
            }));
        }

        let user = msg::sender();
        let mut balance = self.balances.setter(user);
        let new_balance = balance.get() + amount;
        balance.set(new_balance);
        self.total_deposited.set(total + amount);
        self.deposit_count.set(self.deposit_count.get() + U256::from(1));

        evm::log(Deposit { user, amount });

        Ok(())
    }

    /// Withdraw `amount` from the sender balance
    #[selector(name = "withdraw")]
    pub fn withdraw(&mut self, amount: U256) -> Result<(), Errors> {
        if amount.is_zero() {
            return Err(Errors::AmountZero(AmountZero {}));
        }

        let limit = self.max_withdraw_per_tx.get();
        if amount > limit {
            return Err(Errors::WithdrawLimitExceeded(WithdrawLimitExceeded {
                requested: amount,
                limit,
            }));
        }

        let user = msg::sender();
        let available = self.balances.get(user);
        if amount > available {
            return Err(Errors::InsufficientBalance(InsufficientBalance {
                requested: amount,
                available,
            }));
        }

        // Update the state before sending anything out
        self.balances.setter(user).set(available - amount);
        self.total_deposited.set(self.total_deposited.get() - amount);
        self.withdraw_count.set(self.withdraw_count.get() + U256::from(1));

        transfer_eth(user, amount).map_err(|_| Errors::TransferFailed(TransferFailed {}))?;

        evm::log(Withdraw { user, amount });

        Ok(())
    }

    /* -------------------------------------------------------------------------- */
    /*                                Read methods                                */
    /* -------------------------------------------------------------------------- */

    #[selector(name = "bankCap")]
    #[view]
    pub fn bank_cap(&self) -> U256 {
        self.bank_cap.get()
    }

    #[selector(name = "maxWithdrawPerTx")]
    #[view]
    pub fn max_withdraw_per_tx(&self) -> U256 {
        self.max_withdraw_per_tx.get()
    }

    #[selector(name = "totalDeposited")]
    #[view]
    pub fn total_deposited(&self) -> U256 {
        self.total_deposited.get()
    }

    /// Get the balance of `user`
    #[selector(name = "balanceOf")]
    #[view]
    pub fn balance_of(&self, user: Address) -> U256 {
        self.balances.get(user)
    }

    #[selector(name = "depositCount")]
    #[view]
    pub fn deposit_count(&self) -> U256 {
        self.deposit_count.get()
    }

    #[selector(name = "withdrawCount")]
    #[view]
    pub fn withdraw_count(&self) -> U256 {
        self.withdraw_count.get()
    }
}
