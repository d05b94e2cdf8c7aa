//! # Transfer Errors

use isw_core::{Address, Amount};
use thiserror::Error;

/// Why a token movement was refused. Refused movements change nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// The payer does not hold enough tokens.
    #[error("insufficient balance: {holder} holds {balance}, needs {requested}")]
    InsufficientBalance {
        /// Account being debited.
        holder: Address,
        /// Its current balance.
        balance: Amount,
        /// Amount requested.
        requested: Amount,
    },

    /// The spender's allowance over the payer is too small.
    #[error("insufficient allowance: {spender} may move {allowance} of {owner}'s tokens, needs {requested}")]
    InsufficientAllowance {
        /// Account whose tokens would move.
        owner: Address,
        /// Account attempting the move.
        spender: Address,
        /// Remaining allowance.
        allowance: Amount,
        /// Amount requested.
        requested: Amount,
    },

    /// Tokens cannot be sent to the zero address.
    #[error("invalid receiver: {0}")]
    InvalidReceiver(Address),

    /// Tokens cannot be sent from the zero address.
    #[error("invalid sender: {0}")]
    InvalidSender(Address),

    /// Allowances cannot be granted to the zero address.
    #[error("invalid spender: {0}")]
    InvalidSpender(Address),

    /// A balance or the total supply would exceed [`Amount::MAX`].
    #[error("amount overflow")]
    Overflow,
}
