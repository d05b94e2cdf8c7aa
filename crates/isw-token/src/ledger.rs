//! # Token Ledger Interface
//!
//! The only operations the custody core needs from a fungible token. The
//! registry moves its own funds with [`TokenLedger::transfer`]; the
//! contribution ledger pulls donor funds with
//! [`TokenLedger::transfer_from`] against a prior allowance.
//!
//! ## Security Invariant
//!
//! Implementations must be all-or-nothing: a call that returns `Err`
//! leaves every balance and allowance unchanged. Implementations must
//! never call back into the caller.

use std::sync::Arc;

use isw_core::{Address, Amount};

use crate::error::TransferError;

/// A fungible token as seen by the custody core.
pub trait TokenLedger: Send + Sync {
    /// The token's own address.
    fn address(&self) -> Address;

    /// Current balance of `holder`.
    fn balance_of(&self, holder: &Address) -> Amount;

    /// Move `amount` from `from` to `to`, authorized by `from` itself.
    ///
    /// # Errors
    ///
    /// See [`TransferError`].
    fn transfer(&self, from: &Address, to: &Address, amount: Amount) -> Result<(), TransferError>;

    /// Move `amount` from `payer` to `payee`, authorized by `spender`'s
    /// allowance over `payer`.
    ///
    /// # Errors
    ///
    /// See [`TransferError`].
    fn transfer_from(
        &self,
        spender: &Address,
        payer: &Address,
        payee: &Address,
        amount: Amount,
    ) -> Result<(), TransferError>;
}

impl<T: TokenLedger + ?Sized> TokenLedger for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn balance_of(&self, holder: &Address) -> Amount {
        (**self).balance_of(holder)
    }

    fn transfer(&self, from: &Address, to: &Address, amount: Amount) -> Result<(), TransferError> {
        (**self).transfer(from, to, amount)
    }

    fn transfer_from(
        &self,
        spender: &Address,
        payer: &Address,
        payee: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        (**self).transfer_from(spender, payer, payee, amount)
    }
}
