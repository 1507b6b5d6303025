//! Error types for the RAM bridge contract
//!
//! Every variant aborts the whole transaction, including the collaborator
//! action that delivered the notification.

use cosmwasm_std::{StdError, Uint128, Uint64};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    #[error("No pending admin change")]
    NoPendingAdmin,

    #[error("Timelock not expired: {remaining_seconds} seconds remaining")]
    TimelockNotExpired { remaining_seconds: u64 },

    // ========================================================================
    // Supply Initializer Errors
    // ========================================================================

    #[error("Token {symbol} already initialized")]
    AlreadyInitialized { symbol: String },

    #[error("Issuer must be the bridge contract, got {issuer}")]
    InvalidIssuer { issuer: String },

    #[error("Symbol mismatch: expected {expected}, got {got}")]
    SymbolMismatch { expected: String, got: String },

    #[error("Precision mismatch: expected {expected}, got {got}")]
    PrecisionMismatch { expected: u8, got: u8 },

    #[error("Supply cap mismatch: maximum supply must equal max_ram_size {expected}, got {got}")]
    SupplyCapMismatch { expected: Uint128, got: Uint128 },

    #[error("Token not initialized")]
    NotInitialized,

    // ========================================================================
    // Wrap Errors
    // ========================================================================

    #[error("Untrusted sender {sender}: only the system resource ledger may send RAM bytes to this contract")]
    UntrustedSender { sender: String },

    #[error("Insufficient custody: bridge holds {available} RAM, wrap requires {required}")]
    InsufficientCustody {
        available: Uint128,
        required: Uint128,
    },

    #[error("Supply cap exceeded: minting {minted} on supply {supply} exceeds max supply {max_supply}")]
    SupplyCapExceeded {
        supply: Uint128,
        minted: Uint128,
        max_supply: Uint128,
    },

    // ========================================================================
    // Unwrap Errors
    // ========================================================================

    #[error("Untrusted token source {sender}: only this contract's RAM token is accepted")]
    UntrustedTokenSource { sender: String },

    #[error("Insufficient custody bytes: bridge holds {available} bytes, unwrap requires {required}")]
    InsufficientCustodyBytes { available: Uint64, required: Uint64 },

    #[error("Wrapped bytes underflow: {wrapped} bytes accounted as wrapped, unwrap releases {released}")]
    WrappedBytesUnderflow { wrapped: Uint128, released: Uint128 },

    // ========================================================================
    // Transfer Errors
    // ========================================================================

    #[error("Transfer disabled to account {account}")]
    ForbiddenDestination { account: String },

    #[error("Cannot transfer to self")]
    CannotTransferToSelf,

    #[error("Insufficient funds: balance {available}, required {required}")]
    InsufficientFunds {
        available: Uint128,
        required: Uint128,
    },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },
}

impl ContractError {
    /// Errors that can only be reached when the bridge's own accounting is broken.
    ///
    /// These abort like any other error but are reported separately from user
    /// input errors.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            ContractError::InsufficientCustody { .. }
                | ContractError::SupplyCapExceeded { .. }
                | ContractError::WrappedBytesUnderflow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_violations_are_flagged() {
        let custody = ContractError::InsufficientCustody {
            available: Uint128::new(1),
            required: Uint128::new(2),
        };
        let cap = ContractError::SupplyCapExceeded {
            supply: Uint128::new(10),
            minted: Uint128::new(1),
            max_supply: Uint128::new(10),
        };
        let drift = ContractError::WrappedBytesUnderflow {
            wrapped: Uint128::new(100),
            released: Uint128::new(500),
        };
        assert!(custody.is_invariant_violation());
        assert!(cap.is_invariant_violation());
        assert!(drift.is_invariant_violation());

        assert!(!ContractError::Unauthorized.is_invariant_violation());
        assert!(!ContractError::ForbiddenDestination {
            account: "terra1reserved".to_string()
        }
        .is_invariant_violation());
        assert!(!ContractError::InsufficientCustodyBytes {
            available: Uint64::new(0),
            required: Uint64::new(1),
        }
        .is_invariant_violation());
    }
}
