//! Symbol and quantity types for ledger tokens.

use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

/// Symbol code of the token that mirrors system RAM
pub const RAM_SYMBOL_CODE: &str = "RAM";

/// RAM is accounted in whole bytes
pub const RAM_PRECISION: u8 = 0;

/// Token symbol: a code plus the number of decimal places
#[cw_serde]
pub struct Symbol {
    pub code: String,
    pub precision: u8,
}

impl Symbol {
    pub fn new(code: impl Into<String>, precision: u8) -> Self {
        Self {
            code: code.into(),
            precision,
        }
    }

    /// The `0,RAM` symbol
    pub fn ram() -> Self {
        Self::new(RAM_SYMBOL_CODE, RAM_PRECISION)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

/// A token quantity in base units together with its symbol
#[cw_serde]
pub struct Asset {
    pub amount: Uint128,
    pub symbol: Symbol,
}

impl Asset {
    pub fn new(amount: impl Into<Uint128>, symbol: Symbol) -> Self {
        Self {
            amount: amount.into(),
            symbol,
        }
    }

    pub fn ram(amount: impl Into<Uint128>) -> Self {
        Self::new(amount, Symbol::ram())
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.symbol.precision as usize;
        if precision == 0 {
            return write!(f, "{} {}", self.amount, self.symbol.code);
        }

        let digits = format!("{:0>width$}", self.amount.u128(), width = precision + 1);
        let (whole, fraction) = digits.split_at(digits.len() - precision);
        write!(f, "{}.{} {}", whole, fraction, self.symbol.code)
    }
}
