//! RAM market pricing.
//!
//! Purchases pay a 0.5% fee (rounded up) and the remainder is converted to
//! bytes along a constant-product bancor curve.

use cosmwasm_std::{StdError, StdResult, Uint128};

use crate::state::RamMarket;

/// 0.5% of `amount`, rounded up
pub fn ram_fee(amount: Uint128) -> Uint128 {
    (amount + Uint128::new(199)) / Uint128::new(200)
}

/// Output of a bancor conversion: `inp * out_reserve / (inp_reserve + inp)`
pub fn bancor_output(inp_reserve: Uint128, out_reserve: Uint128, inp: Uint128) -> Uint128 {
    if inp.is_zero() {
        return Uint128::zero();
    }
    inp.multiply_ratio(out_reserve, inp_reserve + inp)
}

impl RamMarket {
    /// Convert a core payment into bytes and move the market reserves.
    ///
    /// Returns the bytes granted.
    pub fn buy(&mut self, payment: Uint128) -> StdResult<u64> {
        let after_fee = payment - ram_fee(payment);
        let bytes = bancor_output(self.core_reserve, self.ram_reserve, after_fee);

        self.ram_reserve = self.ram_reserve.checked_sub(bytes)?;
        self.core_reserve = self.core_reserve.checked_add(after_fee)?;

        u64::try_from(bytes.u128())
            .map_err(|_| StdError::generic_err(format!("byte output {} overflows u64", bytes)))
    }
}
