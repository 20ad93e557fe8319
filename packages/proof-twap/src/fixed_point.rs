//! Binary fixed-point prices and cumulative price counters.
//!
//! A pair publishes its accumulators as `sum(price * seconds)` where `price` is an
//! unsigned fixed-point number with 112 fractional bits. Counters are 256 bits wide
//! and are allowed to overflow, so every operation on them wraps.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Uint128, Uint256, Uint512};

use crate::error::TwapError;

/// Number of fractional bits of [`Uq112x112`].
pub const RESOLUTION: u32 = 112;

/// Unsigned binary fixed-point number with 112 fractional bits.
#[cw_serde]
#[derive(Copy, Eq, PartialOrd, Ord, Default)]
pub struct Uq112x112(pub Uint256);

impl Uq112x112 {
    pub fn from_integer(value: u128) -> Self {
        Self(Uint256::from(value) << RESOLUTION)
    }

    /// Price of one unit of `denominator` expressed in `numerator`, i.e. `numerator / denominator`.
    /// Reserves are at most 128 bits wide, so the shifted numerator always fits.
    pub fn ratio(
        numerator: impl Into<Uint128>,
        denominator: impl Into<Uint128>,
    ) -> Result<Self, TwapError> {
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(TwapError::EmptyReserves {});
        }
        let shifted = Uint256::from(numerator.into()) << RESOLUTION;
        Ok(Self(shifted / Uint256::from(denominator)))
    }

    pub fn raw(&self) -> Uint256 {
        self.0
    }

    /// Converts to an integer with `multiplier` as scale, rounding down.
    ///
    /// The product is formed in 512 bits so only the final value can overflow.
    pub fn scale(&self, multiplier: u128) -> Result<Uint256, TwapError> {
        let wide = Uint512::from(self.0) * Uint512::from(multiplier);
        Ok(Uint256::try_from(wide >> RESOLUTION)?)
    }
}

/// Advances a cumulative counter by `price * elapsed`, wrapping at 2^256.
pub fn accumulate(counter: Uint256, price: Uq112x112, elapsed: u64) -> Uint256 {
    counter.wrapping_add(price.0.wrapping_mul(Uint256::from(elapsed)))
}

/// Average price between two counter readings taken `elapsed` seconds apart.
///
/// The difference is taken modulo 2^256, so a counter that wrapped between the
/// readings still yields the right average.
pub fn average(start: Uint256, end: Uint256, elapsed: u64) -> Result<Uq112x112, TwapError> {
    let delta = end.wrapping_sub(start);
    Ok(Uq112x112(delta.checked_div(Uint256::from(elapsed))?))
}
