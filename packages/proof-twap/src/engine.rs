//! Verification and extrapolation of proof-backed TWAPs.
//!
//! A verified proof pins the pair's price accumulator at a historic block. The
//! accumulator is then brought forward to the exact historic block time, the live
//! accumulator is brought forward to the target time, and the difference of the two
//! divided by the elapsed seconds is the average price over that interval.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Uint128, Uint256};

use crate::error::TwapError;
use crate::fixed_point::{accumulate, average, Uq112x112};
use crate::pair::{CumulativePricesResponse, ExchangePair, PairInfoResponse};
use crate::proof::{ProofData, StorageSlot, VerifiedState};
use crate::token::Token;
use crate::verifier::TrieVerifier;
use crate::window::FreshnessWindow;

/// Which asset of the pair is the unit of account of the quoted price
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Denomination {
    /// Asset A prices asset B
    First,
    /// Asset B prices asset A
    Second,
}

impl Denomination {
    /// Denomination quoting `subject`, which has to be one of the two pair assets.
    pub fn of(pair: &PairInfoResponse, subject: &Token) -> Option<Self> {
        if *subject == pair.asset_a {
            Some(Denomination::Second)
        } else if *subject == pair.asset_b {
            Some(Denomination::First)
        } else {
            None
        }
    }

    pub fn asset<'a>(&self, pair: &'a PairInfoResponse) -> &'a Token {
        match self {
            Denomination::First => &pair.asset_a,
            Denomination::Second => &pair.asset_b,
        }
    }

    /// Accumulator slot tracking the subject price in this denomination
    pub fn slot(&self) -> StorageSlot {
        match self {
            Denomination::First => StorageSlot::PriceBCumulative,
            Denomination::Second => StorageSlot::PriceACumulative,
        }
    }

    /// Instantaneous subject price implied by the reserves
    pub fn price(&self, reserve_a: Uint128, reserve_b: Uint128) -> Result<Uq112x112, TwapError> {
        match self {
            Denomination::First => Uq112x112::ratio(reserve_a, reserve_b),
            Denomination::Second => Uq112x112::ratio(reserve_b, reserve_a),
        }
    }

    pub fn cumulative(&self, prices: &CumulativePricesResponse) -> Uint256 {
        match self {
            Denomination::First => prices.price_b_cumulative_last,
            Denomination::Second => prices.price_a_cumulative_last,
        }
    }
}

/// Authenticates `proof` against `pair` for the accumulator of `denomination`.
pub fn authenticate(
    verifier: &impl TrieVerifier,
    pair: &impl ExchangePair,
    denomination: Denomination,
    window: &FreshnessWindow,
    proof: &ProofData,
) -> Result<VerifiedState, TwapError> {
    verifier.verify(pair.address(), window, denomination.slot(), proof)
}

/// Cumulative price exactly at the proven block.
///
/// Accumulators only move when reserves change, so the stored value is stale by
/// however long the proven reserves had been in place. An empty pool does not
/// accumulate, so no correction applies to it.
pub fn historic_cumulative(
    state: &VerifiedState,
    denomination: Denomination,
) -> Result<Uint256, TwapError> {
    if state.block_timestamp <= state.reserve_timestamp
        || state.reserve_a.is_zero()
        || state.reserve_b.is_zero()
    {
        return Ok(state.price_cumulative);
    }
    let price = denomination.price(state.reserve_a, state.reserve_b)?;
    Ok(accumulate(
        state.price_cumulative,
        price,
        state.block_timestamp - state.reserve_timestamp,
    ))
}

/// Cumulative price at `target_timestamp`, extrapolated from live pair state.
pub fn current_cumulative(
    pair: &impl ExchangePair,
    denomination: Denomination,
    target_timestamp: u64,
) -> Result<Uint256, TwapError> {
    let reserves = pair.reserves()?;
    let counter = denomination.cumulative(&pair.cumulative_prices()?);

    let elapsed = target_timestamp.saturating_sub(reserves.block_timestamp_last);
    if elapsed == 0 || reserves.reserve_a.is_zero() || reserves.reserve_b.is_zero() {
        return Ok(counter);
    }
    let price = denomination.price(reserves.reserve_a, reserves.reserve_b)?;
    Ok(accumulate(counter, price, elapsed))
}

/// Average subject price between an authenticated historic state and `target_timestamp`.
pub fn extrapolate(
    pair: &impl ExchangePair,
    denomination: Denomination,
    state: &VerifiedState,
    target_timestamp: u64,
) -> Result<Uq112x112, TwapError> {
    if target_timestamp <= state.block_timestamp {
        return Err(TwapError::TemporalOrdering {
            target: target_timestamp,
            historic: state.block_timestamp,
        });
    }

    let historic = historic_cumulative(state, denomination)?;
    let current = current_cumulative(pair, denomination, target_timestamp)?;
    average(
        historic,
        current,
        target_timestamp - state.block_timestamp,
    )
}

/// Authenticates `proof` and returns the TWAP from the proven block to `target_timestamp`.
pub fn verify_and_extrapolate(
    pair: &impl ExchangePair,
    verifier: &impl TrieVerifier,
    denomination: Denomination,
    window: &FreshnessWindow,
    proof: &ProofData,
    target_timestamp: u64,
) -> Result<Uq112x112, TwapError> {
    let state = authenticate(verifier, pair, denomination, window, proof)?;
    extrapolate(pair, denomination, &state, target_timestamp)
}
