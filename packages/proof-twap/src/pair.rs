use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, QuerierWrapper, StdResult, Uint128, Uint256};

use crate::token::Token;

/// Live read access to a constant-product exchange pair.
pub trait ExchangePair {
    fn address(&self) -> &Addr;

    fn pair_info(&self) -> StdResult<PairInfoResponse>;

    fn reserves(&self) -> StdResult<ReservesResponse>;

    fn cumulative_prices(&self) -> StdResult<CumulativePricesResponse>;
}

/// Query interface of an external exchange pair contract.
#[cw_serde]
#[derive(QueryResponses)]
pub enum PairQueryMsg {
    /// Both assets of the pair, in storage order
    #[returns(PairInfoResponse)]
    Pair {},
    #[returns(ReservesResponse)]
    Reserves {},
    #[returns(CumulativePricesResponse)]
    CumulativePrices {},
}

#[cw_serde]
pub struct PairInfoResponse {
    pub asset_a: Token,
    pub asset_b: Token,
}

#[cw_serde]
pub struct ReservesResponse {
    pub reserve_a: Uint128,
    pub reserve_b: Uint128,
    /// Block time of the last reserve update, which is also the last time the
    /// cumulative counters were advanced
    pub block_timestamp_last: u64,
}

#[cw_serde]
pub struct CumulativePricesResponse {
    /// Accumulated price of asset A denominated in asset B, 112 fractional bits
    pub price_a_cumulative_last: Uint256,
    /// Accumulated price of asset B denominated in asset A, 112 fractional bits
    pub price_b_cumulative_last: Uint256,
}

/// [`ExchangePair`] backed by a pair contract reachable through the querier
pub struct PairContract<'a> {
    querier: QuerierWrapper<'a>,
    address: Addr,
}

impl<'a> PairContract<'a> {
    pub fn new(querier: QuerierWrapper<'a>, address: Addr) -> Self {
        Self { querier, address }
    }
}

impl ExchangePair for PairContract<'_> {
    fn address(&self) -> &Addr {
        &self.address
    }

    fn pair_info(&self) -> StdResult<PairInfoResponse> {
        self.querier
            .query_wasm_smart(self.address.to_string(), &PairQueryMsg::Pair {})
    }

    fn reserves(&self) -> StdResult<ReservesResponse> {
        self.querier
            .query_wasm_smart(self.address.to_string(), &PairQueryMsg::Reserves {})
    }

    fn cumulative_prices(&self) -> StdResult<CumulativePricesResponse> {
        self.querier.query_wasm_smart(
            self.address.to_string(),
            &PairQueryMsg::CumulativePrices {},
        )
    }
}
