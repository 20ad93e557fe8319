use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{to_binary, Addr, CosmosMsg, StdResult, Uint256, WasmMsg};

use crate::token::Token;

/// Execute interface of an external oracle registry recording expiry prices.
#[cw_serde]
pub enum RegistryExecuteMsg {
    /// Records `price` (8 decimals) of `asset` at `expiry_timestamp`.
    /// The registry decides whether a second submission for the same pair is rejected.
    SetExpiryPrice {
        asset: Token,
        expiry_timestamp: u64,
        price: Uint256,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum RegistryQueryMsg {
    #[returns(ExpiryPriceResponse)]
    ExpiryPrice { asset: Token, expiry_timestamp: u64 },
}

#[cw_serde]
pub struct ExpiryPriceResponse {
    pub price: Option<Uint256>,
}

/// Builds the message forwarding a finalized price to the registry at `registry`
pub fn set_expiry_price_msg<T>(
    registry: &Addr,
    asset: Token,
    expiry_timestamp: u64,
    price: Uint256,
) -> StdResult<CosmosMsg<T>> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: registry.to_string(),
        msg: to_binary(&RegistryExecuteMsg::SetExpiryPrice {
            asset,
            expiry_timestamp,
            price,
        })?,
        funds: vec![],
    }))
}
