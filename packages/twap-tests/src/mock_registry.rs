use cosmwasm_std::{
    to_binary, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError, StdResult,
    Uint256,
};
use cw_storage_plus::Map;

use proof_twap::registry::{ExpiryPriceResponse, RegistryExecuteMsg, RegistryQueryMsg};
use proof_twap::Token;

/// (asset, expiry timestamp) -> price with 8 decimals
const EXPIRY_PRICES: Map<(&Token, u64), Uint256> = Map::new("expiry_prices");

pub fn instantiate(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: Empty,
) -> StdResult<Response> {
    Ok(Response::new())
}

pub fn execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: RegistryExecuteMsg,
) -> StdResult<Response> {
    match msg {
        RegistryExecuteMsg::SetExpiryPrice {
            asset,
            expiry_timestamp,
            price,
        } => {
            let key = (&asset, expiry_timestamp);
            if EXPIRY_PRICES.has(deps.storage, key) {
                return Err(StdError::generic_err(format!(
                    "Expiry price of {} at {} already set",
                    asset, expiry_timestamp
                )));
            }
            EXPIRY_PRICES.save(deps.storage, key, &price)?;

            Ok(Response::new()
                .add_attribute("action", "set_expiry_price")
                .add_attribute("asset", asset.to_string())
                .add_attribute("price", price.to_string()))
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: RegistryQueryMsg) -> StdResult<Binary> {
    match msg {
        RegistryQueryMsg::ExpiryPrice {
            asset,
            expiry_timestamp,
        } => to_binary(&ExpiryPriceResponse {
            price: EXPIRY_PRICES.may_load(deps.storage, (&asset, expiry_timestamp))?,
        }),
    }
}
