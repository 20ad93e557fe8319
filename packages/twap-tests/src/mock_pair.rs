use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult, Uint128,
    Uint256,
};
use cw_storage_plus::Item;

use proof_twap::fixed_point::{accumulate, Uq112x112};
use proof_twap::pair::{
    CumulativePricesResponse, PairInfoResponse, PairQueryMsg, ReservesResponse,
};
use proof_twap::Token;

const PAIR_STATE: Item<PairState> = Item::new("pair_state");

/// Storage of a constant-product pair, reduced to what price accumulation needs.
#[cw_serde]
pub struct PairState {
    pub asset_a: Token,
    pub asset_b: Token,
    pub reserve_a: Uint128,
    pub reserve_b: Uint128,
    pub block_timestamp_last: u64,
    pub price_a_cumulative_last: Uint256,
    pub price_b_cumulative_last: Uint256,
}

#[cw_serde]
pub struct InstantiateMsg {
    pub asset_a: Token,
    pub asset_b: Token,
    pub reserve_a: Uint128,
    pub reserve_b: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Simulates pool activity: accumulates the previous price up to the current
    /// block time and stores the new reserves.
    Sync {
        reserve_a: Uint128,
        reserve_b: Uint128,
    },
    /// Overrides the counters, e.g. to place them right before the wrap point.
    SetCumulativePrices {
        price_a_cumulative_last: Uint256,
        price_b_cumulative_last: Uint256,
    },
}

pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    PAIR_STATE.save(
        deps.storage,
        &PairState {
            asset_a: msg.asset_a,
            asset_b: msg.asset_b,
            reserve_a: msg.reserve_a,
            reserve_b: msg.reserve_b,
            block_timestamp_last: env.block.time.seconds(),
            price_a_cumulative_last: Uint256::zero(),
            price_b_cumulative_last: Uint256::zero(),
        },
    )?;

    Ok(Response::new())
}

pub fn execute(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: ExecuteMsg,
) -> StdResult<Response> {
    let mut state = PAIR_STATE.load(deps.storage)?;
    match msg {
        ExecuteMsg::Sync {
            reserve_a,
            reserve_b,
        } => {
            let now = env.block.time.seconds();
            let elapsed = now.saturating_sub(state.block_timestamp_last);
            if elapsed > 0 && !state.reserve_a.is_zero() && !state.reserve_b.is_zero() {
                let price_a = Uq112x112::ratio(state.reserve_b, state.reserve_a)
                    .map_err(|err| StdError::generic_err(err.to_string()))?;
                let price_b = Uq112x112::ratio(state.reserve_a, state.reserve_b)
                    .map_err(|err| StdError::generic_err(err.to_string()))?;
                state.price_a_cumulative_last =
                    accumulate(state.price_a_cumulative_last, price_a, elapsed);
                state.price_b_cumulative_last =
                    accumulate(state.price_b_cumulative_last, price_b, elapsed);
            }
            state.reserve_a = reserve_a;
            state.reserve_b = reserve_b;
            state.block_timestamp_last = now;
        }
        ExecuteMsg::SetCumulativePrices {
            price_a_cumulative_last,
            price_b_cumulative_last,
        } => {
            state.price_a_cumulative_last = price_a_cumulative_last;
            state.price_b_cumulative_last = price_b_cumulative_last;
        }
    }
    PAIR_STATE.save(deps.storage, &state)?;

    Ok(Response::new())
}

pub fn query(deps: Deps, _env: Env, msg: PairQueryMsg) -> StdResult<Binary> {
    let state = PAIR_STATE.load(deps.storage)?;
    match msg {
        PairQueryMsg::Pair {} => to_binary(&PairInfoResponse {
            asset_a: state.asset_a,
            asset_b: state.asset_b,
        }),
        PairQueryMsg::Reserves {} => to_binary(&ReservesResponse {
            reserve_a: state.reserve_a,
            reserve_b: state.reserve_b,
            block_timestamp_last: state.block_timestamp_last,
        }),
        PairQueryMsg::CumulativePrices {} => to_binary(&CumulativePricesResponse {
            price_a_cumulative_last: state.price_a_cumulative_last,
            price_b_cumulative_last: state.price_b_cumulative_last,
        }),
    }
}
