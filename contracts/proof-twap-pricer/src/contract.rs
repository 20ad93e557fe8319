#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, QuerierWrapper, Response,
};
use cw2::{get_contract_version, set_contract_version};

use proof_twap::pair::{ExchangePair, PairContract};
use proof_twap::{Denomination, Token};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{Config, CONFIG, PROOF};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:proof-twap-pricer";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let finalizer = deps
        .api
        .addr_validate(&msg.finalizer)
        .map_err(|_| ContractError::InvalidFinalizer {
            finalizer: msg.finalizer.clone(),
        })?;
    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender.clone(),
    };
    msg.window.validate()?;

    let pair = deps.api.addr_validate(&msg.pair)?;
    let (denomination, denomination_asset) =
        denomination_of(deps.querier, &pair, &msg.subject_asset)?;

    let cfg = Config {
        admin,
        finalizer,
        subject_asset: msg.subject_asset,
        denomination_asset,
        denomination,
        registry: deps.api.addr_validate(&msg.registry)?,
        pair,
        verifier: deps.api.addr_validate(&msg.verifier)?,
        window: msg.window,
    };
    CONFIG.save(deps.storage, &cfg)?;
    PROOF.save(deps.storage, &msg.proof)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("subject_asset", cfg.subject_asset.to_string())
        .add_attribute("denomination_asset", cfg.denomination_asset.to_string()))
}

/// Finds which asset of `pair` prices `subject`.
fn denomination_of(
    querier: QuerierWrapper,
    pair: &Addr,
    subject: &Token,
) -> Result<(Denomination, Token), ContractError> {
    let info = PairContract::new(querier, pair.clone()).pair_info()?;
    if info.asset_a == info.asset_b {
        return Err(ContractError::IdenticalPairAssets {
            asset: info.asset_a,
        });
    }

    let denomination =
        Denomination::of(&info, subject).ok_or_else(|| ContractError::SubjectNotInPair {
            subject: subject.clone(),
            asset_a: info.asset_a.clone(),
            asset_b: info.asset_b.clone(),
        })?;
    let asset = denomination.asset(&info).clone();
    Ok((denomination, asset))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    use ExecuteMsg::*;
    match msg {
        FinalizeExpiryPrice {
            expiry_timestamp,
            reference_block,
        } => execute::finalize_expiry_price(deps, info, expiry_timestamp, reference_block),
        UpdateProof { proof } => restricted::update_proof(deps, info, proof),
        UpdatePair { pair } => restricted::update_pair(deps, info, pair),
        UpdateWindow { window } => restricted::update_window(deps, info, window),
        UpdateAdmin { admin } => restricted::update_admin(deps, info, admin),
    }
}

mod execute {
    use cosmwasm_std::ensure_eq;
    use cw_utils::nonpayable;

    use proof_twap::registry::set_expiry_price_msg;
    use proof_twap::verifier::VerifierContract;
    use proof_twap::{engine, PRICE_SCALE};

    use super::*;

    pub fn finalize_expiry_price(
        deps: DepsMut,
        info: MessageInfo,
        expiry_timestamp: u64,
        reference_block: u64,
    ) -> Result<Response, ContractError> {
        nonpayable(&info)?;
        let cfg = CONFIG.load(deps.storage)?;
        ensure_eq!(info.sender, cfg.finalizer, ContractError::Unauthorized {});

        let proof = PROOF.load(deps.storage)?;
        let pair = PairContract::new(deps.querier, cfg.pair.clone());
        let verifier = VerifierContract::new(deps.querier, cfg.verifier.clone());

        let state = engine::authenticate(&verifier, &pair, cfg.denomination, &cfg.window, &proof)?;
        cfg.window.check(state.block_number, reference_block)?;
        let twap = engine::extrapolate(&pair, cfg.denomination, &state, expiry_timestamp)?;
        let price = twap.scale(PRICE_SCALE)?;

        // a rejection by the registry reverts the whole transaction
        let set_price = set_expiry_price_msg(
            &cfg.registry,
            cfg.subject_asset.clone(),
            expiry_timestamp,
            price,
        )?;

        Ok(Response::new()
            .add_attribute("action", "finalize_expiry_price")
            .add_attribute("asset", cfg.subject_asset.to_string())
            .add_attribute("expiry_timestamp", expiry_timestamp.to_string())
            .add_attribute("price", price.to_string())
            .add_attribute("block_number", state.block_number.to_string())
            .add_message(set_price))
    }
}

mod restricted {
    use cosmwasm_std::ensure_eq;
    use proof_twap::{proof::ProofData, FreshnessWindow};

    use super::*;

    pub fn update_proof(
        deps: DepsMut,
        info: MessageInfo,
        proof: ProofData,
    ) -> Result<Response, ContractError> {
        let cfg = CONFIG.load(deps.storage)?;
        ensure_eq!(info.sender, cfg.admin, ContractError::Unauthorized {});

        PROOF.save(deps.storage, &proof)?;

        Ok(Response::new().add_attribute("action", "update_proof"))
    }

    pub fn update_pair(
        deps: DepsMut,
        info: MessageInfo,
        pair: String,
    ) -> Result<Response, ContractError> {
        let mut cfg = CONFIG.load(deps.storage)?;
        ensure_eq!(info.sender, cfg.admin, ContractError::Unauthorized {});

        let pair = deps.api.addr_validate(&pair)?;
        let (denomination, denomination_asset) =
            denomination_of(deps.querier, &pair, &cfg.subject_asset)?;
        cfg.pair = pair;
        cfg.denomination = denomination;
        cfg.denomination_asset = denomination_asset;
        CONFIG.save(deps.storage, &cfg)?;

        Ok(Response::new()
            .add_attribute("action", "update_pair")
            .add_attribute("pair", cfg.pair)
            .add_attribute("denomination_asset", cfg.denomination_asset.to_string()))
    }

    pub fn update_window(
        deps: DepsMut,
        info: MessageInfo,
        window: FreshnessWindow,
    ) -> Result<Response, ContractError> {
        let mut cfg = CONFIG.load(deps.storage)?;
        ensure_eq!(info.sender, cfg.admin, ContractError::Unauthorized {});

        window.validate()?;
        cfg.window = window;
        CONFIG.save(deps.storage, &cfg)?;

        Ok(Response::new()
            .add_attribute("action", "update_window")
            .add_attribute("min_blocks_back", window.min_blocks_back.to_string())
            .add_attribute("max_blocks_back", window.max_blocks_back.to_string()))
    }

    pub fn update_admin(
        deps: DepsMut,
        info: MessageInfo,
        admin: String,
    ) -> Result<Response, ContractError> {
        let mut cfg = CONFIG.load(deps.storage)?;
        ensure_eq!(info.sender, cfg.admin, ContractError::Unauthorized {});

        cfg.admin = deps.api.addr_validate(&admin)?;
        CONFIG.save(deps.storage, &cfg)?;

        Ok(Response::new()
            .add_attribute("action", "update_admin")
            .add_attribute("admin", cfg.admin))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    use QueryMsg::*;
    let res = match msg {
        Config {} => to_binary(&query::config(deps)?)?,
        Proof {} => to_binary(&PROOF.load(deps.storage)?)?,
        CurrentPrice {} => to_binary(&query::price(deps, env.block.time.seconds())?)?,
        HistoricalPrice { target_timestamp } => {
            to_binary(&query::price(deps, target_timestamp)?)?
        }
        VerifiedBlock {} => to_binary(&query::verified_block(deps)?)?,
    };
    Ok(res)
}

mod query {
    use cosmwasm_std::StdResult;
    use proof_twap::verifier::VerifierContract;
    use proof_twap::{engine, PRICE_SCALE};

    use crate::msg::{PriceResponse, VerifiedBlockResponse};

    use super::*;

    pub fn config(deps: Deps) -> StdResult<Config> {
        CONFIG.load(deps.storage)
    }

    /// Scaled TWAP from the proven block up to `target_timestamp`
    pub fn price(deps: Deps, target_timestamp: u64) -> Result<PriceResponse, ContractError> {
        let cfg = CONFIG.load(deps.storage)?;
        let proof = PROOF.load(deps.storage)?;
        let pair = PairContract::new(deps.querier, cfg.pair);
        let verifier = VerifierContract::new(deps.querier, cfg.verifier);

        let state = engine::authenticate(&verifier, &pair, cfg.denomination, &cfg.window, &proof)?;
        let twap = engine::extrapolate(&pair, cfg.denomination, &state, target_timestamp)?;

        Ok(PriceResponse {
            price: twap.scale(PRICE_SCALE)?,
            target_timestamp,
            block_number: state.block_number,
            block_timestamp: state.block_timestamp,
        })
    }

    pub fn verified_block(deps: Deps) -> Result<VerifiedBlockResponse, ContractError> {
        let cfg = CONFIG.load(deps.storage)?;
        let proof = PROOF.load(deps.storage)?;
        let pair = PairContract::new(deps.querier, cfg.pair);
        let verifier = VerifierContract::new(deps.querier, cfg.verifier);

        let state = engine::authenticate(&verifier, &pair, cfg.denomination, &cfg.window, &proof)?;
        Ok(VerifiedBlockResponse {
            block_number: state.block_number,
            block_timestamp: state.block_timestamp,
        })
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::CannotMigrate {
            previous_contract: stored.contract,
        });
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("previous_version", stored.version))
}
