use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_binary, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError, StdResult,
    Uint128, Uint256,
};
use cw_storage_plus::Map;

use proof_twap::proof::{
    ProofData, VerifiedState, PRICE_A_CUMULATIVE_SLOT, PRICE_B_CUMULATIVE_SLOT,
};
use proof_twap::verifier::VerifierQueryMsg;

/// Header bytes -> proof accepted for that header and the state it attests
const ATTESTATIONS: Map<&[u8], (ProofData, Attestation)> = Map::new("attestations");

/// Pair storage at a past block, as a real verifier would extract it from the trie.
#[cw_serde]
pub struct Attestation {
    pub pair: String,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub price_a_cumulative: Uint256,
    pub price_b_cumulative: Uint256,
    pub reserve_a: Uint128,
    pub reserve_b: Uint128,
    pub reserve_timestamp: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Marks `proof` as authentic for the given pair state
    Attest {
        proof: ProofData,
        attestation: Attestation,
    },
}

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
    msg: ExecuteMsg,
) -> StdResult<Response> {
    match msg {
        ExecuteMsg::Attest { proof, attestation } => {
            ATTESTATIONS.save(
                deps.storage,
                proof.block.as_slice(),
                &(proof.clone(), attestation),
            )?;
        }
    }

    Ok(Response::new())
}

pub fn query(deps: Deps, env: Env, msg: VerifierQueryMsg) -> StdResult<Binary> {
    match msg {
        VerifierQueryMsg::VerifyProof {
            pair,
            min_blocks_back,
            max_blocks_back,
            slot,
            proof,
        } => {
            let (accepted, attestation) = ATTESTATIONS
                .may_load(deps.storage, proof.block.as_slice())?
                .ok_or_else(|| StdError::generic_err("Unknown block header"))?;
            if accepted != proof {
                return Err(StdError::generic_err("Proof nodes do not match header"));
            }
            if attestation.pair != pair {
                return Err(StdError::generic_err("Account proof is for another contract"));
            }

            // the header has to be recent enough for its hash to be checked
            let height = env.block.height;
            if attestation.block_number + u64::from(min_blocks_back) > height
                || attestation.block_number + u64::from(max_blocks_back) < height
            {
                return Err(StdError::generic_err("Block hash unavailable"));
            }

            let price_cumulative = match slot {
                PRICE_A_CUMULATIVE_SLOT => attestation.price_a_cumulative,
                PRICE_B_CUMULATIVE_SLOT => attestation.price_b_cumulative,
                _ => return Err(StdError::generic_err("Unsupported storage slot")),
            };

            to_binary(&VerifiedState {
                block_timestamp: attestation.block_timestamp,
                block_number: attestation.block_number,
                price_cumulative,
                reserve_a: attestation.reserve_a,
                reserve_b: attestation.reserve_b,
                reserve_timestamp: attestation.reserve_timestamp,
            })
        }
    }
}
