use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint128, Uint256};

/// Storage slot of the accumulator of the price of asset A, denominated in asset B.
pub const PRICE_A_CUMULATIVE_SLOT: u64 = 9;
/// Storage slot of the accumulator of the price of asset B, denominated in asset A.
pub const PRICE_B_CUMULATIVE_SLOT: u64 = 10;

/// Selects which price accumulator of the pair a proof must attest to
#[cw_serde]
#[derive(Copy, Eq)]
pub enum StorageSlot {
    PriceACumulative,
    PriceBCumulative,
}

impl StorageSlot {
    pub fn index(&self) -> u64 {
        match self {
            StorageSlot::PriceACumulative => PRICE_A_CUMULATIVE_SLOT,
            StorageSlot::PriceBCumulative => PRICE_B_CUMULATIVE_SLOT,
        }
    }
}

/// Historical state proof as submitted by a caller. The engine never interprets
/// these bytes itself, they are handed to the trie verifier untouched.
#[cw_serde]
#[derive(Default)]
pub struct ProofData {
    /// RLP encoded header of the proven block
    pub block: Binary,
    /// Account proof of the pair contract against the header's state root
    pub account_proof_nodes_rlp: Binary,
    /// Storage proof of the packed reserves and reserve timestamp in slot 8
    pub reserve_and_timestamp_proof_nodes_rlp: Binary,
    /// Storage proof of the selected price accumulator
    pub price_accumulator_proof_nodes_rlp: Binary,
}

/// Values the trie verifier extracted from an authentic proof
#[cw_serde]
pub struct VerifiedState {
    pub block_timestamp: u64,
    pub block_number: u64,
    pub price_cumulative: Uint256,
    pub reserve_a: Uint128,
    pub reserve_b: Uint128,
    /// Timestamp of the last reserve update at or before the proven block
    pub reserve_timestamp: u64,
}
