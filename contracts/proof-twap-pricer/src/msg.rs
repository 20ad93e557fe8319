use crate::state::Config;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint256;
use proof_twap::{proof::ProofData, FreshnessWindow, Token};

#[cw_serde]
pub struct InstantiateMsg {
    /// Address allowed to update configuration. Defaults to the instantiating sender
    pub admin: Option<String>,
    /// Address allowed to finalize expiry prices
    pub finalizer: String,
    /// Asset to price. The pair's other asset becomes the denomination
    pub subject_asset: Token,
    /// Oracle registry receiving expiry prices
    pub registry: String,
    /// Exchange pair containing the subject asset
    pub pair: String,
    /// Trie verifier authenticating historical state proofs
    pub verifier: String,
    /// Accepted distance of the proven block from the reference block
    pub window: FreshnessWindow,
    pub proof: ProofData,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Computes the TWAP from the proven block up to `expiry_timestamp` and records it
    /// in the registry. Only callable by the finalizer.
    /// The proven block has to be between `min_blocks_back` and `max_blocks_back`
    /// blocks before `reference_block`.
    FinalizeExpiryPrice {
        expiry_timestamp: u64,
        reference_block: u64,
    },
    /// Replaces the stored proof. Only callable by the admin.
    UpdateProof { proof: ProofData },
    /// Points the pricer to another pair containing the subject asset. Only callable by the admin.
    UpdatePair { pair: String },
    UpdateWindow { window: FreshnessWindow },
    UpdateAdmin { admin: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the pricer configuration.
    #[returns(Config)]
    Config {},
    #[returns(ProofData)]
    Proof {},
    /// TWAP from the proven block up to the current block time
    #[returns(PriceResponse)]
    CurrentPrice {},
    /// TWAP from the proven block up to `target_timestamp`
    #[returns(PriceResponse)]
    HistoricalPrice { target_timestamp: u64 },
    /// Block attested by the stored proof
    #[returns(VerifiedBlockResponse)]
    VerifiedBlock {},
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct PriceResponse {
    /// Subject price in denomination units, 8 decimals
    pub price: Uint256,
    pub target_timestamp: u64,
    pub block_number: u64,
    pub block_timestamp: u64,
}

#[cw_serde]
pub struct VerifiedBlockResponse {
    pub block_number: u64,
    pub block_timestamp: u64,
}
