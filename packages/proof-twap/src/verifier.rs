use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, QuerierWrapper};

use crate::error::TwapError;
use crate::proof::{ProofData, StorageSlot, VerifiedState};
use crate::window::FreshnessWindow;

/// Authenticates a historical state proof of a pair and extracts its storage values.
///
/// Implementations are authoritative: whatever they return is treated as
/// attested chain state.
pub trait TrieVerifier {
    fn verify(
        &self,
        pair: &Addr,
        window: &FreshnessWindow,
        slot: StorageSlot,
        proof: &ProofData,
    ) -> Result<VerifiedState, TwapError>;
}

/// Query interface of an external trie verifier contract.
#[cw_serde]
#[derive(QueryResponses)]
pub enum VerifierQueryMsg {
    /// Verifies the header chain and the storage branches of `proof` and returns the
    /// extracted pair state. Fails if the proof is not authentic.
    #[returns(VerifiedState)]
    VerifyProof {
        pair: String,
        min_blocks_back: u8,
        max_blocks_back: u8,
        slot: u64,
        proof: ProofData,
    },
}

/// [`TrieVerifier`] backed by a verifier contract reachable through the querier
pub struct VerifierContract<'a> {
    querier: QuerierWrapper<'a>,
    address: Addr,
}

impl<'a> VerifierContract<'a> {
    pub fn new(querier: QuerierWrapper<'a>, address: Addr) -> Self {
        Self { querier, address }
    }
}

impl TrieVerifier for VerifierContract<'_> {
    fn verify(
        &self,
        pair: &Addr,
        window: &FreshnessWindow,
        slot: StorageSlot,
        proof: &ProofData,
    ) -> Result<VerifiedState, TwapError> {
        self.querier
            .query_wasm_smart(
                self.address.to_string(),
                &VerifierQueryMsg::VerifyProof {
                    pair: pair.to_string(),
                    min_blocks_back: window.min_blocks_back,
                    max_blocks_back: window.max_blocks_back,
                    slot: slot.index(),
                    proof: proof.clone(),
                },
            )
            // any failure of the verifier means the proof could not be authenticated
            .map_err(|err| TwapError::Authentication {
                reason: err.to_string(),
            })
    }
}
