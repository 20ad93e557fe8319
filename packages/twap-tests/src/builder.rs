use anyhow::Result as AnyResult;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Empty, StdResult, Uint128, Uint256};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use proof_twap::pair::{CumulativePricesResponse, PairQueryMsg, ReservesResponse};
use proof_twap::proof::ProofData;
use proof_twap::registry::{ExpiryPriceResponse, RegistryQueryMsg};
use proof_twap::Token;

use crate::mock_pair::{ExecuteMsg as PairExecuteMsg, InstantiateMsg as PairInstantiateMsg};
use crate::mock_verifier::{Attestation, ExecuteMsg as VerifierExecuteMsg};

// -------------------------------------------------------------------------------------------------
// Contracts
// -------------------------------------------------------------------------------------------------

/// Contract code of a constant-product pair exposing reserves and accumulators.
fn contract_pair() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new_with_empty(
        crate::mock_pair::execute,
        crate::mock_pair::instantiate,
        crate::mock_pair::query,
    );

    Box::new(contract)
}

fn contract_verifier() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new_with_empty(
        crate::mock_verifier::execute,
        crate::mock_verifier::instantiate,
        crate::mock_verifier::query,
    );

    Box::new(contract)
}

fn contract_registry() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new_with_empty(
        crate::mock_registry::execute,
        crate::mock_registry::instantiate,
        crate::mock_registry::query,
    );

    Box::new(contract)
}

// -------------------------------------------------------------------------------------------------
// Init
// -------------------------------------------------------------------------------------------------

fn init_pair(
    app: &mut App,
    pair_code_id: u64,
    owner: Addr,
    assets: &[Token; 2],
    reserves: (Uint128, Uint128),
) -> Addr {
    app.instantiate_contract(
        pair_code_id,
        owner,
        &PairInstantiateMsg {
            asset_a: assets[0].clone(),
            asset_b: assets[1].clone(),
            reserve_a: reserves.0,
            reserve_b: reserves.1,
        },
        &[],
        "Mock Pair",
        None,
    )
    .unwrap()
}

fn init_empty(app: &mut App, code_id: u64, owner: Addr, label: &str) -> Addr {
    app.instantiate_contract(code_id, owner, &Empty {}, &[], label, None)
        .unwrap()
}

/// Proof whose bytes are unique to `block_number`.
pub fn proof_for_block(block_number: u64) -> ProofData {
    ProofData {
        block: Binary::from(block_number.to_be_bytes().to_vec()),
        account_proof_nodes_rlp: Binary::from(b"account".to_vec()),
        reserve_and_timestamp_proof_nodes_rlp: Binary::from(b"reserves".to_vec()),
        price_accumulator_proof_nodes_rlp: Binary::from(b"accumulator".to_vec()),
    }
}

// -------------------------------------------------------------------------------------------------
// SuiteBuilder
// -------------------------------------------------------------------------------------------------

/// Stores a contract info.
#[cw_serde]
pub struct ContractInfo {
    pub address: Addr,
    pub code_id: u64,
}

/// Deploys the collaborators of a proof-twap pricer: a pair, a trie verifier and a registry.
pub struct TwapSuiteBuilder {
    pub owner: Addr,
    pub assets: [Token; 2],
    pub reserves: (Uint128, Uint128),
}

impl TwapSuiteBuilder {
    pub fn init_twap(self, app: &mut App) -> TwapSuite {
        let pair_code_id = app.store_code(contract_pair());
        let verifier_code_id = app.store_code(contract_verifier());
        let registry_code_id = app.store_code(contract_registry());

        let pair_addr = init_pair(
            app,
            pair_code_id,
            self.owner.clone(),
            &self.assets,
            self.reserves,
        );
        let verifier_addr = init_empty(
            app,
            verifier_code_id,
            self.owner.clone(),
            "Mock Trie Verifier",
        );
        let registry_addr = init_empty(
            app,
            registry_code_id,
            self.owner.clone(),
            "Mock Oracle Registry",
        );

        TwapSuite {
            owner: self.owner,
            pair: ContractInfo {
                address: pair_addr,
                code_id: pair_code_id,
            },
            verifier: ContractInfo {
                address: verifier_addr,
                code_id: verifier_code_id,
            },
            registry: ContractInfo {
                address: registry_addr,
                code_id: registry_code_id,
            },
        }
    }
}

/// Stores information related to the deployed collaborators.
pub struct TwapSuite {
    pub owner: Addr,
    pub pair: ContractInfo,
    pub verifier: ContractInfo,
    pub registry: ContractInfo,
}

impl TwapSuite {
    /// Deploys another pair with the same code, e.g. to re-point a pricer.
    pub fn create_pair(
        &mut self,
        app: &mut App,
        assets: &[Token; 2],
        reserves: (Uint128, Uint128),
    ) -> Addr {
        init_pair(app, self.pair.code_id, self.owner.clone(), assets, reserves)
    }

    /// Simulates pool activity at the current block time.
    pub fn sync_pair(
        &mut self,
        app: &mut App,
        reserve_a: u128,
        reserve_b: u128,
    ) -> AnyResult<AppResponse> {
        app.execute_contract(
            self.owner.clone(),
            self.pair.address.clone(),
            &PairExecuteMsg::Sync {
                reserve_a: reserve_a.into(),
                reserve_b: reserve_b.into(),
            },
            &[],
        )
    }

    pub fn set_cumulative_prices(
        &mut self,
        app: &mut App,
        price_a_cumulative_last: Uint256,
        price_b_cumulative_last: Uint256,
    ) -> AnyResult<AppResponse> {
        app.execute_contract(
            self.owner.clone(),
            self.pair.address.clone(),
            &PairExecuteMsg::SetCumulativePrices {
                price_a_cumulative_last,
                price_b_cumulative_last,
            },
            &[],
        )
    }

    pub fn attest(
        &mut self,
        app: &mut App,
        proof: &ProofData,
        attestation: Attestation,
    ) -> AnyResult<AppResponse> {
        app.execute_contract(
            self.owner.clone(),
            self.verifier.address.clone(),
            &VerifierExecuteMsg::Attest {
                proof: proof.clone(),
                attestation,
            },
            &[],
        )
    }

    /// Snapshots the suite's pair at the current block and registers a proof of it with
    /// the verifier, as if the proof had been built from that block's state trie.
    pub fn prove_current_block(&mut self, app: &mut App) -> AnyResult<(ProofData, Attestation)> {
        let pair = self.pair.address.clone();
        self.prove_pair_at_current_block(app, &pair)
    }

    pub fn prove_pair_at_current_block(
        &mut self,
        app: &mut App,
        pair: &Addr,
    ) -> AnyResult<(ProofData, Attestation)> {
        let block = app.block_info();
        let reserves: ReservesResponse = app
            .wrap()
            .query_wasm_smart(pair.clone(), &PairQueryMsg::Reserves {})?;
        let prices: CumulativePricesResponse = app
            .wrap()
            .query_wasm_smart(pair.clone(), &PairQueryMsg::CumulativePrices {})?;

        let proof = proof_for_block(block.height);
        let attestation = Attestation {
            pair: pair.to_string(),
            block_number: block.height,
            block_timestamp: block.time.seconds(),
            price_a_cumulative: prices.price_a_cumulative_last,
            price_b_cumulative: prices.price_b_cumulative_last,
            reserve_a: reserves.reserve_a,
            reserve_b: reserves.reserve_b,
            reserve_timestamp: reserves.block_timestamp_last,
        };
        self.attest(app, &proof, attestation.clone())?;

        Ok((proof, attestation))
    }

    pub fn query_cumulative_prices(&self, app: &App) -> StdResult<CumulativePricesResponse> {
        app.wrap().query_wasm_smart(
            self.pair.address.clone(),
            &PairQueryMsg::CumulativePrices {},
        )
    }

    pub fn query_expiry_price(
        &self,
        app: &App,
        asset: &Token,
        expiry_timestamp: u64,
    ) -> StdResult<Option<Uint256>> {
        let response: ExpiryPriceResponse = app.wrap().query_wasm_smart(
            self.registry.address.clone(),
            &RegistryQueryMsg::ExpiryPrice {
                asset: asset.clone(),
                expiry_timestamp,
            },
        )?;
        Ok(response.price)
    }
}
