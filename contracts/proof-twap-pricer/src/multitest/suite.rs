use anyhow::Result as AnyResult;

use cosmwasm_std::{Addr, Coin, StdResult, Uint128, Uint256};

use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use proof_twap::{proof::ProofData, FreshnessWindow, Token};
use twap_tests::builder::{TwapSuite, TwapSuiteBuilder};

use crate::{
    msg::{ExecuteMsg, InstantiateMsg, PriceResponse, QueryMsg, VerifiedBlockResponse},
    state::Config,
};

pub const USDC: &str = "uusdc";
pub const JUNO: &str = "ujuno";
pub const ADMIN: &str = "admin";
pub const FINALIZER: &str = "finalizer";
/// Seconds per block used when advancing the chain
pub const BLOCK_TIME: u64 = 5;

fn store_pricer(app: &mut App) -> u64 {
    let contract = Box::new(ContractWrapper::new_with_empty(
        crate::contract::execute,
        crate::contract::instantiate,
        crate::contract::query,
    ));

    app.store_code(contract)
}

#[derive(Debug)]
pub struct SuiteBuilder {
    funds: Vec<(Addr, Vec<Coin>)>,
    finalizer: String,
    subject: Token,
    assets: [Token; 2],
    reserves: (Uint128, Uint128),
    window: FreshnessWindow,
}

#[allow(dead_code)]
impl SuiteBuilder {
    pub fn new() -> Self {
        Self {
            funds: vec![],
            finalizer: FINALIZER.to_owned(),
            subject: Token::new_native(JUNO),
            assets: [Token::new_native(USDC), Token::new_native(JUNO)],
            // one juno is worth two usdc
            reserves: (Uint128::new(2_000_000), Uint128::new(1_000_000)),
            window: FreshnessWindow {
                min_blocks_back: 5,
                max_blocks_back: 200,
            },
        }
    }

    pub fn with_funds(mut self, addr: &str, funds: &[Coin]) -> Self {
        self.funds.push((Addr::unchecked(addr), funds.into()));
        self
    }

    pub fn with_finalizer(mut self, name: &str) -> Self {
        self.finalizer = name.to_owned();
        self
    }

    pub fn with_reserves(mut self, reserve_a: u128, reserve_b: u128) -> Self {
        self.reserves = (reserve_a.into(), reserve_b.into());
        self
    }

    pub fn with_window(mut self, min_blocks_back: u8, max_blocks_back: u8) -> Self {
        self.window = FreshnessWindow {
            min_blocks_back,
            max_blocks_back,
        };
        self
    }

    /// Deploys the pair, verifier and registry, lets the pool run for a few blocks,
    /// proves that block and instantiates the pricer with the proof some blocks later.
    #[track_caller]
    pub fn build(self) -> Suite {
        let mut app = App::default();
        let owner = Addr::unchecked("owner");

        let twap_builder = TwapSuiteBuilder {
            owner: owner.clone(),
            assets: self.assets,
            reserves: self.reserves,
        };
        let mut twap = twap_builder.init_twap(&mut app);

        let funds = self.funds;
        app.init_modules(|router, _, storage| -> AnyResult<()> {
            for (addr, coin) in funds {
                router.bank.init_balance(storage, &addr, coin)?;
            }
            Ok(())
        })
        .unwrap();

        let pricer_id = store_pricer(&mut app);

        advance_blocks(&mut app, 10);
        let (proof, _) = twap.prove_current_block(&mut app).unwrap();
        let proof_block = app.block_info();
        advance_blocks(&mut app, 10);

        let pricer = app
            .instantiate_contract(
                pricer_id,
                owner.clone(),
                &InstantiateMsg {
                    admin: Some(ADMIN.to_owned()),
                    finalizer: self.finalizer,
                    subject_asset: self.subject,
                    registry: twap.registry.address.to_string(),
                    pair: twap.pair.address.to_string(),
                    verifier: twap.verifier.address.to_string(),
                    window: self.window,
                    proof,
                },
                &[],
                "Proof TWAP Pricer",
                None,
            )
            .unwrap();

        Suite {
            owner: owner.to_string(),
            app,
            twap,
            pricer,
            pricer_id,
            proof_block: proof_block.height,
            proof_timestamp: proof_block.time.seconds(),
        }
    }
}

fn advance_blocks(app: &mut App, blocks: u64) {
    app.update_block(|block| {
        block.time = block.time.plus_seconds(blocks * BLOCK_TIME);
        block.height += blocks;
    });
}

pub struct Suite {
    pub owner: String,
    pub app: App,
    pub twap: TwapSuite,
    pub pricer: Addr,
    pub pricer_id: u64,
    /// Block and time attested by the proof the pricer was instantiated with
    pub proof_block: u64,
    pub proof_timestamp: u64,
}

impl Suite {
    pub fn advance_seconds(&mut self, seconds: u64) {
        self.app.update_block(|block| {
            block.time = block.time.plus_seconds(seconds);
            block.height += std::cmp::max(1, seconds / BLOCK_TIME);
        });
    }

    pub fn advance_blocks(&mut self, blocks: u64) {
        advance_blocks(&mut self.app, blocks);
    }

    pub fn block_time(&self) -> u64 {
        self.app.block_info().time.seconds()
    }

    pub fn block_height(&self) -> u64 {
        self.app.block_info().height
    }

    pub fn sync_pair(&mut self, reserve_a: u128, reserve_b: u128) -> AnyResult<AppResponse> {
        self.twap.sync_pair(&mut self.app, reserve_a, reserve_b)
    }

    /// Proves the current block of the pair and returns the proof
    pub fn prove_current_block(&mut self) -> AnyResult<ProofData> {
        let (proof, _) = self.twap.prove_current_block(&mut self.app)?;
        Ok(proof)
    }

    pub fn instantiate_pricer(&mut self, msg: &InstantiateMsg) -> AnyResult<Addr> {
        self.app.instantiate_contract(
            self.pricer_id,
            Addr::unchecked(self.owner.clone()),
            msg,
            &[],
            "Proof TWAP Pricer",
            None,
        )
    }

    /// Instantiate message matching the deployed collaborators
    pub fn instantiate_msg(&self, subject: Token) -> InstantiateMsg {
        InstantiateMsg {
            admin: None,
            finalizer: FINALIZER.to_owned(),
            subject_asset: subject,
            registry: self.twap.registry.address.to_string(),
            pair: self.twap.pair.address.to_string(),
            verifier: self.twap.verifier.address.to_string(),
            window: FreshnessWindow {
                min_blocks_back: 5,
                max_blocks_back: 200,
            },
            proof: ProofData::default(),
        }
    }

    pub fn finalize_expiry_price(
        &mut self,
        sender: &str,
        expiry_timestamp: u64,
        reference_block: u64,
    ) -> AnyResult<AppResponse> {
        self.finalize_expiry_price_with_funds(sender, expiry_timestamp, reference_block, &[])
    }

    pub fn finalize_expiry_price_with_funds(
        &mut self,
        sender: &str,
        expiry_timestamp: u64,
        reference_block: u64,
        funds: &[Coin],
    ) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(sender),
            self.pricer.clone(),
            &ExecuteMsg::FinalizeExpiryPrice {
                expiry_timestamp,
                reference_block,
            },
            funds,
        )
    }

    pub fn update_proof(&mut self, sender: &str, proof: ProofData) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(sender),
            self.pricer.clone(),
            &ExecuteMsg::UpdateProof { proof },
            &[],
        )
    }

    pub fn update_pair(&mut self, sender: &str, pair: &Addr) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(sender),
            self.pricer.clone(),
            &ExecuteMsg::UpdatePair {
                pair: pair.to_string(),
            },
            &[],
        )
    }

    pub fn update_window(
        &mut self,
        sender: &str,
        min_blocks_back: u8,
        max_blocks_back: u8,
    ) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(sender),
            self.pricer.clone(),
            &ExecuteMsg::UpdateWindow {
                window: FreshnessWindow {
                    min_blocks_back,
                    max_blocks_back,
                },
            },
            &[],
        )
    }

    pub fn update_admin(&mut self, sender: &str, admin: &str) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(sender),
            self.pricer.clone(),
            &ExecuteMsg::UpdateAdmin {
                admin: admin.to_owned(),
            },
            &[],
        )
    }

    pub fn query_config(&self) -> StdResult<Config> {
        self.app
            .wrap()
            .query_wasm_smart(self.pricer.clone(), &QueryMsg::Config {})
    }

    pub fn query_proof(&self) -> StdResult<ProofData> {
        self.app
            .wrap()
            .query_wasm_smart(self.pricer.clone(), &QueryMsg::Proof {})
    }

    pub fn query_current_price(&self) -> StdResult<PriceResponse> {
        self.app
            .wrap()
            .query_wasm_smart(self.pricer.clone(), &QueryMsg::CurrentPrice {})
    }

    pub fn query_historical_price(&self, target_timestamp: u64) -> StdResult<PriceResponse> {
        self.app.wrap().query_wasm_smart(
            self.pricer.clone(),
            &QueryMsg::HistoricalPrice { target_timestamp },
        )
    }

    pub fn query_verified_block(&self) -> StdResult<VerifiedBlockResponse> {
        self.app
            .wrap()
            .query_wasm_smart(self.pricer.clone(), &QueryMsg::VerifiedBlock {})
    }

    /// Expiry price of the subject asset recorded in the registry
    pub fn query_registry_price(&self, expiry_timestamp: u64) -> StdResult<Option<Uint256>> {
        self.twap
            .query_expiry_price(&self.app, &Token::new_native(JUNO), expiry_timestamp)
    }
}
