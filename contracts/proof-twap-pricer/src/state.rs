use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;
use proof_twap::{proof::ProofData, Denomination, FreshnessWindow, Token};

#[cw_serde]
pub struct Config {
    /// The address allowed to change the pair, proof, window and admin
    pub admin: Addr,
    /// The only address allowed to push expiry prices to the registry
    pub finalizer: Addr,
    /// Asset whose price is recorded
    pub subject_asset: Token,
    /// The other asset of the pair, which the subject is priced in
    pub denomination_asset: Token,
    pub denomination: Denomination,
    /// Oracle registry receiving finalized expiry prices
    pub registry: Addr,
    pub pair: Addr,
    /// Contract authenticating historical state proofs of the pair
    pub verifier: Addr,
    pub window: FreshnessWindow,
}

pub const CONFIG: Item<Config> = Item::new("config");
/// Most recently configured proof of the pair's historical state
pub const PROOF: Item<ProofData> = Item::new("proof");
