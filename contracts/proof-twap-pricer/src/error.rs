use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use proof_twap::{Token, TwapError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Twap(#[from] TwapError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Pair of {asset_a} and {asset_b} does not contain subject asset {subject}")]
    SubjectNotInPair {
        subject: Token,
        asset_a: Token,
        asset_b: Token,
    },

    #[error("Pair assets are identical: {asset}")]
    IdenticalPairAssets { asset: Token },

    #[error("Invalid finalizer address: {finalizer}")]
    InvalidFinalizer { finalizer: String },

    #[error("Cannot migrate from {previous_contract}")]
    CannotMigrate { previous_contract: String },
}
