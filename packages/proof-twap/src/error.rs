use cosmwasm_std::{ConversionOverflowError, DivideByZeroError, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TwapError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    ConversionOverflow(#[from] ConversionOverflowError),

    #[error("{0}")]
    DivideByZero(#[from] DivideByZeroError),

    #[error("Proof rejected by trie verifier: {reason}")]
    Authentication { reason: String },

    #[error("Proven block {block_number} is too recent: must be at most {max_allowed} for reference block {reference_block}")]
    BlockTooRecent {
        block_number: u64,
        reference_block: u64,
        max_allowed: u64,
    },

    #[error("Proven block {block_number} is too old: must be at least {min_allowed} for reference block {reference_block}")]
    BlockTooOld {
        block_number: u64,
        reference_block: u64,
        min_allowed: u64,
    },

    #[error("Target timestamp {target} must be strictly after proven block timestamp {historic}")]
    TemporalOrdering { target: u64, historic: u64 },

    #[error("Pair has an empty reserve, no price can be derived")]
    EmptyReserves {},

    #[error("Freshness window is invalid: min blocks back {min} must be positive and not above max blocks back {max}")]
    InvalidWindow { min: u8, max: u8 },
}
