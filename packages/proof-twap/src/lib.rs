pub mod engine;
pub mod error;
pub mod fixed_point;
pub mod pair;
pub mod proof;
pub mod registry;
pub mod token;
pub mod verifier;
pub mod window;

pub use crate::engine::{verify_and_extrapolate, Denomination};
pub use crate::error::TwapError;
pub use crate::fixed_point::Uq112x112;
pub use crate::token::Token;
pub use crate::window::FreshnessWindow;

/// All prices leaving the engine boundary are expressed with 8 decimal places.
pub const PRICE_SCALE: u128 = 100_000_000;
