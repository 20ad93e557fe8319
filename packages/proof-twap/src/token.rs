use cosmwasm_std::StdError;
use cw_storage_plus::{Key, KeyDeserialize, Prefixer, PrimaryKey};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use std::fmt;

/// Asset identifier of one side of an exchange pair, either a native denom or a cw20 contract
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema, PartialOrd, Ord, Hash,
)]
pub enum Token {
    /// Native token of given name
    Native(String),
    /// Cw20 token with its cw20 contract address
    Cw20(String),
}

impl Token {
    pub fn new_native(denom: &str) -> Self {
        Self::Native(denom.to_owned())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Native(s) => write!(f, "{}", s),
            Token::Cw20(s) => write!(f, "{}", s),
        }
    }
}

impl KeyDeserialize for &Token {
    type Output = Token;

    fn from_vec(value: Vec<u8>) -> cosmwasm_std::StdResult<Self::Output> {
        let (asset_type, denom) = <(u8, &str)>::from_vec(value)?;

        match asset_type {
            0 => Ok(Token::Native(denom)),
            1 => Ok(Token::Cw20(denom)),
            _ => Err(StdError::generic_err("Invalid Token key, invalid type")),
        }
    }
}

impl<'a> Prefixer<'a> for &Token {
    fn prefix(&self) -> Vec<Key> {
        self.key()
    }
}

// Allow using `Token` as a key in a `Map`, e.g. for per-asset expiry prices
impl<'a> PrimaryKey<'a> for &Token {
    type Prefix = ();
    type SubPrefix = ();
    type Suffix = Self;
    type SuperSuffix = Self;

    fn key(&self) -> Vec<Key> {
        match self {
            Token::Native(denom) => {
                vec![Key::Val8([0]), Key::Ref(denom.as_bytes())]
            }
            Token::Cw20(addr) => vec![Key::Val8([1]), Key::Ref(addr.as_bytes())],
        }
    }
}
