//! Fungible token amounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An amount of a single denomination, e.g. `100stake`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u64,
}

/// Errors produced while validating or parsing a coin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoinError {
    #[error("invalid denom: {0}")]
    InvalidDenom(String),
    #[error("invalid coin expression: {0}")]
    InvalidCoin(String),
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Check the denomination: 3 to 128 characters, a lowercase letter first,
    /// then lowercase letters, digits or `/`.
    pub fn validate(&self) -> Result<(), CoinError> {
        validate_denom(&self.denom)
    }
}

/// Validate a bare denomination string.
pub fn validate_denom(denom: &str) -> Result<(), CoinError> {
    let valid_len = (3..=128).contains(&denom.len());
    let mut chars = denom.chars();
    let valid_head = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    let valid_tail = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '/');
    if valid_len && valid_head && valid_tail {
        Ok(())
    } else {
        Err(CoinError::InvalidDenom(denom.to_string()))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| CoinError::InvalidCoin(s.to_string()))?;
        let (amount, denom) = s.split_at(split);
        let amount = amount
            .parse::<u64>()
            .map_err(|_| CoinError::InvalidCoin(s.to_string()))?;
        let coin = Coin::new(denom, amount);
        coin.validate()?;
        Ok(coin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let coin: Coin = "100stake".parse().unwrap();
        assert_eq!(coin, Coin::new("stake", 100));
        assert_eq!(coin.to_string(), "100stake");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("stake".parse::<Coin>().is_err());
        assert!("100".parse::<Coin>().is_err());
        assert!("100ST".parse::<Coin>().is_err());
        assert!("99999999999999999999999stake".parse::<Coin>().is_err());
    }

    #[test]
    fn test_validate_denom() {
        assert!(validate_denom("stake").is_ok());
        assert!(validate_denom("ibc/atom2").is_ok());
        assert!(validate_denom("ab").is_err());
        assert!(validate_denom("1abc").is_err());
    }

    #[test]
    fn test_is_zero() {
        assert!(Coin::new("stake", 0).is_zero());
        assert!(!Coin::new("stake", 1).is_zero());
    }
}
