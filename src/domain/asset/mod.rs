//! Asset domain — catalog entries, address index, lookup.

pub mod catalog;
#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::{AssetId, ContractAddress};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use catalog::AssetCatalog;

/// A catalog asset with the contract addresses it is deployed at.
///
/// Immutable once built; a lookup hands out clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: AssetId,
    pub name: String,
    pub symbol: String,
    /// Platform name (e.g. `"ethereum"`) → lower-cased contract address.
    pub platform_addresses: BTreeMap<String, ContractAddress>,
}

impl AssetRecord {
    /// `"Name (SYMBOL)"`, as shown in the dashboard banner.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.symbol.to_uppercase())
    }

    /// Whether any platform lists this address.
    pub fn is_deployed_at(&self, address: &ContractAddress) -> bool {
        self.platform_addresses.values().any(|a| a == address)
    }

    /// Platforms the address is deployed on.
    pub fn platforms_for(&self, address: &ContractAddress) -> Vec<&str> {
        self.platform_addresses
            .iter()
            .filter(|(_, a)| *a == address)
            .map(|(platform, _)| platform.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AssetRecord {
        let mut platform_addresses = BTreeMap::new();
        platform_addresses.insert("ethereum".to_string(), ContractAddress::new("0xAbC"));
        platform_addresses.insert("arbitrum-one".to_string(), ContractAddress::new("0xdef"));
        AssetRecord {
            id: AssetId::from("example"),
            name: "Example".to_string(),
            symbol: "exm".to_string(),
            platform_addresses,
        }
    }

    #[test]
    fn test_display_name_uppercases_symbol() {
        assert_eq!(record().display_name(), "Example (EXM)");
    }

    #[test]
    fn test_is_deployed_at_is_case_insensitive() {
        let r = record();
        assert!(r.is_deployed_at(&ContractAddress::new("0xABC")));
        assert!(r.is_deployed_at(&ContractAddress::new("0xDEF")));
        assert!(!r.is_deployed_at(&ContractAddress::new("0x123")));
        assert_eq!(r.platforms_for(&ContractAddress::new("0xabc")), vec!["ethereum"]);
    }
}
