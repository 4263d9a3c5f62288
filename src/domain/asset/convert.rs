//! Conversion: CoinListEntry → AssetRecord.

use super::wire::CoinListEntry;
use super::AssetRecord;
use crate::shared::{AssetId, ContractAddress};

impl From<CoinListEntry> for AssetRecord {
    fn from(source: CoinListEntry) -> Self {
        let platform_addresses = source
            .platforms
            .into_iter()
            .filter_map(|(platform, address)| match address {
                Some(a) if !a.is_empty() => Some((platform, ContractAddress::new(&a))),
                _ => None,
            })
            .collect();

        Self {
            id: AssetId::from(source.id),
            name: source.name,
            symbol: source.symbol,
            platform_addresses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_null_and_empty_addresses() {
        let json = r#"{
            "id": "usd-coin",
            "symbol": "usdc",
            "name": "USDC",
            "platforms": {
                "ethereum": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
                "solana": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                "": "",
                "near-protocol": null
            }
        }"#;
        let entry: CoinListEntry = serde_json::from_str(json).unwrap();
        let record = AssetRecord::from(entry);

        assert_eq!(record.id.as_str(), "usd-coin");
        assert_eq!(record.platform_addresses.len(), 2);
        assert_eq!(
            record.platform_addresses["ethereum"].as_str(),
            "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
        );
        assert_eq!(
            record.platform_addresses["solana"].as_str(),
            "epjfwdd5aufqssqem2qn1xzybapc8g4weggkzwytdt1v"
        );
    }

    #[test]
    fn test_missing_platforms_field() {
        let json = r#"{"id": "bitcoin", "symbol": "btc", "name": "Bitcoin"}"#;
        let entry: CoinListEntry = serde_json::from_str(json).unwrap();
        let record = AssetRecord::from(entry);
        assert!(record.platform_addresses.is_empty());
        assert_eq!(record.display_name(), "Bitcoin (BTC)");
    }
}
