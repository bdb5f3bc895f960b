//! Normalization of raw Algorand asset records.

use serde::Deserialize;

use crate::types::Token;
use crate::util::{decode_b64_string, format_with_decimals, trim_byte_string};

/// Raw asset record as returned by the indexer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAsset {
    #[serde(default)]
    pub index: u64,
    #[serde(default)]
    pub params: AssetParams,
}

/// Asset parameters; every field may be absent in chain responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "name-b64", default)]
    pub name_b64: Option<String>,
    #[serde(rename = "unit-name", default)]
    pub unit_name: Option<String>,
    #[serde(rename = "unit-name-b64", default)]
    pub unit_name_b64: Option<String>,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
}

/// One candidate source for a metadata field.
enum MetaSource<'a> {
    Plain(Option<&'a str>),
    Base64(Option<&'a str>),
}

/// Walk an ordered candidate list; the first non-empty source wins and
/// later sources are never consulted.
fn resolve_meta(candidates: &[MetaSource<'_>]) -> Option<String> {
    for candidate in candidates {
        match candidate {
            MetaSource::Plain(Some(value)) => {
                let trimmed = trim_byte_string(value);
                if !trimmed.is_empty() {
                    return Some(trimmed);
                }
            }
            MetaSource::Base64(Some(value)) => {
                if let Some(decoded) = decode_b64_string(value) {
                    if !decoded.is_empty() {
                        return Some(decoded);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

fn asset_symbol(params: &AssetParams, index: u64) -> String {
    resolve_meta(&[
        MetaSource::Plain(params.unit_name.as_deref()),
        MetaSource::Base64(params.unit_name_b64.as_deref()),
    ])
    .unwrap_or_else(|| format!("#{}", index))
}

fn asset_name(params: &AssetParams, symbol: &str) -> String {
    resolve_meta(&[
        MetaSource::Plain(params.name.as_deref()),
        MetaSource::Base64(params.name_b64.as_deref()),
    ])
    .unwrap_or_else(|| format!("Untitled ({})", symbol))
}

/// Build a normalized [`Token`] from a raw asset record and the holding
/// amount in atomic units.
pub fn normalize_asset(asset: &RawAsset, holding: u64) -> Token {
    let params = &asset.params;
    let symbol = asset_symbol(params, asset.index);
    let name = asset_name(params, &symbol);

    Token {
        id: asset.index,
        name,
        symbol,
        decimals: params.decimals,
        amount: format_with_decimals(holding, params.decimals),
        supply: params.total,
        url: params
            .url
            .as_deref()
            .map(trim_byte_string)
            .unwrap_or_default(),
        verified: params.verified.unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_asset_synthesizes_name_and_symbol() {
        let asset = RawAsset {
            index: 7,
            params: AssetParams::default(),
        };
        let token = normalize_asset(&asset, 0);
        assert_eq!(token.id, 7);
        assert_eq!(token.name, "Untitled (#7)");
        assert_eq!(token.symbol, "#7");
        assert!(!token.verified);
        assert_eq!(token.amount, "0");
    }

    #[test]
    fn explicit_fields_win_outright() {
        let asset = RawAsset {
            index: 7,
            params: AssetParams {
                name: Some("Widget".to_string()),
                // A decoded value that must never be consulted
                name_b64: Some("R2FkZ2V0".to_string()),
                unit_name: Some("XYZ".to_string()),
                ..AssetParams::default()
            },
        };
        let token = normalize_asset(&asset, 0);
        assert_eq!(token.name, "Widget");
        assert_eq!(token.symbol, "XYZ");
        assert!(!token.verified);
    }

    #[test]
    fn base64_fields_back_fill_missing_metadata() {
        let asset = RawAsset {
            index: 31,
            params: AssetParams {
                // "Widget\0\0" / "XYZ\0"
                name_b64: Some("V2lkZ2V0AAA=".to_string()),
                unit_name_b64: Some("WFlaAA==".to_string()),
                ..AssetParams::default()
            },
        };
        let token = normalize_asset(&asset, 0);
        assert_eq!(token.name, "Widget");
        assert_eq!(token.symbol, "XYZ");
    }

    #[test]
    fn holding_amount_converts_to_display_units() {
        let asset = RawAsset {
            index: 9,
            params: AssetParams {
                unit_name: Some("USDC".to_string()),
                decimals: 6,
                total: Some(10_000_000),
                url: Some("https://example.org\0".to_string()),
                verified: Some(true),
                ..AssetParams::default()
            },
        };
        let token = normalize_asset(&asset, 2_500_000);
        assert_eq!(token.amount, "2.5");
        assert_eq!(token.decimals, 6);
        assert_eq!(token.supply, Some(10_000_000));
        assert_eq!(token.url, "https://example.org");
        assert!(token.verified);
    }

    #[test]
    fn raw_asset_deserializes_from_indexer_shape() {
        let asset: RawAsset = serde_json::from_str(
            r#"{"index": 123, "params": {"unit-name": "GEM", "decimals": 2, "total": 1000}}"#,
        )
        .unwrap();
        let token = normalize_asset(&asset, 150);
        assert_eq!(token.symbol, "GEM");
        assert_eq!(token.name, "Untitled (GEM)");
        assert_eq!(token.amount, "1.5");
    }
}
