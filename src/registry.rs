//! Maps chain symbols to connector implementations.
//!
//! Lookups never fail: a chain without a registered implementation gets
//! a generated stub, and a network tier a chain cannot serve silently
//! downgrades to `TestNet`. Applying a tier persists it as the active
//! selection.

use std::sync::Arc;

use tracing::{debug, info};

use crate::algorand::AlgorandConnector;
use crate::connector::{NetworkConnector, UnsupportedConnector};
use crate::context;
use crate::ethereum::EthereumConnector;
use crate::types::{ChainSymbol, NetworkInfo, NetworkProvider};

pub(crate) struct ChainMeta {
    pub symbol: ChainSymbol,
    pub name: &'static str,
    pub abbr: &'static str,
    pub decimals: u32,
}

static NETWORKS: [ChainMeta; 2] = [
    ChainMeta {
        symbol: ChainSymbol::Algo,
        name: "Algorand",
        abbr: "ALGO",
        decimals: 6,
    },
    ChainMeta {
        symbol: ChainSymbol::Eth,
        name: "Ethereum",
        abbr: "ETH",
        decimals: 18,
    },
];

pub(crate) fn chain_meta(chain: &ChainSymbol) -> Option<&'static ChainMeta> {
    NETWORKS.iter().find(|meta| meta.symbol == *chain)
}

/// Resolve a [`NetworkConnector`] for `chain`, defaulting to the active
/// selection when no chain is supplied.
///
/// Not all tiers are accepted by all chains: only `ALGO` serves
/// `BetaNet`, so for any other chain that tier downgrades to `TestNet`
/// before being applied. Supplying a tier updates the active selection.
pub fn create_connector_api(
    chain: Option<ChainSymbol>,
    network: Option<NetworkProvider>,
) -> Arc<dyn NetworkConnector> {
    let key = chain.unwrap_or_else(context::get_blockchain);

    let connector: Arc<dyn NetworkConnector> = match &key {
        ChainSymbol::Algo => Arc::new(AlgorandConnector::new()),
        ChainSymbol::Eth => Arc::new(EthereumConnector::new()),
        other => {
            debug!(chain = %other, "no registered connector; generating stub");
            Arc::new(UnsupportedConnector::new(other.clone()))
        }
    };

    if let Some(network) = network {
        let applied = if network == NetworkProvider::BetaNet && key != ChainSymbol::Algo {
            info!(chain = %key, "BetaNet not served by chain; downgrading to TestNet");
            NetworkProvider::TestNet
        } else {
            network
        };
        context::select_blockchain_network(applied);
    }

    connector
}

/// Whether `chain` has a registered connector implementation.
pub fn is_supported_network(chain: &ChainSymbol) -> bool {
    chain_meta(chain).is_some()
}

/// UI-friendly listing of the supported chains, annotated with which
/// entry matches the active selection.
pub fn list_supported_networks() -> Vec<NetworkInfo> {
    let active = context::get_blockchain();
    NETWORKS
        .iter()
        .map(|meta| NetworkInfo {
            name: meta.name,
            abbr: meta.abbr,
            decimals: meta.decimals,
            active: meta.symbol == active,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_lock;
    use serde_json::Value;

    #[tokio::test]
    async fn unknown_chain_yields_a_neutral_stub() {
        let _guard = test_lock();

        let connector = create_connector_api(Some(ChainSymbol::from("DOGE")), None);
        assert_eq!(connector.chain(), ChainSymbol::Other("DOGE".to_string()));

        let account = connector.fetch_account("any").await;
        assert_eq!(account, Value::Array(Vec::new()));
        assert!(connector.provider_env(None).is_empty());
    }

    #[test]
    fn betanet_downgrades_for_every_chain_but_algorand() {
        let _guard = test_lock();

        create_connector_api(
            Some(ChainSymbol::from("BetaNet-unsupported-chain")),
            Some(NetworkProvider::BetaNet),
        );
        assert_eq!(context::get_blockchain_network(), NetworkProvider::TestNet);

        create_connector_api(Some(ChainSymbol::Eth), Some(NetworkProvider::BetaNet));
        assert_eq!(context::get_blockchain_network(), NetworkProvider::TestNet);

        create_connector_api(Some(ChainSymbol::Algo), Some(NetworkProvider::BetaNet));
        assert_eq!(context::get_blockchain_network(), NetworkProvider::BetaNet);

        context::select_blockchain_network(NetworkProvider::TestNet);
    }

    #[test]
    fn default_chain_comes_from_the_active_selection() {
        let _guard = test_lock();

        context::select_blockchain(ChainSymbol::Eth);
        let connector = create_connector_api(None, None);
        assert_eq!(connector.chain(), ChainSymbol::Eth);
        context::select_blockchain(ChainSymbol::Algo);
    }

    #[test]
    fn membership_test_has_no_side_effects() {
        assert!(is_supported_network(&ChainSymbol::Algo));
        assert!(is_supported_network(&ChainSymbol::Eth));
        assert!(!is_supported_network(&ChainSymbol::from("DOGE")));
    }

    #[test]
    fn listing_marks_exactly_the_active_chain() {
        let _guard = test_lock();

        context::select_blockchain(ChainSymbol::Algo);
        let listing = list_supported_networks();
        assert_eq!(listing.len(), 2);

        let algo = listing.iter().find(|n| n.abbr == "ALGO").unwrap();
        let eth = listing.iter().find(|n| n.abbr == "ETH").unwrap();
        assert!(algo.active);
        assert!(!eth.active);
        assert_eq!(algo.decimals, 6);
        assert_eq!(eth.decimals, 18);
    }
}
