//! Algorand connector: indexer-backed account and transaction queries,
//! provider-environment resolution, and asset normalization.

pub mod indexer;
pub mod provider;
pub mod token;

pub use indexer::{fetch_account, search_for_transactions, IndexerClient};
pub use token::{normalize_asset, AssetParams, RawAsset};

use async_trait::async_trait;
use uuid::Uuid;

use crate::connector::NetworkConnector;
use crate::types::{Account, ChainSymbol, NetworkProvider, ProviderEnv};

/// The Algorand implementation of the connector contract.
pub struct AlgorandConnector {
    instance_id: String,
}

impl AlgorandConnector {
    pub fn new() -> Self {
        Self {
            instance_id: format!("algo-{}", Uuid::new_v4()),
        }
    }
}

impl Default for AlgorandConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkConnector for AlgorandConnector {
    fn chain(&self) -> ChainSymbol {
        ChainSymbol::Algo
    }

    async fn fetch_account(&self, address: &str) -> Account {
        tracing::debug!(connector = %self.instance_id, %address, "ALGO account lookup");
        indexer::fetch_account(address).await
    }

    fn provider_env(&self, network: Option<NetworkProvider>) -> ProviderEnv {
        provider::get_provider_env(network)
    }
}
