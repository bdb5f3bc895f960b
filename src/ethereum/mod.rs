//! Ethereum connector stub.
//!
//! Holds the registry slot for `ETH` until a native integration lands:
//! the provider environment is a fixed testnet pointer and account
//! lookups degrade to the neutral empty value.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::connector::NetworkConnector;
use crate::types::{Account, ChainSymbol, NetworkProvider, ProviderEnv};

pub const ETH_NET: &str = "ETH_NET";

const DEFAULT_ETH_NETWORK: &str = "ropsten";

pub struct EthereumConnector {
    instance_id: String,
}

impl EthereumConnector {
    pub fn new() -> Self {
        Self {
            instance_id: format!("eth-{}", Uuid::new_v4()),
        }
    }
}

impl Default for EthereumConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkConnector for EthereumConnector {
    fn chain(&self) -> ChainSymbol {
        ChainSymbol::Eth
    }

    async fn fetch_account(&self, _address: &str) -> Account {
        info!(connector = %self.instance_id, "unsupported ETH call \"fetch_account\"");
        Value::Array(Vec::new())
    }

    fn provider_env(&self, _network: Option<NetworkProvider>) -> ProviderEnv {
        let mut env = ProviderEnv::new();
        env.insert(ETH_NET.to_string(), DEFAULT_ETH_NETWORK.to_string());
        env
    }
}
