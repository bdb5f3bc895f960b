//! The capability contract every chain implementation satisfies.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::types::{Account, ChainSymbol, NetworkProvider, ProviderEnv};

/// Chain-specific capability set.
///
/// Read paths are infallible by signature: a connector that cannot
/// answer degrades to a neutral value instead of erroring, so calling
/// code stays uniform across chains.
#[async_trait]
pub trait NetworkConnector: Send + Sync {
    /// The chain this connector serves.
    fn chain(&self) -> ChainSymbol;

    /// Fetch account details from the network.
    ///
    /// Always yields a usable structure; lookup failures degrade to an
    /// empty account.
    async fn fetch_account(&self, address: &str) -> Account;

    /// Chain-specific connection parameters for `network`.
    fn provider_env(&self, network: Option<NetworkProvider>) -> ProviderEnv;
}

/// Stub connector generated for chains with no registered implementation.
///
/// Every capability call logs a diagnostic notice and returns a neutral
/// value, so unregistered chains never need special-casing upstream.
pub struct UnsupportedConnector {
    chain: ChainSymbol,
    instance_id: String,
}

impl UnsupportedConnector {
    pub fn new(chain: ChainSymbol) -> Self {
        let instance_id = format!("stub-{}", Uuid::new_v4());
        Self { chain, instance_id }
    }

    fn unimplemented(&self, method: &str) {
        info!(
            chain = %self.chain,
            connector = %self.instance_id,
            "unsupported {} call {:?}",
            self.chain,
            method
        );
    }
}

#[async_trait]
impl NetworkConnector for UnsupportedConnector {
    fn chain(&self) -> ChainSymbol {
        self.chain.clone()
    }

    async fn fetch_account(&self, _address: &str) -> Account {
        self.unimplemented("fetch_account");
        Value::Array(Vec::new())
    }

    fn provider_env(&self, _network: Option<NetworkProvider>) -> ProviderEnv {
        self.unimplemented("provider_env");
        ProviderEnv::new()
    }
}
