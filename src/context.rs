//! Process-wide chain and network selection.
//!
//! Downstream query helpers need the "current" chain and tier without
//! threading them through every call, so the pair lives behind explicit
//! get/select functions. Only the registry and the runtime lifecycle
//! write here.

use std::sync::RwLock;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::types::{ChainSymbol, NetworkProvider};

#[derive(Debug, Clone)]
struct Selection {
    chain: ChainSymbol,
    network: NetworkProvider,
}

static SELECTION: Lazy<RwLock<Selection>> = Lazy::new(|| {
    RwLock::new(Selection {
        chain: ChainSymbol::Algo,
        network: NetworkProvider::TestNet,
    })
});

/// Currently selected chain. Defaults to `ALGO`.
pub fn get_blockchain() -> ChainSymbol {
    SELECTION.read().expect("selection lock").chain.clone()
}

/// Currently selected network tier. Defaults to `TestNet`.
pub fn get_blockchain_network() -> NetworkProvider {
    SELECTION.read().expect("selection lock").network
}

/// Persist `chain` as the active selection.
pub fn select_blockchain(chain: ChainSymbol) {
    debug!(chain = %chain, "selecting blockchain");
    SELECTION.write().expect("selection lock").chain = chain;
}

/// Persist `network` as the active tier.
pub fn select_blockchain_network(network: NetworkProvider) {
    debug!(network = %network, "selecting blockchain network");
    SELECTION.write().expect("selection lock").network = network;
}

#[cfg(test)]
pub(crate) static TEST_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn test_lock() -> std::sync::MutexGuard<'static, ()> {
    TEST_GUARD
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_round_trips() {
        let _guard = test_lock();

        select_blockchain(ChainSymbol::Eth);
        select_blockchain_network(NetworkProvider::MainNet);
        assert_eq!(get_blockchain(), ChainSymbol::Eth);
        assert_eq!(get_blockchain_network(), NetworkProvider::MainNet);

        select_blockchain(ChainSymbol::Algo);
        select_blockchain_network(NetworkProvider::TestNet);
        assert_eq!(get_blockchain(), ChainSymbol::Algo);
        assert_eq!(get_blockchain_network(), NetworkProvider::TestNet);
    }
}
