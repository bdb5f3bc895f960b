//! Provider environment for the Algorand connector.
//!
//! Connection parameters are derived from the network tier against the
//! AlgoNode public endpoints (free tier, no access token). The map is
//! rebuilt as a whole on every tier change.

use std::sync::RwLock;

use once_cell::sync::Lazy;

use crate::types::{NetworkProvider, ProviderEnv};

/// Recognized environment keys for the Algorand connector.
pub const ALGO_SERVER: &str = "ALGO_SERVER";
pub const ALGO_PORT: &str = "ALGO_PORT";
pub const ALGO_TOKEN: &str = "ALGO_TOKEN";
pub const ALGO_INDEXER_SERVER: &str = "ALGO_INDEXER_SERVER";
pub const ALGO_INDEXER_PORT: &str = "ALGO_INDEXER_PORT";
pub const ALGO_INDEXER_TOKEN: &str = "ALGO_INDEXER_TOKEN";
pub const ALGO_ISOLATED_NETWORK: &str = "ALGO_ISOLATED_NETWORK";

const PROVIDER_DOMAIN: &str = "algonode.cloud";

// Public-tier access
const TOKEN: &str = "";

#[derive(Debug, Default)]
struct ProviderState {
    network: NetworkProvider,
    env: Option<ProviderEnv>,
}

static PROVIDER: Lazy<RwLock<ProviderState>> = Lazy::new(|| RwLock::new(ProviderState::default()));

/// Rebuild the provider environment for `network` and make it active.
pub fn reset_provider(network: NetworkProvider) -> ProviderEnv {
    let tier = network.lowercase();
    let mut env = ProviderEnv::new();
    env.insert(
        ALGO_SERVER.to_string(),
        format!("https://{}-api.{}", tier, PROVIDER_DOMAIN),
    );
    env.insert(ALGO_PORT.to_string(), String::new());
    env.insert(ALGO_TOKEN.to_string(), TOKEN.to_string());
    env.insert(
        ALGO_INDEXER_SERVER.to_string(),
        format!("https://{}-idx.{}", tier, PROVIDER_DOMAIN),
    );
    env.insert(ALGO_INDEXER_PORT.to_string(), String::new());
    env.insert(ALGO_INDEXER_TOKEN.to_string(), TOKEN.to_string());
    env.insert(ALGO_ISOLATED_NETWORK.to_string(), "no".to_string());

    let mut state = PROVIDER.write().expect("provider lock");
    state.network = network;
    state.env = Some(env.clone());
    env
}

/// The environment for the requested tier.
///
/// With no explicit tier this returns the active environment, building
/// one for `TestNet` if none has ever been built. Requesting a tier
/// other than the active one reconstructs the map as a whole.
pub fn get_provider_env(network: Option<NetworkProvider>) -> ProviderEnv {
    {
        let state = PROVIDER.read().expect("provider lock");
        if let Some(env) = &state.env {
            match network {
                None => return env.clone(),
                Some(net) if net == state.network => return env.clone(),
                Some(_) => {}
            }
        }
    }
    reset_provider(network.unwrap_or_default())
}

/// The tier the current environment was built for.
pub fn active_network() -> NetworkProvider {
    PROVIDER.read().expect("provider lock").network
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_lock;

    #[test]
    fn reset_builds_tier_specific_endpoints() {
        let _guard = test_lock();

        for network in NetworkProvider::ALL {
            let env = reset_provider(network);
            let tier = network.lowercase();
            assert_eq!(
                env.get(ALGO_SERVER).unwrap(),
                &format!("https://{}-api.algonode.cloud", tier)
            );
            assert_eq!(
                env.get(ALGO_INDEXER_SERVER).unwrap(),
                &format!("https://{}-idx.algonode.cloud", tier)
            );
            assert_eq!(env.get(ALGO_PORT).unwrap(), "");
            assert_eq!(env.get(ALGO_TOKEN).unwrap(), "");
            assert_eq!(env.get(ALGO_INDEXER_PORT).unwrap(), "");
            assert_eq!(env.get(ALGO_INDEXER_TOKEN).unwrap(), "");
            assert_eq!(env.get(ALGO_ISOLATED_NETWORK).unwrap(), "no");
            assert_eq!(active_network(), network);
        }
    }

    #[test]
    fn unsupported_tier_name_resolves_to_testnet_environment() {
        let _guard = test_lock();

        let env = reset_provider(NetworkProvider::from("NoSuchNet"));
        assert_eq!(
            env.get(ALGO_SERVER).unwrap(),
            "https://testnet-api.algonode.cloud"
        );
        assert_eq!(active_network(), NetworkProvider::TestNet);
    }

    #[test]
    fn tier_requests_reconstruct_the_whole_map() {
        let _guard = test_lock();

        reset_provider(NetworkProvider::MainNet);
        // No explicit tier: the active map is returned as-is.
        let env = get_provider_env(None);
        assert_eq!(
            env.get(ALGO_SERVER).unwrap(),
            "https://mainnet-api.algonode.cloud"
        );

        // An explicit tier change rebuilds rather than patches.
        let env = get_provider_env(Some(NetworkProvider::TestNet));
        assert_eq!(
            env.get(ALGO_SERVER).unwrap(),
            "https://testnet-api.algonode.cloud"
        );
        assert_eq!(active_network(), NetworkProvider::TestNet);
    }
}
