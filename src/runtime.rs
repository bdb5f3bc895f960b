//! Runtime-engine lifecycle.
//!
//! The engine is a process-wide singleton: lazily constructed through a
//! caller-supplied factory, bound to one chain and tier, and kept for
//! the life of the process. Initialization runs through a
//! [`tokio::sync::OnceCell`], so two racing initializers cannot both
//! construct an engine; the loser waits and receives the winner's.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::context;
use crate::error::ConnectorError;
use crate::registry::{self, create_connector_api};
use crate::types::{
    ChainSymbol, ContractId, NetworkProvider, ProviderEnv, WalletFallback, WalletFallbackSpec,
};
use crate::util::contract_id_for_chain;

/// The opaque execution engine mediating contract and account
/// operations for the active chain. Implemented by the embedder.
pub trait RuntimeEngine: Send + Sync {
    /// The chain this engine is bound to.
    fn connector(&self) -> ChainSymbol;

    /// Point the engine at a named network tier.
    fn set_provider_by_name(&self, network: NetworkProvider);

    /// Point the engine at an explicit provider environment.
    fn set_provider_by_env(&self, env: &ProviderEnv);

    /// Install a wallet fallback; used instead of the environment setter
    /// when the caller brings a client wallet.
    fn set_wallet_fallback(&self, fallback: WalletFallback);

    /// Convert a display-unit amount into atomic units.
    fn parse_currency(&self, amount: f64, decimals: u32) -> u64;

    /// Convert an atomic-unit amount into display units.
    fn format_with_decimals(&self, atomic: u64, decimals: u32) -> String;

    /// Chain-specific display form of an address.
    fn format_address(&self, address: &str) -> String;
}

/// An engine-connected account. Implemented by the embedder.
#[async_trait]
pub trait EngineAccount: Send + Sync {
    fn address(&self) -> String;

    /// Whether the account has opted in to `token_id`.
    async fn token_accepted(&self, token_id: u64) -> crate::Result<bool>;

    /// Opt the account in to `token_id`.
    async fn token_accept(&self, token_id: u64) -> crate::Result<()>;
}

/// Options for [`load_runtime_with_opts`].
#[derive(Default)]
pub struct RuntimeOptions {
    pub chain: Option<ChainSymbol>,
    pub network: Option<NetworkProvider>,
    /// Explicit environment override, merged key-by-key on top of the
    /// computed default (override wins).
    pub provider_env: Option<ProviderEnv>,
    pub wallet_fallback: Option<WalletFallbackSpec>,
}

/// Holder for the one engine instance.
///
/// State machine: uninitialized, initializing, bound. Once bound there
/// is no way back; re-initialization requests return the existing
/// engine unchanged.
pub struct RuntimeLifecycle {
    engine: OnceCell<Arc<dyn RuntimeEngine>>,
}

impl RuntimeLifecycle {
    pub const fn new() -> Self {
        Self {
            engine: OnceCell::const_new(),
        }
    }

    /// The bound engine, or [`ConnectorError::UninitializedRuntime`]
    /// before any `load` call has completed.
    pub fn get(&self) -> crate::Result<Arc<dyn RuntimeEngine>> {
        self.engine
            .get()
            .cloned()
            .ok_or(ConnectorError::UninitializedRuntime)
    }

    /// Initialize the engine for `chain`/`network`, defaulting both from
    /// the active selection. Idempotent once bound.
    pub async fn load<F>(
        &self,
        ctor: F,
        chain: Option<ChainSymbol>,
        network: Option<NetworkProvider>,
    ) -> Arc<dyn RuntimeEngine>
    where
        F: FnOnce(&ChainSymbol) -> Arc<dyn RuntimeEngine>,
    {
        let chain = chain.unwrap_or_else(context::get_blockchain);
        let network = network.unwrap_or_else(context::get_blockchain_network);

        if let Some(existing) = self.engine.get() {
            self.note_rebind(existing, &chain);
            return existing.clone();
        }

        self.engine
            .get_or_init(move || async move {
                let _env = runtime_environment(&chain, network, None);
                let engine = ctor(&chain);
                engine.set_provider_by_name(network);
                engine
            })
            .await
            .clone()
    }

    /// Initialize the engine with an environment override and optional
    /// wallet fallback. The two installation paths are mutually
    /// exclusive per call. Idempotent once bound.
    pub async fn load_with_opts<F>(&self, ctor: F, opts: RuntimeOptions) -> Arc<dyn RuntimeEngine>
    where
        F: FnOnce(&ChainSymbol) -> Arc<dyn RuntimeEngine>,
    {
        let chain = opts.chain.unwrap_or(ChainSymbol::Algo);
        let network = opts.network.unwrap_or(NetworkProvider::TestNet);

        if let Some(existing) = self.engine.get() {
            self.note_rebind(existing, &chain);
            return existing.clone();
        }

        self.engine
            .get_or_init(move || async move {
                let mut env = runtime_environment(&chain, network, None);
                if let Some(overrides) = opts.provider_env {
                    env.extend(overrides);
                }

                let engine = ctor(&chain);
                match opts.wallet_fallback {
                    Some(spec) => engine.set_wallet_fallback(WalletFallback {
                        options: spec.options,
                        provider_env: env,
                    }),
                    None => engine.set_provider_by_env(&env),
                }
                engine
            })
            .await
            .clone()
    }

    fn note_rebind(&self, existing: &Arc<dyn RuntimeEngine>, requested: &ChainSymbol) {
        if existing.connector() != *requested {
            debug!(
                bound = %existing.connector(),
                requested = %requested,
                "runtime already bound; ignoring re-initialization"
            );
        }
    }
}

impl Default for RuntimeLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Persist the chain/network selection and derive the provider
/// environment for the pair. Selection side effects complete before the
/// environment is handed to any dependent step.
fn runtime_environment(
    chain: &ChainSymbol,
    network: NetworkProvider,
    provider_env: Option<ProviderEnv>,
) -> ProviderEnv {
    context::select_blockchain(chain.clone());
    context::select_blockchain_network(network);

    if let Some(env) = provider_env {
        return env;
    }

    let connector = create_connector_api(Some(chain.clone()), None);
    connector.provider_env(Some(network))
}

static LIFECYCLE: RuntimeLifecycle = RuntimeLifecycle::new();

/// Initialize the process-wide engine. Returns the existing engine
/// unchanged when one is already bound.
pub async fn load_runtime<F>(
    ctor: F,
    chain: Option<ChainSymbol>,
    network: Option<NetworkProvider>,
) -> Arc<dyn RuntimeEngine>
where
    F: FnOnce(&ChainSymbol) -> Arc<dyn RuntimeEngine>,
{
    LIFECYCLE.load(ctor, chain, network).await
}

/// Initialize the process-wide engine with an environment override and
/// optional wallet fallback.
pub async fn load_runtime_with_opts<F>(ctor: F, opts: RuntimeOptions) -> Arc<dyn RuntimeEngine>
where
    F: FnOnce(&ChainSymbol) -> Arc<dyn RuntimeEngine>,
{
    LIFECYCLE.load_with_opts(ctor, opts).await
}

/// The process-wide engine; callers must initialize first.
pub fn runtime() -> crate::Result<Arc<dyn RuntimeEngine>> {
    LIFECYCLE.get()
}

/// Whether the account has opted in to `token_id`; degrades to `false`.
pub async fn check_has_token(account: &dyn EngineAccount, token_id: u64) -> bool {
    account.token_accepted(token_id).await.unwrap_or(false)
}

/// Opt in to an asset if the account has not already. Returns whether
/// the account ends up opted in.
pub async fn opt_in_to_asset(account: &dyn EngineAccount, token_id: u64) -> bool {
    match account.token_accepted(token_id).await {
        Ok(true) => true,
        _ => account.token_accept(token_id).await.is_ok(),
    }
}

/// Engine-formatted display address for `account`.
pub fn format_address(account: &dyn EngineAccount) -> crate::Result<String> {
    Ok(runtime()?.format_address(&account.address()))
}

/// Convert a display-unit amount to atomic units, defaulting the
/// decimals from the active chain's registry metadata.
pub fn parse_currency(amount: f64, decimals: Option<u32>) -> crate::Result<u64> {
    let engine = runtime()?;
    let decimals = network_decimals(engine.as_ref(), decimals);
    Ok(engine.parse_currency(amount, decimals))
}

/// Convert an atomic-unit amount to display units, defaulting the
/// decimals from the active chain's registry metadata.
pub fn format_currency(atomic: u64, decimals: Option<u32>) -> crate::Result<String> {
    let engine = runtime()?;
    let decimals = network_decimals(engine.as_ref(), decimals);
    Ok(engine.format_with_decimals(atomic, decimals))
}

/// Parse a contract address for the chain the engine is bound to.
pub fn parse_contract_id(raw: &str) -> crate::Result<ContractId> {
    let engine = runtime()?;
    contract_id_for_chain(raw, &engine.connector())
}

fn network_decimals(engine: &dyn RuntimeEngine, decimals: Option<u32>) -> u32 {
    decimals.unwrap_or_else(|| {
        registry::chain_meta(&engine.connector())
            .map(|meta| meta.decimals)
            .unwrap_or(0)
    })
}
