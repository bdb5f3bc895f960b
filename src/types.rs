use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Short code identifying a blockchain network family.
///
/// The registry key is case-sensitive: `"ALGO"` resolves to the Algorand
/// implementation, `"algo"` does not. Symbols outside the known set are
/// carried verbatim so lookups can still produce a neutral stub.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChainSymbol {
    Algo,
    Eth,
    Other(String),
}

impl ChainSymbol {
    pub fn as_str(&self) -> &str {
        match self {
            ChainSymbol::Algo => "ALGO",
            ChainSymbol::Eth => "ETH",
            ChainSymbol::Other(sym) => sym,
        }
    }
}

impl fmt::Display for ChainSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ChainSymbol {
    fn from(sym: &str) -> Self {
        match sym {
            "ALGO" => ChainSymbol::Algo,
            "ETH" => ChainSymbol::Eth,
            other => ChainSymbol::Other(other.to_string()),
        }
    }
}

impl From<String> for ChainSymbol {
    fn from(sym: String) -> Self {
        ChainSymbol::from(sym.as_str())
    }
}

impl From<ChainSymbol> for String {
    fn from(sym: ChainSymbol) -> Self {
        sym.as_str().to_string()
    }
}

/// Deployment environment of a chain.
///
/// Parsing never fails: any value outside the supported set resolves to
/// the first defined tier (`TestNet`) instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NetworkProvider {
    TestNet,
    BetaNet,
    MainNet,
}

impl NetworkProvider {
    /// All supported tiers, in fallback-priority order.
    pub const ALL: [NetworkProvider; 3] = [
        NetworkProvider::TestNet,
        NetworkProvider::BetaNet,
        NetworkProvider::MainNet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkProvider::TestNet => "TestNet",
            NetworkProvider::BetaNet => "BetaNet",
            NetworkProvider::MainNet => "MainNet",
        }
    }

    /// Lowercased tier name, used for provider URL templates.
    pub fn lowercase(&self) -> &'static str {
        match self {
            NetworkProvider::TestNet => "testnet",
            NetworkProvider::BetaNet => "betanet",
            NetworkProvider::MainNet => "mainnet",
        }
    }
}

impl Default for NetworkProvider {
    fn default() -> Self {
        NetworkProvider::TestNet
    }
}

impl fmt::Display for NetworkProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NetworkProvider {
    fn from(tier: &str) -> Self {
        match tier {
            "BetaNet" => NetworkProvider::BetaNet,
            "MainNet" => NetworkProvider::MainNet,
            _ => NetworkProvider::TestNet,
        }
    }
}

impl From<String> for NetworkProvider {
    fn from(tier: String) -> Self {
        NetworkProvider::from(tier.as_str())
    }
}

impl From<NetworkProvider> for String {
    fn from(tier: NetworkProvider) -> Self {
        tier.as_str().to_string()
    }
}

impl FromStr for NetworkProvider {
    type Err = std::convert::Infallible;

    fn from_str(tier: &str) -> Result<Self, Self::Err> {
        Ok(NetworkProvider::from(tier))
    }
}

/// Named connection parameters for one (chain, network) pair.
///
/// Always rebuilt as a whole on tier change, never patched in place.
/// Key names are chain-specific configuration.
pub type ProviderEnv = HashMap<String, String>;

/// Chain-native account payload, passed through without imposing shape.
pub type Account = Value;

/// One row of the supported-network listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkInfo {
    pub name: &'static str,
    pub abbr: &'static str,
    pub decimals: u32,
    pub active: bool,
}

/// Normalized token descriptor.
///
/// `name` and `symbol` are never empty: when chain metadata omits them
/// they are synthesized from the token's numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: u64,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    /// Holding amount in display units.
    pub amount: String,
    pub supply: Option<u64>,
    pub url: String,
    pub verified: bool,
}

/// Optional filters for a transaction search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxnSearchOptions {
    /// Match transactions that moved this amount, with an inclusive
    /// tolerance of one atomic unit on either side.
    pub amount: Option<u64>,
    /// Minimum block round to search; negative values clamp to zero.
    pub min_round: Option<i64>,
    /// Note prefix to match, encoded for the indexer before sending.
    pub note: Option<String>,
}

/// Wallet-fallback configuration supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct WalletFallbackSpec {
    /// Wallet provider options, keyed by provider name.
    pub options: HashMap<String, Value>,
}

/// A wallet-fallback spec wrapped with the resolved provider environment,
/// ready to install on the runtime engine.
#[derive(Debug, Clone)]
pub struct WalletFallback {
    pub options: HashMap<String, Value>,
    pub provider_env: ProviderEnv,
}

/// Parsed contract address.
///
/// Algorand identifies applications by numeric index; EVM-style chains
/// use hex addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractId {
    Index(u64),
    Address(String),
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractId::Index(ix) => write!(f, "{}", ix),
            ContractId::Address(addr) => f.write_str(addr),
        }
    }
}
