//! chainport
//!
//! A multi-chain abstraction layer between a smart-contract runtime and
//! chain-specific backends. Calling code can request account data,
//! transaction history, and chain configuration without knowing which
//! chain or network tier is active.

pub mod algorand;
pub mod connector;
pub mod context;
pub mod error;
pub mod ethereum;
pub mod registry;
pub mod runtime;
pub mod types;
pub mod util;

pub use algorand::{fetch_account, normalize_asset, search_for_transactions};
pub use connector::{NetworkConnector, UnsupportedConnector};
pub use error::ConnectorError;
pub use registry::{create_connector_api, is_supported_network, list_supported_networks};
pub use runtime::{
    check_has_token, format_address, format_currency, load_runtime, load_runtime_with_opts,
    opt_in_to_asset, parse_contract_id, parse_currency, runtime, EngineAccount, RuntimeEngine,
    RuntimeLifecycle, RuntimeOptions,
};
pub use types::*;
pub use util::with_timeout;

pub type Result<T> = std::result::Result<T, ConnectorError>;
