//! Read-only queries against the Algorand indexing service.
//!
//! Lookups keep payloads minimal and never propagate failures: a broken
//! connection, a malformed response, or a missing account all degrade to
//! an empty-but-valid structure, with a warning for observability.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use base64::prelude::{Engine as _, BASE64_STANDARD};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tracing::warn;
use url::Url;

use crate::algorand::provider::{self, ALGO_INDEXER_PORT, ALGO_INDEXER_SERVER, ALGO_INDEXER_TOKEN};
use crate::context;
use crate::error::{malformed_response, ConnectorError};
use crate::types::{Account, TxnSearchOptions};
use crate::util::{retry_async, DEFAULT_TIMEOUT};

const RETRIES: u32 = 1;
const RETRY_DELAY: Duration = Duration::from_millis(250);

/// Thin typed client over the indexer REST API.
pub struct IndexerClient {
    http: reqwest::Client,
    base: Url,
    token: String,
}

impl IndexerClient {
    pub fn new(server: &str, port: &str, token: &str) -> crate::Result<Self> {
        let raw = if port.is_empty() {
            server.to_string()
        } else {
            format!("{}:{}", server, port)
        };
        let base = Url::parse(&raw)?;
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base,
            token: token.to_string(),
        })
    }

    async fn get_json(&self, url: Url, query: &[(String, String)]) -> crate::Result<Value> {
        let mut request = self.http.get(url).query(query);
        if !self.token.is_empty() {
            request = request.header("X-Indexer-API-Token", &self.token);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Look up an account with all nested detail excluded.
    pub async fn lookup_account(&self, address: &str) -> crate::Result<Account> {
        let url = self.base.join(&format!("v2/accounts/{}", address))?;
        let query = vec![
            ("include-all".to_string(), "false".to_string()),
            ("exclude".to_string(), "all".to_string()),
        ];
        let body = retry_async(
            || self.get_json(url.clone(), &query),
            RETRIES,
            RETRY_DELAY,
            false,
        )
        .await?;
        body.get("account")
            .cloned()
            .ok_or_else(|| malformed_response("account lookup", &body))
    }

    /// Run a filtered transaction search.
    pub async fn search_transactions(
        &self,
        address: &str,
        opts: &TxnSearchOptions,
    ) -> crate::Result<Vec<Value>> {
        let url = self.base.join("v2/transactions")?;
        let query = search_params(address, opts);
        let body = retry_async(
            || self.get_json(url.clone(), &query),
            RETRIES,
            RETRY_DELAY,
            false,
        )
        .await?;
        body.get("transactions")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| malformed_response("transaction search", &body))
    }
}

impl std::fmt::Debug for IndexerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexerClient")
            .field("base", &self.base.as_str())
            .finish()
    }
}

/// Query parameters for a transaction search, successively narrowed by
/// the optional filters.
fn search_params(address: &str, opts: &TxnSearchOptions) -> Vec<(String, String)> {
    let mut query = vec![("address".to_string(), address.to_string())];

    if let Some(note) = &opts.note {
        query.push((
            "note-prefix".to_string(),
            BASE64_STANDARD.encode(note.as_bytes()),
        ));
    }

    if let Some(amount) = opts.amount {
        // One atomic unit of tolerance on either side, not exact match.
        query.push((
            "currency-greater-than".to_string(),
            amount.saturating_sub(1).to_string(),
        ));
        query.push((
            "currency-less-than".to_string(),
            amount.saturating_add(1).to_string(),
        ));
    }

    if let Some(min_round) = opts.min_round {
        query.push(("min-round".to_string(), min_round.max(0).to_string()));
    }

    query
}

static CLIENT: Lazy<RwLock<Option<Arc<IndexerClient>>>> = Lazy::new(|| RwLock::new(None));

/// The shared indexer client, built from the persisted network tier on
/// first use.
fn indexer_client() -> crate::Result<Arc<IndexerClient>> {
    if let Some(client) = CLIENT.read().expect("indexer lock").as_ref() {
        return Ok(client.clone());
    }

    let env = provider::reset_provider(context::get_blockchain_network());
    let server = env
        .get(ALGO_INDEXER_SERVER)
        .ok_or_else(|| ConnectorError::Configuration("missing indexer server".to_string()))?;
    let port = env.get(ALGO_INDEXER_PORT).map(String::as_str).unwrap_or("");
    let token = env
        .get(ALGO_INDEXER_TOKEN)
        .map(String::as_str)
        .unwrap_or("");

    let client = Arc::new(IndexerClient::new(server, port, token)?);
    *CLIENT.write().expect("indexer lock") = Some(client.clone());
    Ok(client)
}

/// The empty-but-valid account shape returned when a lookup degrades.
fn fallback_account() -> Account {
    json!({ "assets": [], "created-apps": [] })
}

async fn fetch_account_via(client: &IndexerClient, address: &str) -> Account {
    match client.lookup_account(address).await {
        Ok(account) => account,
        Err(error) => {
            warn!(%address, %error, "could not fetch ALGO account");
            fallback_account()
        }
    }
}

/// Look up an Algorand account by address.
///
/// Always yields an account object; failures degrade to empty `assets`
/// and `created-apps` collections.
pub async fn fetch_account(address: &str) -> Account {
    let client = match indexer_client() {
        Ok(client) => client,
        Err(error) => {
            warn!(%address, %error, "indexer client unavailable");
            return fallback_account();
        }
    };
    fetch_account_via(&client, address).await
}

async fn search_transactions_via(
    client: &IndexerClient,
    address: &str,
    opts: &TxnSearchOptions,
) -> Vec<Value> {
    match client.search_transactions(address, opts).await {
        Ok(transactions) => transactions,
        Err(error) => {
            warn!(%address, %error, "transaction search failed");
            Vec::new()
        }
    }
}

/// Search for transactions involving `address`, optionally narrowed by
/// [`TxnSearchOptions`]. Failures degrade to an empty list.
pub async fn search_for_transactions(address: &str, opts: TxnSearchOptions) -> Vec<Value> {
    let client = match indexer_client() {
        Ok(client) => client,
        Err(error) => {
            warn!(%address, %error, "indexer client unavailable");
            return Vec::new();
        }
    };
    search_transactions_via(&client, address, &opts).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_client() -> IndexerClient {
        // Nothing listens on the discard port; requests fail fast.
        IndexerClient::new("http://127.0.0.1:9", "", "").unwrap()
    }

    #[test]
    fn search_query_narrows_on_each_filter() {
        let opts = TxnSearchOptions {
            amount: Some(100),
            min_round: Some(-5),
            note: Some("swap".to_string()),
        };
        let query = search_params("ADDR", &opts);

        assert!(query.contains(&("address".to_string(), "ADDR".to_string())));
        assert!(query.contains(&(
            "note-prefix".to_string(),
            BASE64_STANDARD.encode("swap")
        )));
        assert!(query.contains(&("currency-greater-than".to_string(), "99".to_string())));
        assert!(query.contains(&("currency-less-than".to_string(), "101".to_string())));
        assert!(query.contains(&("min-round".to_string(), "0".to_string())));
    }

    #[test]
    fn search_query_without_filters_is_address_only() {
        let query = search_params("ADDR", &TxnSearchOptions::default());
        assert_eq!(query, vec![("address".to_string(), "ADDR".to_string())]);
    }

    #[test]
    fn client_honors_explicit_port() {
        let client = IndexerClient::new("http://localhost", "8980", "").unwrap();
        assert_eq!(client.base.as_str(), "http://localhost:8980/");
    }

    #[tokio::test]
    async fn failed_lookup_degrades_to_empty_account() {
        let client = unreachable_client();
        let account = fetch_account_via(&client, "ADDR").await;
        assert_eq!(account["assets"], json!([]));
        assert_eq!(account["created-apps"], json!([]));
    }

    #[tokio::test]
    async fn failed_search_degrades_to_empty_list() {
        let client = unreachable_client();
        let results =
            search_transactions_via(&client, "ADDR", &TxnSearchOptions::default()).await;
        assert!(results.is_empty());
    }
}
