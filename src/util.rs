use std::future::Future;
use std::time::Duration;

use base64::prelude::{Engine as _, BASE64_STANDARD};
use futures::future::{select, Either};
use futures::pin_mut;
use tokio::time::sleep;

use crate::error::ConnectorError;
use crate::types::{ChainSymbol, ContractId};

/// Default deadline for racing an operation against the clock.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3500);

/// Race `operation` against a deadline and resolve to whichever finishes
/// first. The losing future is dropped.
///
/// `timeout` defaults to [`DEFAULT_TIMEOUT`] when `None`.
pub async fn with_timeout<T, F>(operation: F, fallback: T, timeout: Option<Duration>) -> T
where
    F: Future<Output = T>,
{
    let deadline = sleep(timeout.unwrap_or(DEFAULT_TIMEOUT));
    pin_mut!(operation);
    pin_mut!(deadline);

    match select(operation, deadline).await {
        Either::Left((value, _)) => value,
        Either::Right(((), _)) => fallback,
    }
}

/// Retry an async operation, optionally with exponential backoff.
pub async fn retry_async<F, Fut, T, E>(
    mut operation: F,
    max_retries: u32,
    base_delay: Duration,
    exponential: bool,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut last_error = None;
    for attempt in 0..=max_retries {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                last_error = Some(e);
                if attempt < max_retries {
                    let delay = if exponential {
                        base_delay * 2u32.pow(attempt)
                    } else {
                        base_delay
                    };
                    sleep(delay).await;
                }
            }
        }
    }
    Err(last_error.unwrap())
}

/// Strip embedded `\u{0}` padding from a byte string.
pub fn trim_byte_string(s: &str) -> String {
    s.replace('\0', "")
}

/// Decode a base64 field into a NUL-trimmed UTF-8 string.
///
/// Returns `None` when the payload is not valid base64.
pub fn decode_b64_string(encoded: &str) -> Option<String> {
    let bytes = BASE64_STANDARD.decode(encoded).ok()?;
    Some(trim_byte_string(&String::from_utf8_lossy(&bytes)))
}

/// Convert an atomic-unit amount into display units.
///
/// Trailing zeros in the fractional part are dropped; a whole-number
/// result carries no decimal point.
pub fn format_with_decimals(atomic: u64, decimals: u32) -> String {
    if decimals == 0 {
        return atomic.to_string();
    }
    let scale = 10u128.pow(decimals);
    let atomic = u128::from(atomic);
    let whole = atomic / scale;
    let frac = atomic % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Parse a contract address for `chain`.
///
/// Algorand applications are numeric indexes; other chains carry
/// NUL-trimmed, `0x`-prefixed hex addresses.
pub fn contract_id_for_chain(raw: &str, chain: &ChainSymbol) -> crate::Result<ContractId> {
    let trimmed = trim_byte_string(raw);
    let trimmed = trimmed.trim();

    if *chain == ChainSymbol::Algo {
        return trimmed
            .parse::<u64>()
            .map(ContractId::Index)
            .map_err(|_| {
                ConnectorError::Configuration(format!(
                    "invalid Algorand application id: {:?}",
                    trimmed
                ))
            });
    }

    let bare = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(bare).map_err(|_| {
        ConnectorError::Configuration(format!("invalid contract address: {:?}", trimmed))
    })?;
    Ok(ContractId::Address(format!("0x{}", bare)))
}
