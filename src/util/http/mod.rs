use std::time::{Duration, Instant};

use once_cell::sync::{Lazy, OnceCell};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::logging::Logger;

/// Caps concurrent outbound requests so a long symbol list cannot stampede
/// the quote host.
static SEMAPHORE: Lazy<Semaphore> = Lazy::new(|| Semaphore::new(5));

/// A singleton instance of the reqwest client.
static CLIENT: OnceCell<Client> = OnceCell::new();

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("http"));

const USER_AGENT: &str = concat!("stockmon/", env!("CARGO_PKG_VERSION"));

/// The two failure kinds a quote fetch can surface: the transport failed
/// (connection error or non-2xx status), or the payload did not match the
/// expected shape. Both are caught and logged at the tick boundary.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport failure for {url}: {reason}")]
    Transport { url: String, reason: String },
    #[error("malformed payload from {url}: {reason}")]
    Parse { url: String, reason: String },
}

impl FetchError {
    pub fn transport(url: &str, reason: impl std::fmt::Display) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(url: &str, reason: impl std::fmt::Display) -> Self {
        FetchError::Parse {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Returns the reqwest client singleton instance or creates one if it doesn't
/// exist.
fn get_client() -> Result<&'static Client, FetchError> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .brotli(true)
            .gzip(true)
            .connect_timeout(Duration::from_secs(8))
            .timeout(Duration::from_secs(15))
            .tcp_nodelay(true)
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|why| FetchError::transport("<client>", why))
    })
}

/// Performs an HTTP GET request and returns the response as text.
pub async fn get(url: &str) -> Result<String, FetchError> {
    get_response(url)
        .await?
        .text()
        .await
        .map_err(|why| FetchError::transport(url, why))
}

/// Performs an HTTP GET request and deserializes the JSON response into the
/// specified type.
pub async fn get_json<RES: DeserializeOwned>(url: &str) -> Result<RES, FetchError> {
    let body = get(url).await?;

    serde_json::from_str::<RES>(&body).map_err(|why| FetchError::parse(url, why))
}

/// Sends a single GET request. One attempt only: a failed tick just leaves
/// the previous on-screen text stale until the next one succeeds.
async fn get_response(url: &str) -> Result<Response, FetchError> {
    let client = get_client()?;
    let _permit = SEMAPHORE.acquire().await;
    let start = Instant::now();
    let res = client.get(url).send().await;
    let elapsed = start.elapsed().as_millis();

    match res {
        Ok(response) if response.status().is_success() => {
            LOGGER.info(format!("GET:{} {} ms", url, elapsed));
            Ok(response)
        }
        Ok(response) => {
            let status = response.status();
            // The tick boundary reports the failure; keep this at debug so a
            // failed tick produces one error entry, not three.
            LOGGER.debug(format!("GET:{} status {} {} ms", url, status, elapsed));
            Err(FetchError::transport(
                url,
                format!("unexpected status {}", status),
            ))
        }
        Err(why) => {
            LOGGER.debug(format!("GET:{} failed because {:?}. {} ms", url, why, elapsed));
            Err(FetchError::transport(url, why))
        }
    }
}
