use async_trait::async_trait;

use crate::crawler::{iex::Iex, markit::Markit, yahoo::Yahoo};
use crate::{declare::Quote, logging};

pub use crate::util::http::FetchError;

/// IEX Cloud, batched quotes keyed by symbol
pub mod iex;
/// Markit on Demand, one request per symbol
pub mod markit;
/// Yahoo Finance, batched quotes as an array
pub mod yahoo;

#[async_trait]
pub trait QuoteSource {
    /// Fetches the latest quote for every symbol in one logical request.
    /// Symbols with no quote in the response are simply absent from the
    /// result.
    async fn get_quotes(stock_symbols: &[String]) -> Result<Vec<Quote>, FetchError>;
}

/// Fetches quotes from the first source that answers; later sources are only
/// tried after the previous one failed or returned nothing.
pub async fn fetch_quotes_from_remote_site(
    stock_symbols: &[String],
) -> Result<Vec<Quote>, FetchError> {
    if stock_symbols.is_empty() {
        return Ok(Vec::new());
    }

    let sites = vec![Markit::get_quotes, Yahoo::get_quotes, Iex::get_quotes];
    let mut last_error: Option<FetchError> = None;

    for fetch_func in sites {
        match fetch_func(stock_symbols).await {
            Ok(quotes) if !quotes.is_empty() => return Ok(quotes),
            Ok(_) => continue,
            Err(why) => {
                logging::debug_file_async(format!("quote source failed because {:?}", why));
                last_error = Some(why);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        FetchError::transport("<all sources>", "no source returned any quotes")
    }))
}
