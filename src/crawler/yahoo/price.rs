use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_derive::{Deserialize, Serialize};

use crate::{
    crawler::{
        yahoo::{Yahoo, HOST},
        FetchError, QuoteSource,
    },
    declare::Quote,
    util,
};

#[derive(Serialize, Deserialize, Debug, Clone)]
struct QuotesResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteResponseBody,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct QuoteResponseBody {
    result: Vec<QuoteRecord>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct QuoteRecord {
    symbol: String,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Decimal,
    #[serde(rename = "regularMarketChange")]
    regular_market_change: Decimal,
}

fn quotes_url(stock_symbols: &[String]) -> String {
    let symbols = stock_symbols
        .iter()
        .map(|symbol| symbol.to_uppercase())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "https://{host}/v7/finance/quote?symbols={symbols}",
        host = HOST,
        symbols = symbols
    )
}

fn parse_quotes(url: &str, body: &str) -> Result<Vec<Quote>, FetchError> {
    let res: QuotesResponse =
        serde_json::from_str(body).map_err(|why| FetchError::parse(url, why))?;

    Ok(res
        .quote_response
        .result
        .into_iter()
        .map(|record| Quote {
            symbol: record.symbol,
            price: record.regular_market_price,
            change: record.regular_market_change,
        })
        .collect())
}

#[async_trait]
impl QuoteSource for Yahoo {
    async fn get_quotes(stock_symbols: &[String]) -> Result<Vec<Quote>, FetchError> {
        if stock_symbols.is_empty() {
            return Ok(Vec::new());
        }

        let url = quotes_url(stock_symbols);
        let body = util::http::get(&url).await?;

        parse_quotes(&url, &body)
    }
}
