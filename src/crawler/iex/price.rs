use std::{collections::HashMap, env};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_derive::{Deserialize, Serialize};

use crate::{
    crawler::{
        iex::{Iex, HOST},
        FetchError, QuoteSource,
    },
    declare::Quote,
    util,
};

const IEX_TOKEN: &str = "IEX_TOKEN";

#[derive(Serialize, Deserialize, Debug, Clone)]
struct BatchEntry {
    quote: QuoteRecord,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct QuoteRecord {
    symbol: String,
    #[serde(rename = "latestPrice")]
    latest_price: Decimal,
    change: Decimal,
}

fn batch_url(stock_symbols: &[String], token: &str) -> String {
    let symbols = stock_symbols
        .iter()
        .map(|symbol| symbol.to_uppercase())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "https://{host}/stable/stock/market/batch?symbols={symbols}&types=quote&token={token}",
        host = HOST,
        symbols = symbols,
        token = token
    )
}

fn parse_quotes(url: &str, body: &str) -> Result<Vec<Quote>, FetchError> {
    let res: HashMap<String, BatchEntry> =
        serde_json::from_str(body).map_err(|why| FetchError::parse(url, why))?;

    Ok(res
        .into_values()
        .map(|entry| Quote {
            symbol: entry.quote.symbol,
            price: entry.quote.latest_price,
            change: entry.quote.change,
        })
        .collect())
}

#[async_trait]
impl QuoteSource for Iex {
    async fn get_quotes(stock_symbols: &[String]) -> Result<Vec<Quote>, FetchError> {
        if stock_symbols.is_empty() {
            return Ok(Vec::new());
        }

        let token = env::var(IEX_TOKEN)
            .map_err(|_| FetchError::transport("<iex>", "IEX_TOKEN is not set"))?;
        let url = batch_url(stock_symbols, &token);
        let body = util::http::get(&url).await?;

        parse_quotes(&url, &body)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_parse_quotes() {
        let body = r#"{
            "AAPL":{"quote":{"symbol":"AAPL","latestPrice":150.5,"change":1.79}},
            "MSFT":{"quote":{"symbol":"MSFT","latestPrice":310.0,"change":0}}
        }"#;
        let mut quotes = parse_quotes("http://test", body).expect("payload should parse");
        quotes.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].symbol, "AAPL");
        assert_eq!(quotes[0].price, dec!(150.5));
        assert_eq!(quotes[1].change, dec!(0));
    }

    #[test]
    fn test_parse_quotes_malformed_payload() {
        let why = parse_quotes("http://test", r#"["AAPL","MSFT"]"#)
            .expect_err("array payload should fail");

        assert!(matches!(why, FetchError::Parse { .. }));
    }

    #[test]
    fn test_batch_url() {
        assert_eq!(
            batch_url(&["aapl".to_string(), "msft".to_string()], "tok"),
            "https://cloud.iexapis.com/stable/stock/market/batch?symbols=AAPL,MSFT&types=quote&token=tok"
        );
    }
}
