use async_trait::async_trait;
use futures::future::join_all;
use rust_decimal::Decimal;
use serde_derive::{Deserialize, Serialize};

use crate::{
    crawler::{
        markit::{Markit, HOST},
        FetchError, QuoteSource,
    },
    declare::Quote,
    logging, util,
};

#[derive(Serialize, Deserialize, Debug, Clone)]
struct QuoteResponse {
    #[serde(rename = "Symbol")]
    symbol: String,
    #[serde(rename = "LastPrice")]
    last_price: Decimal,
    #[serde(rename = "ChangePercent")]
    change_percent: Decimal,
}

fn quote_url(stock_symbol: &str) -> String {
    format!(
        "https://{host}/MODApis/Api/v2/Quote/json?symbol={symbol}",
        host = HOST,
        symbol = stock_symbol
    )
}

fn parse_quote(url: &str, body: &str) -> Result<Quote, FetchError> {
    let res: QuoteResponse =
        serde_json::from_str(body).map_err(|why| FetchError::parse(url, why))?;

    Ok(Quote {
        symbol: res.symbol,
        price: res.last_price,
        change: res.change_percent,
    })
}

async fn fetch_one(stock_symbol: &str) -> Result<Quote, FetchError> {
    let stock_symbol = stock_symbol.to_uppercase();
    let url = quote_url(&stock_symbol);
    let body = util::http::get(&url).await?;

    parse_quote(&url, &body)
}

#[async_trait]
impl QuoteSource for Markit {
    async fn get_quotes(stock_symbols: &[String]) -> Result<Vec<Quote>, FetchError> {
        let futures = stock_symbols
            .iter()
            .map(|symbol| fetch_one(symbol))
            .collect::<Vec<_>>();
        let mut quotes = Vec::with_capacity(stock_symbols.len());
        let mut last_error: Option<FetchError> = None;

        // Each symbol fetch is independent; one failure only loses that
        // symbol's update for this tick.
        for result in join_all(futures).await {
            match result {
                Ok(quote) => quotes.push(quote),
                Err(why) => {
                    logging::debug_file_async(format!("Failed to fetch quote because {:?}", why));
                    last_error = Some(why);
                }
            }
        }

        if quotes.is_empty() {
            if let Some(why) = last_error {
                return Err(why);
            }
        }

        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_parse_quote() {
        let body = r#"{"Status":"SUCCESS","Symbol":"AAPL","Name":"Apple Inc","LastPrice":150.5,"Change":1.79,"ChangePercent":1.2}"#;
        let quote = parse_quote("http://test", body).expect("payload should parse");

        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, dec!(150.5));
        assert_eq!(quote.change, dec!(1.2));
    }

    #[test]
    fn test_parse_quote_malformed_payload() {
        let why = parse_quote("http://test", r#"{"Message":"no quote found"}"#)
            .expect_err("payload without LastPrice should fail");

        assert!(matches!(why, FetchError::Parse { .. }));
    }

    #[test]
    fn test_quote_url() {
        assert_eq!(
            quote_url("AAPL"),
            "https://dev.markitondemand.com/MODApis/Api/v2/Quote/json?symbol=AAPL"
        );
    }

    #[tokio::test]
    #[ignore]
    async fn test_get_quotes() {
        match Markit::get_quotes(&["AAPL".to_string()]).await {
            Ok(quotes) => {
                dbg!(&quotes);
            }
            Err(why) => {
                logging::debug_file_async(format!("Failed to get_quotes because {:?}", why));
            }
        }
    }
}
