//! IEX Cloud quote API.
//!
//! One batched GET for the whole symbol list; the response is an object keyed
//! by symbol. Requires a token supplied through the `IEX_TOKEN` environment
//! variable.

pub mod price;

const HOST: &str = "cloud.iexapis.com";

pub struct Iex {}
