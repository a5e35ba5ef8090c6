//! Yahoo Finance quote API.
//!
//! One batched GET for the whole symbol list; the response wraps an array of
//! quote objects.

pub mod price;

const HOST: &str = "query1.finance.yahoo.com";

pub struct Yahoo {}
