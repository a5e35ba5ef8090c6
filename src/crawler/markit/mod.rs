//! Markit on Demand quote API.
//!
//! One GET per symbol; the response is a single JSON object carrying
//! `LastPrice` and `ChangePercent`.

pub mod price;

const HOST: &str = "dev.markitondemand.com";

pub struct Markit {}
