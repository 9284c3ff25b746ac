//! Outbound adapters (driven side).

pub mod binance;
mod http;
pub mod opendax;
pub mod report;
mod signing;
