//! Application services (use cases).
//!
//! These passes orchestrate domain logic over the venue ports.

pub mod fees;
pub mod markets;

pub use fees::run_fee_pass;
pub use markets::{
    propose_market, Epilogue, MarketOutcome, MarketPass, MarketPassReport, MarketPlan,
};
