//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod approval;
pub mod report;
pub mod venue;
