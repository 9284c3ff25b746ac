//! CLI module graph.

pub mod check;
pub mod command;
pub mod fees;
pub mod markets;
pub mod output;
pub mod prompt;
