//! Fair coin flip simulation and exact binomial probabilities.

pub mod config;
pub mod engine;
pub mod manager;
pub mod model;
pub mod plot;
pub mod stats;
mod utils;
