pub mod artifact;
pub mod cli;
pub mod client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod orchestrator;
pub mod ownership;
pub mod plan;

#[cfg(test)]
mod testing;
