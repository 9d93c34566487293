//! Scripts for deploying & configuring the BonTerra contracts.

pub mod artifacts;
pub mod cli;
mod commands;
pub mod configurator;
pub mod constants;
pub mod deployer;
pub mod errors;
mod solidity;
#[cfg(test)]
mod test_helpers;
pub mod types;
pub mod utils;
pub mod verifier;

pub use commands::deploy_contracts;
