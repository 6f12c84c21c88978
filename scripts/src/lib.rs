//! Scripts for deploying and smoke testing the KipuBank Stylus contract.

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;

/// Our build utils
pub mod build;

/// Our deploy utils
pub mod deploy;

/// Our output utils
pub mod output_writer;

pub mod tx;

mod utils;
