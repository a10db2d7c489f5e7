//! recap CLI library
//!
//! Command-line front end for chunking, analysing and summarising
//! meeting transcripts.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
