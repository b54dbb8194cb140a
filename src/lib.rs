//! Maikani Library
//!
//! This module exposes the proxy's building blocks for the binary and for
//! integration tests.

pub mod aggregator;
pub mod cache;
pub mod cli;
pub mod data;
pub mod server;
