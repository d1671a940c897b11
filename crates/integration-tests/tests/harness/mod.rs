//! Shared harness for the integration suite
//!
//! Each test binary uses a different slice of these helpers.
#![allow(dead_code)]

pub mod config;
pub mod mock_store;
pub mod mock_worker;
pub mod server;
