//! Test support for solver-level end-to-end tests
//!
//! Provides a mock record client so tests can drive full present/cleanup
//! flows without touching the real name.com API.

mod mock_provider;

pub use mock_provider::MockRecordClient;
