//! Shared storage integration tests.
//!
//! Tests the shop repository contract against every store implementation.
//! Each implementation module imports these test functions and runs them.

pub mod shop_contract_tests;
