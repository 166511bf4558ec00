//! Rochedo - stone-fabrication back office
//!
//! Customers, quotes, orders and ledger entries for a small fabrication
//! shop, persisted in a primary store with a local fallback mirror. The
//! centrepiece is quote approval: one order and one income entry per quote.

pub mod auth;
pub mod config;
pub mod model;
pub mod repository;
pub mod services;
pub mod storage;
pub mod utils;
