//! menor-preco - Multi-store price comparison for EAN product codes
//!
//! Looks up each code across Brazilian online stores, extracts a normalized
//! price per store with layered fallback strategies, and reports the lowest
//! offer. Uses TLS fingerprint emulation for reliable scraping without
//! detection.

pub mod commands;
pub mod config;
pub mod ean;
pub mod engine;
pub mod format;
pub mod input;
pub mod stores;

pub use config::Config;
pub use ean::Ean;
pub use stores::{BestOffer, Comparison, Quote, Store};
