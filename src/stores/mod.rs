//! Store scraping: registry, HTTP client, document views, and price extraction.

pub mod client;
pub mod document;
pub mod extract;
pub mod models;
pub mod registry;
pub mod selectors;

pub use client::{FetchError, StoreClient, StoreFetch};
pub use document::Document;
pub use extract::{chain_for, StrategyChain};
pub use models::{BestOffer, Comparison, Quote};
pub use registry::{RequestSpec, Store};
