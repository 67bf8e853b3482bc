//! Comparison pipeline: fan out per-store lookups and aggregate quotes.

use crate::ean::Ean;
use crate::stores::client::StoreFetch;
use crate::stores::document::Document;
use crate::stores::extract::chain_for;
use crate::stores::models::{Comparison, Quote};
use crate::stores::registry::Store;
use futures::future::join_all;
use tracing::{debug, info, warn};

/// Compares one product code across every registered store.
///
/// Store lookups run concurrently and the returned quotes follow registry
/// order regardless of completion order. A store that fails to answer
/// contributes an empty quote instead of sinking the whole comparison.
pub async fn compare_one(client: &impl StoreFetch, ean: &Ean) -> Comparison {
    info!("Comparing prices for {}", ean);

    let quotes =
        join_all(Store::all().iter().map(|&store| scrape_store(client, store, ean))).await;

    Comparison::new(ean.clone(), quotes)
}

/// Compares a batch of codes sequentially, preserving input order.
pub async fn compare_many(client: &impl StoreFetch, eans: &[Ean]) -> Vec<Comparison> {
    let mut comparisons = Vec::with_capacity(eans.len());

    for ean in eans {
        comparisons.push(compare_one(client, ean).await);
    }

    comparisons
}

/// Fetches one store's document for a code and runs its extraction chain.
async fn scrape_store(client: &impl StoreFetch, store: Store, ean: &Ean) -> Quote {
    let body = match client.fetch(store, ean).await {
        Ok(body) => body,
        Err(err) => {
            warn!("{}: fetch failed for {}: {}", store, ean, err);
            return Quote::missing(store);
        }
    };

    let doc = Document::parse(&body);

    match chain_for(store).extract(&doc) {
        Some(price) => {
            debug!("{}: {} -> {:.2}", store, ean, price);
            Quote::found(store, price)
        }
        None => {
            debug!("{}: no price found for {}", store, ean);
            Quote::missing(store)
        }
    }
}
