//! Data models for store quotes and per-code price comparisons.

use crate::ean::Ean;
use crate::stores::registry::Store;
use serde::{Deserialize, Serialize};

/// One store's answer for one product code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Store that was queried
    pub store: Store,
    /// Extracted price in BRL, or `None` when the store had no usable answer
    pub price: Option<f64>,
}

impl Quote {
    /// Creates a quote carrying a price.
    pub fn found(store: Store, price: f64) -> Self {
        Self { store, price: Some(price) }
    }

    /// Creates an empty quote for a store that yielded nothing.
    pub fn missing(store: Store) -> Self {
        Self { store, price: None }
    }

    /// Returns true when the store produced a price.
    pub fn is_found(&self) -> bool {
        self.price.is_some()
    }
}

/// The winning store and price for one product code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestOffer {
    /// Store offering the lowest price
    pub store: Store,
    /// The lowest price in BRL
    pub price: f64,
}

/// All quotes gathered for one product code, plus the cheapest offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Product code that was looked up
    pub ean: Ean,
    /// One quote per store, in registry order
    pub quotes: Vec<Quote>,
    /// Cheapest offer across all quotes, if any store answered
    pub best: Option<BestOffer>,
}

impl Comparison {
    /// Builds a comparison from gathered quotes. The best offer is the
    /// strictly lowest price; on a tie the quote appearing earlier in the
    /// list keeps the win.
    pub fn new(ean: Ean, quotes: Vec<Quote>) -> Self {
        let mut best: Option<BestOffer> = None;

        for quote in &quotes {
            let Some(price) = quote.price else {
                continue;
            };

            if best.as_ref().is_none_or(|b| price < b.price) {
                best = Some(BestOffer { store: quote.store, price });
            }
        }

        Self { ean, quotes, best }
    }

    /// Returns the price a specific store quoted, if any.
    pub fn price_at(&self, store: Store) -> Option<f64> {
        self.quotes.iter().find(|q| q.store == store).and_then(|q| q.price)
    }

    /// Returns true when at least one store answered with a price.
    pub fn has_any_price(&self) -> bool {
        self.best.is_some()
    }

    /// Returns the number of stores that answered with a price.
    pub fn count_found(&self) -> usize {
        self.quotes.iter().filter(|q| q.is_found()).count()
    }
}
