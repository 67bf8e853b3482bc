//! Layered price extraction with ordered per-store strategies.

use crate::stores::document::Document;
use crate::stores::registry::Store;
use crate::stores::selectors;
use regex_lite::Regex;
use scraper::Selector;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

/// Lower bound for an extracted price. Values at or below this are markup
/// noise (installment counts, unit digits, stray zeros).
pub const MIN_PLAUSIBLE_PRICE: f64 = 1.0;

/// Upper bound for an extracted price. Values at or above this are usually
/// a concatenated digit run, not a price.
pub const MAX_PLAUSIBLE_PRICE: f64 = 100_000.0;

/// One way of pulling a price out of a document.
pub trait Strategy: Send + Sync {
    /// Returns the extracted price, or `None` when this strategy has nothing
    /// to offer for the document.
    fn extract(&self, doc: &Document) -> Option<f64>;

    /// Returns a description of this strategy for diagnostics.
    fn description(&self) -> String;
}

/// An ordered list of strategies for one store. Strategies run top to
/// bottom and the first plausible price wins; implausible or unparseable
/// results fall through to the next strategy.
pub struct StrategyChain {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self { strategies: Vec::new() }
    }

    /// Appends a strategy to the chain.
    pub fn add(&mut self, strategy: impl Strategy + 'static) -> &mut Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Runs the chain against a document.
    pub fn extract(&self, doc: &Document) -> Option<f64> {
        for strategy in &self.strategies {
            let Some(price) = strategy.extract(doc) else {
                continue;
            };

            if !plausible_price(price) {
                debug!("Discarding implausible price {} from {}", price, strategy.description());
                continue;
            }

            debug!("Extracted price {} via {}", price, strategy.description());
            return Some(price);
        }

        None
    }

    /// Returns the number of strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if no strategies are configured.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Returns descriptions of all strategies, in order.
    pub fn descriptions(&self) -> Vec<String> {
        self.strategies.iter().map(|s| s.description()).collect()
    }
}

impl Default for StrategyChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a price from a field path inside the embedded product data.
/// Objects are stepped into by key; arrays are searched element by element.
pub struct StructuredField {
    path: &'static [&'static str],
}

impl StructuredField {
    pub fn new(path: &'static [&'static str]) -> Self {
        Self { path }
    }
}

impl Strategy for StructuredField {
    fn extract(&self, doc: &Document) -> Option<f64> {
        let value = lookup(doc.structured()?, self.path)?;
        price_from_value(value)
    }

    fn description(&self) -> String {
        format!("structured field '{}'", self.path.join("."))
    }
}

/// Reads a price from the text of the first element matched by a list of
/// CSS selectors, tried in order.
pub struct MarkupPrice {
    selectors: Vec<&'static LazyLock<Selector>>,
}

impl MarkupPrice {
    pub fn new(selectors: &[&'static LazyLock<Selector>]) -> Self {
        Self { selectors: selectors.to_vec() }
    }
}

impl Strategy for MarkupPrice {
    fn extract(&self, doc: &Document) -> Option<f64> {
        for selector in self.selectors.iter().copied() {
            let Some(element) = doc.markup().select(selector).next() else {
                continue;
            };

            let text = element.text().collect::<String>();
            if let Some(price) = parse_price_text(&text) {
                return Some(price);
            }
        }

        None
    }

    fn description(&self) -> String {
        format!("markup selectors ({} candidates)", self.selectors.len())
    }
}

static LOW_PRICE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""lowPrice":\s*(\d+\.?\d*)"#).unwrap());

/// Scans the raw body for an inline `"lowPrice"` value, independent of the
/// tree parse. Catches prices living in script state blobs that never make
/// it into a selectable element.
pub struct RawPattern {
    regex: &'static LazyLock<Regex>,
}

impl RawPattern {
    /// The `lowPrice` key that VTEX storefronts embed in inline script state.
    pub fn low_price() -> Self {
        Self { regex: &LOW_PRICE_KEY }
    }
}

impl Strategy for RawPattern {
    fn extract(&self, doc: &Document) -> Option<f64> {
        let caps = self.regex.captures(doc.raw())?;
        caps.get(1)?.as_str().parse().ok()
    }

    fn description(&self) -> String {
        "raw lowPrice scan".to_string()
    }
}

static SUPERNOVA_CHAIN: LazyLock<StrategyChain> = LazyLock::new(|| {
    let mut chain = StrategyChain::new();
    chain.add(StructuredField::new(&["offers", "lowPrice"]));
    chain.add(RawPattern::low_price());
    chain
});

static CARREFOUR_CHAIN: LazyLock<StrategyChain> = LazyLock::new(|| {
    let mut chain = StrategyChain::new();
    chain.add(StructuredField::new(&["offers", "lowPrice"]));
    chain.add(MarkupPrice::new(&[&selectors::carrefour::PRICE]));
    chain
});

static QUEIROZ_CHAIN: LazyLock<StrategyChain> = LazyLock::new(|| {
    let mut chain = StrategyChain::new();
    chain.add(StructuredField::new(&["offers", "price"]));
    chain.add(MarkupPrice::new(&[
        &selectors::queiroz::CARD_PRICE,
        &selectors::queiroz::PAGE_PRICE,
    ]));
    chain
});

/// Returns the ordered extraction strategies for a store.
pub fn chain_for(store: Store) -> &'static StrategyChain {
    match store {
        Store::Supernova => &SUPERNOVA_CHAIN,
        Store::Carrefour => &CARREFOUR_CHAIN,
        Store::Queiroz => &QUEIROZ_CHAIN,
    }
}

/// Walks a field path through the structured view. Objects are stepped into
/// by key; for arrays each element is tried with the remaining path and the
/// first hit wins.
fn lookup<'a>(node: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let Some((head, rest)) = path.split_first() else {
        return Some(node);
    };

    match node {
        Value::Object(map) => map.get(*head).and_then(|v| lookup(v, rest)),
        Value::Array(items) => items.iter().find_map(|v| lookup(v, path)),
        _ => None,
    }
}

fn price_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_price_text(s),
        _ => None,
    }
}

/// Parses a BRL price from display text like "R$ 1.234,56" or "R$ 12,30".
pub fn parse_price_text(text: &str) -> Option<f64> {
    // Drop currency symbols and whitespace, keep digits and separators
    let cleaned: String =
        text.chars().filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',').collect();

    if cleaned.is_empty() {
        return None;
    }

    let last_comma = cleaned.rfind(',');
    let last_period = cleaned.rfind('.');

    let normalized = match (last_comma, last_period) {
        // Only comma -> decimal comma (12,30 -> 12.30)
        (Some(_), None) => cleaned.replace(',', "."),
        // Both: the rightmost separator is the decimal one
        (Some(c), Some(p)) => {
            if c > p {
                // 1.234,56 -> 1234.56
                cleaned.replace('.', "").replace(',', ".")
            } else {
                // 1,234.56 -> 1234.56
                cleaned.replace(',', "")
            }
        }
        // Only period or bare digits are already normalized
        _ => cleaned,
    };

    normalized.parse().ok()
}

/// Returns true when a price is finite and inside the plausible range.
pub fn plausible_price(price: f64) -> bool {
    price.is_finite() && price > MIN_PLAUSIBLE_PRICE && price < MAX_PLAUSIBLE_PRICE
}
