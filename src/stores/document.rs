//! Parsed views of one fetched storefront page.

use crate::stores::selectors;
use scraper::Html;
use serde_json::Value;
use tracing::debug;

/// A fetched page body, interpreted once and shared by every extraction
/// strategy: the HTML tree, the embedded product structured data (if any),
/// and the raw text for pattern scans that bypass the tree.
pub struct Document {
    raw: String,
    markup: Html,
    structured: Option<Value>,
}

impl Document {
    /// Interprets a response body. Never fails: garbage HTML degrades to an
    /// empty tree and a missing or malformed structured block simply leaves
    /// no structured view.
    pub fn parse(body: &str) -> Self {
        let markup = Html::parse_document(body);
        let structured = extract_product_data(&markup);

        if structured.is_some() {
            debug!("Found embedded product structured data");
        }

        Self { raw: body.to_string(), markup, structured }
    }

    /// Returns the HTML tree view.
    pub fn markup(&self) -> &Html {
        &self.markup
    }

    /// Returns the embedded product node, when the page carries one.
    pub fn structured(&self) -> Option<&Value> {
        self.structured.as_ref()
    }

    /// Returns the unparsed body text.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Scans `application/ld+json` blocks for a schema.org Product node.
/// Malformed blocks are skipped; the first product node found wins.
fn extract_product_data(markup: &Html) -> Option<Value> {
    for script in markup.select(&selectors::shared::LD_JSON) {
        let text = script.text().collect::<String>();
        let Ok(value) = serde_json::from_str::<Value>(text.trim()) else {
            debug!("Skipping malformed ld+json block");
            continue;
        };

        if let Some(product) = product_node(&value) {
            return Some(product.clone());
        }
    }

    None
}

/// Locates a Product node at the top level, inside an array, or under
/// `@graph`.
fn product_node(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(map) => {
            if is_product_type(map.get("@type")) {
                return Some(value);
            }
            map.get("@graph").and_then(product_node)
        }
        Value::Array(items) => items.iter().find_map(product_node),
        _ => None,
    }
}

fn is_product_type(type_field: Option<&Value>) -> bool {
    match type_field {
        Some(Value::String(s)) => s.eq_ignore_ascii_case("Product"),
        Some(Value::Array(items)) => items
            .iter()
            .any(|v| v.as_str().is_some_and(|s| s.eq_ignore_ascii_case("Product"))),
        _ => false,
    }
}
