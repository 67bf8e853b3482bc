//! The fixed set of storefronts queried for every product code.

use crate::ean::Ean;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User agent sent to every storefront.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Accept-Language sent to every storefront (Brazilian Portuguese catalogs).
pub const ACCEPT_LANGUAGE: &str = "pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7";

/// The recognized storefronts. The enumeration order is the canonical
/// registry order: comparison records list quotes in this order and price
/// ties resolve to the earliest store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Store {
    Supernova,
    Carrefour,
    Queiroz,
}

impl Store {
    /// Returns all stores in registry order.
    pub fn all() -> &'static [Store] {
        &[Store::Supernova, Store::Carrefour, Store::Queiroz]
    }

    /// Returns the stable lowercase identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Store::Supernova => "supernova",
            Store::Carrefour => "carrefour",
            Store::Queiroz => "queiroz",
        }
    }

    /// Returns the human-readable storefront name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Store::Supernova => "Supernova Era",
            Store::Carrefour => "Carrefour",
            Store::Queiroz => "Lojas Queiroz",
        }
    }

    /// Returns the production base URL (no trailing slash).
    pub fn base_url(&self) -> &'static str {
        match self {
            Store::Supernova => "https://www.supernovaera.com.br",
            Store::Carrefour => "https://mercado.carrefour.com.br",
            Store::Queiroz => "https://www.lojasqueiroz.com.br",
        }
    }

    /// Builds the search URL for a code. `base` is a parameter so tests can
    /// point requests at a local mock server.
    pub fn search_url(&self, base: &str, ean: &Ean) -> String {
        match self {
            // VTEX full-text search; a unique match redirects to the product page
            Store::Supernova => format!("{}/{}?_q={}&map=ft", base, ean, ean),
            Store::Carrefour => format!("{}/busca/{}", base, ean),
            Store::Queiroz => format!("{}/busca?s={}", base, ean),
        }
    }

    /// Returns cookies the storefront needs to serve the right catalog.
    pub fn cookies(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            // Pins the Manaus regional catalog; without it prices vary or vanish
            Store::Queiroz => &[("location", "queiroz-manaus")],
            _ => &[],
        }
    }

    /// Returns whether the client should follow redirects for this store.
    ///
    /// Queiroz redirects to a region-chooser page when the location cookie is
    /// not honored; that page has no product markup, so the redirect is
    /// surfaced as a failed fetch instead of being followed.
    pub fn follow_redirects(&self) -> bool {
        !matches!(self, Store::Queiroz)
    }

    /// Builds the complete request descriptor for a code.
    pub fn request(&self, base: &str, ean: &Ean) -> RequestSpec {
        RequestSpec {
            url: self.search_url(base, ean),
            cookies: self.cookies(),
            follow_redirects: self.follow_redirects(),
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Everything the HTTP client needs to issue one storefront request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub url: String,
    pub cookies: &'static [(&'static str, &'static str)],
    pub follow_redirects: bool,
}
