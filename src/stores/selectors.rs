//! CSS selectors for storefront HTML parsing.
//!
//! This file contains all CSS selectors used for parsing store pages.
//! Update this file when a storefront changes its HTML structure.
//!
//! **Update process**: When extraction starts returning no prices for a
//! store, capture an HTML sample, update selectors, and add a test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors shared by every store.
pub mod shared {
    use super::*;

    /// Embedded structured-data blocks (schema.org product metadata).
    pub static LD_JSON: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());
}

/// Selectors for Carrefour search results.
pub mod carrefour {
    use super::*;

    /// Current price on a search result card. Carrefour styles prices with
    /// utility classes, so this is brittle and the most likely to need an
    /// update after a storefront redesign.
    pub static PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "span.text-blue-royal.font-bold.whitespace-nowrap.block.min-h-6.text-lg.leading-none",
        )
        .unwrap()
    });
}

/// Selectors for Lojas Queiroz pages.
pub mod queiroz {
    use super::*;

    /// Current price on a search result card.
    pub static CARD_PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.product-card__new-price").unwrap());

    /// Current price on the product-page markup variant, reached when the
    /// search resolves straight to a single product.
    pub static PAGE_PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".product__new-price").unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_compile() {
        // Force evaluation of all lazy selectors to ensure they compile
        let _ = &*shared::LD_JSON;
        let _ = &*carrefour::PRICE;
        let _ = &*queiroz::CARD_PRICE;
        let _ = &*queiroz::PAGE_PRICE;
    }

    #[test]
    fn test_queiroz_card_matching() {
        let html = Html::parse_document(
            r#"<div class="product-card">
                <div class="product-card__new-price">R$ 12,30</div>
            </div>"#,
        );

        let texts: Vec<String> = html
            .select(&queiroz::CARD_PRICE)
            .map(|e| e.text().collect::<String>())
            .collect();
        assert_eq!(texts, vec!["R$ 12,30"]);
    }

    #[test]
    fn test_ld_json_matching() {
        let html = Html::parse_document(
            r#"<html><head>
                <script type="application/ld+json">{"@type":"Product"}</script>
                <script type="text/javascript">var x = 1;</script>
            </head></html>"#,
        );

        let blocks: Vec<_> = html.select(&shared::LD_JSON).collect();
        assert_eq!(blocks.len(), 1);
    }
}
