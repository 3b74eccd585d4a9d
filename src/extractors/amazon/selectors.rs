//! CSS selectors for Amazon listing and detail pages.
//!
//! Update this file when the markup changes; every list is tried in order.

use std::sync::LazyLock;

use scraper::Selector;

fn parse_all(css: &[&str]) -> Vec<Selector> {
    css.iter().map(|c| Selector::parse(c).unwrap()).collect()
}

/// Bestseller listing pages.
pub mod listing {
    use super::*;

    /// Product cards of the bestseller grid.
    pub static CARD: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "div.zg-grid-general-faceout, \
             div.p13n-sc-uncoverable-faceout, \
             div._cDEzb_grid-cell_1uMOS",
        )
        .unwrap()
    });

    pub static RANK_BADGE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".zg-bdg-text").unwrap());

    pub static PRODUCT_ANCHOR: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.a-link-normal[href*='/dp/']").unwrap());

    pub static ANY_ANCHOR: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a[href]").unwrap());

    /// Attributes that may hold an escaped JSON item list, in lookup order.
    pub const PAYLOAD_ATTRIBUTES: [&str; 5] = [
        "data-client-recs-list",
        "data-client-recs",
        "data-a-state",
        "data-acp-params",
        "data-payload",
    ];

    /// Any element carrying one of [`PAYLOAD_ATTRIBUTES`].
    pub static PAYLOAD_HOLDER: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "[data-client-recs-list], \
             [data-client-recs], \
             [data-a-state], \
             [data-acp-params], \
             [data-payload]",
        )
        .unwrap()
    });
}

/// Product detail pages.
pub mod detail {
    use super::*;

    pub static TITLE: LazyLock<Vec<Selector>> =
        LazyLock::new(|| parse_all(&["#productTitle", "#title", "span#productTitle"]));

    pub static PRICE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        parse_all(&[
            "#priceblock_ourprice",
            "#priceblock_dealprice",
            "span.a-price span.a-offscreen",
            "#price_inside_buybox",
            ".a-color-price",
        ])
    });

    pub static RATING_COUNT: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        parse_all(&[
            "#acrCustomerReviewText",
            "#acrCustomerReviewLink",
            "a[href*='product-reviews']",
        ])
    });

    // Product overview table above the fold.
    pub static BRAND: LazyLock<Vec<Selector>> =
        LazyLock::new(|| parse_all(&["tr.po-brand td.a-span9 span"]));

    pub static MODEL: LazyLock<Vec<Selector>> =
        LazyLock::new(|| parse_all(&["tr.po-model_name td.a-span9 span"]));

    pub static SCREEN_SIZE: LazyLock<Vec<Selector>> =
        LazyLock::new(|| parse_all(&["tr.po-display\\.size td.a-span9 span"]));

    pub static OPERATING_SYSTEM: LazyLock<Vec<Selector>> =
        LazyLock::new(|| parse_all(&["tr.po-operating_system td.a-span9 span"]));

    pub static COLOR: LazyLock<Vec<Selector>> =
        LazyLock::new(|| parse_all(&["tr.po-color td.a-span9 span"]));

    pub static IMAGE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        parse_all(&[
            "#landingImage",
            "img#imgBlkFront",
            "img.a-dynamic-image",
            "img#main-image",
            "img.s-image",
        ])
    });

    /// Technical specification tables.
    pub static SPEC_TABLE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "table#productDetails_techSpec_section_1, \
             table#productDetails_detailBullets_sections1, \
             table#productDetails_techSpec_section_2",
        )
        .unwrap()
    });

    pub static TABLE_ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

    pub static ROW_LABEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());

    pub static ROW_VALUE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

    /// "Label : value" bullets below the product description.
    pub static DETAIL_BULLET: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#detailBullets_feature_div li").unwrap());
}
