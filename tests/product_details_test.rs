use bestsellers_scrapping::{extract_product_details, ProductDetails};

#[test]
fn direct_selectors_fill_basic_fields() {
    let html = r#"
        <html><body>
          <span id="productTitle">  Apple iPad 10.9 inç  </span>
          <span class="a-price"><span class="a-offscreen">12.999,00 TL</span></span>
          <span class="a-color-price">99,00 TL</span>
          <span id="acrCustomerReviewText">1.234 değerlendirme</span>
          <img id="landingImage" src="https://m.media-amazon.com/images/I/ipad.jpg">
        </body></html>"#;

    let details = extract_product_details(html);

    assert_eq!(details.title.as_deref(), Some("Apple iPad 10.9 inç"));
    assert_eq!(details.price.as_deref(), Some("12.999,00 TL"));
    assert_eq!(details.rating_count, Some(1234));
    assert_eq!(
        details.image_url.as_deref(),
        Some("https://m.media-amazon.com/images/I/ipad.jpg")
    );
}

#[test]
fn empty_price_element_falls_through_to_next_selector() {
    let html = r#"
        <span id="priceblock_ourprice">   </span>
        <span id="price_inside_buybox">549,90 TL</span>"#;

    assert_eq!(extract_product_details(html).price.as_deref(), Some("549,90 TL"));
}

#[test]
fn specification_table_fills_missing_fields() {
    let html = r#"
        <table id="productDetails_techSpec_section_1">
          <tr><th>Marka</th><td>Lenovo</td></tr>
          <tr><th>Model Adı</th><td>Tab M10</td></tr>
          <tr><th>Ekran Boyutu</th><td>10.1 İnç</td></tr>
          <tr><th>İşletim Sistemi</th><td>Android 13</td></tr>
          <tr><th>Renk</th><td>Gri</td></tr>
          <tr><th>Ürün Ağırlığı</th><td>465 g</td></tr>
        </table>"#;

    let details = extract_product_details(html);

    assert_eq!(details.brand.as_deref(), Some("Lenovo"));
    assert_eq!(details.model.as_deref(), Some("Tab M10"));
    assert_eq!(details.screen_size.as_deref(), Some("10.1 İnç"));
    assert_eq!(details.operating_system.as_deref(), Some("Android 13"));
    assert_eq!(details.color.as_deref(), Some("Gri"));
}

#[test]
fn overview_selector_wins_over_table_rows() {
    let html = r#"
        <table><tr class="po-brand"><td class="a-span3"><span>Marka</span></td><td class="a-span9"><span>Samsung</span></td></tr></table>
        <table id="productDetails_techSpec_section_1">
          <tr><th>Brand</th><td>Other</td></tr>
          <tr><th>Colour</th><td>Black</td></tr>
          <tr><th>Color</th><td>White</td></tr>
        </table>"#;

    let details = extract_product_details(html);

    assert_eq!(details.brand.as_deref(), Some("Samsung"));
    assert_eq!(details.color.as_deref(), Some("Black"));
}

#[test]
fn detail_bullets_are_split_on_colon() {
    let html = "
        <div id=\"detailBullets_feature_div\"><ul>
          <li><span>Marka \u{200f} : \u{200e}</span><span>Xiaomi</span></li>
          <li><span>Operating System : MIUI</span></li>
          <li><span>Not a pair</span></li>
        </ul></div>";

    let details = extract_product_details(html);

    assert_eq!(details.brand.as_deref(), Some("Xiaomi"));
    assert_eq!(details.operating_system.as_deref(), Some("MIUI"));
}

#[test]
fn screen_size_falls_back_to_page_text() {
    let html = "<p>Bu tablet 11 inç ekrana sahiptir.</p>";

    assert_eq!(extract_product_details(html).screen_size.as_deref(), Some("11 inç"));
}

#[test]
fn screen_size_ignores_script_and_style_text() {
    let html = r#"
        <html><head><style>.thumb { max-height: 50"; }</style></head>
        <body>
          <script>var cfg = {"maxHeight":"50"};</script>
          <span id="productTitle">Tablet</span>
        </body></html>"#;

    assert_eq!(extract_product_details(html).screen_size, None);
}

#[test]
fn empty_page_leaves_every_field_absent() {
    assert_eq!(extract_product_details(""), ProductDetails::default());
}
