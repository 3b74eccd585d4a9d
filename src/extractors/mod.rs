use scraper::ElementRef;

pub mod amazon;

/// Elements whose text never renders on the page.
const NON_VISIBLE_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Trimmed text nodes of `element`, concatenated.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("")
}

/// Rendered text of `element`, space separated, without script/style contents.
pub fn visible_text(element: ElementRef<'_>) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element().map(|e| e.name()))
                .is_some_and(|name| NON_VISIBLE_ELEMENTS.contains(&name));
            let text = text.trim();
            (!hidden && !text.is_empty()).then_some(text)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    #[test]
    fn visible_text_skips_scripts_and_styles() {
        let document = Html::parse_document(
            r#"<html><head><style>.a { width: 10px }</style></head>
               <body><p>Tablet</p><script>var cfg = {"maxHeight":"50"};</script>
               <noscript>enable js</noscript><span> 11 inç </span></body></html>"#,
        );

        assert_eq!(visible_text(document.root_element()), "Tablet 11 inç");
    }
}
