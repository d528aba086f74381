use scraper::{Html, Selector};

/// Pulls job-offer links out of a listing page.
///
/// Offer tiles are anchors carrying both marker classes. Pages outside the
/// expected shape (no tiles at all) just produce an empty batch.
pub struct ListingExtractor {
    offer_links: Selector,
}

impl ListingExtractor {
    pub fn new() -> Self {
        ListingExtractor {
            offer_links: Selector::parse("a.tiles_o1859gd9.core_n194fgoq").unwrap(),
        }
    }

    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.offer_links)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }
}
