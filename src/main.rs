use job_scraper_lib::{config, delay_manager, logger};
use job_scraper_lib::{Config, DetailExtractor, Fetcher, ListingExtractor, RecordStore};

use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();
    info!("Starting Job Scraper...");

    let config = Config::from_env();
    let fetcher = Fetcher::new(&config);
    let listing_extractor = ListingExtractor::new();
    let detail_extractor = DetailExtractor::new();

    // 1. Walk the listing pages and collect offer links
    let mut offer_links = Vec::new();
    for page in 0..config::LISTING_PAGES {
        delay_manager::page_delay(config.fetch_delay()).await;
        let url = config.listing_url(page);
        info!("Listing page {} / {}: {}", page + 1, config::LISTING_PAGES, url);
        let html = fetcher.get(&url).await?;
        offer_links.extend(listing_extractor.extract(&html));
    }
    info!("Collected {} offer links.", offer_links.len());

    // 2. Visit every offer and extract a record
    let mut records = Vec::new();
    for (i, link) in offer_links.iter().enumerate() {
        delay_manager::page_delay(config.fetch_delay()).await;
        let html = fetcher.get(link).await?;
        let record = detail_extractor.extract(link, &html);
        println!(
            "Record {} added. Title: {}",
            i + 1,
            record.title.as_deref().unwrap_or("None")
        );
        records.push(record);
    }

    // 3. Persist everything, then drop repeated offers
    let store = RecordStore::connect(&config.database_url).await?;
    for record in &records {
        store.insert(record).await?;
    }
    info!("Inserted {} records into {}.", records.len(), config.database_url);

    match store.deduplicate().await {
        Ok(removed) => {
            info!("Removed {} duplicate rows.", removed);
            println!("Duplicate records removed successfully.");
        }
        Err(e) => println!("Database error: {}", e),
    }

    store.close().await;
    info!("Scraping Completed. Stored {} records.", records.len());
    Ok(())
}
