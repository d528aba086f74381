pub mod classifier;
pub mod config;
pub mod delay_manager;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod listing;
pub mod logger;
pub mod store;

// Exporting types for convenience
pub use classifier::{classify, Category};
pub use config::Config;
pub use error::ScrapeError;
pub use extractor::{DetailExtractor, JobRecord};
pub use fetcher::Fetcher;
pub use listing::ListingExtractor;
pub use store::{ListColumn, RecordStore, StoredJob};
