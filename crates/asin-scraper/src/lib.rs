pub mod error;
pub mod extract;
pub mod fetch;
pub mod identifier;
pub mod identity;
pub mod record;
pub mod service;

pub use error::ScraperError;
pub use extract::{extract_fields, FieldSet};
pub use fetch::{
    BrowserFetcher, FetchOutcome, FetchStrategy, HttpFetcher, PageFetcher, ScrollSettings,
};
pub use identifier::{normalize, Asin, CanonicalUrl};
pub use identity::{Identity, IdentityPool, ProxyEndpoint};
pub use record::{assemble, Images, Price, ProductRecord, ReviewSummary};
pub use service::ProductScraper;
