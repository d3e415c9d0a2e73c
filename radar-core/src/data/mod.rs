//! Data layer: the fetcher abstraction, HTTP sources and ingest.

pub mod fetcher;
pub mod http;
pub mod ingest;

pub use fetcher::{FetchError, SourceFetcher};
pub use http::{build_client, HttpSource};
pub use ingest::{decode, parse_date, IngestReport};
