//! Attachment downloading.

mod http_fetcher;

pub use http_fetcher::{HttpFileFetcher, HttpFileFetcherError, is_same_origin};
