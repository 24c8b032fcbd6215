//! Certificate bundle download.
//!
//! The updater only needs "GET this URL, give me the body or a reason it
//! failed"; [`Transport`] is that seam and [`HttpTransport`] the
//! production implementation.

pub mod http;

pub use http::HttpTransport;

/// Performs a GET on a candidate source URL.
pub trait Transport {
    /// Fetch `url`, returning the response body.
    ///
    /// Transport failures and non-success statuses are both errors; the
    /// error text is kept as the diagnostic reason when every source fails.
    fn get(&self, url: &str) -> anyhow::Result<Vec<u8>>;
}
