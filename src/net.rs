//! Quote list fetching.
//!
//! Failures come back as a `QuoteError` so the panel can show an error state
//! with a retry button instead of stalling on its placeholder.

use crate::model::QuoteList;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    #[error("could not reach the quote service: {0}")]
    Network(String),
    #[error("quote service answered with HTTP {0}")]
    Status(u16),
    #[error("quote service sent an unreadable response: {0}")]
    Decode(String),
    #[error("quote service returned no quotes")]
    Empty,
}

pub async fn fetch_quotes(url: &str) -> Result<QuoteList, QuoteError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| QuoteError::Network(e.to_string()))?;
    if !resp.ok() {
        return Err(QuoteError::Status(resp.status()));
    }
    let body = resp
        .text()
        .await
        .map_err(|e| QuoteError::Network(e.to_string()))?;
    decode_quotes(&body)
}

pub fn decode_quotes(body: &str) -> Result<QuoteList, QuoteError> {
    let list: QuoteList =
        serde_json::from_str(body).map_err(|e| QuoteError::Decode(e.to_string()))?;
    if list.quotes.is_empty() {
        return Err(QuoteError::Empty);
    }
    Ok(list)
}

/// Numbers outgoing fetches so only the newest response is shown.
#[derive(Debug, Default, Clone)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    pub fn next(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.latest
    }

    pub fn is_latest(&self, id: u64) -> bool {
        id == self.latest
    }
}
