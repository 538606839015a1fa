//! Price Board
//!
//! Assembles the page data: loads the city list, fetches every city through
//! a [`QuoteSource`] and returns one `PriceRecord` per city in list order.
//!
//! # Architecture
//! ```text
//! cities_list.txt → [Loader] → Mumbai, Delhi, Pune ...
//!                                 ↓
//!                  [Fan-out, at most N in flight]
//!                                 ↓
//!                  Vec<PriceRecord> (same order as the file)
//! ```
//!
//! A failed city turns into a sentinel record and never aborts the others.

use crate::{
    cities::load_cities,
    error::{BoardError, Result},
    gold_client::QuoteSource,
    types::PriceRecord,
};
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

pub struct PriceBoard {
    source: Arc<dyn QuoteSource>,
    cities_file: PathBuf,
    max_concurrent: usize,
}

impl PriceBoard {
    /// Create a board reading cities from `cities_file`.
    ///
    /// `max_concurrent` bounds the upstream calls in flight for one request;
    /// 1 fetches strictly one city after another.
    pub fn new(source: Arc<dyn QuoteSource>, cities_file: PathBuf, max_concurrent: usize) -> Self {
        Self {
            source,
            cities_file,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Current city list, re-read from disk
    pub async fn cities(&self) -> Result<Vec<String>> {
        load_cities(&self.cities_file).await
    }

    /// Fetch prices for `cities`, one record each, in the same order
    pub async fn prices_for(&self, cities: &[String]) -> Vec<PriceRecord> {
        debug!(
            "Fetching {} cities ({} at a time)",
            cities.len(),
            self.max_concurrent
        );

        // `buffered` yields in input order even when later fetches finish first
        let records: Vec<PriceRecord> = stream::iter(cities.to_vec())
            .map(|city| {
                let source = self.source.clone();
                async move { source.fetch_price(&city).await }
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let failed = records.iter().filter(|r| r.is_error()).count();
        info!("Fetched {} cities, {} failed", records.len(), failed);

        records
    }

    /// Prices for the whole list, or for its first `limit` cities
    pub async fn snapshot(&self, limit: Option<usize>) -> Result<Vec<PriceRecord>> {
        let mut cities = self.cities().await?;
        if let Some(limit) = limit {
            cities.truncate(limit);
        }

        Ok(self.prices_for(&cities).await)
    }

    /// Price for a single city, which must appear in the city list
    pub async fn price_for(&self, city: &str) -> Result<PriceRecord> {
        let cities = self.cities().await?;
        if !cities.iter().any(|c| c == city) {
            return Err(BoardError::UnknownCity(city.to_string()));
        }

        Ok(self.source.fetch_price(city).await)
    }
}
