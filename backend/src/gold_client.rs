use crate::{
    config::UpstreamConfig,
    error::FetchError,
    types::{PriceRecord, NOT_AVAILABLE},
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Fixed path of the city price endpoint
pub const PRICE_PATH: &str = "/gold_price_india_city_value/";

/// Anything that can quote gold prices for a city
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch one city, reporting why it failed
    async fn fetch_quote(&self, city: &str) -> Result<PriceRecord, FetchError>;

    /// Fetch one city, never failing.
    ///
    /// Every `FetchError` becomes the sentinel record from
    /// [`PriceRecord::failed`].
    async fn fetch_price(&self, city: &str) -> PriceRecord {
        match self.fetch_quote(city).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Price fetch failed for {}: {}", city, e);
                PriceRecord::failed(city, &e)
            }
        }
    }
}

/// Client for the RapidAPI gold price service
pub struct GoldPriceClient {
    http: Client,
    config: UpstreamConfig,
}

impl GoldPriceClient {
    pub fn new(config: UpstreamConfig) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.config.base_url, PRICE_PATH)
    }
}

#[async_trait]
impl QuoteSource for GoldPriceClient {
    async fn fetch_quote(&self, city: &str) -> Result<PriceRecord, FetchError> {
        debug!("Fetching gold price for {}", city);

        // Step 1: Issue the request
        let response = self
            .http
            .get(self.endpoint())
            .header("x-rapidapi-key", &self.config.api_key)
            .header("x-rapidapi-host", &self.config.api_host)
            .header("city", city)
            .send()
            .await?;

        // Error statuses usually still carry a JSON body; the lookups below
        // then fall back to "N/A".
        let status = response.status();
        if !status.is_success() {
            warn!("Upstream answered {} for {}", status, city);
        }

        // Step 2: Read and decode the body
        let body = response.bytes().await?;
        let json: Value = serde_json::from_slice(&body)?;

        let Value::Object(data) = json else {
            return Err(FetchError::MissingData(format!(
                "expected a JSON object, got {}",
                json_kind(&json)
            )));
        };

        // Step 3: Pick the city's fields
        let record = extract_record(city, &data);
        debug!(
            "Gold price for {}: 22k={} 24k={} ({})",
            city, record.price_22k, record.price_24k, record.unit
        );

        Ok(record)
    }
}

/// Build a record from a decoded upstream response.
///
/// Keys are `"<city>_22k"`, `"<city>_24k"` and `"Unit"`.
pub fn extract_record(city: &str, data: &Map<String, Value>) -> PriceRecord {
    PriceRecord {
        city: city.to_string(),
        price_22k: field_or_na(data, &format!("{}_22k", city)),
        price_24k: field_or_na(data, &format!("{}_24k", city)),
        unit: field_or_na(data, "Unit"),
        error: None,
    }
}

fn field_or_na(data: &Map<String, Value>, key: &str) -> String {
    match data.get(key) {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
