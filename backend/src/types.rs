use crate::error::FetchError;
use serde::{Deserialize, Serialize};

/// Substituted when the upstream response lacks a field
pub const NOT_AVAILABLE: &str = "N/A";

/// `price_22k` of a failed fetch
pub const FETCH_FAILED: &str = "Error";

/// `price_24k` and `unit` of a failed fetch
pub const PLACEHOLDER: &str = "-";

/// One row of the price board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// City name as listed in the city file
    pub city: String,

    /// 22 carat price, or a sentinel
    pub price_22k: String,

    /// 24 carat price, or a sentinel
    pub price_24k: String,

    /// Unit label (e.g. "per gram"), or a sentinel
    pub unit: String,

    /// Failure description, only set when the fetch failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PriceRecord {
    /// Sentinel record for a city whose fetch failed
    pub fn failed(city: &str, err: &FetchError) -> Self {
        Self {
            city: city.to_string(),
            price_22k: FETCH_FAILED.to_string(),
            price_24k: PLACEHOLDER.to_string(),
            unit: PLACEHOLDER.to_string(),
            error: Some(err.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_record_shape() {
        let err = FetchError::MissingData("body was an array".to_string());
        let record = PriceRecord::failed("Delhi", &err);

        assert_eq!(record.city, "Delhi");
        assert_eq!(record.price_22k, "Error");
        assert_eq!(record.price_24k, "-");
        assert_eq!(record.unit, "-");
        assert_eq!(
            record.error.as_deref(),
            Some("Upstream returned no price data: body was an array")
        );
        assert!(record.is_error());
    }

    #[test]
    fn test_error_field_omitted_when_absent() {
        let record = PriceRecord {
            city: "Mumbai".to_string(),
            price_22k: "5000".to_string(),
            price_24k: "5400".to_string(),
            unit: "per gram".to_string(),
            error: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "city": "Mumbai",
                "price_22k": "5000",
                "price_24k": "5400",
                "unit": "per gram",
            })
        );
    }
}
