use super::rate::Rate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct ResponseData {
    pub shipping_results: Vec<Rate>,
}

/// The body returned to the platform's calculated-shipping callback.
///
/// Success carries `data`, failure carries `details`; never both.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Response {
    pub fn success(shipping_results: Vec<Rate>) -> Self {
        Self {
            ok: true,
            data: Some(ResponseData { shipping_results }),
            details: None,
        }
    }

    pub fn failure(details: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            details: Some(details.into()),
        }
    }

    /// Rates carried by a success response; empty for a failure.
    pub fn shipping_results(&self) -> &[Rate] {
        self.data
            .as_ref()
            .map(|d| d.shipping_results.as_slice())
            .unwrap_or_default()
    }
}

/// What `RateSet::output` hands back, depending on whether text was requested.
#[derive(Debug, PartialEq, Clone)]
pub enum Output {
    Text(String),
    Structured(Response),
}
