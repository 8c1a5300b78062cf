use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Service ids below this value belong to the platform's native carriers.
pub const CUSTOM_SERVICE_ID_BASE: u32 = 10_000;

/// Decimal places kept on every computed price.
///
/// Prices are written as JSON floats, so they are rounded to a scale that
/// survives the trip through `f64` unchanged.
pub const PRICE_SCALE: u32 = 4;

pub fn round_price(price: Decimal) -> Decimal {
    price.round_dp(PRICE_SCALE)
}

/// A single priced shipping option.
///
/// Hidden rates stay in the collection so later selectors can still address
/// them; they are only dropped when the response is rendered.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Rate {
    pub service_id: u32,
    pub method: String,
    pub service_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    /// Fields supplied by the platform that this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Rate {
    pub fn new(
        service_id: u32,
        price: Decimal,
        method: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            service_id,
            method: method.into(),
            service_name: service_name.into(),
            price,
            hidden: None,
            extra: Map::new(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden == Some(true)
    }

    /// Lowercased `"<method> <service_name>"`, the text searched by text selectors.
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.service_name).to_lowercase()
    }
}

/// Moves a custom service id into the range reserved for custom rates.
pub fn normalize_service_id(service_id: u32) -> u32 {
    if service_id < CUSTOM_SERVICE_ID_BASE {
        service_id + CUSTOM_SERVICE_ID_BASE
    } else {
        service_id
    }
}

/// Per-cart fees that `add` can fold into a new rate's price.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Default)]
pub struct CartContext {
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_flat_rate_shipping: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_handling_fee: Decimal,
}

/// The `_embedded` section of the cart payload.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct Embedded {
    #[serde(rename = "fx:shipping_results", alias = "shipping_results", default)]
    pub shipping_results: Vec<Rate>,
    #[serde(rename = "fx:shipment", alias = "shipment", default)]
    pub shipment: CartContext,
}

/// Cart payload delivered by the calculated-shipping callback.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct CartPayload {
    #[serde(rename = "_embedded", alias = "embedded")]
    pub embedded: Embedded,
}
