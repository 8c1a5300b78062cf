#![allow(dead_code)]

use serde_json::{Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

pub fn cart_json(rates: Value, flat_rate: f64, handling: f64) -> String {
    json!({
        "_embedded": {
            "fx:shipping_results": rates,
            "fx:shipment": {
                "total_flat_rate_shipping": flat_rate,
                "total_handling_fee": handling
            }
        }
    })
    .to_string()
}

pub fn carrier_cart() -> String {
    cart_json(
        json!([
            {"service_id": 1, "method": "UPS", "service_name": "Ground", "price": 10},
            {"service_id": 2, "method": "UPS", "service_name": "2Day", "price": 20},
            {"service_id": 3, "method": "FedEx", "service_name": "Ground", "price": 15}
        ]),
        2.0,
        1.5,
    )
}

pub fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}
