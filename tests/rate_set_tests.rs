mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use shipping_rates::application::rate_set::{FeeOptions, RateSet};
use shipping_rates::domain::modifier::modify_price;
use shipping_rates::domain::response::{Output, Response};
use shipping_rates::domain::selector::{Selector, SelectorResolver};
use shipping_rates::error::ShippingError;

fn visible_ids(set: &RateSet) -> Vec<u32> {
    set.response()
        .shipping_results()
        .iter()
        .map(|r| r.service_id)
        .collect()
}

#[test]
fn test_add_normalizes_custom_service_ids() {
    let mut set = RateSet::from_json(&common::cart_json(json!([]), 0.0, 0.0)).unwrap();
    for id in [0u32, 1, 9_999, 10_000, 10_001, 65_000] {
        set.add_with(id, dec!(1), "m", "n", FeeOptions::NONE)
            .unwrap();
    }

    let stored: Vec<u32> = set.rates().iter().map(|r| r.service_id).collect();
    assert_eq!(stored, vec![10_000, 10_001, 19_999, 10_000, 10_001, 65_000]);
}

#[test]
fn test_add_includes_flat_rate_and_handling() {
    let mut set = RateSet::from_json(&common::cart_json(json!([]), 2.0, 1.5)).unwrap();
    set.add(1, dec!(10.00), "m", "n").unwrap();
    assert_eq!(set.rates()[0].price, dec!(13.50));
}

#[test]
fn test_add_reports_fee_overflow_instead_of_panicking() {
    let mut set =
        RateSet::from_json(&common::cart_json(json!([]), 7.0e28, 7.0e28)).unwrap();
    let result = set.add_with(1, dec!(1), "m", "n", FeeOptions::default());

    assert!(matches!(result, Err(ShippingError::PriceArithmetic(_))));
    assert!(set.rates().is_empty());
}

#[test]
fn test_hide_then_show_restores_original_position() {
    let mut set = RateSet::from_json(&common::carrier_cart()).unwrap();
    set.hide(2u32);
    assert_eq!(visible_ids(&set), vec![1, 3]);

    set.show(2u32);
    assert_eq!(visible_ids(&set), vec![1, 2, 3]);
}

#[test]
fn test_remove_and_hide_are_equivalent() {
    let selectors: Vec<Selector> = vec![
        Selector::Code(1),
        Selector::Codes(vec![3, 2]),
        Selector::Text("ups".into()),
        Selector::Text("ground".into()),
        Selector::Text("all".into()),
        Selector::Text("nothing matches".into()),
    ];

    for selector in selectors {
        let mut hidden = RateSet::from_json(&common::carrier_cart()).unwrap();
        let mut removed = RateSet::from_json(&common::carrier_cart()).unwrap();
        hidden.hide(selector.clone());
        removed.remove(selector.clone());
        assert_eq!(hidden.rates(), removed.rates(), "selector {selector:?}");
    }
}

#[test]
fn test_numeric_selector_takes_first_duplicate() {
    let cart = common::cart_json(
        json!([
            {"service_id": 7, "method": "A", "service_name": "a", "price": 1},
            {"service_id": 7, "method": "B", "service_name": "b", "price": 2}
        ]),
        0.0,
        0.0,
    );
    let set = RateSet::from_json(&cart).unwrap();
    let resolver = SelectorResolver::default();
    assert_eq!(resolver.resolve(set.rates(), &Selector::Code(7)), vec![0]);
    assert_eq!(resolver.resolve(set.rates(), &Selector::Codes(vec![7])), vec![0, 1]);
}

#[test]
fn test_text_selectors() {
    let set = RateSet::from_json(&common::carrier_cart()).unwrap();
    let resolver = SelectorResolver::default();

    assert_eq!(resolver.resolve(set.rates(), &"aLL".into()), vec![0, 1, 2]);
    assert_eq!(resolver.resolve(set.rates(), &"ups ground".into()), vec![0]);
}

#[test]
fn test_price_modifier_examples() {
    assert_eq!(modify_price(dec!(100), "10%").unwrap(), dec!(110));
    assert_eq!(modify_price(dec!(100), "-10%").unwrap(), dec!(90));
    assert_eq!(modify_price(dec!(100), "*1.5").unwrap(), dec!(150));
    assert_eq!(modify_price(dec!(100), "50").unwrap(), dec!(50));
    assert_eq!(modify_price(dec!(10), "-20").unwrap(), Decimal::ZERO);
}

#[test]
fn test_update_with_malformed_modifier_fails() {
    let mut set = RateSet::from_json(&common::carrier_cart()).unwrap();
    let result = set.update("all", Some("cheaper"), None, None);
    assert!(matches!(result, Err(ShippingError::MalformedModifier(_))));
    assert_eq!(set.rates()[0].price, dec!(10));
}

#[test]
fn test_reset_clears_rates_and_error() {
    let mut set = RateSet::from_json(&common::carrier_cart()).unwrap();
    set.add(1, dec!(5), "m", "n").unwrap();
    set.error("no service");
    set.reset();

    assert_eq!(
        set.to_json().unwrap(),
        r#"{"ok":true,"data":{"shipping_results":[]}}"#
    );
}

#[test]
fn test_error_overrides_rates() {
    let mut set = RateSet::from_json(&common::carrier_cart()).unwrap();
    set.add(1, dec!(5), "m", "n").unwrap();
    set.error("no service");

    assert_eq!(
        set.to_json().unwrap(),
        r#"{"ok":false,"details":"no service"}"#
    );
}

#[test]
fn test_output_text_round_trips_to_structured() {
    let mut set = RateSet::from_json(&common::carrier_cart()).unwrap();
    set.add(4, dec!(3.25), "Local", "Courier").unwrap();
    set.update("fedex", Some("+5"), Some("FedEx"), Some("Home"))
        .unwrap();
    set.update(1u32, Some("/3"), None, None).unwrap();
    set.update(10_004u32, Some("*7%"), None, None).unwrap();
    set.hide("2day");

    let Output::Text(text) = set.output(true).unwrap() else {
        panic!("expected text output");
    };
    let Output::Structured(structured) = set.output(false).unwrap() else {
        panic!("expected structured output");
    };

    let parsed: Response = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, structured);
    assert_eq!(structured.shipping_results().len(), 3);
    assert_eq!(structured.shipping_results()[0].price, dec!(3.3333));
}

#[test]
fn test_upstream_extra_fields_are_emitted() {
    let cart = common::cart_json(
        json!([{"service_id": 1, "method": "UPS", "service_name": "Ground", "price": 4, "delivery_days": 5}]),
        0.0,
        0.0,
    );
    let set = RateSet::from_json(&cart).unwrap();
    let value: serde_json::Value = serde_json::from_str(&set.to_json().unwrap()).unwrap();
    assert_eq!(value["data"]["shipping_results"][0]["delivery_days"], json!(5));
}
