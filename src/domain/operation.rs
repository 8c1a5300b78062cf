use super::selector::Selector;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// One scripted call against a `RateSet`, as read from an operations file.
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Operation {
    Add {
        service_id: u32,
        #[serde(with = "rust_decimal::serde::float")]
        price: Decimal,
        method: String,
        service_name: String,
        #[serde(default = "default_true")]
        add_flat_rate: bool,
        #[serde(default = "default_true")]
        add_handling: bool,
    },
    Update {
        selector: Selector,
        #[serde(default, deserialize_with = "deserialize_modifier")]
        modifier: Option<String>,
        #[serde(default)]
        method: Option<String>,
        #[serde(default)]
        service_name: Option<String>,
    },
    Hide {
        selector: Selector,
    },
    Show {
        selector: Selector,
    },
    Remove {
        selector: Selector,
    },
    Reset,
    Error {
        message: String,
    },
}

fn default_true() -> bool {
    true
}

/// Modifiers may be written as JSON numbers (`5`, `-2.5`) or strings (`"+10%"`).
fn deserialize_modifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawModifier {
        Number(serde_json::Number),
        Text(String),
    }

    Ok(
        Option::<RawModifier>::deserialize(deserializer)?.map(|raw| match raw {
            RawModifier::Number(n) => n.to_string(),
            RawModifier::Text(s) => s,
        }),
    )
}
