use super::rate::round_price;
use crate::error::{Result, ShippingError};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

static MODIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([+\-=*/])?(\d+(?:\.\d+)?)(%)?").expect("modifier pattern is valid")
});

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    Set,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// A bare percentage (`10%`) raises the price; a bare number replaces it.
    fn from_symbol(symbol: Option<&str>, percent: bool) -> Self {
        match symbol {
            None if percent => Self::Add,
            Some("+") => Self::Add,
            Some("-") => Self::Subtract,
            Some("*") => Self::Multiply,
            Some("/") => Self::Divide,
            _ => Self::Set,
        }
    }
}

/// A parsed price modifier such as `50`, `+2.5`, `-10%` or `*1.5`.
///
/// The first `[operator]digits[.digits][%]` run found in the text is used;
/// anything around it is ignored.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PriceModifier {
    pub operator: Operator,
    pub magnitude: Decimal,
    pub percent: bool,
}

impl FromStr for PriceModifier {
    type Err = ShippingError;

    fn from_str(expression: &str) -> Result<Self> {
        let caps = MODIFIER_PATTERN
            .captures(expression)
            .ok_or_else(|| ShippingError::MalformedModifier(expression.to_string()))?;
        let magnitude = caps
            .get(2)
            .and_then(|m| Decimal::from_str(m.as_str()).ok())
            .ok_or_else(|| ShippingError::MalformedModifier(expression.to_string()))?;

        let percent = caps.get(3).is_some();

        Ok(Self {
            operator: Operator::from_symbol(caps.get(1).map(|m| m.as_str()), percent),
            magnitude,
            percent,
        })
    }
}

impl PriceModifier {
    /// Applies the modifier to `price`. The result is never negative and is
    /// rounded to [`PRICE_SCALE`](super::rate::PRICE_SCALE) places.
    pub fn apply(&self, price: Decimal) -> Result<Decimal> {
        let operand = if self.percent {
            (self.magnitude / Decimal::ONE_HUNDRED)
                .checked_mul(price)
                .ok_or_else(|| self.overflow(price))?
        } else {
            self.magnitude
        };

        let result = match self.operator {
            Operator::Set => Some(operand),
            Operator::Add => price.checked_add(operand),
            Operator::Subtract => price.checked_sub(operand),
            Operator::Multiply => price.checked_mul(operand),
            Operator::Divide => {
                if operand.is_zero() {
                    return Err(ShippingError::PriceArithmetic(format!(
                        "division of {price} by zero"
                    )));
                }
                price.checked_div(operand)
            }
        }
        .ok_or_else(|| self.overflow(price))?;

        Ok(round_price(result.max(Decimal::ZERO)))
    }

    fn overflow(&self, price: Decimal) -> ShippingError {
        ShippingError::PriceArithmetic(format!("{:?} overflows price {price}", self))
    }
}

/// Parses `expression` and applies it to `price` in one step.
pub fn modify_price(price: Decimal, expression: &str) -> Result<Decimal> {
    expression.parse::<PriceModifier>()?.apply(price)
}
