use crate::domain::modifier::PriceModifier;
use crate::domain::operation::Operation;
use crate::domain::rate::{CartContext, CartPayload, Rate, normalize_service_id, round_price};
use crate::domain::response::{Output, Response};
use crate::domain::selector::{Selector, SelectorResolver};
use crate::error::{Result, ShippingError};
use crate::interfaces::json::cart_reader::CartReader;
use rust_decimal::Decimal;

/// Which cart fees `RateSet::add_with` folds into the new rate's price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeOptions {
    pub flat_rate: bool,
    pub handling: bool,
}

impl Default for FeeOptions {
    fn default() -> Self {
        Self {
            flat_rate: true,
            handling: true,
        }
    }
}

impl FeeOptions {
    pub const NONE: Self = Self {
        flat_rate: false,
        handling: false,
    };
}

/// The shipping rates for one cart, built up over a single callback.
///
/// A `RateSet` is either in data mode (no error recorded) or error mode.
/// Mutators resolve their selector against the current rates and apply the
/// change to each match in the same call.
#[derive(Debug, Clone)]
pub struct RateSet {
    rates: Vec<Rate>,
    error_message: Option<String>,
    cart: CartContext,
    resolver: SelectorResolver,
}

impl RateSet {
    /// Creates a rate set seeded with the rates already present in the cart.
    pub fn new(cart: CartPayload) -> Self {
        Self::with_resolver(cart, SelectorResolver::default())
    }

    /// Creates a rate set that resolves text selectors against a custom carrier list.
    pub fn with_resolver(cart: CartPayload, resolver: SelectorResolver) -> Self {
        let embedded = cart.embedded;
        tracing::debug!(
            seeded = embedded.shipping_results.len(),
            "rate set created from cart"
        );
        Self {
            rates: embedded.shipping_results,
            error_message: None,
            cart: embedded.shipment,
            resolver,
        }
    }

    /// Parses the cart payload text and builds a rate set from it.
    ///
    /// An empty payload is reported as [`ShippingError::MissingCart`].
    pub fn from_json(payload: &str) -> Result<Self> {
        CartReader::new(payload.as_bytes()).read().map(Self::new)
    }

    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn cart(&self) -> &CartContext {
        &self.cart
    }

    /// Adds a custom rate with both the flat-rate and handling fees included.
    pub fn add(
        &mut self,
        service_id: u32,
        price: Decimal,
        method: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Result<()> {
        self.add_with(service_id, price, method, service_name, FeeOptions::default())
    }

    /// Adds a custom rate, folding in only the fees selected by `fees`.
    ///
    /// Ids below 10000 are shifted into the custom range. Fails without
    /// adding anything if the fees overflow the price.
    pub fn add_with(
        &mut self,
        service_id: u32,
        price: Decimal,
        method: impl Into<String>,
        service_name: impl Into<String>,
        fees: FeeOptions,
    ) -> Result<()> {
        let mut price = price;
        if fees.handling {
            price = self.add_fee(price, self.cart.total_handling_fee)?;
        }
        if fees.flat_rate {
            price = self.add_fee(price, self.cart.total_flat_rate_shipping)?;
        }

        let rate = Rate::new(
            normalize_service_id(service_id),
            round_price(price),
            method,
            service_name,
        );
        tracing::debug!(service_id = rate.service_id, price = %rate.price, "rate added");
        self.rates.push(rate);
        Ok(())
    }

    fn add_fee(&self, price: Decimal, fee: Decimal) -> Result<Decimal> {
        price.checked_add(fee).ok_or_else(|| {
            ShippingError::PriceArithmetic(format!("adding fee {fee} overflows price {price}"))
        })
    }

    pub fn hide(&mut self, selector: impl Into<Selector>) {
        self.set_hidden(&selector.into(), true);
    }

    pub fn show(&mut self, selector: impl Into<Selector>) {
        self.set_hidden(&selector.into(), false);
    }

    /// Same as [`RateSet::hide`]; removed rates can be brought back with `show`.
    pub fn remove(&mut self, selector: impl Into<Selector>) {
        self.hide(selector);
    }

    fn set_hidden(&mut self, selector: &Selector, hidden: bool) {
        let matched = self.resolver.resolve(&self.rates, selector);
        tracing::debug!(?selector, hidden, matched = matched.len(), "visibility changed");
        for index in matched {
            self.rates[index].hidden = Some(hidden);
        }
    }

    /// Changes the price, method and/or service name of every matching rate.
    ///
    /// A `None` or empty `modifier` leaves prices alone; `method` and
    /// `service_name` overwrite when given, even with an empty string. If the
    /// modifier cannot be parsed or applied to any match, nothing is changed.
    pub fn update(
        &mut self,
        selector: impl Into<Selector>,
        modifier: Option<&str>,
        method: Option<&str>,
        service_name: Option<&str>,
    ) -> Result<()> {
        let modifier = modifier
            .filter(|m| !m.is_empty())
            .map(str::parse::<PriceModifier>)
            .transpose()?;

        let selector = selector.into();
        let matched = self.resolver.resolve(&self.rates, &selector);

        // Staged so a failure leaves every rate untouched. An index matched
        // twice by a code list is modified twice.
        let mut staged: Vec<Decimal> = self.rates.iter().map(|r| r.price).collect();
        if let Some(modifier) = &modifier {
            for &index in &matched {
                staged[index] = modifier.apply(staged[index])?;
            }
        }

        tracing::debug!(?selector, matched = matched.len(), "updating rates");
        for index in matched {
            let rate = &mut self.rates[index];
            rate.price = staged[index];
            if let Some(method) = method {
                rate.method = method.to_string();
            }
            if let Some(service_name) = service_name {
                rate.service_name = service_name.to_string();
            }
        }
        Ok(())
    }

    /// Drops every rate and clears any recorded error.
    pub fn reset(&mut self) {
        self.rates.clear();
        self.error_message = None;
    }

    /// Switches the response to an error. Rates are kept but not emitted.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(%message, "shipping error recorded");
        self.error_message = Some(message);
    }

    /// Applies one scripted operation.
    pub fn apply(&mut self, operation: Operation) -> Result<()> {
        match operation {
            Operation::Add {
                service_id,
                price,
                method,
                service_name,
                add_flat_rate,
                add_handling,
            } => self.add_with(
                service_id,
                price,
                method,
                service_name,
                FeeOptions {
                    flat_rate: add_flat_rate,
                    handling: add_handling,
                },
            )?,
            Operation::Update {
                selector,
                modifier,
                method,
                service_name,
            } => self.update(
                selector,
                modifier.as_deref(),
                method.as_deref(),
                service_name.as_deref(),
            )?,
            Operation::Hide { selector } => self.hide(selector),
            Operation::Show { selector } => self.show(selector),
            Operation::Remove { selector } => self.remove(selector),
            Operation::Reset => self.reset(),
            Operation::Error { message } => self.error(message),
        }
        Ok(())
    }

    /// The response for the current state: the error, or every visible rate in order.
    pub fn response(&self) -> Response {
        match &self.error_message {
            Some(message) => Response::failure(message.clone()),
            None => Response::success(
                self.rates
                    .iter()
                    .filter(|r| !r.is_hidden())
                    .cloned()
                    .collect(),
            ),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.response())?)
    }

    pub fn output(&self, as_string: bool) -> Result<Output> {
        if as_string {
            Ok(Output::Text(self.to_json()?))
        } else {
            Ok(Output::Structured(self.response()))
        }
    }
}
