use crate::domain::rate::CartPayload;
use crate::error::{Result, ShippingError};
use std::io::Read;

/// Reads the cart payload posted by the platform.
pub struct CartReader<R: Read> {
    source: R,
}

impl<R: Read> CartReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Reads the whole source and deserializes it.
    ///
    /// Empty input is a missing cart rather than a JSON syntax error.
    pub fn read(mut self) -> Result<CartPayload> {
        let mut payload = String::new();
        self.source.read_to_string(&mut payload)?;
        if payload.trim().is_empty() {
            tracing::error!("the cart JSON payload is required");
            return Err(ShippingError::MissingCart);
        }
        serde_json::from_str(&payload).map_err(ShippingError::InvalidCart)
    }
}
