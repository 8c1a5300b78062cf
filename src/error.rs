use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShippingError {
    #[error("the cart JSON payload is required")]
    MissingCart,
    #[error("invalid cart payload: {0}")]
    InvalidCart(#[source] serde_json::Error),
    #[error("malformed price modifier: {0:?}")]
    MalformedModifier(String),
    #[error("cannot apply price modifier: {0}")]
    PriceArithmetic(String),
    #[error("invalid operation on line {line}: {source}")]
    InvalidOperation {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShippingError>;
