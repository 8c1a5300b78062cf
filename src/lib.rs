//! Builds and mutates the shipping-rate quotes returned by a calculated-shipping
//! callback.
//!
//! Start from the platform's cart payload with [`application::rate_set::RateSet`],
//! add or edit rates, hide or show them by selector, then render the response.

pub mod application;
pub mod domain;
pub mod error;
pub mod interfaces;
pub mod logging;
