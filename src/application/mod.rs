//! Application layer holding the per-request rate set.
//!
//! `RateSet` owns the rate collection and the error state for one callback and
//! is the only place where that state changes.

pub mod rate_set;
