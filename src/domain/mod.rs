//! Domain types and the pure algorithms that operate on them.
//!
//! Nothing in here holds state across calls: the selector resolver and the
//! price modifier only read their inputs.

pub mod modifier;
pub mod operation;
pub mod rate;
pub mod response;
pub mod selector;
