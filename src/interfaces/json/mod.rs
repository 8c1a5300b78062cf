//! JSON adapters between the platform's wire format and the domain types.

pub mod cart_reader;
pub mod operation_reader;
pub mod response_writer;
