//! Strategy executors
//!
//! One module per rule kind. Each executor is a function from rule params
//! and current state to a single aggregate [`Outcome`](crate::Outcome).

pub mod attributes;
pub mod version;
