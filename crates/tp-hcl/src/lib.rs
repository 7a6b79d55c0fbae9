//! Editable HCL document tree for TerraPolicy
//!
//! Parses a pragmatic subset of HCL into a mutable block tree and
//! serializes it back to text. Attribute value expressions are kept as raw
//! text, so values the engine never touches survive a rewrite unchanged.
//!
//! This crate deliberately does not evaluate expressions; it only answers
//! the structural questions the policy engine asks: which blocks exist,
//! which attributes are set, and how to set or create them.

pub mod document;
pub mod error;
pub mod parser;
pub mod value;
pub mod writer;

pub use document::{Attribute, Block, Body, Document, Expression};
pub use error::{Error, Result};
pub use value::Value;
