//! Resource schema authority for TerraPolicy
//!
//! Answers "what type does this attribute have" for resource blocks, backed
//! by `terraform providers schema -json`. Schemas are cached per
//! `(provider, working dir)` for the lifetime of one run.

pub mod cache;
pub mod coerce;
pub mod error;
pub mod providers;
pub mod schema;
pub mod source;
pub mod types;

pub use cache::SchemaCache;
pub use coerce::coerce;
pub use error::{Error, Result};
pub use providers::{SUPPORTED_PROVIDERS, extract_provider_name, supported_provider_for};
pub use schema::{BlockSchema, ProviderSchema, parse_provider_schemas};
pub use source::{SchemaSource, TerraformCliSource};
pub use types::AttrType;
