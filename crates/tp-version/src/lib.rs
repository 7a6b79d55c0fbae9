//! Version model for TerraPolicy
//!
//! Parses provider and tool versions out of free-form text and exposes the
//! three-component version value used by version policies. A missing
//! component is `-1` ("unspecified"), never `0`, so comparisons can tell
//! "version omitted" apart from "version zero".

pub mod error;
pub mod output;
pub mod version;

pub use error::{Error, Result};
pub use output::parse_version_output;
pub use version::{UNSPECIFIED, Version};
