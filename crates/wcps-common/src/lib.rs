//! Common types shared by the WCPS query builder, client and CLI.

pub mod color;
pub mod encoding;
pub mod error;

pub use color::Rgb;
pub use encoding::EncodingFormat;
pub use error::{WcpsError, WcpsResult};

/// Placeholder variable bound to the coverage in every generated query.
pub const COVERAGE_VAR: &str = "$c";
