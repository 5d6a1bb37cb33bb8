//! WCPS query builder.
//!
//! Callers assemble an expression over a coverage one operation at a time and
//! render it into the linear text a WCPS server accepts.
//!
//! # Example
//!
//! ```rust
//! use wcps_query::{ArithmeticOp, EncodingFormat, QueryBuilder, Subset};
//!
//! let mut query = QueryBuilder::new("AvgLandTemp");
//! query
//!     .subset(Subset::new().lat(53.08).long(8.80).dates("2014-01", "2014-12"))?
//!     .arithmetic(ArithmeticOp::Add, Some(273.15.into()))?
//!     .scale(5)?;
//!
//! assert_eq!(
//!     query.finalize(Some(EncodingFormat::Csv)),
//!     r#"for $c in (AvgLandTemp) return encode(scale($c[Lat(53.08),Long(8.8),ansi("2014-01":"2014-12")] + 273.15, 5), "text/csv")"#
//! );
//! # Ok::<(), wcps_query::WcpsError>(())
//! ```

pub mod builder;
pub mod compose;
pub mod geometry;
pub mod operations;
pub mod subset;
pub mod switch_case;

pub use builder::QueryBuilder;
pub use geometry::{Clip, ClipShape, ShapeKind, Vertex};
pub use operations::{
    AggregationOp, ArithmeticOp, BinaryOp, ComparisonOp, ExponentialOp, Literal, Operand,
    Operation, TrigonometricOp, UnaryOp,
};
pub use subset::{AnsiDate, AxisValue, Subset};
pub use switch_case::{ReturnKind, SwitchCase};

pub use wcps_common::{EncodingFormat, Rgb, WcpsError, WcpsResult, COVERAGE_VAR};
