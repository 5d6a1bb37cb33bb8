//! Fluent query builder.
//!
//! A builder is bound to one coverage and holds an append-only operation
//! sequence. Every mutator validates its arguments before appending, so a
//! malformed expression cannot be built. Rendering never mutates state and
//! may be repeated as the sequence grows.
//!
//! Builders are not meant to be shared between threads while mutating; give
//! each task its own instance or clone one.

use std::fmt;

use tracing::{debug, info, trace};
use wcps_common::{EncodingFormat, Rgb, WcpsError, WcpsResult, COVERAGE_VAR};

use crate::compose::{base_or, compose_operations};
use crate::geometry::{Clip, ClipShape};
use crate::operations::{
    AggregationOp, ArithmeticForm, ArithmeticOp, ComparisonOp, ExponentialOp, Literal, Operand,
    Operation, TrigonometricOp, UnaryOp,
};
use crate::subset::Subset;
use crate::switch_case::{ReturnKind, SwitchCase};

/// Builds a WCPS expression over a single coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilder {
    coverage_id: String,
    debug: bool,
    operations: Vec<Operation>,
}

impl QueryBuilder {
    pub fn new(coverage_id: impl Into<String>) -> Self {
        Self {
            coverage_id: coverage_id.into(),
            debug: false,
            operations: Vec::new(),
        }
    }

    /// When enabled, every finalized query is emitted as an `info` event on
    /// the `wcps_query` target.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn coverage_id(&self) -> &str {
        &self.coverage_id
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    fn push(&mut self, operation: Operation) -> &mut Self {
        trace!(op = operation.name(), depth = self.operations.len(), "Appending operation");
        self.operations.push(operation);
        self
    }

    /// Slice the coverage, e.g. `$c[Lat(53.08),ansi("2014-07")]`.
    pub fn subset(&mut self, subset: Subset) -> WcpsResult<&mut Self> {
        subset.validate()?;
        Ok(self.push(Operation::Slice(subset)))
    }

    /// ADD, SUB, PROD, DIV and MOD require an operand; ABS, ROUND, FLOOR and
    /// CEIL ignore it.
    pub fn arithmetic(&mut self, op: ArithmeticOp, operand: Option<Operand>) -> WcpsResult<&mut Self> {
        match op.form() {
            ArithmeticForm::Binary(binary) => {
                let operand = required_operand(op.name(), operand)?;
                Ok(self.push(Operation::Binary {
                    op: binary,
                    operand,
                }))
            }
            ArithmeticForm::Unary(unary) => {
                if operand.is_some() {
                    debug!(op = op.name(), "Ignoring operand of unary operation");
                }
                Ok(self.push(Operation::Unary(unary)))
            }
        }
    }

    /// POW requires the exponent; EXP, LOG, LN and SQRT take none.
    pub fn exponential(&mut self, op: ExponentialOp, operand: Option<Operand>) -> WcpsResult<&mut Self> {
        match op.unary() {
            Some(unary) => {
                if operand.is_some() {
                    debug!(op = op.name(), "Ignoring operand of unary operation");
                }
                Ok(self.push(Operation::Unary(unary)))
            }
            None => {
                let exponent = required_operand(op.name(), operand)?;
                Ok(self.push(Operation::Power { exponent }))
            }
        }
    }

    pub fn compare(&mut self, op: ComparisonOp, operand: impl Into<Operand>) -> WcpsResult<&mut Self> {
        let operand = operand.into();
        operand.validate()?;
        Ok(self.push(Operation::Binary {
            op: op.into(),
            operand,
        }))
    }

    pub fn trig(&mut self, op: TrigonometricOp) -> &mut Self {
        self.push(Operation::Unary(UnaryOp::from(op)))
    }

    pub fn aggregate(&mut self, op: AggregationOp) -> &mut Self {
        self.push(Operation::Unary(UnaryOp::from(op)))
    }

    /// Clip the current expression to a geometry, optionally in a given CRS.
    pub fn clip(&mut self, shape: ClipShape, crs: Option<&str>) -> WcpsResult<&mut Self> {
        shape.validate()?;
        if let Some(crs) = crs {
            if crs.trim().is_empty() {
                return Err(WcpsError::InvalidArgument(
                    "CRS must not be empty when given".to_string(),
                ));
            }
        }
        Ok(self.push(Operation::Clip(Clip {
            shape,
            crs: crs.map(str::to_string),
        })))
    }

    /// Conditional color return. The last entry is the default; at least two
    /// entries are required.
    pub fn switch_case(
        &mut self,
        conditions: Vec<(QueryBuilder, Rgb)>,
        return_kind: ReturnKind,
    ) -> WcpsResult<&mut Self> {
        match return_kind {
            ReturnKind::Rgb => {
                let switch = SwitchCase::from_conditions(conditions)?;
                Ok(self.push(Operation::SwitchCase(switch)))
            }
        }
    }

    /// Integers render as integers and floats keep their fractional part,
    /// e.g. `scale(5)` and `scale(2.0)`.
    pub fn scale(&mut self, factor: impl Into<Literal>) -> WcpsResult<&mut Self> {
        let factor = factor.into();
        match &factor {
            Literal::Int(_) => {}
            Literal::Float(v) if v.is_finite() => {}
            other => {
                return Err(WcpsError::invalid_argument(format!(
                    "Scale factor must be a finite number, got {}",
                    other
                )))
            }
        }
        Ok(self.push(Operation::Scale { factor }))
    }

    /// Remove the most recent operation. Returns `None` on an empty sequence.
    pub fn undo_last(&mut self) -> Option<Operation> {
        let removed = self.operations.pop();
        if let Some(op) = &removed {
            trace!(op = op.name(), "Removed last operation");
        }
        removed
    }

    /// Clear the sequence so the builder can be reused for another query.
    pub fn reset(&mut self) -> &mut Self {
        self.operations.clear();
        self
    }

    /// The composed expression without the outer `for` template.
    pub fn expression(&self) -> String {
        base_or(&compose_operations(&self.operations)).to_string()
    }

    /// Complete query text, optionally wrapped in `encode(...)`.
    pub fn finalize(&self, encoding: Option<EncodingFormat>) -> String {
        let expression = self.expression();
        let body = match encoding {
            Some(format) => format!("encode({}, \"{}\")", expression, format.mime_type()),
            None => expression,
        };
        let query = format!(
            "for {} in ({}) return {}",
            COVERAGE_VAR, self.coverage_id, body
        );

        if self.debug {
            info!(
                target: "wcps_query",
                coverage = %self.coverage_id,
                query = %query,
                "Composed WCPS query"
            );
        }

        query
    }

    /// Like [`finalize`](Self::finalize) but takes the encoding by name
    /// (`CSV`, `PNG`, `JPEG`).
    pub fn finalize_with(&self, encoding: Option<&str>) -> WcpsResult<String> {
        let encoding = encoding.map(str::parse::<EncodingFormat>).transpose()?;
        Ok(self.finalize(encoding))
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

fn required_operand(kind: &str, operand: Option<Operand>) -> WcpsResult<Operand> {
    let operand = operand.ok_or_else(|| {
        WcpsError::InvalidArgument(format!("Value required for operation: {}", kind))
    })?;
    operand.validate()?;
    Ok(operand)
}
