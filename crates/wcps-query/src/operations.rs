//! Operation kinds and the records appended by the builder.

use std::fmt;

use wcps_common::{WcpsError, WcpsResult};

use crate::builder::QueryBuilder;
use crate::geometry::Clip;
use crate::subset::Subset;
use crate::switch_case::SwitchCase;

/// Declares a closed set of operation kinds keyed by their upper-case names.
///
/// Parsing an unknown name yields `NotImplemented` naming the kind.
macro_rules! op_kinds {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Upper-case kind name, e.g. `"ADD"`.
            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = WcpsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(WcpsError::not_implemented(format!(
                        "Operation: {} is not implemented!",
                        s
                    ))),
                }
            }
        }
    };
}

op_kinds! {
    /// Arithmetic operations. ADD..MOD are binary, the rest unary.
    ArithmeticOp {
        Add => "ADD",
        Sub => "SUB",
        Prod => "PROD",
        Div => "DIV",
        Mod => "MOD",
        Abs => "ABS",
        Round => "ROUND",
        Floor => "FLOOR",
        Ceil => "CEIL",
    }
}

op_kinds! {
    /// Exponential operations. Only POW takes an operand (the exponent).
    ExponentialOp {
        Exp => "EXP",
        Log => "LOG",
        Ln => "LN",
        Pow => "POW",
        Sqrt => "SQRT",
    }
}

op_kinds! {
    ComparisonOp {
        Gte => "GTE",
        Lte => "LTE",
        Gt => "GT",
        Lt => "LT",
        Eq => "EQ",
        Ne => "NE",
    }
}

op_kinds! {
    TrigonometricOp {
        Sin => "SIN",
        Cos => "COS",
        Tan => "TAN",
        Sinh => "SINH",
        Cosh => "COSH",
        Tanh => "TANH",
        Arcsin => "ARCSIN",
        Arccos => "ARCCOS",
        Arctan => "ARCTAN",
    }
}

op_kinds! {
    AggregationOp {
        Count => "COUNT",
        Min => "MIN",
        Max => "MAX",
        Avg => "AVG",
        Sum => "SUM",
        Some => "SOME",
        All => "ALL",
    }
}

op_kinds! {
    /// Infix operators rendered as `<lhs> <sign> <operand>`.
    BinaryOp {
        Add => "ADD",
        Sub => "SUB",
        Prod => "PROD",
        Div => "DIV",
        Mod => "MOD",
        Gte => "GTE",
        Lte => "LTE",
        Gt => "GT",
        Lt => "LT",
        Eq => "EQ",
        Ne => "NE",
    }
}

op_kinds! {
    /// Single-argument functions rendered as `name(<expr>)`.
    UnaryOp {
        Abs => "ABS",
        Round => "ROUND",
        Floor => "FLOOR",
        Ceil => "CEIL",
        Sqrt => "SQRT",
        Exp => "EXP",
        Log => "LOG",
        Ln => "LN",
        Sin => "SIN",
        Cos => "COS",
        Tan => "TAN",
        Sinh => "SINH",
        Cosh => "COSH",
        Tanh => "TANH",
        Arcsin => "ARCSIN",
        Arccos => "ARCCOS",
        Arctan => "ARCTAN",
        Count => "COUNT",
        Min => "MIN",
        Max => "MAX",
        Avg => "AVG",
        Sum => "SUM",
        Some => "SOME",
        All => "ALL",
    }
}

impl BinaryOp {
    pub fn sign(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Prod => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Gte => ">=",
            BinaryOp::Lte => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
        }
    }
}

impl UnaryOp {
    /// Function name as written in the query.
    pub fn function_name(&self) -> String {
        self.name().to_lowercase()
    }
}

/// How an arithmetic kind lands in the operation sequence.
pub(crate) enum ArithmeticForm {
    Binary(BinaryOp),
    Unary(UnaryOp),
}

impl ArithmeticOp {
    pub(crate) fn form(&self) -> ArithmeticForm {
        match self {
            ArithmeticOp::Add => ArithmeticForm::Binary(BinaryOp::Add),
            ArithmeticOp::Sub => ArithmeticForm::Binary(BinaryOp::Sub),
            ArithmeticOp::Prod => ArithmeticForm::Binary(BinaryOp::Prod),
            ArithmeticOp::Div => ArithmeticForm::Binary(BinaryOp::Div),
            ArithmeticOp::Mod => ArithmeticForm::Binary(BinaryOp::Mod),
            ArithmeticOp::Abs => ArithmeticForm::Unary(UnaryOp::Abs),
            ArithmeticOp::Round => ArithmeticForm::Unary(UnaryOp::Round),
            ArithmeticOp::Floor => ArithmeticForm::Unary(UnaryOp::Floor),
            ArithmeticOp::Ceil => ArithmeticForm::Unary(UnaryOp::Ceil),
        }
    }
}

impl ExponentialOp {
    /// Unary form, `None` for POW.
    pub(crate) fn unary(&self) -> Option<UnaryOp> {
        match self {
            ExponentialOp::Exp => Some(UnaryOp::Exp),
            ExponentialOp::Log => Some(UnaryOp::Log),
            ExponentialOp::Ln => Some(UnaryOp::Ln),
            ExponentialOp::Sqrt => Some(UnaryOp::Sqrt),
            ExponentialOp::Pow => None,
        }
    }
}

impl From<ComparisonOp> for BinaryOp {
    fn from(op: ComparisonOp) -> Self {
        match op {
            ComparisonOp::Gte => BinaryOp::Gte,
            ComparisonOp::Lte => BinaryOp::Lte,
            ComparisonOp::Gt => BinaryOp::Gt,
            ComparisonOp::Lt => BinaryOp::Lt,
            ComparisonOp::Eq => BinaryOp::Eq,
            ComparisonOp::Ne => BinaryOp::Ne,
        }
    }
}

impl From<TrigonometricOp> for UnaryOp {
    fn from(op: TrigonometricOp) -> Self {
        match op {
            TrigonometricOp::Sin => UnaryOp::Sin,
            TrigonometricOp::Cos => UnaryOp::Cos,
            TrigonometricOp::Tan => UnaryOp::Tan,
            TrigonometricOp::Sinh => UnaryOp::Sinh,
            TrigonometricOp::Cosh => UnaryOp::Cosh,
            TrigonometricOp::Tanh => UnaryOp::Tanh,
            TrigonometricOp::Arcsin => UnaryOp::Arcsin,
            TrigonometricOp::Arccos => UnaryOp::Arccos,
            TrigonometricOp::Arctan => UnaryOp::Arctan,
        }
    }
}

impl From<AggregationOp> for UnaryOp {
    fn from(op: AggregationOp) -> Self {
        match op {
            AggregationOp::Count => UnaryOp::Count,
            AggregationOp::Min => UnaryOp::Min,
            AggregationOp::Max => UnaryOp::Max,
            AggregationOp::Avg => UnaryOp::Avg,
            AggregationOp::Sum => UnaryOp::Sum,
            AggregationOp::Some => UnaryOp::Some,
            AggregationOp::All => UnaryOp::All,
        }
    }
}

/// A scalar right-hand value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Literal {
    pub(crate) fn validate(&self) -> WcpsResult<()> {
        match self {
            Literal::Float(v) if !v.is_finite() => Err(WcpsError::InvalidArgument(format!(
                "Operand must be a finite number, got {}",
                v
            ))),
            Literal::Text(s) if s.trim().is_empty() => Err(WcpsError::InvalidArgument(
                "Operand text must not be empty".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{}", v),
            // Keep a fractional part so the server types it as a float.
            Literal::Float(v) if v.fract() == 0.0 => write!(f, "{:.1}", v),
            Literal::Float(v) => write!(f, "{}", v),
            Literal::Bool(v) => write!(f, "{}", v),
            Literal::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::Int(v.into())
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int(v)
    }
}

impl From<u32> for Literal {
    fn from(v: u32) -> Self {
        Literal::Int(v.into())
    }
}

impl From<f32> for Literal {
    fn from(v: f32) -> Self {
        Literal::Float(v.into())
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Float(v)
    }
}

/// Right-hand side of an operation: a literal or a nested expression.
///
/// A nested expression renders against its own `$c`, never the parent's
/// composed text.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(Literal),
    Expression(Box<QueryBuilder>),
}

impl Operand {
    pub(crate) fn validate(&self) -> WcpsResult<()> {
        match self {
            Operand::Literal(lit) => lit.validate(),
            Operand::Expression(_) => Ok(()),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Operand::Literal(lit) => lit.to_string(),
            Operand::Expression(expr) => expr.expression(),
        }
    }
}

impl From<Literal> for Operand {
    fn from(lit: Literal) -> Self {
        Operand::Literal(lit)
    }
}

impl From<QueryBuilder> for Operand {
    fn from(expr: QueryBuilder) -> Self {
        Operand::Expression(Box::new(expr))
    }
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Operand::Literal(v.into())
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Operand::Literal(v.into())
    }
}

impl From<u32> for Operand {
    fn from(v: u32) -> Self {
        Operand::Literal(v.into())
    }
}

impl From<f32> for Operand {
    fn from(v: f32) -> Self {
        Operand::Literal(v.into())
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Operand::Literal(v.into())
    }
}

impl From<bool> for Operand {
    fn from(v: bool) -> Self {
        Operand::Literal(Literal::Bool(v))
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Operand::Literal(Literal::Text(v.to_string()))
    }
}

impl From<String> for Operand {
    fn from(v: String) -> Self {
        Operand::Literal(Literal::Text(v))
    }
}

/// One entry of the operation sequence. Order is evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Slice(Subset),
    Binary { op: BinaryOp, operand: Operand },
    Unary(UnaryOp),
    Power { exponent: Operand },
    Scale { factor: Literal },
    Clip(Clip),
    SwitchCase(SwitchCase),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Slice(_) => "SLICE",
            Operation::Binary { op, .. } => op.name(),
            Operation::Unary(op) => op.name(),
            Operation::Power { .. } => "POW",
            Operation::Scale { .. } => "SCALE",
            Operation::Clip(_) => "CLIP",
            Operation::SwitchCase(_) => "SWITCH_CASE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind_names() {
        assert_eq!("ADD".parse::<ArithmeticOp>().unwrap(), ArithmeticOp::Add);
        assert_eq!("pow".parse::<ExponentialOp>().unwrap(), ExponentialOp::Pow);
        assert_eq!("NE".parse::<ComparisonOp>().unwrap(), ComparisonOp::Ne);
        assert_eq!("ARCTAN".parse::<TrigonometricOp>().unwrap(), TrigonometricOp::Arctan);
        assert_eq!("some".parse::<AggregationOp>().unwrap(), AggregationOp::Some);
    }

    #[test]
    fn test_parse_unknown_kind_names_it() {
        let err = "HYPOT".parse::<ArithmeticOp>().unwrap_err();
        assert!(matches!(err, WcpsError::NotImplemented(_)));
        assert!(err.to_string().contains("HYPOT"));
    }

    #[test]
    fn test_sign_table() {
        let expected = [
            (BinaryOp::Add, "+"),
            (BinaryOp::Sub, "-"),
            (BinaryOp::Prod, "*"),
            (BinaryOp::Div, "/"),
            (BinaryOp::Mod, "%"),
            (BinaryOp::Gte, ">="),
            (BinaryOp::Lte, "<="),
            (BinaryOp::Gt, ">"),
            (BinaryOp::Lt, "<"),
            (BinaryOp::Eq, "="),
            (BinaryOp::Ne, "!="),
        ];
        for (op, sign) in expected {
            assert_eq!(op.sign(), sign);
        }
        assert_eq!(BinaryOp::ALL.len(), expected.len());
    }

    #[test]
    fn test_operand_requirements() {
        let binary: Vec<_> = ArithmeticOp::ALL
            .iter()
            .filter(|op| matches!(op.form(), ArithmeticForm::Binary(_)))
            .map(|op| op.name())
            .collect();
        assert_eq!(binary, vec!["ADD", "SUB", "PROD", "DIV", "MOD"]);

        let binary: Vec<_> = ExponentialOp::ALL
            .iter()
            .filter(|op| op.unary().is_none())
            .collect();
        assert_eq!(binary, vec![&ExponentialOp::Pow]);
    }

    #[test]
    fn test_literal_rendering() {
        assert_eq!(Literal::Int(1).to_string(), "1");
        assert_eq!(Literal::Float(273.15).to_string(), "273.15");
        assert_eq!(Literal::Float(8.80).to_string(), "8.8");
        assert_eq!(Literal::Float(5.0).to_string(), "5.0");
        assert_eq!(Literal::Float(-2.0).to_string(), "-2.0");
        assert_eq!(Literal::Float(1e20).to_string(), "100000000000000000000.0");
        assert_eq!(Literal::from(5).to_string(), "5");
        assert_eq!(Literal::Bool(true).to_string(), "true");
        assert_eq!(Literal::Text("avg($c)".into()).to_string(), "avg($c)");
    }

    #[test]
    fn test_literal_validation() {
        assert!(Literal::Float(f64::NAN).validate().is_err());
        assert!(Literal::Float(f64::INFINITY).validate().is_err());
        assert!(Literal::Text("  ".into()).validate().is_err());
        assert!(Literal::Int(0).validate().is_ok());
    }

    #[test]
    fn test_unary_function_names() {
        assert_eq!(UnaryOp::Arcsin.function_name(), "arcsin");
        assert_eq!(UnaryOp::from(AggregationOp::Count).function_name(), "count");
        assert_eq!(UnaryOp::from(TrigonometricOp::Cosh).function_name(), "cosh");
    }
}
