//! Expression serializer.
//!
//! Folds the operation sequence left to right. The carried state is the text
//! composed so far; while it is empty the coverage variable `$c` stands in.
//! Nested operand expressions are folded independently against their own
//! `$c`.

use wcps_common::COVERAGE_VAR;

use crate::geometry::Clip;
use crate::operations::{BinaryOp, Operand, Operation, UnaryOp};
use crate::subset::Subset;
use crate::switch_case::SwitchCase;

/// Composed text, or the coverage variable when nothing is composed yet.
pub fn base_or(composed: &str) -> &str {
    if composed.is_empty() {
        COVERAGE_VAR
    } else {
        composed
    }
}

/// Fold a whole sequence. Returns an empty string for an empty sequence.
pub fn compose_operations(operations: &[Operation]) -> String {
    operations
        .iter()
        .fold(String::new(), |composed, op| compose_operation(&composed, op))
}

/// One fold step.
pub fn compose_operation(composed: &str, operation: &Operation) -> String {
    match operation {
        Operation::Slice(subset) => compose_subset(composed, subset),
        Operation::Binary { op, operand } => compose_binary(composed, *op, operand),
        Operation::Unary(op) => compose_unary(composed, *op),
        Operation::Power { exponent } => compose_function_call(composed, "pow", &exponent.render()),
        Operation::Scale { factor } => compose_function_call(composed, "scale", &factor.to_string()),
        Operation::Clip(clip) => compose_clip(composed, clip),
        Operation::SwitchCase(switch) => compose_switch_case(switch),
    }
}

/// `$c[Lat(..),Long(..),ansi(..)]`
pub fn compose_subset(composed: &str, subset: &Subset) -> String {
    format!("{}[{}]", base_or(composed), subset.filters().join(","))
}

/// `<expr> <sign> <operand>`
pub fn compose_binary(composed: &str, op: BinaryOp, operand: &Operand) -> String {
    format!("{} {} {}", base_or(composed), op.sign(), operand.render())
}

/// `<name>(<expr>)`
pub fn compose_unary(composed: &str, op: UnaryOp) -> String {
    format!("{}({})", op.function_name(), base_or(composed))
}

/// `<name>(<expr>, <arg>)`, shared by pow and scale.
pub fn compose_function_call(composed: &str, name: &str, argument: &str) -> String {
    format!("{}({}, {})", name, base_or(composed), argument)
}

/// `clip(<expr>, <shape>[,<crs>])`
pub fn compose_clip(composed: &str, clip: &Clip) -> String {
    let crs = clip
        .crs
        .as_ref()
        .map(|crs| format!(",{}", crs))
        .unwrap_or_default();
    format!("clip({}, {}{})", base_or(composed), clip.shape, crs)
}

/// Self-contained switch expression; prior composed text is dropped.
pub fn compose_switch_case(switch: &SwitchCase) -> String {
    let cases = switch
        .cases
        .iter()
        .map(|(condition, color)| format!("case {} return {}", condition.expression(), color))
        .collect::<Vec<_>>()
        .join("\n");

    format!("(switch {} \n default return {})", cases, switch.default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ClipShape;
    use crate::operations::Literal;
    use crate::QueryBuilder;
    use wcps_common::Rgb;

    #[test]
    fn test_base_or() {
        assert_eq!(base_or(""), "$c");
        assert_eq!(base_or("avg($c)"), "avg($c)");
    }

    #[test]
    fn test_compose_empty_sequence() {
        assert_eq!(compose_operations(&[]), "");
    }

    #[test]
    fn test_compose_binary_chains_on_previous() {
        let operand = Operand::Literal(Literal::Int(2));
        assert_eq!(compose_binary("", BinaryOp::Prod, &operand), "$c * 2");
        assert_eq!(
            compose_binary("abs($c)", BinaryOp::Prod, &operand),
            "abs($c) * 2"
        );
    }

    #[test]
    fn test_compose_unary_wraps() {
        assert_eq!(compose_unary("$c + 1", UnaryOp::Sqrt), "sqrt($c + 1)");
    }

    #[test]
    fn test_compose_clip_with_crs() {
        let clip = Clip {
            shape: ClipShape::line_string([(1.0, 2.0), (3.0, 4.0)]),
            crs: Some("http://www.opengis.net/def/crs/EPSG/0/4326".to_string()),
        };
        assert_eq!(
            compose_clip("", &clip),
            "clip($c, LineString(1 2,3 4),http://www.opengis.net/def/crs/EPSG/0/4326)"
        );
    }

    #[test]
    fn test_compose_switch_case_ignores_prior_text() {
        let mut warm = QueryBuilder::new("AvgLandTemp");
        warm.compare(crate::ComparisonOp::Gt, 15).unwrap();
        let switch = SwitchCase {
            cases: vec![(warm, Rgb::new(255, 0, 0))],
            default: Rgb::new(0, 0, 255),
        };
        let op = Operation::SwitchCase(switch);
        assert_eq!(
            compose_operation("avg($c)", &op),
            "(switch case $c > 15 return {red: 255; green: 0; blue: 0} \n default return {red: 0; green: 0; blue: 255})"
        );
    }
}
