//! Conditional color returns (`switch case ... default return ...`).

use std::str::FromStr;

use wcps_common::{Rgb, WcpsError, WcpsResult};

use crate::builder::QueryBuilder;

/// Value type returned by each case. Only colors are supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReturnKind {
    #[default]
    Rgb,
}

impl FromStr for ReturnKind {
    type Err = WcpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RGB" => Ok(ReturnKind::Rgb),
            _ => Err(WcpsError::not_implemented(format!(
                "Return type {} is not supported, only RGB color return values are",
                s
            ))),
        }
    }
}

/// Ordered cases plus the trailing default.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub cases: Vec<(QueryBuilder, Rgb)>,
    pub default: Rgb,
}

impl SwitchCase {
    /// Split a condition list into cases and default.
    ///
    /// The last entry is always the default; its condition is discarded.
    pub fn from_conditions(mut conditions: Vec<(QueryBuilder, Rgb)>) -> WcpsResult<Self> {
        match conditions.pop() {
            Some((_, default)) if !conditions.is_empty() => Ok(Self {
                cases: conditions,
                default,
            }),
            _ => Err(WcpsError::InvalidArgument(
                "The number of the given conditions has to be greater than 1!".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_kind_parse() {
        assert_eq!("rgb".parse::<ReturnKind>().unwrap(), ReturnKind::Rgb);
        assert!(matches!(
            "RGBA".parse::<ReturnKind>(),
            Err(WcpsError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_last_entry_is_default() {
        let conditions = vec![
            (QueryBuilder::new("c"), Rgb::new(255, 0, 0)),
            (QueryBuilder::new("c"), Rgb::new(0, 255, 0)),
            (QueryBuilder::new("c"), Rgb::new(0, 0, 255)),
        ];
        let switch = SwitchCase::from_conditions(conditions).unwrap();
        assert_eq!(switch.cases.len(), 2);
        assert_eq!(switch.default, Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_requires_more_than_one_condition() {
        assert!(SwitchCase::from_conditions(vec![]).is_err());
        let err = SwitchCase::from_conditions(vec![(QueryBuilder::new("c"), Rgb::black())])
            .unwrap_err();
        assert!(matches!(err, WcpsError::InvalidArgument(_)));
    }
}
