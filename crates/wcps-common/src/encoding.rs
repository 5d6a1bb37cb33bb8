//! Output encodings accepted by the `encode(...)` wrapper.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WcpsError;

/// Encoding requested for a query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EncodingFormat {
    Csv,
    Png,
    Jpeg,
}

impl EncodingFormat {
    pub const ALL: [EncodingFormat; 3] =
        [EncodingFormat::Csv, EncodingFormat::Png, EncodingFormat::Jpeg];

    /// MIME type written into the `encode` call.
    pub fn mime_type(&self) -> &'static str {
        match self {
            EncodingFormat::Csv => "text/csv",
            EncodingFormat::Png => "image/png",
            EncodingFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EncodingFormat::Csv => "CSV",
            EncodingFormat::Png => "PNG",
            EncodingFormat::Jpeg => "JPEG",
        }
    }
}

impl fmt::Display for EncodingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncodingFormat {
    type Err = WcpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|format| format.name() == wanted)
            .ok_or_else(|| {
                let valid = Self::ALL.map(|format| format.name()).join(", ");
                WcpsError::invalid_argument(format!(
                    "Invalid return type '{}'. Valid types are: {}",
                    s, valid
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_types() {
        assert_eq!(EncodingFormat::Csv.mime_type(), "text/csv");
        assert_eq!(EncodingFormat::Png.mime_type(), "image/png");
        assert_eq!(EncodingFormat::Jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("csv".parse::<EncodingFormat>().unwrap(), EncodingFormat::Csv);
        assert_eq!(" PNG ".parse::<EncodingFormat>().unwrap(), EncodingFormat::Png);
        assert_eq!("Jpeg".parse::<EncodingFormat>().unwrap(), EncodingFormat::Jpeg);
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "TIFF".parse::<EncodingFormat>().unwrap_err();
        assert!(matches!(err, WcpsError::InvalidArgument(_)));
        assert!(err.to_string().contains("TIFF"));
        assert!(err.to_string().ends_with("Valid types are: CSV, PNG, JPEG"));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&EncodingFormat::Jpeg).unwrap();
        assert_eq!(json, "\"JPEG\"");
        let parsed: EncodingFormat = serde_json::from_str("\"CSV\"").unwrap();
        assert_eq!(parsed, EncodingFormat::Csv);
    }
}
