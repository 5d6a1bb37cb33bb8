//! Printing and saving query results.

use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use image::GenericImageView;
use wcps_client::{QueryOutput, TransportFailure};

/// Text printed to stdout for a decoded result.
pub fn render(output: &QueryOutput) -> Result<String> {
    let rendered = match output {
        QueryOutput::Table(table) => {
            serde_json::to_string_pretty(table).context("Failed to serialize table")?
        }
        QueryOutput::Text(text) => text.trim_end().to_string(),
        QueryOutput::Image(image) => {
            let (width, height) = image.dimensions();
            format!("image {}x{} (use --output to save it)", width, height)
        }
        QueryOutput::Failed(failure) => describe_failure(failure),
    };
    Ok(rendered)
}

/// One-line description of a failed request plus any server exceptions.
pub fn describe_failure(failure: &TransportFailure) -> String {
    let mut description = failure.to_string();
    for exception in failure.exceptions() {
        description.push_str("\n  ");
        if let Some(code) = &exception.code {
            description.push_str(code);
            description.push_str(": ");
        }
        description.push_str(&exception.text());
    }
    description
}

/// Write a raw payload to `path`, creating parent directories.
pub async fn write_payload(path: &Path, payload: &Bytes) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, payload)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wcps_client::CsvTable;

    #[test]
    fn test_render_table_as_json() {
        let table = CsvTable::transposed(vec![vec!["1".to_string(), "2".to_string()]]);
        let rendered = render(&QueryOutput::Table(table)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["rows"], serde_json::json!([["1"], ["2"]]));
    }

    #[test]
    fn test_render_text_trims_newline() {
        let rendered = render(&QueryOutput::Text("12\n".to_string())).unwrap();
        assert_eq!(rendered, "12");
    }

    #[test]
    fn test_describe_failure_lists_exceptions() {
        let failure = TransportFailure::Http {
            status: 400,
            message: "400 Bad Request for url: http://localhost/rasdaman/ows".to_string(),
            body: Bytes::from(test_utils::exception_report(
                "WcpsError",
                None,
                "Unknown coverage",
            )),
        };
        let description = describe_failure(&failure);
        assert!(description.starts_with("HTTP error: 400 Bad Request"));
        assert!(description.ends_with("WcpsError: Unknown coverage"));
    }

    #[tokio::test]
    async fn test_write_payload_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("point.bin");

        write_payload(&path, &Bytes::from_static(b"\x01\x02")).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2]);
    }
}
