//! Decoders for successful query payloads.

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};
use serde::Serialize;
use wcps_common::{EncodingFormat, WcpsError};

use crate::error::{ClientError, ClientResult};
use crate::transport::QueryResponse;

fn successful_payload(response: &QueryResponse) -> ClientResult<&Bytes> {
    match response {
        QueryResponse::Success { payload, .. } if payload.is_empty() => Err(
            ClientError::invalid_state("Query succeeded but returned an empty payload"),
        ),
        QueryResponse::Success { payload, .. } => Ok(payload),
        QueryResponse::Failure(failure) => Err(ClientError::invalid_state(format!(
            "Cannot decode a failed query result: {}",
            failure
        ))),
    }
}

/// Decode a PNG or JPEG payload.
pub fn decode_image(response: &QueryResponse, format: EncodingFormat) -> ClientResult<DynamicImage> {
    let payload = successful_payload(response)?;
    let image_format = match format {
        EncodingFormat::Png => ImageFormat::Png,
        EncodingFormat::Jpeg => ImageFormat::Jpeg,
        EncodingFormat::Csv => {
            return Err(WcpsError::invalid_argument(
                "CSV results cannot be decoded as an image",
            )
            .into())
        }
    };
    Ok(image::load_from_memory_with_format(payload, image_format)?)
}

/// Decode a payload as UTF-8 text.
pub fn decode_text(response: &QueryResponse) -> ClientResult<String> {
    let payload = successful_payload(response)?;
    Ok(String::from_utf8(payload.to_vec())?)
}

/// Decode a headerless CSV payload into a [`CsvTable`] whose rows are the
/// columns of the input.
pub fn decode_csv(response: &QueryResponse) -> ClientResult<CsvTable> {
    let payload = successful_payload(response)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(payload.as_ref());

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(CsvTable::transposed(records))
}

/// Rectangular table of string cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CsvTable {
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Build a table from input records, turning input columns into rows.
    /// Short records are padded with empty cells.
    pub fn transposed(records: Vec<Vec<String>>) -> Self {
        let width = records.iter().map(Vec::len).max().unwrap_or(0);
        let mut rows = vec![Vec::with_capacity(records.len()); width];
        for record in &records {
            for (col, row) in rows.iter_mut().enumerate() {
                row.push(record.get(col).cloned().unwrap_or_default());
            }
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Parse every cell as a number. Empty cells become `NaN`.
    pub fn to_f64(&self) -> ClientResult<Vec<Vec<f64>>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(|(c, cell)| {
                        if cell.is_empty() {
                            return Ok(f64::NAN);
                        }
                        cell.parse::<f64>().map_err(|_| ClientError::NotNumeric {
                            row: r,
                            col: c,
                            value: cell.clone(),
                        })
                    })
                    .collect()
            })
            .collect()
    }
}
