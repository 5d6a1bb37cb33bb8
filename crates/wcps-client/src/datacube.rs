//! Datacube facade binding a transport to one coverage.

use std::sync::Arc;

use image::DynamicImage;
use tracing::{debug, warn};
use wcps_common::EncodingFormat;
use wcps_query::QueryBuilder;

use crate::config::ClientConfig;
use crate::decode::{decode_csv, decode_image, decode_text, CsvTable};
use crate::error::ClientResult;
use crate::transport::{HttpTransport, QueryResponse, Transport, TransportFailure};

/// Decoded result of [`Datacube::execute`].
#[derive(Debug)]
pub enum QueryOutput {
    /// PNG or JPEG result
    Image(DynamicImage),
    /// CSV result, input columns as rows
    Table(CsvTable),
    /// Result of a query without an encoding
    Text(String),
    /// The server could not be reached or rejected the query
    Failed(TransportFailure),
}

impl QueryOutput {
    pub fn is_failed(&self) -> bool {
        matches!(self, QueryOutput::Failed(_))
    }
}

/// A coverage on a WCPS server.
#[derive(Clone)]
pub struct Datacube {
    transport: Arc<dyn Transport>,
    coverage_id: String,
}

impl Datacube {
    pub fn new(transport: Arc<dyn Transport>, coverage_id: impl Into<String>) -> Self {
        Self {
            transport,
            coverage_id: coverage_id.into(),
        }
    }

    /// Create a datacube backed by an [`HttpTransport`].
    pub fn connect(config: &ClientConfig, coverage_id: impl Into<String>) -> ClientResult<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), coverage_id))
    }

    pub fn coverage_id(&self) -> &str {
        &self.coverage_id
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// A fresh builder bound to this coverage.
    pub fn query_builder(&self, debug: bool) -> QueryBuilder {
        QueryBuilder::new(self.coverage_id.clone()).with_debug(debug)
    }

    /// Finalize `query` and send it, returning the undecoded response.
    pub async fn execute_raw(
        &self,
        query: &QueryBuilder,
        encoding: Option<EncodingFormat>,
    ) -> QueryResponse {
        if query.coverage_id() != self.coverage_id {
            warn!(
                datacube = %self.coverage_id,
                query = %query.coverage_id(),
                "Executing a query built for a different coverage"
            );
        }

        let text = query.finalize(encoding);
        debug!(coverage = %query.coverage_id(), endpoint = %self.endpoint(), "Executing query");
        self.transport.send(&text).await
    }

    /// Send `query` and decode the result according to `encoding`.
    ///
    /// Transport faults come back as [`QueryOutput::Failed`]; only decoding
    /// problems are errors.
    pub async fn execute(
        &self,
        query: &QueryBuilder,
        encoding: Option<EncodingFormat>,
    ) -> ClientResult<QueryOutput> {
        let response = self.execute_raw(query, encoding).await;
        if let QueryResponse::Failure(failure) = response {
            return Ok(QueryOutput::Failed(failure));
        }

        let output = match encoding {
            Some(EncodingFormat::Csv) => QueryOutput::Table(decode_csv(&response)?),
            Some(format) => QueryOutput::Image(decode_image(&response, format)?),
            None => QueryOutput::Text(decode_text(&response)?),
        };
        Ok(output)
    }
}
