//! Client side of WCPS query execution.
//!
//! - [`transport`]: posts finished query text to a server and classifies
//!   faults without throwing them
//! - [`decode`]: turns successful payloads into images, tables or text
//! - [`exception`]: reads OWS exception reports from error bodies
//! - [`datacube`]: binds a transport to a coverage and ties the pieces
//!   together

pub mod config;
pub mod datacube;
pub mod decode;
pub mod error;
pub mod exception;
pub mod transport;

pub use config::ClientConfig;
pub use datacube::{Datacube, QueryOutput};
pub use decode::{decode_csv, decode_image, decode_text, CsvTable};
pub use error::{ClientError, ClientResult};
pub use exception::{parse_exception_report, ServiceException};
pub use transport::{HttpTransport, QueryResponse, Transport, TransportFailure};
