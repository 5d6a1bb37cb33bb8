//! OWS exception reports returned in WCPS error bodies.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ClientResult;

/// One `<Exception>` entry of an OWS `ExceptionReport`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceException {
    pub code: Option<String>,
    pub locator: Option<String>,
    pub texts: Vec<String>,
}

impl ServiceException {
    /// All exception texts joined by newlines.
    pub fn text(&self) -> String {
        self.texts.join("\n")
    }
}

fn read_attributes(element: &BytesStart<'_>) -> ServiceException {
    let mut exception = ServiceException::default();
    for attr in element.attributes().flatten() {
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => continue,
        };
        match attr.key.local_name().as_ref() {
            b"exceptionCode" => exception.code = Some(value),
            b"locator" => exception.locator = Some(value),
            _ => {}
        }
    }
    exception
}

/// Parse every exception in an OWS exception report.
///
/// Namespace prefixes are ignored, so both `ows:ExceptionReport` and a bare
/// `ExceptionReport` are accepted. A document without exceptions yields an
/// empty list.
pub fn parse_exception_report(xml: &str) -> ClientResult<Vec<ServiceException>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut exceptions = Vec::new();
    let mut current: Option<ServiceException> = None;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"Exception" => current = Some(read_attributes(&e)),
                b"ExceptionText" if current.is_some() => in_text = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"Exception" => {
                exceptions.push(read_attributes(&e));
            }
            Event::Text(t) if in_text => {
                if let Some(exception) = current.as_mut() {
                    exception.texts.push(t.unescape()?.into_owned());
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"ExceptionText" => in_text = false,
                b"Exception" => {
                    if let Some(exception) = current.take() {
                        exceptions.push(exception);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(exceptions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ows_report() {
        let xml = test_utils::exception_report(
            "InvalidRequest",
            Some("query"),
            "Error parsing query: unexpected token",
        );
        let exceptions = parse_exception_report(&xml).unwrap();
        assert_eq!(exceptions.len(), 1);
        assert_eq!(exceptions[0].code.as_deref(), Some("InvalidRequest"));
        assert_eq!(exceptions[0].locator.as_deref(), Some("query"));
        assert_eq!(exceptions[0].text(), "Error parsing query: unexpected token");
    }

    #[test]
    fn test_parse_unprefixed_report_with_escapes() {
        let xml = r#"<ExceptionReport>
            <Exception exceptionCode="NoSuchCoverage">
                <ExceptionText>Coverage &quot;Foo&quot; does not exist</ExceptionText>
                <ExceptionText>Check the coverage id</ExceptionText>
            </Exception>
            <Exception exceptionCode="NoApplicableCode"/>
        </ExceptionReport>"#;
        let exceptions = parse_exception_report(xml).unwrap();
        assert_eq!(exceptions.len(), 2);
        assert_eq!(
            exceptions[0].texts,
            vec![
                "Coverage \"Foo\" does not exist".to_string(),
                "Check the coverage id".to_string()
            ]
        );
        assert_eq!(exceptions[1].code.as_deref(), Some("NoApplicableCode"));
        assert!(exceptions[1].texts.is_empty());
    }

    #[test]
    fn test_non_report_yields_nothing() {
        assert!(parse_exception_report("<html><body>502</body></html>")
            .unwrap()
            .is_empty());
        assert!(parse_exception_report("plain text").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_report_is_xml_error() {
        let err = parse_exception_report(
            "<ows:ExceptionReport><ows:Exception></ows:ExceptionReport>",
        )
        .unwrap_err();
        assert!(matches!(err, crate::ClientError::Xml(_)), "{:?}", err);
    }
}
