//! Payload generators for mocked server responses.
//!
//! These produce small, predictable bodies so decoders can be checked
//! without a live WCPS server.

use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};

/// Creates a test image where each pixel is `(x * 10, y * 10, 128)`.
///
/// # Example
///
/// ```
/// use test_utils::create_test_image;
///
/// let img = create_test_image(4, 3);
/// assert_eq!(img.width(), 4);
/// assert_eq!(img.get_pixel(2, 1).0, [20, 10, 128]);
/// ```
pub fn create_test_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 10 % 256) as u8, (y * 10 % 256) as u8, 128])
    })
}

fn encode_image(width: u32, height: u32, format: ImageOutputFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(create_test_image(width, height))
        .write_to(&mut buf, format)
        .expect("in-memory image encoding cannot fail");
    buf.into_inner()
}

/// PNG-encoded [`create_test_image`].
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode_image(width, height, ImageOutputFormat::Png)
}

/// JPEG-encoded [`create_test_image`] at quality 90.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode_image(width, height, ImageOutputFormat::Jpeg(90))
}

/// Headerless CSV, one line per slice of `rows`.
///
/// ```
/// use test_utils::csv_payload;
///
/// assert_eq!(csv_payload(&[&[1.0, 2.5], &[3.0, 4.0]]), "1,2.5\n3,4\n");
/// ```
pub fn csv_payload(rows: &[&[f64]]) -> String {
    let mut out = String::new();
    for row in rows {
        let line = row
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// An OWS 2.0 exception report like the ones rasdaman returns on bad queries.
pub fn exception_report(code: &str, locator: Option<&str>, text: &str) -> String {
    let locator = locator
        .map(|l| format!(" locator=\"{}\"", l))
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ows:ExceptionReport version="2.0.0" xmlns:ows="http://www.opengis.net/ows/2.0" xml:lang="en">
    <ows:Exception exceptionCode="{}"{}>
        <ows:ExceptionText>{}</ows:ExceptionText>
    </ows:Exception>
</ows:ExceptionReport>"#,
        code, locator, text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_signature() {
        let png = png_bytes(8, 8);
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_jpeg_signature() {
        let jpeg = jpeg_bytes(8, 8);
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_exception_report_contains_fields() {
        let xml = exception_report("InvalidRequest", Some("query"), "Bad syntax");
        assert!(xml.contains("exceptionCode=\"InvalidRequest\""));
        assert!(xml.contains("locator=\"query\""));
        assert!(xml.contains("<ows:ExceptionText>Bad syntax</ows:ExceptionText>"));
    }
}
