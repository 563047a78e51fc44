//! PNG and base64 encoding of a painted canvas.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::ImageEncoder;

use crate::canvas::Canvas;
use crate::error::{RenderError, RenderResult};

/// Prefix of an embeddable PNG data URI.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode the canvas as PNG bytes.
///
/// # Errors
///
/// Returns [`RenderError::Encode`] if the PNG encoder fails.
pub fn encode_png(canvas: &Canvas) -> RenderResult<Vec<u8>> {
    encode_rgb(canvas.as_bytes(), canvas.width(), canvas.height())
}

/// Encode the canvas as base64 PNG text, consuming it.
///
/// # Errors
///
/// Returns [`RenderError::Encode`] if the PNG encoder fails.
pub fn encode(canvas: Canvas) -> RenderResult<String> {
    let (width, height) = (canvas.width(), canvas.height());
    let png = encode_rgb(&canvas.into_bytes(), width, height)?;
    Ok(STANDARD.encode(png))
}

fn encode_rgb(rgb: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))?;
    Ok(png)
}

/// Wrap base64 PNG text in a `data:` URI.
#[must_use]
pub fn data_uri(base64_png: &str) -> String {
    format!("{PNG_DATA_URI_PREFIX}{base64_png}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_png_signature() {
        let canvas = Canvas::create(8, 4).expect("canvas");
        let png = encode_png(&canvas).expect("encode");
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_base64_decodes_to_png() {
        let canvas = Canvas::create(8, 4).expect("canvas");
        let text = encode(canvas).expect("encode");
        let bytes = STANDARD.decode(&text).expect("valid base64");
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_data_uri() {
        assert_eq!(data_uri("AAAA"), "data:image/png;base64,AAAA");
    }
}
