//! Conversion of decoded RGBA images into C source holding an RGB565 array.
//!
//! The pipeline is `ImageSource -> DecodedImage::as_rgba8 -> write_literal`.
//! Decoding the container format is left to an [`ImageSource`]
//! implementation supplied by the caller.

pub mod emit;
pub mod image;
pub mod report;
pub mod rgb565;

use thiserror::Error;

pub use emit::{metadata_line, render_literal, write_literal, Header};
pub use image::{ColorType, DecodedImage, FormatError, Rgba8};
#[cfg(any(test, feature = "testing"))]
pub use report::RecordingReporter;
pub use report::{NullReporter, Reporter};
pub use rgb565::Pixel565;

/// PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Failures of the external decoder
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("file is not a valid PNG file")]
    NotAPng,
    #[error("PNG header is truncated")]
    TruncatedHeader,
    #[error("PNG image data is truncated")]
    TruncatedData,
    #[error("malformed PNG: {0}")]
    Malformed(String),
}

/// Anything that turns an encoded byte stream into a [`DecodedImage`]
pub trait ImageSource {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error(transparent)]
    Input(#[from] DecodeError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Checks the 8-byte PNG signature at the start of `bytes`
pub fn check_signature(bytes: &[u8]) -> Result<(), DecodeError> {
    if bytes.len() < PNG_SIGNATURE.len() {
        return Err(DecodeError::TruncatedHeader);
    }
    if bytes[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return Err(DecodeError::NotAPng);
    }
    Ok(())
}

/// Decode, validate and render one image.
///
/// Nothing is produced unless every step succeeds.
pub fn convert<S, R>(
    source: &S,
    bytes: &[u8],
    header: &Header,
    name: &str,
    reporter: &mut R,
) -> Result<String, ConvertError>
where
    S: ImageSource + ?Sized,
    R: Reporter + ?Sized,
{
    let image = source.decode(bytes)?;
    reporter.info(format_args!("metadata: {}", metadata_line(&image)));

    let rgba = image.as_rgba8()?;

    reporter.info(format_args!("processing pixels..."));
    let text = render_literal(header, rgba, name, reporter);
    reporter.debug(format_args!(
        "emitted {} pixels as {} bytes of source",
        image.pixel_count(),
        text.len()
    ));

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands back a prepared image once the signature checks out
    struct FixedSource(DecodedImage);

    impl ImageSource for FixedSource {
        fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
            check_signature(bytes)?;
            Ok(self.0.clone())
        }
    }

    fn header() -> Header {
        Header::new("png2c", "0.1.0", "now", "in.png")
    }

    #[test]
    fn test_signature() {
        assert_eq!(check_signature(&PNG_SIGNATURE), Ok(()));
        assert_eq!(check_signature(&PNG_SIGNATURE[..4]), Err(DecodeError::TruncatedHeader));
        assert_eq!(check_signature(b"GIF89a\0\0\0\0"), Err(DecodeError::NotAPng));
    }

    #[test]
    fn test_convert_scenario() {
        let source = FixedSource(DecodedImage::rgba8(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 128]));
        let mut reporter = RecordingReporter::default();
        let text = convert(&source, &PNG_SIGNATURE, &header(), "image", &mut reporter).unwrap();

        assert!(text.ends_with("  2, 1,\n  0x00, 0xf8,\n  0xe0, 0x07,\n};\n"));
        assert_eq!(
            reporter.messages[0],
            "metadata: w: 2, h: 1, color type: 6, bit depth: 8, num passes: 1"
        );
        assert_eq!(reporter.columns, vec![0, 1]);
    }

    #[test]
    fn test_convert_rejects_non_png() {
        let source = FixedSource(DecodedImage::rgba8(1, 1, vec![0; 4]));
        let err = convert(&source, b"not a png file", &header(), "image", &mut NullReporter)
            .unwrap_err();
        assert_eq!(err, ConvertError::Input(DecodeError::NotAPng));
    }

    #[test]
    fn test_convert_rejects_grayscale() {
        let source = FixedSource(DecodedImage::new(2, 2, ColorType::Gray, 8, 1, vec![0; 4]));
        let mut reporter = RecordingReporter::default();
        let err = convert(&source, &PNG_SIGNATURE, &header(), "image", &mut reporter).unwrap_err();

        assert_eq!(
            err,
            ConvertError::Format(FormatError::UnsupportedColorFormat {
                actual: ColorType::Gray
            })
        );
        assert!(err.to_string().contains("but is 0"));
        assert!(reporter.columns.is_empty());
    }
}
