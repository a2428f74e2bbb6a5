use std::io;

use png2c_codec::image::ADAM7_PASSES;
use png2c_codec::{check_signature, ColorType, DecodeError, DecodedImage, ImageSource, PNG_SIGNATURE};

/// PNG decoding backed by the `png` crate.
///
/// Samples are returned untransformed, so a 16-bit or palette image keeps
/// its declared layout and is rejected later by validation.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngSource;

impl ImageSource for PngSource {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        check_signature(bytes)?;

        let mut decoder = png::Decoder::new(bytes);
        decoder.set_transformations(png::Transformations::IDENTITY);

        let mut reader = decoder
            .read_info()
            .map_err(|e| map_error(e, bytes, DecodeError::TruncatedHeader))?;

        let info = reader.info();
        let width = info.width;
        let height = info.height;
        let color_type = color_type(info.color_type);
        let bit_depth = info.bit_depth as u8;
        let num_passes = if info.interlaced { ADAM7_PASSES } else { 1 };

        let mut buf = vec![0; reader.output_buffer_size()];
        let frame = reader
            .next_frame(&mut buf)
            .map_err(|e| map_error(e, bytes, DecodeError::TruncatedData))?;
        buf.truncate(frame.buffer_size());

        Ok(DecodedImage::new(
            width, height, color_type, bit_depth, num_passes, buf,
        ))
    }
}

fn color_type(ct: png::ColorType) -> ColorType {
    match ct {
        png::ColorType::Grayscale => ColorType::Gray,
        png::ColorType::Rgb => ColorType::Rgb,
        png::ColorType::Indexed => ColorType::Palette,
        png::ColorType::GrayscaleAlpha => ColorType::GrayAlpha,
        png::ColorType::Rgba => ColorType::Rgba,
    }
}

/// Map a decoder failure, using `on_eof` when the stream simply ran out.
fn map_error(err: png::DecodingError, bytes: &[u8], on_eof: DecodeError) -> DecodeError {
    match err {
        png::DecodingError::IoError(e) if e.kind() == io::ErrorKind::UnexpectedEof => on_eof,
        _ if is_cut_short(bytes) => on_eof,
        other => DecodeError::Malformed(other.to_string()),
    }
}

/// True when the chunk sequence ends inside a chunk or before `IEND`
fn is_cut_short(bytes: &[u8]) -> bool {
    let mut pos = PNG_SIGNATURE.len();
    loop {
        let Some(head) = bytes.get(pos..pos + 8) else {
            return true;
        };
        let length = u32::from_be_bytes([head[0], head[1], head[2], head[3]]) as usize;
        // length, type, data, crc
        let end = match pos.checked_add(12 + length) {
            Some(end) if end <= bytes.len() => end,
            _ => return true,
        };
        if &head[4..8] == b"IEND" {
            return false;
        }
        pos = end;
    }
}
