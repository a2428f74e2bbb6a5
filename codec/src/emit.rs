//! C source emission for a quantized image.
//!
//! Output layout:
//!
//! ```text
//! /* Autogenerated with png2c 0.1.0 on 2026-01-01T00:00:00Z
//!    Input file logo.png
//!    Metadata: w: 2, h: 1, color type: 6, bit depth: 8, num passes: 1 */
//!
//! const struct {
//!   unsigned int   width;
//!   unsigned int   height;
//!   unsigned char  pixel_data[];
//! } image = {
//!   2, 1,
//!   0x00, 0xf8,
//!   0xe0, 0x07,
//! };
//! ```
//!
//! The payload walks columns in the outer loop and rows in the inner loop,
//! so each output line holds one image column. Consumers of existing
//! generated arrays rely on that order.

use std::fmt::{self, Write};

use crate::image::{DecodedImage, Rgba8};
use crate::report::Reporter;

/// Provenance written into the leading comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub tool: String,
    pub version: String,
    pub timestamp: String,
    pub input_name: String,
}

impl Header {
    pub fn new(
        tool: impl Into<String>,
        version: impl Into<String>,
        timestamp: impl Into<String>,
        input_name: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            version: version.into(),
            timestamp: timestamp.into(),
            input_name: input_name.into(),
        }
    }
}

/// The metadata line as it appears both in the header and in diagnostics
pub fn metadata_line(image: &DecodedImage) -> String {
    format!(
        "w: {}, h: {}, color type: {}, bit depth: {}, num passes: {}",
        image.width,
        image.height,
        image.color_type.code(),
        image.bit_depth,
        image.num_passes
    )
}

/// Write the complete literal for an RGBA8 image into `out`.
pub fn write_literal<W, R>(
    out: &mut W,
    header: &Header,
    rgba: Rgba8<'_>,
    name: &str,
    reporter: &mut R,
) -> fmt::Result
where
    W: Write + ?Sized,
    R: Reporter + ?Sized,
{
    let image = rgba.image();
    writeln!(
        out,
        "/* Autogenerated with {} {} on {}",
        header.tool, header.version, header.timestamp
    )?;
    writeln!(out, "   Input file {}", header.input_name)?;
    writeln!(out, "   Metadata: {} */", metadata_line(image))?;
    writeln!(out)?;

    writeln!(out, "const struct {{")?;
    writeln!(out, "  unsigned int   width;")?;
    writeln!(out, "  unsigned int   height;")?;
    writeln!(out, "  unsigned char  pixel_data[];")?;
    writeln!(out, "}} {} = {{", name)?;
    writeln!(out, "  {}, {},", rgba.width(), rgba.height())?;

    for x in 0..rgba.width() {
        out.write_str("  ")?;
        for y in 0..rgba.height() {
            if y > 0 {
                out.write_char(' ')?;
            }
            let [lo, hi] = rgba.pixel565(x, y).to_le_bytes();
            write!(out, "0x{:02x}, 0x{:02x},", lo, hi)?;
        }
        out.write_char('\n')?;
        reporter.column_done(x, rgba.width());
    }

    writeln!(out, "}};")
}

/// Render the literal into a fresh string
pub fn render_literal<R: Reporter + ?Sized>(
    header: &Header,
    rgba: Rgba8<'_>,
    name: &str,
    reporter: &mut R,
) -> String {
    // hex pair plus separators per pixel, plus fixed preamble
    let mut text = String::with_capacity(rgba.image().pixel_count() * 12 + 512);
    write_literal(&mut text, header, rgba, name, reporter)
        .expect("writing to a String cannot fail");
    text
}
