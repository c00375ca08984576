use std::path::Path;

use barcoders::sym::code128::Code128;

use super::error::{AppError, Result};

/// Code 128 character set B selector, required by the encoder as the first
/// character of the payload. Charset B covers the printable ASCII range,
/// which is exactly what [`sanitize_payload`] produces.
const CHARSET_B: char = '\u{0181}';

const WHITE: u8 = 255;
const BLACK: u8 = 0;

/// Raster parameters for turning encoded modules into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarcodeOptions {
    /// Width of a single module in pixels.
    pub module_width: u32,
    /// Bar height in pixels.
    pub height: u32,
    /// Quiet zone on each side, in modules.
    pub quiet_zone: u32,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            module_width: 2,
            height: 80,
            quiet_zone: 10,
        }
    }
}

/// A rendered barcode: row-major 8-bit grayscale, 0 = bar, 255 = background.
#[derive(Debug, Clone)]
pub struct BarcodeBitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Reduce arbitrary recognized text to a Code 128 charset B payload:
/// whitespace runs (including newlines) become single spaces, characters
/// outside printable ASCII are dropped. May return an empty string, which
/// callers surface as the "nothing to encode" state.
pub fn sanitize_payload(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if !('\u{20}'..='\u{7e}').contains(&c) {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    out
}

/// Encode a sanitized payload into Code 128 modules (one `u8` per module,
/// 1 = bar, 0 = space).
pub fn encode(payload: &str) -> Result<Vec<u8>> {
    if payload.is_empty() {
        return Err(AppError::Barcode("nothing to encode".to_string()));
    }
    let data = format!("{}{}", CHARSET_B, payload);
    let barcode = Code128::new(data.as_str()).map_err(|_| {
        AppError::Barcode(format!(
            "text cannot be encoded as Code 128 ({} characters)",
            payload.len()
        ))
    })?;
    Ok(barcode.encode())
}

/// Sanitize, encode and rasterize in one step.
pub fn render(text: &str, options: &BarcodeOptions) -> Result<BarcodeBitmap> {
    let payload = sanitize_payload(text);
    let modules = encode(&payload)?;

    let width = (modules.len() as u32 + 2 * options.quiet_zone) * options.module_width;
    let height = options.height;

    let mut row = Vec::with_capacity(width as usize);
    for _ in 0..options.quiet_zone * options.module_width {
        row.push(WHITE);
    }
    for module in &modules {
        let value = if *module == 1 { BLACK } else { WHITE };
        for _ in 0..options.module_width {
            row.push(value);
        }
    }
    for _ in 0..options.quiet_zone * options.module_width {
        row.push(WHITE);
    }
    debug_assert_eq!(row.len(), width as usize);

    let mut pixels = Vec::with_capacity((width * height) as usize);
    for _ in 0..height {
        pixels.extend_from_slice(&row);
    }

    Ok(BarcodeBitmap { width, height, pixels })
}

/// Write a rendered barcode to `path` as a PNG.
pub fn export_png(bitmap: &BarcodeBitmap, path: &Path) -> Result<()> {
    let buffer = image::GrayImage::from_raw(bitmap.width, bitmap.height, bitmap.pixels.clone())
        .ok_or_else(|| AppError::Barcode("bitmap dimensions out of sync".to_string()))?;
    buffer.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(sanitize_payload("HELLO   WORLD"), "HELLO WORLD");
        assert_eq!(sanitize_payload("line one\nline two"), "line one line two");
        assert_eq!(sanitize_payload("\t tabbed \r\n"), "tabbed");
    }

    #[test]
    fn test_sanitize_drops_non_ascii() {
        assert_eq!(sanitize_payload("caf\u{e9} 42"), "caf 42");
        assert_eq!(sanitize_payload("\u{1f980}\u{1f980}"), "");
    }

    #[test]
    fn test_encode_empty_payload_is_an_error() {
        assert!(matches!(encode(""), Err(AppError::Barcode(_))));
        assert!(matches!(render("\n\n", &BarcodeOptions::default()), Err(AppError::Barcode(_))));
    }

    #[test]
    fn test_encode_produces_modules() {
        let modules = encode("SCANBAR-01").unwrap();
        assert!(!modules.is_empty());
        assert!(modules.iter().all(|m| *m == 0 || *m == 1));
        // Any Code 128 symbol both starts and ends with a bar.
        assert_eq!(modules.first(), Some(&1));
        assert_eq!(modules.last(), Some(&1));
    }

    #[test]
    fn test_render_dimensions_follow_options() {
        let options = BarcodeOptions {
            module_width: 3,
            height: 50,
            quiet_zone: 4,
        };
        let modules = encode("TEST").unwrap();
        let bitmap = render("TEST", &options).unwrap();

        assert_eq!(bitmap.width, (modules.len() as u32 + 8) * 3);
        assert_eq!(bitmap.height, 50);
        assert_eq!(bitmap.pixels.len(), (bitmap.width * bitmap.height) as usize);
    }

    #[test]
    fn test_render_has_quiet_zones_and_bars() {
        let options = BarcodeOptions::default();
        let bitmap = render("QUIET", &options).unwrap();
        let row = &bitmap.pixels[..bitmap.width as usize];

        let quiet = (options.quiet_zone * options.module_width) as usize;
        assert!(row[..quiet].iter().all(|p| *p == WHITE));
        assert!(row[row.len() - quiet..].iter().all(|p| *p == WHITE));
        assert!(row.iter().any(|p| *p == BLACK));
    }

    #[test]
    fn test_rows_are_identical() {
        let bitmap = render("ROWS", &BarcodeOptions::default()).unwrap();
        let w = bitmap.width as usize;
        let first = &bitmap.pixels[..w];
        let last = &bitmap.pixels[bitmap.pixels.len() - w..];
        assert_eq!(first, last);
    }

    #[test]
    fn test_export_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("barcode.png");

        let bitmap = render("EXPORT-7", &BarcodeOptions::default()).unwrap();
        export_png(&bitmap, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
