use fltk::dialog;

/// Raster formats FLTK can decode for the source preview.
pub const IMAGE_PATTERN: &str = "*.{png,jpg,jpeg,bmp,gif}";

pub fn native_open_image_dialog() -> Option<String> {
    dialog::file_chooser("Open Image", IMAGE_PATTERN, ".", false)
}

pub fn native_save_png_dialog() -> Option<String> {
    dialog::file_chooser("Export Barcode", "*.png", ".", false)
}

/// Append `.png` when the user typed a bare name in the save dialog.
pub fn ensure_png_extension(path: String) -> String {
    if path.to_ascii_lowercase().ends_with(".png") {
        path
    } else {
        format!("{}.png", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_png_extension_appends() {
        assert_eq!(ensure_png_extension("barcode".to_string()), "barcode.png");
        assert_eq!(ensure_png_extension("out.PNG".to_string()), "out.PNG");
        assert_eq!(ensure_png_extension("a/b.png".to_string()), "a/b.png");
    }
}
