/// Read text from an FLTK TextBuffer without leaking the C-allocated copy.
///
/// fltk-rs's `TextBuffer::text()` copies a `malloc()`'d C string into a
/// String but never frees the original pointer, leaking the buffer size on
/// every call. The barcode preview re-reads the buffer on every keystroke,
/// so this calls the FFI directly and frees the C allocation itself.
pub fn buffer_text_no_leak(buf: &fltk::text::TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: buf is a valid TextBuffer and FLTK is initialized before any
    // buffer exists. Fl_Text_Buffer_text returns a malloc'd, null-terminated
    // C string (or null when empty); we copy it out and free the allocation,
    // matching FLTK's malloc.
    unsafe {
        let inner = buf.as_ptr() as *mut std::ffi::c_void;
        let ptr = Fl_Text_Buffer_text(inner);
        if ptr.is_null() {
            return String::new();
        }
        let cstr = std::ffi::CStr::from_ptr(ptr);
        let result = cstr.to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        result
    }
}
