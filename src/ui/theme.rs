use fltk::{enums::Color, prelude::*};

use crate::app::icons::{
    self, ICON_CAMERA, ICON_DOWNLOAD, ICON_IMAGE, ICON_MOON, ICON_SCAN, ICON_SUN, ICON_TRASH,
};
use crate::app::theme::ThemePreference;
use super::main_window::MainWidgets;

/// Restyle the whole widget tree for the given preference. This is the
/// presentation side effect of a theme change: the theme store notifies,
/// this repaints. External style state lives nowhere else.
pub fn apply_theme(widgets: &mut MainWidgets, pref: ThemePreference) {
    if pref.is_dark() {
        // Dark mode colors
        widgets.wind.set_color(Color::from_rgb(25, 25, 25));
        widgets.wind.set_label_color(Color::from_rgb(220, 220, 220));
        widgets.menu.set_color(Color::from_rgb(35, 35, 35));
        widgets.menu.set_text_color(Color::from_rgb(220, 220, 220));
        widgets.menu.set_selection_color(Color::from_rgb(60, 60, 60));
        widgets.text_editor.set_color(Color::from_rgb(30, 30, 30));
        widgets.text_editor.set_text_color(Color::from_rgb(220, 220, 220));
        widgets.text_editor.set_cursor_color(Color::from_rgb(255, 255, 255));
        widgets.text_editor.set_selection_color(Color::from_rgb(70, 70, 100));
        widgets.image_frame.set_color(Color::from_rgb(35, 35, 35));
        widgets.image_frame.set_label_color(Color::from_rgb(150, 150, 150));
        widgets.status_frame.set_label_color(Color::from_rgb(180, 180, 180));
        widgets.update_banner_frame.set_color(Color::from_rgb(139, 128, 0));
        widgets.update_banner_frame.set_label_color(Color::White);
        widgets.toolbar.row.set_color(Color::from_rgb(35, 35, 35));
    } else {
        // Light mode colors
        widgets.wind.set_color(Color::from_rgb(240, 240, 240));
        widgets.wind.set_label_color(Color::Black);
        widgets.menu.set_color(Color::from_rgb(240, 240, 240));
        widgets.menu.set_text_color(Color::Black);
        widgets.menu.set_selection_color(Color::from_rgb(200, 200, 200));
        widgets.text_editor.set_color(Color::White);
        widgets.text_editor.set_text_color(Color::Black);
        widgets.text_editor.set_cursor_color(Color::Black);
        widgets.text_editor.set_selection_color(Color::from_rgb(173, 216, 230));
        widgets.image_frame.set_color(Color::from_rgb(228, 228, 228));
        widgets.image_frame.set_label_color(Color::from_rgb(100, 100, 100));
        widgets.status_frame.set_label_color(Color::from_rgb(60, 60, 60));
        widgets.update_banner_frame.set_color(Color::from_rgb(255, 250, 205));
        widgets.update_banner_frame.set_label_color(Color::Black);
        widgets.toolbar.row.set_color(Color::from_rgb(240, 240, 240));
    }

    // The barcode pane stays white in both modes - the exported PNG has a
    // white background and the preview should match it.
    widgets.barcode_frame.set_color(Color::White);
    widgets.barcode_frame.set_label_color(Color::from_rgb(120, 120, 120));

    retint_toolbar(widgets, pref);

    #[cfg(target_os = "windows")]
    set_windows_titlebar_theme(&widgets.wind, pref.is_dark());

    widgets.text_editor.redraw();
    widgets.menu.redraw();
    widgets.wind.redraw();
}

fn retint_toolbar(widgets: &mut MainWidgets, pref: ThemePreference) {
    let bg = if pref.is_dark() {
        Color::from_rgb(35, 35, 35)
    } else {
        Color::from_rgb(240, 240, 240)
    };

    let buttons = [
        (&mut widgets.toolbar.open_btn, ICON_IMAGE),
        (&mut widgets.toolbar.capture_btn, ICON_CAMERA),
        (&mut widgets.toolbar.recognize_btn, ICON_SCAN),
        (&mut widgets.toolbar.export_btn, ICON_DOWNLOAD),
        (&mut widgets.toolbar.clear_btn, ICON_TRASH),
    ];
    for (btn, name) in buttons {
        btn.set_color(bg);
        if let Some(image) = icons::themed_image(name, pref, 20) {
            btn.set_image(Some(image));
        }
        btn.redraw();
    }

    // The toggle button advertises the mode it switches to.
    let next_icon = if pref.is_dark() { ICON_SUN } else { ICON_MOON };
    widgets.toolbar.theme_btn.set_color(bg);
    if let Some(image) = icons::themed_image(next_icon, pref, 20) {
        widgets.toolbar.theme_btn.set_image(Some(image));
    }
    widgets.toolbar.theme_btn.redraw();
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &fltk::window::Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWINDOWATTRIBUTE};

    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);

        let on: i32 = if is_dark { 1 } else { 0 };

        // Attribute 20 (Windows 11 / Windows 10 2004+), then 19 (1809-1903)
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(20), // DWMWA_USE_IMMERSIVE_DARK_MODE
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(19),
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );
    }
}
