use fltk::{
    button::{Button, CheckButton},
    enums::Color,
    frame::Frame,
    input::Input,
    menu::Choice,
    prelude::*,
    window::Window,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::settings::AppSettings;
use crate::app::updater::UpdateChannel;

const MODULE_WIDTHS: [u32; 4] = [1, 2, 3, 4];
const BAR_HEIGHTS: [u32; 3] = [60, 80, 120];

/// Show settings dialog and return updated settings if user clicked Save.
pub fn show_settings_dialog(current_settings: &AppSettings) -> Option<AppSettings> {
    let mut dialog = Window::default()
        .with_size(350, 470)
        .with_label("Settings")
        .center_screen();
    dialog.make_modal(true);

    // Recognition section
    Frame::default().with_pos(15, 15).with_size(320, 25).with_label("Recognition:").with_align(fltk::enums::Align::Left | fltk::enums::Align::Inside);
    Frame::default().with_pos(30, 45).with_size(120, 25).with_label("Language code").with_align(fltk::enums::Align::Left | fltk::enums::Align::Inside);
    let mut language_input = Input::default().with_pos(160, 45).with_size(150, 25);
    language_input.set_value(&current_settings.ocr_language);
    language_input.set_tooltip("Passed to tesseract -l, e.g. eng, deu, fra");

    // Barcode section
    Frame::default().with_pos(15, 90).with_size(320, 25).with_label("Barcode:").with_align(fltk::enums::Align::Left | fltk::enums::Align::Inside);
    Frame::default().with_pos(30, 120).with_size(120, 25).with_label("Module width").with_align(fltk::enums::Align::Left | fltk::enums::Align::Inside);
    let mut width_choice = Choice::default().with_pos(160, 120).with_size(150, 25);
    for w in MODULE_WIDTHS {
        width_choice.add_choice(&format!("{} px", w));
    }
    width_choice.set_value(
        MODULE_WIDTHS
            .iter()
            .position(|w| *w == current_settings.barcode_module_width)
            .unwrap_or(1) as i32,
    );

    Frame::default().with_pos(30, 150).with_size(120, 25).with_label("Bar height").with_align(fltk::enums::Align::Left | fltk::enums::Align::Inside);
    let mut height_choice = Choice::default().with_pos(160, 150).with_size(150, 25);
    height_choice.add_choice("Short (60)");
    height_choice.add_choice("Medium (80)");
    height_choice.add_choice("Tall (120)");
    height_choice.set_value(
        BAR_HEIGHTS
            .iter()
            .position(|h| *h == current_settings.barcode_height)
            .unwrap_or(1) as i32,
    );

    // Updates section
    Frame::default().with_pos(15, 200).with_size(320, 25).with_label("Updates:").with_align(fltk::enums::Align::Left | fltk::enums::Align::Inside);
    let mut check_auto_update = CheckButton::default().with_pos(30, 230).with_size(280, 25).with_label("Automatically check for updates");
    check_auto_update.set_value(current_settings.auto_check_updates);

    let mut check_prerelease = CheckButton::default().with_pos(30, 255).with_size(280, 25).with_label("Include pre-releases (beta/rc)");
    check_prerelease.set_value(current_settings.update_channel == UpdateChannel::Beta);

    let mut info_frame = Frame::default().with_pos(30, 285).with_size(290, 35);
    info_frame.set_label("ScanBar checks GitHub once per day.\nNo personal data is sent.");
    info_frame.set_label_size(11);
    info_frame.set_label_color(Color::from_rgb(100, 100, 100));
    info_frame.set_align(fltk::enums::Align::Left | fltk::enums::Align::Inside | fltk::enums::Align::Wrap);

    // Buttons at bottom
    let mut save_btn = Button::default().with_pos(150, 420).with_size(90, 30).with_label("Save");
    let mut cancel_btn = Button::default().with_pos(250, 420).with_size(90, 30).with_label("Cancel");

    dialog.end();
    dialog.show();

    let result = Rc::new(RefCell::new(None));
    let result_save = result.clone();
    let result_cancel = result.clone();

    let dialog_save = dialog.clone();
    let current = current_settings.clone();
    save_btn.set_callback(move |_| {
        let language = language_input.value().trim().to_string();
        let new_settings = AppSettings {
            ocr_language: if language.is_empty() { current.ocr_language.clone() } else { language },
            barcode_module_width: MODULE_WIDTHS
                .get(width_choice.value().max(0) as usize)
                .copied()
                .unwrap_or(current.barcode_module_width),
            barcode_height: BAR_HEIGHTS
                .get(height_choice.value().max(0) as usize)
                .copied()
                .unwrap_or(current.barcode_height),
            auto_check_updates: check_auto_update.value(),
            update_channel: if check_prerelease.value() {
                UpdateChannel::Beta
            } else {
                UpdateChannel::Stable
            },
            last_update_check: current.last_update_check,
            skipped_versions: current.skipped_versions.clone(),
        };

        *result_save.borrow_mut() = Some(new_settings);
        dialog_save.clone().hide();
    });

    let dialog_cancel = dialog.clone();
    cancel_btn.set_callback(move |_| {
        *result_cancel.borrow_mut() = None;
        dialog_cancel.clone().hide();
    });

    super::run_dialog(&dialog);

    result.borrow().clone()
}
