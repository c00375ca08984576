use fltk::{
    button::Button,
    dialog,
    enums::Font,
    frame::Frame,
    group::Flex,
    prelude::*,
    text::{TextBuffer, TextEditor, WrapMode},
    window::Window,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::settings::AppSettings;
use crate::app::updater::{self, UpdateCheckResult};

/// Check for updates and show UI dialog (manual check)
pub fn check_for_updates_ui(settings: &Rc<RefCell<AppSettings>>) {
    let current_version = env!("CARGO_PKG_VERSION");
    let settings_borrowed = settings.borrow();
    let channel = settings_borrowed.update_channel;
    let skipped = settings_borrowed.skipped_versions.clone();
    drop(settings_borrowed);

    let result = updater::check_for_updates(current_version, channel, &skipped);

    match result {
        UpdateCheckResult::UpdateAvailable(release) => {
            show_update_available_dialog(release, settings);
        }
        UpdateCheckResult::NoUpdate => {
            dialog::message_default(&format!(
                "\u{2705} You're up to date!\n\nScanBar {} is the latest version.",
                current_version
            ));
        }
        UpdateCheckResult::Error(err) => {
            dialog::alert_default(&format!(
                "Failed to check for updates:\n\n{}\n\nPlease try again later.",
                err
            ));
        }
    }

    let mut settings_mut = settings.borrow_mut();
    settings_mut.last_update_check = updater::current_timestamp();
    let _ = settings_mut.save();
}

/// Show update available dialog with options
pub fn show_update_available_dialog(release: updater::ReleaseInfo, settings: &Rc<RefCell<AppSettings>>) {
    let current_version = env!("CARGO_PKG_VERSION");

    let mut dialog = Window::new(100, 100, 480, 400, "Update Available");
    dialog.make_modal(true);

    let mut flex = Flex::new(10, 10, 460, 380, None);
    flex.set_type(fltk::group::FlexType::Column);
    flex.set_spacing(10);

    let mut title = Frame::default().with_label("ScanBar Update Available");
    title.set_label_size(18);
    title.set_label_font(Font::HelveticaBold);
    flex.fixed(&title, 30);

    let version_text = format!(
        "Current version: {}\nLatest version:  {}",
        current_version,
        release.version()
    );
    let mut version_frame = Frame::default().with_label(&version_text);
    version_frame.set_label_size(14);
    flex.fixed(&version_frame, 50);

    let mut notes_label = Frame::default().with_label("What's new:");
    notes_label.set_label_size(14);
    notes_label.set_label_font(Font::HelveticaBold);
    flex.fixed(&notes_label, 25);

    let mut notes_editor = TextEditor::default();
    notes_editor.set_buffer(TextBuffer::default());
    if let Some(mut buffer) = notes_editor.buffer() {
        buffer.set_text(&release.body);
    }
    notes_editor.wrap_mode(WrapMode::AtBounds, 0);

    // Buttons row
    let mut button_row = Flex::default();
    button_row.set_type(fltk::group::FlexType::Row);
    button_row.set_spacing(10);

    let mut view_btn = Button::default().with_label("View on GitHub");
    let mut skip_btn = Button::default().with_label("Skip This Version");
    let mut later_btn = Button::default().with_label("Remind Later");

    button_row.end();
    flex.fixed(&button_row, 35);

    flex.end();
    dialog.end();

    // View on GitHub button
    let release_url = release.html_url.clone();
    view_btn.set_callback(move |_| {
        if let Err(e) = open::that(&release_url) {
            dialog::alert_default(&format!("Failed to open browser: {}", e));
        }
    });

    // Skip button
    let settings_skip = settings.clone();
    let version_to_skip = release.version();
    let mut dialog_skip = dialog.clone();
    skip_btn.set_callback(move |_| {
        let mut settings_mut = settings_skip.borrow_mut();
        if !settings_mut.skipped_versions.contains(&version_to_skip) {
            settings_mut.skipped_versions.push(version_to_skip.clone());
            let _ = settings_mut.save();
        }
        dialog_skip.hide();
    });

    // Later button
    let mut dialog_later = dialog.clone();
    later_btn.set_callback(move |_| {
        dialog_later.hide();
    });

    dialog.show();
    super::run_dialog(&dialog);
}
