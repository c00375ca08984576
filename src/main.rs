use std::cell::RefCell;
use std::rc::Rc;

use fltk::{app, prelude::*};

use scan_bar::app::icons;
use scan_bar::app::messages::Message;
use scan_bar::app::settings::AppSettings;
use scan_bar::app::state::AppState;
use scan_bar::app::theme::{FileThemeBackend, ThemeStore};
use scan_bar::app::updater::{self, UpdateCheckResult};
use scan_bar::ui::dialogs::about::show_about_dialog;
use scan_bar::ui::dialogs::update::check_for_updates_ui;
use scan_bar::ui::main_window::build_main_window;
use scan_bar::ui::menu::build_menu;

fn main() {
    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let settings = Rc::new(RefCell::new(AppSettings::load()));

    // Icons must be registered before any widget referencing them is built;
    // the window and toolbar come right after.
    icons::register_builtin_icons();

    let theme = ThemeStore::new(Box::new(FileThemeBackend::default_path()));

    let mut widgets = build_main_window(&sender, theme.current());
    build_menu(&mut widgets.menu, &sender, theme.current().is_dark());

    let mut state = AppState::new(widgets, sender, settings.clone(), theme);
    // Fires immediately, painting the persisted theme before the first show.
    state.attach_theme_observer();
    state.widgets.wind.show();

    // Startup update check, at most once per day
    {
        let s = settings.borrow();
        if s.auto_check_updates && updater::should_check_now(s.last_update_check) {
            let channel = s.update_channel;
            let skipped = s.skipped_versions.clone();
            let version = env!("CARGO_PKG_VERSION").to_string();
            std::thread::spawn(move || {
                let result = match updater::check_for_updates(&version, channel, &skipped) {
                    UpdateCheckResult::UpdateAvailable(release) => Some(release),
                    _ => None,
                };
                sender.send(Message::BackgroundUpdateResult(result));
            });
        }
    }

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                Message::OpenImage => state.open_image(),
                Message::CaptureImage => state.capture_image(),
                Message::CaptureFinished(result) => state.capture_finished(result),
                Message::ClearWorkspace => state.clear_workspace(),

                Message::RecognizeText => state.recognize(),
                Message::OcrFinished(result) => state.ocr_finished(result),

                Message::TextEdited => state.refresh_barcode(),
                Message::CopyText => state.copy_text(),
                Message::ExportBarcode => state.export_barcode(),

                Message::ToggleDarkMode => state.toggle_dark_mode(),

                Message::OpenSettings => state.open_settings(),
                Message::ShowAbout => show_about_dialog(),
                Message::CheckForUpdates => check_for_updates_ui(&settings),

                Message::BackgroundUpdateResult(result) => {
                    {
                        let mut s = settings.borrow_mut();
                        s.last_update_check = updater::current_timestamp();
                        let _ = s.save();
                    }
                    if let Some(release) = result {
                        state.receive_background_update(release);
                    }
                }
                Message::ShowBannerUpdate => state.show_update_dialog(),
                Message::DismissBanner => state.dismiss_banner(),

                Message::FileQuit => app.quit(),
                Message::WindowClose => {
                    // ESC lands here too; with a banner up it dismisses the
                    // banner rather than the app.
                    if state.widgets.update_banner_frame.visible() {
                        state.dismiss_banner();
                    } else {
                        app.quit();
                    }
                }
            }
        }
    }
}
