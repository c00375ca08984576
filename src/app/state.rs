use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fltk::{
    app::Sender,
    dialog,
    enums::ColorDepth,
    image::{RgbImage, SharedImage},
    prelude::*,
};

use super::barcode;
use super::buffer_utils::buffer_text_no_leak;
use super::capture;
use super::icons::{self, ICON_SAD};
use super::messages::Message;
use super::ocr;
use super::settings::AppSettings;
use super::theme::ThemeStore;
use super::update_controller::{BannerWidgets, UpdateController};
use super::updater::ReleaseInfo;
use crate::ui::dialogs::settings_dialog::show_settings_dialog;
use crate::ui::file_dialogs::{ensure_png_extension, native_open_image_dialog, native_save_png_dialog};
use crate::ui::main_window::MainWidgets;
use crate::ui::theme::apply_theme;

/// Main application coordinator: owns the widget tree, the theme store and
/// the in-flight background work flags, and translates messages into state
/// changes.
pub struct AppState {
    pub widgets: MainWidgets,
    pub sender: Sender<Message>,
    pub settings: Rc<RefCell<AppSettings>>,
    pub theme: ThemeStore,
    pub update: UpdateController,
    source_image: Option<PathBuf>,
    ocr_running: bool,
    capture_running: bool,
}

impl AppState {
    pub fn new(
        widgets: MainWidgets,
        sender: Sender<Message>,
        settings: Rc<RefCell<AppSettings>>,
        theme: ThemeStore,
    ) -> Self {
        Self {
            widgets,
            sender,
            settings,
            theme,
            update: UpdateController::new(),
            source_image: None,
            ocr_running: false,
            capture_running: false,
        }
    }

    /// Subscribe the widget tree to the theme store. The observer fires
    /// immediately, which is what paints the initial theme.
    pub fn attach_theme_observer(&mut self) {
        let mut targets = self.widgets.clone();
        self.theme.subscribe(move |pref| apply_theme(&mut targets, pref));
    }

    pub fn recognized_text(&self) -> String {
        self.widgets
            .text_editor
            .buffer()
            .map(|b| buffer_text_no_leak(&b))
            .unwrap_or_default()
    }

    fn set_text(&mut self, text: &str) {
        if let Some(mut buffer) = self.widgets.text_editor.buffer() {
            buffer.set_text(text);
        }
    }

    fn set_status(&mut self, text: &str) {
        self.widgets.status_frame.set_image(None::<RgbImage>);
        self.widgets.status_frame.set_label(text);
        self.widgets.status_frame.redraw();
    }

    /// The empty-result state: a sad glyph next to the message.
    fn set_status_sad(&mut self, text: &str) {
        let image = icons::themed_image(ICON_SAD, self.theme.current(), 16);
        if let Some(image) = image {
            self.widgets.status_frame.set_image(Some(image));
        }
        self.widgets.status_frame.set_label(text);
        self.widgets.status_frame.redraw();
    }

    // --- Source image ---

    pub fn open_image(&mut self) {
        if let Some(path) = native_open_image_dialog() {
            self.load_source_image(Path::new(&path));
        }
    }

    pub fn load_source_image(&mut self, path: &Path) {
        match SharedImage::load(path) {
            Ok(mut image) => {
                let frame = &mut self.widgets.image_frame;
                image.scale(frame.w() - 8, frame.h() - 8, true, true);
                frame.set_image(Some(image));
                frame.set_label("");
                frame.redraw();

                self.source_image = Some(path.to_path_buf());
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_status(&format!("Loaded {}", name));
            }
            Err(e) => {
                dialog::alert_default(&format!("Error opening image: {}", e));
            }
        }
    }

    pub fn capture_image(&mut self) {
        if self.capture_running {
            return;
        }
        self.capture_running = true;
        self.set_status("Capturing from camera...");
        capture::spawn_capture(self.sender);
    }

    pub fn capture_finished(&mut self, result: Result<PathBuf, String>) {
        self.capture_running = false;
        match result {
            Ok(path) => self.load_source_image(&path),
            Err(e) => {
                self.set_status("Capture failed");
                dialog::alert_default(&format!("Camera capture failed: {}", e));
            }
        }
    }

    pub fn clear_workspace(&mut self) {
        if !self.recognized_text().is_empty() {
            let choice = dialog::choice2_default(
                "Clear the image and the recognized text?",
                "Clear",
                "Cancel",
                "",
            );
            if choice != Some(0) {
                return;
            }
        }

        self.source_image = None;
        self.widgets.image_frame.set_image(None::<SharedImage>);
        self.widgets.image_frame.set_label("Open or capture an image to begin");
        self.widgets.image_frame.redraw();
        self.set_text("");
        self.refresh_barcode();
        self.set_status("Ready");
    }

    // --- Recognition ---

    pub fn recognize(&mut self) {
        if self.ocr_running {
            return;
        }
        let Some(image) = self.source_image.clone() else {
            dialog::alert_default("Open or capture an image first.");
            return;
        };

        self.ocr_running = true;
        self.set_status("Recognizing text...");
        let language = self.settings.borrow().ocr_language.clone();
        ocr::spawn_recognition(self.sender, language, image);
    }

    pub fn ocr_finished(&mut self, result: Result<String, String>) {
        self.ocr_running = false;
        match result {
            Ok(text) if text.is_empty() => {
                self.set_text("");
                self.set_status_sad("No text recognized in this image");
            }
            Ok(text) => {
                let chars = text.chars().count();
                self.set_text(&text);
                self.set_status(&format!("Recognized {} characters", chars));
            }
            Err(e) => {
                self.set_status("Recognition failed");
                dialog::alert_default(&format!("Text recognition failed: {}", e));
            }
        }
    }

    // --- Barcode ---

    /// Re-render the preview from the current editor text. Called on every
    /// edit; an empty payload clears the pane instead of erroring.
    pub fn refresh_barcode(&mut self) {
        let text = self.recognized_text();
        let payload = barcode::sanitize_payload(&text);

        let frame = &mut self.widgets.barcode_frame;
        if payload.is_empty() {
            frame.set_image(None::<RgbImage>);
            frame.set_label("Barcode preview");
            frame.redraw();
            return;
        }

        let options = self.settings.borrow().barcode_options();
        match barcode::render(&text, &options) {
            Ok(bitmap) => {
                match RgbImage::new(
                    &bitmap.pixels,
                    bitmap.width as i32,
                    bitmap.height as i32,
                    ColorDepth::L8,
                ) {
                    Ok(mut image) => {
                        image.scale(
                            (frame.w() - 12).min(bitmap.width as i32),
                            (frame.h() - 12).min(bitmap.height as i32),
                            true,
                            true,
                        );
                        frame.set_image(Some(image));
                        frame.set_label("");
                    }
                    Err(e) => {
                        frame.set_image(None::<RgbImage>);
                        frame.set_label(&format!("Preview failed: {}", e));
                    }
                }
            }
            Err(e) => {
                frame.set_image(None::<RgbImage>);
                frame.set_label(&e.to_string());
            }
        }
        frame.redraw();
    }

    pub fn export_barcode(&mut self) {
        let text = self.recognized_text();
        if barcode::sanitize_payload(&text).is_empty() {
            dialog::alert_default("There is no text to encode yet. Recognize or type some first.");
            return;
        }

        let Some(path) = native_save_png_dialog() else {
            return;
        };
        let path = PathBuf::from(ensure_png_extension(path));

        let options = self.settings.borrow().barcode_options();
        let result = barcode::render(&text, &options)
            .and_then(|bitmap| barcode::export_png(&bitmap, &path));
        match result {
            Ok(()) => self.set_status(&format!("Exported {}", path.display())),
            Err(e) => dialog::alert_default(&format!("Error exporting barcode: {}", e)),
        }
    }

    pub fn copy_text(&mut self) {
        let text = self.recognized_text();
        if text.is_empty() {
            self.set_status("Nothing to copy");
        } else {
            fltk::app::copy(&text);
            self.set_status("Recognized text copied to clipboard");
        }
    }

    // --- View ---

    pub fn toggle_dark_mode(&mut self) {
        let pref = self.theme.toggle();
        self.update_menu_checkbox("View/Toggle Dark Mode", pref.is_dark());
    }

    fn update_menu_checkbox(&self, path: &str, checked: bool) {
        let idx = self.widgets.menu.find_index(path);
        if idx >= 0 {
            if let Some(mut item) = self.widgets.menu.at(idx) {
                if checked {
                    item.set();
                } else {
                    item.clear();
                }
            }
        }
    }

    // --- Settings ---

    pub fn open_settings(&mut self) {
        let current = self.settings.borrow().clone();
        if let Some(new_settings) = show_settings_dialog(&current) {
            if let Err(e) = new_settings.save() {
                dialog::alert_default(&format!("Failed to save settings: {}", e));
                return;
            }
            *self.settings.borrow_mut() = new_settings;
            // Module geometry may have changed
            self.refresh_barcode();
        }
    }

    // --- Update notifications ---

    pub fn receive_background_update(&mut self, release: ReleaseInfo) {
        let mut banner = BannerWidgets {
            banner_frame: &mut self.widgets.update_banner_frame,
            flex: &mut self.widgets.flex,
            window: &mut self.widgets.wind,
        };
        self.update.receive_update(release, &mut banner);
    }

    pub fn show_update_dialog(&mut self) {
        let mut banner = BannerWidgets {
            banner_frame: &mut self.widgets.update_banner_frame,
            flex: &mut self.widgets.flex,
            window: &mut self.widgets.wind,
        };
        self.update.show_update_dialog(&self.settings, &mut banner);
    }

    pub fn dismiss_banner(&mut self) {
        let mut banner = BannerWidgets {
            banner_frame: &mut self.widgets.update_banner_frame,
            flex: &mut self.widgets.flex,
            window: &mut self.widgets.wind,
        };
        self.update.dismiss_banner(&mut banner);
    }
}
