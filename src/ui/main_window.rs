use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, Color, Event, FrameType},
    frame::Frame,
    group::Flex,
    image::SvgImage,
    menu::MenuBar,
    prelude::*,
    text::{TextBuffer, TextEditor, WrapMode},
    window::Window,
};

use crate::app::icons::{
    self, ICON_CAMERA, ICON_DOWNLOAD, ICON_IMAGE, ICON_MOON, ICON_SCAN, ICON_TRASH,
};
use crate::app::messages::Message;
use crate::app::theme::ThemePreference;

pub const TOOLBAR_HEIGHT: i32 = 42;
pub const BARCODE_PANE_HEIGHT: i32 = 170;
pub const STATUS_BAR_HEIGHT: i32 = 26;

#[derive(Clone)]
pub struct Toolbar {
    pub row: Flex,
    pub open_btn: Button,
    pub capture_btn: Button,
    pub recognize_btn: Button,
    pub export_btn: Button,
    pub clear_btn: Button,
    pub theme_btn: Button,
}

#[derive(Clone)]
pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub toolbar: Toolbar,
    pub update_banner_frame: Frame,
    pub image_frame: Frame,
    pub text_editor: TextEditor,
    pub barcode_frame: Frame,
    pub status_frame: Frame,
}

fn icon_button(name: &str, fallback: &str, tooltip: &str, pref: ThemePreference) -> Button {
    let mut btn = Button::default();
    // A name nobody registered degrades to a text label, not a fault.
    match icons::themed_image(name, pref, 20) {
        Some(image) => btn.set_image(Some(image)),
        None => btn.set_label(fallback),
    }
    btn.set_tooltip(tooltip);
    btn.set_frame(FrameType::FlatBox);
    btn
}

pub fn build_main_window(sender: &Sender<Message>, pref: ThemePreference) -> MainWidgets {
    let mut wind = Window::new(100, 100, 900, 640, "ScanBar");
    wind.set_xclass("ScanBar");

    // Window icon from the registered set
    let icon_data = include_str!("../../assets/scanbar.svg");
    if let Ok(mut icon) = SvgImage::from_data(icon_data) {
        icon.scale(32, 32, true, true);
        #[cfg(target_os = "linux")]
        wind.set_icon(Some(icon));
    }

    let mut flex = Flex::new(0, 0, 900, 640, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    // Toolbar
    let mut row = Flex::default();
    row.set_type(fltk::group::FlexType::Row);
    row.set_margin(4);
    row.set_spacing(4);

    let open_btn = icon_button(ICON_IMAGE, "Open", "Open an image file", pref);
    row.fixed(&open_btn, 36);
    let capture_btn = icon_button(ICON_CAMERA, "Capture", "Capture from camera", pref);
    row.fixed(&capture_btn, 36);
    let recognize_btn = icon_button(ICON_SCAN, "Scan", "Recognize text in the image", pref);
    row.fixed(&recognize_btn, 36);
    let export_btn = icon_button(ICON_DOWNLOAD, "Export", "Export barcode as PNG", pref);
    row.fixed(&export_btn, 36);
    let clear_btn = icon_button(ICON_TRASH, "Clear", "Clear image and text", pref);
    row.fixed(&clear_btn, 36);

    // Flexible spacer pushes the theme toggle to the right edge
    let _spacer = Frame::default();

    let theme_btn = icon_button(ICON_MOON, "Theme", "Toggle light/dark mode", pref);
    row.fixed(&theme_btn, 36);

    row.end();
    flex.fixed(&row, TOOLBAR_HEIGHT);

    // Update notification banner (initially hidden)
    let mut update_banner_frame = Frame::default().with_size(0, 0);
    update_banner_frame.set_frame(FrameType::FlatBox);
    update_banner_frame.set_color(Color::from_rgb(255, 250, 205));
    update_banner_frame.set_label_color(Color::Black);
    update_banner_frame.set_label_size(13);
    update_banner_frame.hide();
    flex.fixed(&update_banner_frame, 0);

    // Content: source image on the left, text + barcode on the right
    let mut content = Flex::default();
    content.set_type(fltk::group::FlexType::Row);
    content.set_margin(6);
    content.set_spacing(6);

    let mut image_frame = Frame::default();
    image_frame.set_frame(FrameType::DownBox);
    image_frame.set_label("Open or capture an image to begin");
    image_frame.set_align(Align::Center | Align::Inside | Align::Wrap);

    let mut right = Flex::default();
    right.set_type(fltk::group::FlexType::Column);
    right.set_spacing(6);

    let mut text_editor = TextEditor::default();
    text_editor.set_buffer(TextBuffer::default());
    text_editor.wrap_mode(WrapMode::AtBounds, 0);

    let mut barcode_frame = Frame::default();
    barcode_frame.set_frame(FrameType::DownBox);
    barcode_frame.set_color(Color::White);
    barcode_frame.set_label("Barcode preview");
    barcode_frame.set_align(Align::Center | Align::Inside);
    right.fixed(&barcode_frame, BARCODE_PANE_HEIGHT);

    right.end();
    content.end();

    // Status line
    let mut status_frame = Frame::default();
    status_frame.set_align(Align::Left | Align::Inside);
    status_frame.set_label_size(12);
    status_frame.set_label("Ready");
    flex.fixed(&status_frame, STATUS_BAR_HEIGHT);

    flex.end();
    wind.resizable(&flex);

    let mut widgets = MainWidgets {
        wind,
        flex,
        menu,
        toolbar: Toolbar {
            row,
            open_btn,
            capture_btn,
            recognize_btn,
            export_btn,
            clear_btn,
            theme_btn,
        },
        update_banner_frame,
        image_frame,
        text_editor,
        barcode_frame,
        status_frame,
    };
    wire_callbacks(&mut widgets, sender);
    widgets
}

fn wire_callbacks(widgets: &mut MainWidgets, sender: &Sender<Message>) {
    let s = *sender;
    widgets.toolbar.open_btn.set_callback(move |_| s.send(Message::OpenImage));
    widgets.toolbar.capture_btn.set_callback(move |_| s.send(Message::CaptureImage));
    widgets.toolbar.recognize_btn.set_callback(move |_| s.send(Message::RecognizeText));
    widgets.toolbar.export_btn.set_callback(move |_| s.send(Message::ExportBarcode));
    widgets.toolbar.clear_btn.set_callback(move |_| s.send(Message::ClearWorkspace));
    widgets.toolbar.theme_btn.set_callback(move |_| s.send(Message::ToggleDarkMode));

    // Frames don't take callbacks; watch for clicks directly
    widgets.update_banner_frame.handle(move |_, ev| {
        if ev == Event::Push {
            s.send(Message::ShowBannerUpdate);
            true
        } else {
            false
        }
    });

    // Every edit of the recognized text regenerates the barcode preview.
    if let Some(mut buffer) = widgets.text_editor.buffer() {
        buffer.add_modify_callback(move |_pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted > 0 || deleted > 0 {
                s.send(Message::TextEdited);
            }
        });
    }

    widgets.wind.set_callback(move |_| s.send(Message::WindowClose));
}
