use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::messages::Message;

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, initial_dark_mode: bool) {
    let s = sender;

    // File
    menu.add("File/Open Image...", Shortcut::Ctrl | 'o', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenImage) });
    menu.add("File/Capture from Camera", Shortcut::Ctrl | 'k', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::CaptureImage) });
    menu.add("File/Export Barcode...", Shortcut::Ctrl | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ExportBarcode) });
    menu.add("File/Settings...", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenSettings) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileQuit) });

    // Scan
    menu.add("Scan/Recognize Text", Shortcut::Ctrl | 'r', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::RecognizeText) });
    menu.add("Scan/Clear Workspace", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ClearWorkspace) });

    // Edit
    menu.add("Edit/Copy Recognized Text", Shortcut::Ctrl | Shortcut::Shift | 'c', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::CopyText) });

    // View
    let dm_flag = if initial_dark_mode { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Toggle Dark Mode", Shortcut::None, dm_flag, { let s = *s; move |_| s.send(Message::ToggleDarkMode) });

    // Help
    menu.add("Help/About ScanBar", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowAbout) });
    menu.add("Help/Check for Updates...", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::CheckForUpdates) });
}
