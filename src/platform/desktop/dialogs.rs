use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

pub fn notify(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn pick_export_path(default_file_name: &str) -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("CSV", &["csv"])
        .set_file_name(default_file_name)
        .save_file()
}
