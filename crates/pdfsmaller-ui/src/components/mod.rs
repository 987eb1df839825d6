//! Dioxus components for the PDFSmaller uploader.
//!
//! Provides the dual-mode file uploader, its switch-role mode toggle,
//! and the removable file list.

mod file_list;
mod toggle;
mod uploader;

pub use file_list::FileList;
pub use toggle::ModeToggle;
pub use uploader::{FileUploader, FileUploaderProps, open_file_dialog};
