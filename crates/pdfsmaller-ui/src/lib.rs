//! pdfsmaller-ui: Browser I/O and Dioxus components for the PDFSmaller
//! uploader.
//!
//! Handles session-storage preference persistence, ARIA live regions,
//! DOM `CustomEvent` dispatch, the reduced-motion probe, and the file
//! uploader component family. The uploader's semantics live in the
//! pure `pdfsmaller-uploader` crate; this crate supplies its browser
//! host.

pub mod components;
pub mod dispatch;
pub mod files;
pub mod live_region;
pub mod motion;
pub mod storage;

pub use components::{FileList, FileUploader, FileUploaderProps, ModeToggle};
pub use files::FileRef;
pub use live_region::Assertiveness;
pub use storage::SessionBackend;
