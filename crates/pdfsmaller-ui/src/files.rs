//! Browser file handles for the uploader core.
//!
//! [`FileRef`] wraps the Dioxus [`FileData`] handle with cached
//! metadata so the core's synchronous pipeline never touches the
//! asynchronous file API. The payload stays behind the handle and is
//! only read for the 8-byte signature sniff (and by consumers reacting
//! to events).

use dioxus::html::FileData;
use pdfsmaller_uploader::{FileLike, PrefixRead};

/// MIME type inferred from a file name's extension.
///
/// Browsers do not expose a reliable type for every dropped file, so
/// the accept filter works from the extension-derived type plus the
/// extension rules themselves.
#[must_use]
pub fn mime_for_name(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "tif" | "tiff" => Some("image/tiff"),
        "txt" => Some("text/plain"),
        "csv" => Some("text/csv"),
        "html" | "htm" => Some("text/html"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        "zip" => Some("application/zip"),
        "json" => Some("application/json"),
        _ => None,
    }
}

/// A user-provided file held by the uploader.
///
/// Created on intake, never mutated, destroyed on removal, clear, or
/// reset. Consumers reacting to events receive clones of the same
/// handle.
#[derive(Clone)]
pub struct FileRef {
    data: FileData,
    name: String,
    size: u64,
    mime: Option<&'static str>,
}

impl FileRef {
    /// Wrap a Dioxus file handle, caching its metadata.
    #[must_use]
    pub fn new(data: FileData) -> Self {
        let name = data.name();
        let size = data.size();
        let mime = mime_for_name(&name);
        Self {
            data,
            name,
            size,
            mime,
        }
    }

    /// The underlying payload accessor.
    #[must_use]
    pub const fn data(&self) -> &FileData {
        &self.data
    }

    /// Read the leading bytes for the PDF signature check.
    ///
    /// Read failures degrade to [`PrefixRead::Failed`]; the pipeline
    /// turns those into a warning, not a rejection.
    pub async fn read_prefix(&self) -> PrefixRead {
        match self.data.read_bytes().await {
            Ok(bytes) => {
                let bytes = bytes.to_vec();
                let len = bytes.len().min(pdfsmaller_uploader::validate::PDF_SNIFF_LEN);
                PrefixRead::Bytes(bytes[..len].to_vec())
            }
            Err(e) => PrefixRead::Failed(format!("{e}")),
        }
    }
}

impl FileLike for FileRef {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime
    }
}

impl PartialEq for FileRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.size == other.size
    }
}

impl std::fmt::Debug for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRef")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("mime", &self.mime)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_table_covers_the_product_formats() {
        assert_eq!(mime_for_name("report.pdf"), Some("application/pdf"));
        assert_eq!(mime_for_name("scan.PDF"), Some("application/pdf"));
        assert_eq!(mime_for_name("photo.jpeg"), Some("image/jpeg"));
        assert_eq!(mime_for_name("notes.txt"), Some("text/plain"));
        assert_eq!(mime_for_name("unknown.xyz"), None);
        assert_eq!(mime_for_name("no-extension"), None);
    }
}
